use crate::dto::api_response::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripResponse, UpdateTripRequest};
use crate::middleware::AuthenticatedUser;
use crate::repositories::TripRepository;
use crate::services::TripService;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TripController {
    repository: TripRepository,
    service: TripService,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            service: TripService::new(pool),
        }
    }

    pub async fn create(&self, request: CreateTripRequest) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;
        let trip = self.service.create(request).await?;
        Ok(ApiResponse::success_with_message(TripResponse::from(trip), "Trip created"))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<TripResponse>>, AppError> {
        let trips = self.repository.find_all().await?;
        Ok(ApiResponse::success(trips.into_iter().map(TripResponse::from).collect()))
    }

    pub async fn list_mine(&self, driver_id: Uuid) -> Result<ApiResponse<Vec<TripResponse>>, AppError> {
        let trips = self.repository.find_by_driver(driver_id).await?;
        Ok(ApiResponse::success(trips.into_iter().map(TripResponse::from).collect()))
    }

    pub async fn get_by_id(&self, id: Uuid, actor: &AuthenticatedUser) -> Result<ApiResponse<TripResponse>, AppError> {
        let trip = self.service.find_visible(id, actor).await?;
        Ok(ApiResponse::success(TripResponse::from(trip)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTripRequest,
        actor: &AuthenticatedUser,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;
        let trip = self.service.update(id, request, actor).await?;
        Ok(ApiResponse::success_with_message(TripResponse::from(trip), "Trip updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Trip", id));
        }

        tracing::info!("🗑️ Trayecto {} eliminado", id);
        Ok(ApiResponse::message("Trip deleted"))
    }
}
