use crate::dto::api_response::ApiResponse;
use crate::dto::truck_dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::Truck;
use crate::repositories::TruckRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TruckController {
    repository: TruckRepository,
}

impl TruckController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TruckRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateTruckRequest) -> Result<ApiResponse<Truck>, AppError> {
        request.validate()?;

        if self.repository.registration_exists(&request.registration, None).await? {
            return Err(AppError::Duplicate("Registration number already exists".to_string()));
        }

        let truck = self.repository.create(request).await?;
        tracing::info!("🚛 Camión creado: {} ({} {})", truck.registration, truck.brand, truck.model);

        Ok(ApiResponse::success_with_message(truck, "Truck created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<Truck>, AppError> {
        let truck = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;

        Ok(ApiResponse::success(truck))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Truck>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }

    pub async fn list_available(&self) -> Result<ApiResponse<Vec<Truck>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_available().await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateTruckRequest) -> Result<ApiResponse<Truck>, AppError> {
        request.validate()?;

        if let Some(registration) = &request.registration {
            if self.repository.registration_exists(registration, Some(id)).await? {
                return Err(AppError::Duplicate("Registration number already exists".to_string()));
            }
        }

        let truck = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;

        Ok(ApiResponse::success_with_message(truck, "Truck updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Truck", id));
        }

        tracing::info!("🗑️ Camión {} eliminado", id);
        Ok(ApiResponse::message("Truck deleted"))
    }
}
