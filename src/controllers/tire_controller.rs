use crate::dto::api_response::ApiResponse;
use crate::dto::tire_dto::{
    CreateTireRequest, TireCheckReport, TripTireCheckRequest, TripTireCheckResponse, UpdateTireRequest,
};
use crate::models::{Tire, VehicleKind};
use crate::repositories::{TireRepository, TrailerRepository, TruckRepository};
use crate::services::TireWearService;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TireController {
    repository: TireRepository,
    trucks: TruckRepository,
    trailers: TrailerRepository,
    wear: TireWearService,
}

impl TireController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TireRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool.clone()),
            trailers: TrailerRepository::new(pool.clone()),
            wear: TireWearService::new(pool),
        }
    }

    pub async fn create(&self, request: CreateTireRequest) -> Result<ApiResponse<Tire>, AppError> {
        request.validate()?;
        self.ensure_vehicle(request.vehicle_kind, request.vehicle_id).await?;

        if self
            .repository
            .position_exists(request.vehicle_id, &request.position, None)
            .await?
        {
            return Err(AppError::Duplicate("Position already taken on this vehicle".to_string()));
        }

        let tire = self.repository.create(request).await?;
        tracing::info!(
            "🛞 Neumático {} montado en {} {} ({})",
            tire.id,
            tire.vehicle_kind.as_str(),
            tire.vehicle_id,
            tire.position
        );

        Ok(ApiResponse::success_with_message(tire, "Tire created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<Tire>, AppError> {
        let tire = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tire", id))?;

        Ok(ApiResponse::success(tire))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Tire>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }

    pub async fn list_critical(&self) -> Result<ApiResponse<Vec<Tire>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_critical().await?))
    }

    pub async fn list_by_vehicle(&self, kind: &str, vehicle_id: Uuid) -> Result<ApiResponse<Vec<Tire>>, AppError> {
        let kind = VehicleKind::from_str(kind)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown vehicle kind '{}'", kind)))?;
        self.ensure_vehicle(kind, vehicle_id).await?;

        Ok(ApiResponse::success(
            self.repository.find_by_vehicle(kind, vehicle_id).await?,
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateTireRequest) -> Result<ApiResponse<Tire>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Tire", id))?;

        if let Some(position) = &request.position {
            if self
                .repository
                .position_exists(current.vehicle_id, position, Some(id))
                .await?
            {
                return Err(AppError::Duplicate("Position already taken on this vehicle".to_string()));
            }
        }

        let tire = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Tire", id))?;

        Ok(ApiResponse::success_with_message(tire, "Tire updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Tire", id));
        }

        Ok(ApiResponse::message("Tire deleted"))
    }

    pub async fn check_all(&self) -> Result<ApiResponse<TireCheckReport>, AppError> {
        let report = self.wear.check_all().await?;
        let message = format!("{} tire(s) newly flagged as critical", report.newly_critical.len());
        Ok(ApiResponse::success_with_message(report, message))
    }

    pub async fn check_trip(&self, request: TripTireCheckRequest) -> Result<ApiResponse<TripTireCheckResponse>, AppError> {
        request.validate()?;
        self.ensure_vehicle(VehicleKind::Truck, request.truck_id).await?;
        if let Some(trailer_id) = request.trailer_id {
            self.ensure_vehicle(VehicleKind::Trailer, trailer_id).await?;
        }

        let response = self
            .wear
            .check_trip(request.truck_id, request.trailer_id, request.distance)
            .await?;

        if !response.safe {
            tracing::warn!(
                "⚠️ Un trayecto de {} km dejaría neumáticos críticos en el camión {}",
                request.distance,
                request.truck_id
            );
        }

        Ok(ApiResponse::success(response))
    }

    async fn ensure_vehicle(&self, kind: VehicleKind, id: Uuid) -> Result<(), AppError> {
        let exists = match kind {
            VehicleKind::Truck => self.trucks.find_by_id(id).await?.is_some(),
            VehicleKind::Trailer => self.trailers.find_by_id(id).await?.is_some(),
        };

        if exists {
            Ok(())
        } else {
            match kind {
                VehicleKind::Truck => Err(not_found_error("Truck", id)),
                VehicleKind::Trailer => Err(not_found_error("Trailer", id)),
            }
        }
    }
}
