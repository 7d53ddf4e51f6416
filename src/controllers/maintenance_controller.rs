use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::{CreateMaintenanceRequest, MaintenanceStats, UpdateMaintenanceRequest};
use crate::models::{MaintenanceRecord, MaintenanceStatus};
use crate::repositories::{MaintenanceRepository, TruckRepository};
use crate::utils::errors::{not_found_error, AppError};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    trucks: TruckRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        mut request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceRecord>, AppError> {
        request.validate()?;

        if self.trucks.find_by_id(request.truck_id).await?.is_none() {
            return Err(not_found_error("Truck", request.truck_id));
        }

        if request.status == MaintenanceStatus::Completed {
            request.performed_at.get_or_insert_with(Utc::now);
        }

        let record = self.repository.create(request).await?;
        self.sync_truck(&record).await?;
        tracing::info!("🔧 Intervención {:?} registrada para el camión {}", record.kind, record.truck_id);

        Ok(ApiResponse::success_with_message(record, "Maintenance record created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<MaintenanceRecord>, AppError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance record", id))?;

        Ok(ApiResponse::success(record))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<MaintenanceRecord>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }

    pub async fn list_by_truck(&self, truck_id: Uuid) -> Result<ApiResponse<Vec<MaintenanceRecord>>, AppError> {
        if self.trucks.find_by_id(truck_id).await?.is_none() {
            return Err(not_found_error("Truck", truck_id));
        }
        Ok(ApiResponse::success(self.repository.find_by_truck(truck_id).await?))
    }

    pub async fn upcoming(&self) -> Result<ApiResponse<Vec<MaintenanceRecord>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_upcoming().await?))
    }

    pub async fn overdue(&self) -> Result<ApiResponse<Vec<MaintenanceRecord>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_overdue().await?))
    }

    pub async fn stats(&self) -> Result<ApiResponse<MaintenanceStats>, AppError> {
        Ok(ApiResponse::success(self.repository.stats().await?))
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceRecord>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance record", id))?;

        if request.status == Some(MaintenanceStatus::Completed) && current.performed_at.is_none() {
            request.performed_at.get_or_insert_with(Utc::now);
        }

        let record = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Maintenance record", id))?;
        self.sync_truck(&record).await?;

        Ok(ApiResponse::success_with_message(record, "Maintenance record updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Maintenance record", id));
        }

        Ok(ApiResponse::message("Maintenance record deleted"))
    }

    /// Una intervención completada actualiza la fecha de último mantenimiento del camión
    async fn sync_truck(&self, record: &MaintenanceRecord) -> Result<(), AppError> {
        if record.status == MaintenanceStatus::Completed {
            if let Some(performed_at) = record.performed_at {
                self.trucks.record_maintenance(record.truck_id, performed_at).await?;
            }
        }
        Ok(())
    }
}
