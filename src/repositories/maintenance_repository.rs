use crate::dto::maintenance_dto::{CreateMaintenanceRequest, MaintenanceStats, UpdateMaintenanceRequest};
use crate::models::MaintenanceRecord;
use crate::utils::errors::AppError;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Ventana de intervenciones "próximas"
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateMaintenanceRequest) -> Result<MaintenanceRecord, AppError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (id, truck_id, kind, description, scheduled_at,
                                             performed_at, cost, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.truck_id)
        .bind(request.kind)
        .bind(request.description)
        .bind(request.scheduled_at)
        .bind(request.performed_at)
        .bind(request.cost)
        .bind(request.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_all(&self) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records ORDER BY scheduled_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_truck(&self, truck_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE truck_id = $1 ORDER BY scheduled_at DESC",
        )
        .bind(truck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_upcoming(&self) -> Result<Vec<MaintenanceRecord>, AppError> {
        let now = Utc::now();
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE status = 'scheduled' AND scheduled_at >= $1 AND scheduled_at <= $2
            ORDER BY scheduled_at
            "#,
        )
        .bind(now)
        .bind(now + Duration::days(UPCOMING_WINDOW_DAYS))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_overdue(&self) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE status = 'scheduled' AND scheduled_at < $1
            ORDER BY scheduled_at
            "#,
        )
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn stats(&self) -> Result<MaintenanceStats, AppError> {
        let now = Utc::now();
        let stats = sqlx::query_as::<_, MaintenanceStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'scheduled' AND scheduled_at < $1) AS overdue,
                COUNT(*) FILTER (WHERE status = 'scheduled' AND scheduled_at >= $1 AND scheduled_at <= $2) AS upcoming,
                COALESCE(SUM(cost) FILTER (WHERE status = 'completed'), 0)::NUMERIC(14,2) AS total_cost
            FROM maintenance_records
            "#,
        )
        .bind(now)
        .bind(now + Duration::days(UPCOMING_WINDOW_DAYS))
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<Option<MaintenanceRecord>, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET kind = COALESCE($2, kind),
                description = COALESCE($3, description),
                scheduled_at = COALESCE($4, scheduled_at),
                performed_at = COALESCE($5, performed_at),
                cost = COALESCE($6, cost),
                status = COALESCE($7, status),
                updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.kind)
        .bind(request.description)
        .bind(request.scheduled_at)
        .bind(request.performed_at)
        .bind(request.cost)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
