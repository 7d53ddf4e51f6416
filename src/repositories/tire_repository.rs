use crate::dto::tire_dto::{CreateTireRequest, UpdateTireRequest};
use crate::models::{Tire, VehicleKind};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct TireRepository {
    pool: PgPool,
}

impl TireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateTireRequest) -> Result<Tire, AppError> {
        let now = Utc::now();
        let tire = sqlx::query_as::<_, Tire>(
            r#"
            INSERT INTO tires (id, vehicle_id, vehicle_kind, position, brand, install_mileage,
                               limit_mileage, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.vehicle_id)
        .bind(request.vehicle_kind)
        .bind(request.position.trim())
        .bind(request.brand)
        .bind(request.install_mileage)
        .bind(request.limit_mileage)
        .bind(request.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(tire)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tire>, AppError> {
        let tire = sqlx::query_as::<_, Tire>("SELECT * FROM tires WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tire)
    }

    pub async fn find_all(&self) -> Result<Vec<Tire>, AppError> {
        let tires = sqlx::query_as::<_, Tire>(
            "SELECT * FROM tires ORDER BY vehicle_kind, vehicle_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tires)
    }

    pub async fn find_by_vehicle(&self, kind: VehicleKind, vehicle_id: Uuid) -> Result<Vec<Tire>, AppError> {
        let tires = sqlx::query_as::<_, Tire>(
            "SELECT * FROM tires WHERE vehicle_kind = $1 AND vehicle_id = $2 ORDER BY position",
        )
        .bind(kind)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tires)
    }

    pub async fn find_critical(&self) -> Result<Vec<Tire>, AppError> {
        let tires = sqlx::query_as::<_, Tire>(
            "SELECT * FROM tires WHERE status = 'critical' ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tires)
    }

    /// Una posición solo puede estar ocupada por un neumático en cada vehículo
    pub async fn position_exists(
        &self,
        vehicle_id: Uuid,
        position: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tires
                WHERE vehicle_id = $1 AND position = $2 AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(position.trim())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTireRequest) -> Result<Option<Tire>, AppError> {
        let tire = sqlx::query_as::<_, Tire>(
            r#"
            UPDATE tires
            SET position = COALESCE($2, position),
                brand = COALESCE($3, brand),
                install_mileage = COALESCE($4, install_mileage),
                limit_mileage = COALESCE($5, limit_mileage),
                status = COALESCE($6, status),
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.position.map(|p| p.trim().to_string()))
        .bind(request.brand)
        .bind(request.install_mileage)
        .bind(request.limit_mileage)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(tire)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tires WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Neumáticos de los vehículos indicados, o de toda la flota con `None`
    pub async fn list_for_vehicles(
        conn: &mut PgConnection,
        vehicle_ids: Option<&[Uuid]>,
    ) -> Result<Vec<Tire>, AppError> {
        let tires = sqlx::query_as::<_, Tire>(
            r#"
            SELECT * FROM tires
            WHERE $1::uuid[] IS NULL OR vehicle_id = ANY($1)
            ORDER BY vehicle_kind, vehicle_id, position
            "#,
        )
        .bind(vehicle_ids.map(|ids| ids.to_vec()))
        .fetch_all(conn)
        .await?;

        Ok(tires)
    }

    /// Pasa a `critical` los neumáticos indicados; nunca rebaja un estado
    pub async fn mark_critical(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE tires
            SET status = 'critical', updated_at = $2
            WHERE id = ANY($1) AND status <> 'critical'
            "#,
        )
        .bind(ids.to_vec())
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
