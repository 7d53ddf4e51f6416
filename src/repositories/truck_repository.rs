use crate::dto::truck_dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::{Truck, VehicleKind};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct TruckRepository {
    pool: PgPool,
}

impl TruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateTruckRequest) -> Result<Truck, AppError> {
        let now = Utc::now();
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (id, registration, brand, model, year, mileage, fuel_capacity, status,
                                last_maintenance_at, next_maintenance_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.registration.trim())
        .bind(request.brand)
        .bind(request.model)
        .bind(request.year)
        .bind(request.mileage)
        .bind(request.fuel_capacity)
        .bind(request.status)
        .bind(request.last_maintenance_at)
        .bind(request.next_maintenance_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }

    pub async fn find_all(&self) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>("SELECT * FROM trucks ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(trucks)
    }

    /// Camiones disponibles y sin trayecto planificado ni en curso
    pub async fn find_available(&self) -> Result<Vec<Truck>, AppError> {
        let trucks = sqlx::query_as::<_, Truck>(
            r#"
            SELECT c.* FROM trucks c
            WHERE c.status = 'available'
              AND NOT EXISTS (
                  SELECT 1 FROM trips t
                  WHERE t.truck_id = c.id AND t.status IN ('planned', 'in_progress')
              )
            ORDER BY c.registration
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    /// La inmatriculación es única; `exclude` permite ignorar el propio camión al actualizar
    pub async fn registration_exists(&self, registration: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trucks WHERE registration = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(registration.trim())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTruckRequest) -> Result<Option<Truck>, AppError> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            UPDATE trucks
            SET registration = COALESCE($2, registration),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model),
                year = COALESCE($5, year),
                mileage = COALESCE($6, mileage),
                fuel_capacity = COALESCE($7, fuel_capacity),
                status = COALESCE($8, status),
                last_maintenance_at = COALESCE($9, last_maintenance_at),
                next_maintenance_at = COALESCE($10, next_maintenance_at),
                updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.registration.map(|r| r.trim().to_string()))
        .bind(request.brand)
        .bind(request.model)
        .bind(request.year)
        .bind(request.mileage)
        .bind(request.fuel_capacity)
        .bind(request.status)
        .bind(request.last_maintenance_at)
        .bind(request.next_maintenance_at)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    /// Borra el camión junto con sus neumáticos; los trayectos lo impiden (FK RESTRICT)
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tires WHERE vehicle_kind = $1 AND vehicle_id = $2")
            .bind(VehicleKind::Truck)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// El kilometraje del camión solo avanza
    /// Bloquea la fila del camión hasta el fin de la transacción
    pub async fn lock(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("SELECT id FROM trucks WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(())
    }

    pub async fn raise_mileage(conn: &mut PgConnection, id: Uuid, mileage: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE trucks SET mileage = $2, updated_at = $3 WHERE id = $1 AND mileage < $2")
            .bind(id)
            .bind(mileage)
            .bind(Utc::now())
            .execute(conn)
            .await?;

        Ok(())
    }

    pub async fn record_maintenance(
        &self,
        id: Uuid,
        performed_at: chrono::DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE trucks
            SET last_maintenance_at = GREATEST(COALESCE(last_maintenance_at, $2), $2), updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(performed_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
