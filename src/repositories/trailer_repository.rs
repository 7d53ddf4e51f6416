use crate::dto::trailer_dto::{CreateTrailerRequest, UpdateTrailerRequest};
use crate::models::{Trailer, VehicleKind};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct TrailerRepository {
    pool: PgPool,
}

impl TrailerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateTrailerRequest) -> Result<Trailer, AppError> {
        let now = Utc::now();
        let trailer = sqlx::query_as::<_, Trailer>(
            r#"
            INSERT INTO trailers (id, registration, kind, capacity, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.registration.trim())
        .bind(request.kind)
        .bind(request.capacity)
        .bind(request.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(trailer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trailer>, AppError> {
        let trailer = sqlx::query_as::<_, Trailer>("SELECT * FROM trailers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trailer)
    }

    pub async fn find_all(&self) -> Result<Vec<Trailer>, AppError> {
        let trailers = sqlx::query_as::<_, Trailer>("SELECT * FROM trailers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(trailers)
    }

    /// Remolques disponibles y sin trayecto planificado ni en curso
    pub async fn find_available(&self) -> Result<Vec<Trailer>, AppError> {
        let trailers = sqlx::query_as::<_, Trailer>(
            r#"
            SELECT r.* FROM trailers r
            WHERE r.status = 'available'
              AND NOT EXISTS (
                  SELECT 1 FROM trips t
                  WHERE t.trailer_id = r.id AND t.status IN ('planned', 'in_progress')
              )
            ORDER BY r.registration
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trailers)
    }

    pub async fn registration_exists(&self, registration: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trailers WHERE registration = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(registration.trim())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTrailerRequest) -> Result<Option<Trailer>, AppError> {
        let trailer = sqlx::query_as::<_, Trailer>(
            r#"
            UPDATE trailers
            SET registration = COALESCE($2, registration),
                kind = COALESCE($3, kind),
                capacity = COALESCE($4, capacity),
                status = COALESCE($5, status),
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.registration.map(|r| r.trim().to_string()))
        .bind(request.kind)
        .bind(request.capacity)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(trailer)
    }

    /// Borra el remolque junto con sus neumáticos
    /// Bloquea la fila del remolque hasta el fin de la transacción
    pub async fn lock(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("SELECT id FROM trailers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tires WHERE vehicle_kind = $1 AND vehicle_id = $2")
            .bind(VehicleKind::Trailer)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM trailers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
