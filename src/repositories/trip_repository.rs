use crate::dto::trip_dto::CreateTripRequest;
use crate::models::{Trip, VehicleKind};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

/// Kilómetros acumulados por un vehículo en trayectos completados
#[derive(Debug, Clone, FromRow)]
pub struct VehicleDistance {
    pub vehicle_kind: VehicleKind,
    pub vehicle_id: Uuid,
    pub distance: i64,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_all(&self) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY departure_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE driver_id = $1 ORDER BY departure_at DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn insert(conn: &mut PgConnection, request: &CreateTripRequest) -> Result<Trip, AppError> {
        let now = Utc::now();
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, driver_id, truck_id, trailer_id, origin, destination, departure_at,
                               arrival_at, start_km, end_km, fuel_liters, status, remarks,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.driver_id)
        .bind(request.truck_id)
        .bind(request.trailer_id)
        .bind(&request.origin)
        .bind(&request.destination)
        .bind(request.departure_at)
        .bind(request.arrival_at)
        .bind(request.start_km)
        .bind(request.end_km)
        .bind(request.fuel_liters)
        .bind(request.status)
        .bind(&request.remarks)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(trip)
    }

    /// Bloquea la fila hasta el fin de la transacción
    pub async fn lock(conn: &mut PgConnection, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(trip)
    }

    /// Reescribe la fila completa con el estado ya fusionado
    pub async fn save(conn: &mut PgConnection, trip: &Trip) -> Result<Trip, AppError> {
        let saved = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET driver_id = $2,
                truck_id = $3,
                trailer_id = $4,
                origin = $5,
                destination = $6,
                departure_at = $7,
                arrival_at = $8,
                start_km = $9,
                end_km = $10,
                fuel_liters = $11,
                status = $12,
                remarks = $13,
                updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.driver_id)
        .bind(trip.truck_id)
        .bind(trip.trailer_id)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.departure_at)
        .bind(trip.arrival_at)
        .bind(trip.start_km)
        .bind(trip.end_km)
        .bind(trip.fuel_liters)
        .bind(trip.status)
        .bind(&trip.remarks)
        .bind(trip.updated_at)
        .fetch_one(conn)
        .await?;

        Ok(saved)
    }

    /// Distancia de los trayectos completados, agrupada por camión y por remolque
    pub async fn completed_distances(
        conn: &mut PgConnection,
        vehicle_ids: Option<&[Uuid]>,
    ) -> Result<Vec<VehicleDistance>, AppError> {
        let distances = sqlx::query_as::<_, VehicleDistance>(
            r#"
            SELECT 'truck'::vehicle_kind AS vehicle_kind,
                   truck_id AS vehicle_id,
                   SUM(end_km - start_km)::BIGINT AS distance
            FROM trips
            WHERE status = 'completed' AND end_km IS NOT NULL
              AND ($1::uuid[] IS NULL OR truck_id = ANY($1))
            GROUP BY truck_id
            UNION ALL
            SELECT 'trailer'::vehicle_kind AS vehicle_kind,
                   trailer_id AS vehicle_id,
                   SUM(end_km - start_km)::BIGINT AS distance
            FROM trips
            WHERE status = 'completed' AND end_km IS NOT NULL AND trailer_id IS NOT NULL
              AND ($1::uuid[] IS NULL OR trailer_id = ANY($1))
            GROUP BY trailer_id
            "#,
        )
        .bind(vehicle_ids.map(|ids| ids.to_vec()))
        .fetch_all(conn)
        .await?;

        Ok(distances)
    }
}
