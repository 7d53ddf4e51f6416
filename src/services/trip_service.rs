//! Ciclo de vida de los trayectos
//!
//! Planificación, avance y cierre. Cerrar un trayecto (`completed`) exige
//! el kilometraje de llegada, sube el contador del camión y relanza la
//! verificación de neumáticos del camión y del remolque, todo en una
//! única transacción.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::trip_dto::{check_kms, CreateTripRequest, UpdateTripRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::{Trip, TripStatus, UserRole};
use crate::repositories::{TrailerRepository, TripRepository, TruckRepository, UserRepository};
use crate::services::tire_wear::TireWearService;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppError};

/// Fusiona los cambios sobre el trayecto actual y valida el resultado
pub fn apply_changes(current: &Trip, changes: UpdateTripRequest, now: DateTime<Utc>) -> Result<Trip, AppError> {
    if current.status == TripStatus::Completed {
        if let Some(status) = changes.status {
            if status != TripStatus::Completed {
                return Err(AppError::BadRequest("A completed trip cannot be reopened".to_string()));
            }
        }
    }

    let mut trip = current.clone();
    if let Some(driver_id) = changes.driver_id {
        trip.driver_id = driver_id;
    }
    if let Some(truck_id) = changes.truck_id {
        trip.truck_id = truck_id;
    }
    if let Some(trailer_id) = changes.trailer_id {
        trip.trailer_id = trailer_id;
    }
    if let Some(origin) = changes.origin {
        trip.origin = origin;
    }
    if let Some(destination) = changes.destination {
        trip.destination = destination;
    }
    if let Some(departure_at) = changes.departure_at {
        trip.departure_at = departure_at;
    }
    if changes.arrival_at.is_some() {
        trip.arrival_at = changes.arrival_at;
    }
    if let Some(start_km) = changes.start_km {
        trip.start_km = start_km;
    }
    if changes.end_km.is_some() {
        trip.end_km = changes.end_km;
    }
    if changes.fuel_liters.is_some() {
        trip.fuel_liters = changes.fuel_liters;
    }
    if let Some(status) = changes.status {
        trip.status = status;
    }
    if changes.remarks.is_some() {
        trip.remarks = changes.remarks;
    }

    check_kms(trip.start_km, trip.end_km)
        .map_err(|_| validation_error("end_km", "End km must be greater than or equal to start km"))?;

    if trip.status == TripStatus::Completed {
        if trip.end_km.is_none() {
            return Err(validation_error("end_km", "End km is required to complete a trip"));
        }
        if trip.arrival_at.is_none() {
            trip.arrival_at = Some(now);
        }
    }

    trip.updated_at = now;
    Ok(trip)
}

pub struct TripService {
    pool: PgPool,
    users: UserRepository,
    trucks: TruckRepository,
    trailers: TrailerRepository,
    trips: TripRepository,
}

impl TripService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            trucks: TruckRepository::new(pool.clone()),
            trailers: TrailerRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(&self, mut request: CreateTripRequest) -> Result<Trip, AppError> {
        self.check_references(request.driver_id, request.truck_id, request.trailer_id)
            .await?;

        if request.status == TripStatus::Completed {
            if request.end_km.is_none() {
                return Err(validation_error("end_km", "End km is required to complete a trip"));
            }
            request.arrival_at.get_or_insert_with(Utc::now);
        }

        let mut tx = self.pool.begin().await?;
        let trip = TripRepository::insert(&mut tx, &request).await?;
        if trip.status == TripStatus::Completed {
            Self::on_completed(&mut tx, &trip).await?;
        }
        tx.commit().await?;

        tracing::info!("🚚 Trayecto {} planificado: {} → {}", trip.id, trip.origin, trip.destination);
        Ok(trip)
    }

    /// Un admin lo ve todo; un chauffeur solo sus propios trayectos
    pub async fn find_visible(&self, id: Uuid, actor: &AuthenticatedUser) -> Result<Trip, AppError> {
        let trip = self
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))?;

        ensure_can_access(&trip, actor)?;
        Ok(trip)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateTripRequest,
        actor: &AuthenticatedUser,
    ) -> Result<Trip, AppError> {
        if !actor.is_admin() && changes.touches_planning_fields() {
            return Err(forbidden_error(
                "update trip",
                "drivers may only report progress (status, arrival, end km, fuel, remarks)",
            ));
        }

        if changes.driver_id.is_some() || changes.truck_id.is_some() || changes.trailer_id.is_some() {
            let current = self
                .trips
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found_error("Trip", id))?;
            self.check_references(
                changes.driver_id.unwrap_or(current.driver_id),
                changes.truck_id.unwrap_or(current.truck_id),
                changes.trailer_id.unwrap_or(current.trailer_id),
            )
            .await?;
        }

        let mut tx = self.pool.begin().await?;
        let current = TripRepository::lock(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))?;
        ensure_can_access(&current, actor)?;

        let was_completed = current.status == TripStatus::Completed;
        let merged = apply_changes(&current, changes, Utc::now())?;
        let saved = TripRepository::save(&mut tx, &merged).await?;

        if saved.status == TripStatus::Completed {
            Self::on_completed(&mut tx, &saved).await?;
        }
        tx.commit().await?;

        if !was_completed && saved.status == TripStatus::Completed {
            tracing::info!("🏁 Trayecto {} completado ({} km)", saved.id, saved.distance());
        }
        Ok(saved)
    }

    /// Efectos de un trayecto completado sobre camión y neumáticos
    ///
    /// Camión y luego remolque quedan bloqueados antes de leer distancias,
    /// así dos cierres sobre el mismo vehículo se serializan.
    async fn on_completed(conn: &mut PgConnection, trip: &Trip) -> Result<(), AppError> {
        TruckRepository::lock(&mut *conn, trip.truck_id).await?;
        if let Some(trailer_id) = trip.trailer_id {
            TrailerRepository::lock(&mut *conn, trailer_id).await?;
        }

        if let Some(end_km) = trip.end_km {
            TruckRepository::raise_mileage(&mut *conn, trip.truck_id, end_km).await?;
        }

        let mut vehicle_ids = vec![trip.truck_id];
        vehicle_ids.extend(trip.trailer_id);
        TireWearService::check_vehicles(&mut *conn, Some(vehicle_ids.as_slice())).await?;

        Ok(())
    }

    async fn check_references(
        &self,
        driver_id: Uuid,
        truck_id: Uuid,
        trailer_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let driver = self
            .users
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_id))?;

        if driver.role != UserRole::Chauffeur {
            return Err(AppError::BadRequest("Assigned user is not a driver".to_string()));
        }
        if !driver.is_active {
            return Err(AppError::BadRequest("Assigned driver account is not active".to_string()));
        }

        if self.trucks.find_by_id(truck_id).await?.is_none() {
            return Err(not_found_error("Truck", truck_id));
        }

        if let Some(trailer_id) = trailer_id {
            if self.trailers.find_by_id(trailer_id).await?.is_none() {
                return Err(not_found_error("Trailer", trailer_id));
            }
        }

        Ok(())
    }
}

fn ensure_can_access(trip: &Trip, actor: &AuthenticatedUser) -> Result<(), AppError> {
    if actor.is_admin() || trip.driver_id == actor.user_id {
        Ok(())
    } else {
        Err(forbidden_error("access trip", "trip is assigned to another driver"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned_trip() -> Trip {
        let now = Utc::now();
        Trip {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            truck_id: Uuid::new_v4(),
            trailer_id: None,
            origin: "Casablanca".to_string(),
            destination: "Marrakech".to_string(),
            departure_at: now,
            arrival_at: None,
            start_km: 200_000,
            end_km: None,
            fuel_liters: None,
            status: TripStatus::Planned,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_completion_requires_end_km() {
        let changes = UpdateTripRequest {
            status: Some(TripStatus::Completed),
            ..Default::default()
        };
        let err = apply_changes(&planned_trip(), changes, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_completion_defaults_arrival() {
        let now = Utc::now();
        let changes = UpdateTripRequest {
            status: Some(TripStatus::Completed),
            end_km: Some(200_240),
            ..Default::default()
        };
        let trip = apply_changes(&planned_trip(), changes, now).unwrap();
        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.arrival_at, Some(now));
        assert_eq!(trip.distance(), 240);
    }

    #[test]
    fn test_end_km_below_start_is_rejected() {
        let changes = UpdateTripRequest {
            end_km: Some(199_000),
            ..Default::default()
        };
        assert!(apply_changes(&planned_trip(), changes, Utc::now()).is_err());
    }

    #[test]
    fn test_admin_can_detach_trailer() {
        let mut trip = planned_trip();
        trip.trailer_id = Some(Uuid::new_v4());

        let keep = apply_changes(&trip, UpdateTripRequest::default(), Utc::now()).unwrap();
        assert!(keep.trailer_id.is_some());

        let changes = UpdateTripRequest {
            trailer_id: Some(None),
            ..Default::default()
        };
        let detached = apply_changes(&trip, changes, Utc::now()).unwrap();
        assert_eq!(detached.trailer_id, None);
    }

    #[test]
    fn test_completed_trip_cannot_be_reopened() {
        let mut trip = planned_trip();
        trip.status = TripStatus::Completed;
        trip.end_km = Some(200_100);

        let changes = UpdateTripRequest {
            status: Some(TripStatus::InProgress),
            ..Default::default()
        };
        assert!(matches!(
            apply_changes(&trip, changes, Utc::now()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_driver_cannot_access_foreign_trip() {
        let trip = planned_trip();
        let owner = AuthenticatedUser {
            user_id: trip.driver_id,
            role: UserRole::Chauffeur,
        };
        let other = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Chauffeur,
        };
        let admin = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };

        assert!(ensure_can_access(&trip, &owner).is_ok());
        assert!(ensure_can_access(&trip, &admin).is_ok());
        assert!(matches!(ensure_can_access(&trip, &other), Err(AppError::Forbidden(_))));
    }
}
