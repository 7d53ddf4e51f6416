//! Desgaste de neumáticos
//!
//! El kilometraje efectivo de un neumático es su kilometraje de montaje más
//! la distancia de los trayectos completados de su vehículo (como camión o
//! como remolque). Al alcanzar el límite el neumático pasa a `critical` y
//! ninguna verificación automática lo devuelve a otro estado.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::tire_dto::{TireCheckReport, TireProjection, TripTireCheckResponse};
use crate::models::{Tire, TireStatus, VehicleKind};
use crate::repositories::{TireRepository, TripRepository, VehicleDistance};
use crate::utils::errors::AppError;

/// Distancia completada indexada por vehículo
pub type DistanceIndex = HashMap<(VehicleKind, Uuid), i64>;

pub fn index_distances(distances: Vec<VehicleDistance>) -> DistanceIndex {
    distances
        .into_iter()
        .map(|d| ((d.vehicle_kind, d.vehicle_id), d.distance))
        .collect()
}

pub fn effective_mileage(tire: &Tire, distances: &DistanceIndex) -> i64 {
    let completed = distances
        .get(&(tire.vehicle_kind, tire.vehicle_id))
        .copied()
        .unwrap_or(0);
    tire.install_mileage.saturating_add(completed)
}

pub fn reaches_limit(mileage: i64, limit_mileage: i64) -> bool {
    mileage >= limit_mileage
}

/// Decide qué neumáticos hay que marcar como críticos, sin tocar la base
pub fn plan_batch(tires: &[Tire], distances: &DistanceIndex) -> TireCheckReport {
    let mut report = TireCheckReport {
        checked: tires.len(),
        ..Default::default()
    };

    for tire in tires {
        if tire.status == TireStatus::Critical {
            report.already_critical += 1;
        } else if reaches_limit(effective_mileage(tire, distances), tire.limit_mileage) {
            report.newly_critical.push(tire.id);
        }
    }

    report
}

/// Proyección de un trayecto de `distance` km sobre los neumáticos dados
pub fn project(tires: &[Tire], distances: &DistanceIndex, distance: i64) -> Vec<TireProjection> {
    tires
        .iter()
        .map(|tire| {
            let effective = effective_mileage(tire, distances);
            let projected = effective.saturating_add(distance);
            TireProjection {
                tire_id: tire.id,
                vehicle_id: tire.vehicle_id,
                vehicle_kind: tire.vehicle_kind,
                position: tire.position.clone(),
                effective_mileage: effective,
                projected_mileage: projected,
                limit_mileage: tire.limit_mileage,
                would_be_critical: reaches_limit(projected, tire.limit_mileage),
            }
        })
        .collect()
}

pub struct TireWearService {
    pool: PgPool,
}

impl TireWearService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verificación masiva sobre toda la flota
    pub async fn check_all(&self) -> Result<TireCheckReport, AppError> {
        let mut tx = self.pool.begin().await?;
        let report = Self::check_vehicles(&mut tx, None).await?;
        tx.commit().await?;

        tracing::info!(
            "🛞 Verificación de neumáticos: {} revisados, {} nuevos críticos, {} ya críticos",
            report.checked,
            report.newly_critical.len(),
            report.already_critical
        );
        Ok(report)
    }

    /// Verificación masiva limitada a los vehículos indicados (`None` = todos)
    pub async fn check_vehicles(
        conn: &mut PgConnection,
        vehicle_ids: Option<&[Uuid]>,
    ) -> Result<TireCheckReport, AppError> {
        let tires = TireRepository::list_for_vehicles(&mut *conn, vehicle_ids).await?;
        let distances =
            index_distances(TripRepository::completed_distances(&mut *conn, vehicle_ids).await?);

        let report = plan_batch(&tires, &distances);
        let updated = TireRepository::mark_critical(&mut *conn, &report.newly_critical).await?;

        for id in &report.newly_critical {
            tracing::warn!("⚠️ Neumático {} ha alcanzado su kilometraje límite", id);
        }
        tracing::debug!("{} neumáticos pasados a critical", updated);

        Ok(report)
    }

    /// Verificación preventiva antes de confirmar un trayecto; no escribe nada
    pub async fn check_trip(
        &self,
        truck_id: Uuid,
        trailer_id: Option<Uuid>,
        distance: i64,
    ) -> Result<TripTireCheckResponse, AppError> {
        let mut vehicle_ids = vec![truck_id];
        vehicle_ids.extend(trailer_id);

        let mut conn = self.pool.acquire().await?;
        let tires = TireRepository::list_for_vehicles(&mut conn, Some(vehicle_ids.as_slice())).await?;
        let distances = index_distances(
            TripRepository::completed_distances(&mut conn, Some(vehicle_ids.as_slice())).await?,
        );

        let tires: Vec<Tire> = tires
            .into_iter()
            .filter(|t| match t.vehicle_kind {
                VehicleKind::Truck => t.vehicle_id == truck_id,
                VehicleKind::Trailer => Some(t.vehicle_id) == trailer_id,
            })
            .collect();

        let projections = project(&tires, &distances, distance);
        let safe = projections.iter().all(|p| !p.would_be_critical);

        Ok(TripTireCheckResponse {
            distance,
            safe,
            tires: projections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tire(kind: VehicleKind, vehicle_id: Uuid, install: i64, limit: i64, status: TireStatus) -> Tire {
        Tire {
            id: Uuid::new_v4(),
            vehicle_id,
            vehicle_kind: kind,
            position: "AVG".to_string(),
            brand: "Michelin".to_string(),
            install_mileage: install,
            limit_mileage: limit,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_mileage_adds_completed_distance() {
        let truck = Uuid::new_v4();
        let mut distances = DistanceIndex::new();
        distances.insert((VehicleKind::Truck, truck), 12_500);

        let t = tire(VehicleKind::Truck, truck, 40_000, 100_000, TireStatus::Good);
        assert_eq!(effective_mileage(&t, &distances), 52_500);

        let unused = tire(VehicleKind::Truck, Uuid::new_v4(), 40_000, 100_000, TireStatus::Good);
        assert_eq!(effective_mileage(&unused, &distances), 40_000);
    }

    #[test]
    fn test_distance_is_keyed_by_vehicle_kind() {
        let id = Uuid::new_v4();
        let mut distances = DistanceIndex::new();
        distances.insert((VehicleKind::Trailer, id), 5_000);

        let t = tire(VehicleKind::Truck, id, 0, 100_000, TireStatus::Good);
        assert_eq!(effective_mileage(&t, &distances), 0);
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(reaches_limit(80_000, 80_000));
        assert!(reaches_limit(80_001, 80_000));
        assert!(!reaches_limit(79_999, 80_000));
    }

    #[test]
    fn test_plan_batch_flags_only_tires_over_limit() {
        let truck = Uuid::new_v4();
        let trailer = Uuid::new_v4();
        let mut distances = DistanceIndex::new();
        distances.insert((VehicleKind::Truck, truck), 30_000);
        distances.insert((VehicleKind::Trailer, trailer), 1_000);

        let worn_out = tire(VehicleKind::Truck, truck, 50_000, 80_000, TireStatus::Worn);
        let fine = tire(VehicleKind::Trailer, trailer, 10_000, 80_000, TireStatus::Good);
        let flagged = tire(VehicleKind::Truck, truck, 0, 10, TireStatus::Critical);

        let report = plan_batch(&[worn_out.clone(), fine, flagged], &distances);
        assert_eq!(report.checked, 3);
        assert_eq!(report.newly_critical, vec![worn_out.id]);
        assert_eq!(report.already_critical, 1);
    }

    #[test]
    fn test_critical_never_reverts() {
        // Neumático crítico por debajo del límite (p. ej. límite corregido a mano)
        let truck = Uuid::new_v4();
        let critical = tire(VehicleKind::Truck, truck, 0, 500_000, TireStatus::Critical);

        let report = plan_batch(&[critical], &DistanceIndex::new());
        assert!(report.newly_critical.is_empty());
        assert_eq!(report.already_critical, 1);
    }

    #[test]
    fn test_project_uses_accumulated_mileage() {
        let truck = Uuid::new_v4();
        let mut distances = DistanceIndex::new();
        distances.insert((VehicleKind::Truck, truck), 70_000);

        let t = tire(VehicleKind::Truck, truck, 0, 80_000, TireStatus::Good);
        let short = project(std::slice::from_ref(&t), &distances, 9_000);
        assert_eq!(short[0].effective_mileage, 70_000);
        assert_eq!(short[0].projected_mileage, 79_000);
        assert!(!short[0].would_be_critical);

        let long = project(&[t], &distances, 10_000);
        assert!(long[0].would_be_critical);
    }
}
