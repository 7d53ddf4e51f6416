//! Modelo de Truck (camion)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado operativo de camiones y remolques - mapea al ENUM fleet_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "fleet_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FleetStatus {
    Available,
    OnMission,
    Maintenance,
}

impl Default for FleetStatus {
    fn default() -> Self {
        FleetStatus::Available
    }
}

/// Truck - mapea exactamente a la tabla trucks
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Truck {
    pub id: Uuid,
    pub registration: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub fuel_capacity: Option<f64>,
    pub status: FleetStatus,
    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
