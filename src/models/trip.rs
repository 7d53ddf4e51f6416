//! Modelo de Trip (trajet)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del trayecto - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "trip_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Planned,
    InProgress,
    Completed,
}

impl Default for TripStatus {
    fn default() -> Self {
        TripStatus::Planned
    }
}

impl TripStatus {
    /// Un trayecto planificado o en curso inmoviliza conductor y vehículos
    pub fn is_active(&self) -> bool {
        matches!(self, TripStatus::Planned | TripStatus::InProgress)
    }
}

/// Trip - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    pub trailer_id: Option<Uuid>,
    pub origin: String,
    pub destination: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: Option<DateTime<Utc>>,
    pub start_km: i64,
    pub end_km: Option<i64>,
    pub fuel_liters: Option<f64>,
    pub status: TripStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Kilómetros recorridos; 0 mientras no haya kilometraje de llegada
    pub fn distance(&self) -> i64 {
        match self.end_km {
            Some(end) if end >= self.start_km => end - self.start_km,
            _ => 0,
        }
    }
}
