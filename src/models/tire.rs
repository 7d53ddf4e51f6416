//! Modelo de Tire (pneu)
//!
//! Un neumático pertenece a un camión o a un remolque; `vehicle_kind`
//! indica en qué tabla buscar `vehicle_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de vehículo que lleva el neumático - mapea al ENUM vehicle_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Truck,
    Trailer,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Truck => "truck",
            VehicleKind::Trailer => "trailer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "truck" => Some(VehicleKind::Truck),
            "trailer" => Some(VehicleKind::Trailer),
            _ => None,
        }
    }
}

/// Estado de desgaste - mapea al ENUM tire_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "tire_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TireStatus {
    Good,
    Worn,
    Critical,
}

impl Default for TireStatus {
    fn default() -> Self {
        TireStatus::Good
    }
}

/// Tire - mapea exactamente a la tabla tires
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tire {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_kind: VehicleKind,
    pub position: String,
    pub brand: String,
    pub install_mileage: i64,
    pub limit_mileage: i64,
    pub status: TireStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
