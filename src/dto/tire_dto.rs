use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{TireStatus, VehicleKind};
use crate::utils::validation::{validate_not_blank, validate_non_negative};

// Request para montar un neumático
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTireRequest {
    pub vehicle_id: Uuid,
    pub vehicle_kind: VehicleKind,

    #[validate(custom(function = "validate_not_blank", message = "Position is required"))]
    pub position: String,

    #[validate(custom(function = "validate_not_blank", message = "Brand is required"))]
    pub brand: String,

    #[validate(custom(function = "validate_non_negative", message = "Install mileage cannot be negative"))]
    pub install_mileage: i64,

    #[validate(custom(function = "validate_non_negative", message = "Limit mileage cannot be negative"))]
    pub limit_mileage: i64,

    #[serde(default)]
    pub status: TireStatus,
}

// Request para actualizar un neumático
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTireRequest {
    #[validate(custom(function = "validate_not_blank", message = "Position cannot be empty"))]
    pub position: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Brand cannot be empty"))]
    pub brand: Option<String>,

    #[validate(custom(function = "validate_non_negative", message = "Install mileage cannot be negative"))]
    pub install_mileage: Option<i64>,

    #[validate(custom(function = "validate_non_negative", message = "Limit mileage cannot be negative"))]
    pub limit_mileage: Option<i64>,

    pub status: Option<TireStatus>,
}

// Request de verificación preventiva antes de confirmar un trayecto
#[derive(Debug, Deserialize, Validate)]
pub struct TripTireCheckRequest {
    pub truck_id: Uuid,
    pub trailer_id: Option<Uuid>,

    #[validate(custom(function = "validate_non_negative", message = "Distance cannot be negative"))]
    pub distance: i64,
}

// Resultado de la verificación preventiva para un neumático
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TireProjection {
    pub tire_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_kind: VehicleKind,
    pub position: String,
    pub effective_mileage: i64,
    pub projected_mileage: i64,
    pub limit_mileage: i64,
    pub would_be_critical: bool,
}

// Response de la verificación preventiva
#[derive(Debug, Serialize)]
pub struct TripTireCheckResponse {
    pub distance: i64,
    pub safe: bool,
    pub tires: Vec<TireProjection>,
}

// Informe de la verificación masiva
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TireCheckReport {
    pub checked: usize,
    pub newly_critical: Vec<Uuid>,
    pub already_critical: usize,
}
