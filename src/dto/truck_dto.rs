use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::FleetStatus;
use crate::utils::validation::{validate_not_blank, validate_model_year, validate_non_negative};

// Request para crear un camión
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTruckRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Registration is required"),
        length(max = 20, message = "Registration must be at most 20 characters")
    )]
    pub registration: String,

    #[validate(custom(function = "validate_not_blank", message = "Brand is required"))]
    pub brand: String,

    #[validate(custom(function = "validate_not_blank", message = "Model is required"))]
    pub model: String,

    #[validate(custom = "validate_model_year")]
    pub year: i32,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative", message = "Mileage cannot be negative"))]
    pub mileage: i64,

    #[validate(range(min = 0.0, message = "Fuel capacity cannot be negative"))]
    pub fuel_capacity: Option<f64>,

    #[serde(default)]
    pub status: FleetStatus,

    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,
}

// Request para actualizar un camión
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTruckRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Registration cannot be empty"),
        length(max = 20, message = "Registration must be at most 20 characters")
    )]
    pub registration: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Brand cannot be empty"))]
    pub brand: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Model cannot be empty"))]
    pub model: Option<String>,

    #[validate(custom = "validate_model_year")]
    pub year: Option<i32>,

    #[validate(custom(function = "validate_non_negative", message = "Mileage cannot be negative"))]
    pub mileage: Option<i64>,

    #[validate(range(min = 0.0, message = "Fuel capacity cannot be negative"))]
    pub fuel_capacity: Option<f64>,

    pub status: Option<FleetStatus>,
    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,
}
