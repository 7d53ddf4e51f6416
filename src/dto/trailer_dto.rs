use serde::Deserialize;
use validator::Validate;

use crate::models::FleetStatus;
use crate::utils::validation::validate_not_blank;

// Request para crear un remolque
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrailerRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Registration is required"),
        length(max = 20, message = "Registration must be at most 20 characters")
    )]
    pub registration: String,

    #[validate(custom(function = "validate_not_blank", message = "Trailer kind is required"))]
    pub kind: String,

    #[validate(range(min = 0.0, message = "Capacity cannot be negative"))]
    pub capacity: f64,

    #[serde(default)]
    pub status: FleetStatus,
}

// Request para actualizar un remolque
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTrailerRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Registration cannot be empty"),
        length(max = 20, message = "Registration must be at most 20 characters")
    )]
    pub registration: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Trailer kind cannot be empty"))]
    pub kind: Option<String>,

    #[validate(range(min = 0.0, message = "Capacity cannot be negative"))]
    pub capacity: Option<f64>,

    pub status: Option<FleetStatus>,
}
