use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Trip, TripStatus};
use crate::utils::validation::{validate_not_blank, validate_non_negative};

// Request para planificar un trayecto
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_kms", skip_on_field_errors = true))]
pub struct CreateTripRequest {
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    pub trailer_id: Option<Uuid>,

    #[validate(custom(function = "validate_not_blank", message = "Origin is required"))]
    pub origin: String,

    #[validate(custom(function = "validate_not_blank", message = "Destination is required"))]
    pub destination: String,

    pub departure_at: DateTime<Utc>,
    pub arrival_at: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_non_negative", message = "Start km cannot be negative"))]
    pub start_km: i64,

    #[validate(custom(function = "validate_non_negative", message = "End km cannot be negative"))]
    pub end_km: Option<i64>,

    #[validate(range(min = 0.0, message = "Fuel cannot be negative"))]
    pub fuel_liters: Option<f64>,

    #[serde(default)]
    pub status: TripStatus,

    pub remarks: Option<String>,
}

fn validate_create_kms(request: &CreateTripRequest) -> Result<(), ValidationError> {
    check_kms(request.start_km, request.end_km)
}

/// El kilometraje de llegada nunca puede ser inferior al de salida
pub fn check_kms(start_km: i64, end_km: Option<i64>) -> Result<(), ValidationError> {
    match end_km {
        Some(end) if end < start_km => {
            let mut error = ValidationError::new("end_km");
            error.message = Some("End km must be greater than or equal to start km".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Distingue un campo ausente (`None`) de un `null` explícito (`Some(None)`)
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// Request para actualizar un trayecto
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct UpdateTripRequest {
    pub driver_id: Option<Uuid>,
    pub truck_id: Option<Uuid>,

    // `null` desengancha el remolque
    #[serde(default, deserialize_with = "deserialize_present")]
    pub trailer_id: Option<Option<Uuid>>,

    #[validate(custom(function = "validate_not_blank", message = "Origin cannot be empty"))]
    pub origin: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Destination cannot be empty"))]
    pub destination: Option<String>,

    pub departure_at: Option<DateTime<Utc>>,
    pub arrival_at: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_non_negative", message = "Start km cannot be negative"))]
    pub start_km: Option<i64>,

    #[validate(custom(function = "validate_non_negative", message = "End km cannot be negative"))]
    pub end_km: Option<i64>,

    #[validate(range(min = 0.0, message = "Fuel cannot be negative"))]
    pub fuel_liters: Option<f64>,

    pub status: Option<TripStatus>,
    pub remarks: Option<String>,
}

impl UpdateTripRequest {
    /// Campos que solo un admin puede tocar; un chauffeur solo informa el avance
    pub fn touches_planning_fields(&self) -> bool {
        self.driver_id.is_some()
            || self.truck_id.is_some()
            || self.trailer_id.is_some()
            || self.origin.is_some()
            || self.destination.is_some()
            || self.departure_at.is_some()
            || self.start_km.is_some()
    }
}

// Response de trayecto con la distancia calculada
#[derive(Debug, Serialize)]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub distance: i64,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        let distance = trip.distance();
        Self { trip, distance }
    }
}
