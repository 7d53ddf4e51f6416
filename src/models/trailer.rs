//! Modelo de Trailer (remorque)

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::truck::FleetStatus;

/// Trailer - mapea exactamente a la tabla trailers
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trailer {
    pub id: Uuid,
    pub registration: String,
    pub kind: String,
    pub capacity: f64,
    pub status: FleetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
