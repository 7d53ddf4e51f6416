use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{MaintenanceKind, MaintenanceStatus};
use crate::utils::validation::{validate_not_blank, validate_cost};

// Request para programar una intervención
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub truck_id: Uuid,
    pub kind: MaintenanceKind,

    #[validate(custom(function = "validate_not_blank", message = "Description is required"))]
    pub description: String,

    pub scheduled_at: DateTime<Utc>,
    pub performed_at: Option<DateTime<Utc>>,

    #[validate(custom = "validate_cost")]
    pub cost: Option<Decimal>,

    #[serde(default)]
    pub status: MaintenanceStatus,
}

// Request para actualizar una intervención
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub kind: Option<MaintenanceKind>,

    #[validate(custom(function = "validate_not_blank", message = "Description cannot be empty"))]
    pub description: Option<String>,

    pub scheduled_at: Option<DateTime<Utc>>,
    pub performed_at: Option<DateTime<Utc>>,

    #[validate(custom = "validate_cost")]
    pub cost: Option<Decimal>,

    pub status: Option<MaintenanceStatus>,
}

// Estadísticas para el dashboard
#[derive(Debug, Default, Serialize, sqlx::FromRow)]
pub struct MaintenanceStats {
    pub total: i64,
    pub scheduled: i64,
    pub completed: i64,
    pub overdue: i64,
    pub upcoming: i64,
    pub total_cost: Decimal,
}
