//! Modelo de MaintenanceRecord

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de intervención - mapea al ENUM maintenance_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "maintenance_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    OilChange,
    Tires,
    Inspection,
    Repair,
}

/// Estado de la intervención - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    Completed,
}

impl Default for MaintenanceStatus {
    fn default() -> Self {
        MaintenanceStatus::Scheduled
    }
}

/// MaintenanceRecord - mapea exactamente a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub truck_id: Uuid,
    pub kind: MaintenanceKind,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub performed_at: Option<DateTime<Utc>>,
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
