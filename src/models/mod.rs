//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod maintenance;
pub mod tire;
pub mod trailer;
pub mod trip;
pub mod truck;
pub mod user;

pub use maintenance::{MaintenanceKind, MaintenanceRecord, MaintenanceStatus};
pub use tire::{Tire, TireStatus, VehicleKind};
pub use trailer::Trailer;
pub use trip::{Trip, TripStatus};
pub use truck::{FleetStatus, Truck};
pub use user::{User, UserRole};
