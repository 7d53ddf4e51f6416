//! Repositorios
//!
//! Acceso SQL a PostgreSQL, un struct por tabla.

pub mod maintenance_repository;
pub mod tire_repository;
pub mod trailer_repository;
pub mod trip_repository;
pub mod truck_repository;
pub mod user_repository;

pub use maintenance_repository::MaintenanceRepository;
pub use tire_repository::TireRepository;
pub use trailer_repository::TrailerRepository;
pub use trip_repository::{TripRepository, VehicleDistance};
pub use truck_repository::TruckRepository;
pub use user_repository::UserRepository;
