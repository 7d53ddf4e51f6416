//! Services module
//!
//! Reglas de negocio que combinan varios repositorios: desgaste de
//! neumáticos y ciclo de vida de los trayectos.

pub mod tire_wear;
pub mod trip_service;

pub use tire_wear::TireWearService;
pub use trip_service::TripService;
