//! Controllers
//!
//! Validación de requests, orquestación de repositorios/servicios y
//! construcción de las respuestas `ApiResponse`.

pub mod maintenance_controller;
pub mod tire_controller;
pub mod trailer_controller;
pub mod trip_controller;
pub mod truck_controller;
pub mod user_controller;
