//! DTOs de la API
//!
//! Cuerpos de request (validados con `validator`) y de response.

pub mod api_response;
pub mod auth_dto;
pub mod maintenance_dto;
pub mod tire_dto;
pub mod trailer_dto;
pub mod trip_dto;
pub mod truck_dto;

pub use api_response::ApiResponse;
