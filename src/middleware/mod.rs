//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación, roles y CORS.

pub mod auth;
pub mod cors;

pub use auth::{admin_only_middleware, auth_middleware, AdminUser, AuthenticatedUser};
pub use cors::cors_middleware;
