//! Utilidades compartidas: errores, extractores, JWT y validaciones.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod validation;
