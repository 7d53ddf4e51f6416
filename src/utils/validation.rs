//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `#[validate(custom = ...)]`.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

/// Año mínimo aceptado para un camión
pub const MIN_MODEL_YEAR: i32 = 1990;

lazy_static! {
    /// Teléfono de 10 dígitos, sin separadores
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T>(value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + num_traits::Zero + Serialize,
{
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un texto no quede vacío una vez recortado
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar el año de fabricación: entre 1990 y el año que viene
pub fn validate_model_year(year: i32) -> Result<(), ValidationError> {
    validate_model_year_at(year, Utc::now().year())
}

fn validate_model_year_at(year: i32, current_year: i32) -> Result<(), ValidationError> {
    let max = current_year + 1;
    if year < MIN_MODEL_YEAR || year > max {
        let mut error = ValidationError::new("model_year");
        error.message = Some(format!("Year must be between {} and {}", MIN_MODEL_YEAR, max).into());
        error.add_param("actual".into(), &year);
        return Err(error);
    }
    Ok(())
}

/// Validar que un coste no sea negativo
pub fn validate_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if cost.is_sign_negative() && !cost.is_zero() {
        let mut error = ValidationError::new("cost");
        error.message = Some("Cost cannot be negative".into());
        return Err(error);
    }
    Ok(())
}
