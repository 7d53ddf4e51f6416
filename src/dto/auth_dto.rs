use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{User, UserRole};
use crate::utils::validation::{validate_not_blank, PHONE_REGEX};

// Request de registro público
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "Name is required"),
        length(min = 2, max = 50, message = "Name must be between 2 and 50 characters")
    )]
    pub full_name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    // Solo se aceptan chauffeurs; los admins se crean con seed_admin
    #[serde(default)]
    pub role: Option<UserRole>,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone must contain 10 digits"))]
    pub phone: String,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Response de usuario (sin password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}
