use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::models::{User, UserRole};
use crate::repositories::UserRepository;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// Registro público: solo chauffeurs, inactivos hasta que un admin los active
    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<UserResponse>, AppError> {
        if request.role == Some(UserRole::Admin) {
            return Err(forbidden_error(
                "register administrator",
                "administrator accounts cannot be self-registered",
            ));
        }

        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(
                request.full_name.trim(),
                &email,
                &password_hash,
                UserRole::Chauffeur,
                &request.phone,
                false,
            )
            .await?;

        tracing::info!("👤 Nuevo chauffeur registrado: {} (pendiente de activación)", user.email);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Account created, awaiting administrator activation",
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
        jwt: &JwtConfig,
    ) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            tracing::debug!("Contraseña incorrecta para {}", user.email);
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        ensure_can_log_in(&user)?;

        let token = generate_token(user.id, user.role, jwt)?;
        tracing::info!("🔐 Login correcto: {} ({})", user.email, user.role.as_str());

        Ok(ApiResponse::success(LoginResponse {
            token,
            expires_in: jwt.expiration,
            user: UserResponse::from(user),
        }))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", user_id))?;

        Ok(ApiResponse::success(UserResponse::from(user)))
    }

    pub async fn list_drivers(&self) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        let drivers = self.repository.find_drivers().await?;
        Ok(ApiResponse::success(drivers.into_iter().map(UserResponse::from).collect()))
    }

    pub async fn list_available_drivers(&self) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        let drivers = self.repository.find_available_drivers().await?;
        Ok(ApiResponse::success(drivers.into_iter().map(UserResponse::from).collect()))
    }

    pub async fn toggle_driver(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        let driver = self
            .repository
            .toggle_driver_active(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        let message = if driver.is_active {
            "Driver activated"
        } else {
            "Driver deactivated"
        };
        tracing::info!("🔁 Chauffeur {} → is_active = {}", driver.email, driver.is_active);

        Ok(ApiResponse::success_with_message(UserResponse::from(driver), message))
    }
}

/// Una contraseña correcta no basta: la cuenta tiene que estar activa
fn ensure_can_log_in(user: &User) -> Result<(), AppError> {
    if !user.is_active {
        tracing::warn!("🔒 Login rechazado, cuenta inactiva: {}", user.email);
        return Err(forbidden_error("log in", "account is not activated yet"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn registered_driver() -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Said Ouali".to_string(),
            email: "said@fleet.ma".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Chauffeur,
            phone: "0698765432".to_string(),
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_requires_activation() {
        let mut driver = registered_driver();
        assert!(matches!(ensure_can_log_in(&driver), Err(AppError::Forbidden(_))));

        driver.is_active = true;
        assert!(ensure_can_log_in(&driver).is_ok());
    }
}
