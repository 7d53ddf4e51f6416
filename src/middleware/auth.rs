//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación por bearer token y la verificación
//! de roles. `auth_middleware` valida el token, relee la cuenta en base de
//! datos e inyecta un `AuthenticatedUser` en las extensions de la request;
//! los handlers lo recuperan como extractor.
//!
//! El rol y el estado de la cuenta salen siempre de la fila `users`: un
//! chauffeur desactivado pierde el acceso en su siguiente request.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::{User, UserRole},
    repositories::UserRepository,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    let account = UserRepository::new(state.pool.clone()).find_by_id(user_id).await?;
    let user = resolve_account(user_id, account)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Decide el acceso a partir de la fila leída para el `sub` del token
fn resolve_account(user_id: Uuid, account: Option<User>) -> Result<AuthenticatedUser, AppError> {
    let account = account.ok_or_else(|| {
        tracing::warn!("🔒 Token para un usuario inexistente: {}", user_id);
        AppError::Unauthorized("User no longer exists".to_string())
    })?;

    if !account.is_active {
        tracing::warn!("🔒 Cuenta desactivada: {}", account.email);
        return Err(forbidden_error("access this resource", "account is deactivated"));
    }

    Ok(AuthenticatedUser {
        user_id: account.id,
        role: account.role,
    })
}

/// Middleware para routers enteramente reservados a administradores
pub async fn admin_only_middleware(
    user: AuthenticatedUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_admin(&user)?;
    Ok(next.run(request).await)
}

fn require_admin(user: &AuthenticatedUser) -> Result<(), AppError> {
    if !user.is_admin() {
        tracing::warn!("🚫 Usuario {} ({}) sin permisos de administrador", user.user_id, user.role.as_str());
        return Err(forbidden_error("access this resource", "administrator role required"));
    }
    Ok(())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Extractor para handlers reservados a administradores dentro de routers mixtos
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_admin(&user)?;
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::StatusCode,
        middleware::from_fn,
        routing::get,
        Extension, Router,
    };
    use chrono::Utc;
    use tower::ServiceExt;

    fn account(role: UserRole, is_active: bool) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Youssef Amrani".to_string(),
            email: "youssef@fleet.ma".to_string(),
            password_hash: "x".to_string(),
            role,
            phone: "0612345678".to_string(),
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_account_is_unauthorized() {
        let result = resolve_account(Uuid::new_v4(), None);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_deactivated_account_is_forbidden() {
        let driver = account(UserRole::Chauffeur, false);
        let result = resolve_account(driver.id, Some(driver));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_role_comes_from_account_row() {
        // El token pudo emitirse cuando la cuenta tenía otro rol
        let driver = account(UserRole::Chauffeur, true);
        let id = driver.id;
        let user = resolve_account(id, Some(driver)).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, UserRole::Chauffeur);
        assert!(!user.is_admin());
    }

    async fn status_as(role: UserRole, uri: &str) -> StatusCode {
        let admin_only = Router::new()
            .route("/maintenance", get(|| async { "ok" }))
            .route_layer(from_fn(admin_only_middleware));
        let app = Router::new()
            .route("/drivers", get(|AdminUser(_): AdminUser| async { "ok" }))
            .merge(admin_only)
            .layer(Extension(AuthenticatedUser {
                user_id: Uuid::new_v4(),
                role,
            }));

        app.oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_role_gates_reject_chauffeur() {
        for uri in ["/drivers", "/maintenance"] {
            assert_eq!(status_as(UserRole::Chauffeur, uri).await, StatusCode::FORBIDDEN, "{}", uri);
            assert_eq!(status_as(UserRole::Admin, uri).await, StatusCode::OK, "{}", uri);
        }
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };
        let chauffeur = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: UserRole::Chauffeur,
        };

        assert!(require_admin(&admin).is_ok());
        assert!(matches!(require_admin(&chauffeur), Err(AppError::Forbidden(_))));
    }
}
