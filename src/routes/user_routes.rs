use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::middleware::{auth_middleware, AdminUser, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_user_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/drivers", get(list_drivers))
        .route("/drivers/available", get(list_available_drivers))
        .route("/drivers/:id/toggle", patch(toggle_driver))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.login(request, &state.jwt).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.me(user.user_id).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list_drivers().await?;
    Ok(Json(response))
}

async fn list_available_drivers(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list_available_drivers().await?;
    Ok(Json(response))
}

async fn toggle_driver(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.toggle_driver(id).await?;
    Ok(Json(response))
}
