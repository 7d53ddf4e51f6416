use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trailer_controller::TrailerController;
use crate::dto::api_response::ApiResponse;
use crate::dto::trailer_dto::{CreateTrailerRequest, UpdateTrailerRequest};
use crate::middleware::{auth_middleware, AdminUser, AuthenticatedUser};
use crate::models::Trailer;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_trailer_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trailers).post(create_trailer))
        .route("/available", get(list_available_trailers))
        .route("/:id", get(get_trailer).put(update_trailer).delete(delete_trailer))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_trailer(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateTrailerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Trailer>>), AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trailers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Trailer>>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_available_trailers(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<Trailer>>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.list_available().await?;
    Ok(Json(response))
}

async fn get_trailer(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Trailer>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_trailer(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTrailerRequest>,
) -> Result<Json<ApiResponse<Trailer>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_trailer(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
