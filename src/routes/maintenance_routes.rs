use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::{CreateMaintenanceRequest, MaintenanceStats, UpdateMaintenanceRequest};
use crate::middleware::{admin_only_middleware, auth_middleware};
use crate::models::MaintenanceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

/// Todo el router está reservado a administradores
pub fn create_maintenance_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/upcoming", get(list_upcoming))
        .route("/overdue", get(list_overdue))
        .route("/stats", get(get_stats))
        .route("/truck/:truck_id", get(list_truck_records))
        .route("/:id", get(get_record).put(update_record).delete(delete_record))
        .route_layer(from_fn(admin_only_middleware))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_record(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceRecord>>), AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MaintenanceRecord>>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_truck_records(
    State(state): State<AppState>,
    ApiPath(truck_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<MaintenanceRecord>>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list_by_truck(truck_id).await?;
    Ok(Json(response))
}

async fn list_upcoming(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MaintenanceRecord>>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.upcoming().await?;
    Ok(Json(response))
}

async fn list_overdue(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MaintenanceRecord>>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.overdue().await?;
    Ok(Json(response))
}

async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MaintenanceStats>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn get_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
