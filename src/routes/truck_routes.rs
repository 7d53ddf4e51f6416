use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::truck_controller::TruckController;
use crate::dto::api_response::ApiResponse;
use crate::dto::truck_dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::middleware::{auth_middleware, AdminUser, AuthenticatedUser};
use crate::models::Truck;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_truck_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trucks).post(create_truck))
        .route("/available", get(list_available_trucks))
        .route("/:id", get(get_truck).put(update_truck).delete(delete_truck))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_truck(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateTruckRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Truck>>), AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trucks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Truck>>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_available_trucks(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<Truck>>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.list_available().await?;
    Ok(Json(response))
}

async fn get_truck(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_truck(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTruckRequest>,
) -> Result<Json<ApiResponse<Truck>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_truck(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TruckController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
