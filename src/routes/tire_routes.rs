use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::tire_controller::TireController;
use crate::dto::api_response::ApiResponse;
use crate::dto::tire_dto::{
    CreateTireRequest, TireCheckReport, TripTireCheckRequest, TripTireCheckResponse, UpdateTireRequest,
};
use crate::middleware::{auth_middleware, AdminUser, AuthenticatedUser};
use crate::models::Tire;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_tire_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_tires).post(create_tire))
        .route("/critical", get(list_critical_tires))
        .route("/check", post(check_tires))
        .route("/check-trip", post(check_trip_tires))
        .route("/vehicle/:kind/:id", get(list_vehicle_tires))
        .route("/:id", get(get_tire).put(update_tire).delete(delete_tire))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_tire(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateTireRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tire>>), AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_tires(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Tire>>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_critical_tires(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Tire>>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.list_critical().await?;
    Ok(Json(response))
}

async fn list_vehicle_tires(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath((kind, id)): ApiPath<(String, Uuid)>,
) -> Result<Json<ApiResponse<Vec<Tire>>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.list_by_vehicle(&kind, id).await?;
    Ok(Json(response))
}

async fn get_tire(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<Tire>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_tire(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTireRequest>,
) -> Result<Json<ApiResponse<Tire>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_tire(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn check_tires(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<TireCheckReport>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.check_all().await?;
    Ok(Json(response))
}

async fn check_trip_tires(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<TripTireCheckRequest>,
) -> Result<Json<ApiResponse<TripTireCheckResponse>>, AppError> {
    let controller = TireController::new(state.pool.clone());
    let response = controller.check_trip(request).await?;
    Ok(Json(response))
}
