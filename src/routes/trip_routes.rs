use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::api_response::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripResponse, UpdateTripRequest};
use crate::middleware::{auth_middleware, AdminUser, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_trip_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/mine", get(list_my_trips))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
        .route_layer(from_fn_with_state(state, auth_middleware))
}

async fn create_trip(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateTripRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TripResponse>>), AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trips(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<Vec<TripResponse>>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn list_my_trips(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<TripResponse>>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list_mine(user.user_id).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.get_by_id(id, &user).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.update(id, request, &user).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
