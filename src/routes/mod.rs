//! Routers de la API
//!
//! Cada recurso expone su propio router; `create_api_router` los monta
//! bajo `/api`.

pub mod maintenance_routes;
pub mod tire_routes;
pub mod trailer_routes;
pub mod trip_routes;
pub mod truck_routes;
pub mod user_routes;

use axum::Router;

use crate::state::AppState;

pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes::create_user_router(state.clone()))
        .nest("/trucks", truck_routes::create_truck_router(state.clone()))
        .nest("/trailers", trailer_routes::create_trailer_router(state.clone()))
        .nest("/tires", tire_routes::create_tire_router(state.clone()))
        .nest("/trips", trip_routes::create_trip_router(state.clone()))
        .nest("/maintenance", maintenance_routes::create_maintenance_router(state))
}
