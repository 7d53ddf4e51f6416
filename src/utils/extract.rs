//! Extractores comunes

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::utils::errors::AppError;

/// `Json<T>` cuyo rechazo (cuerpo ilegible, campos ausentes) se responde como 400 `AppError`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ApiJson(value))
    }
}

/// `Path<T>` con el mismo tratamiento: un id mal formado es un 400 en JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn show(ApiPath(id): ApiPath<Uuid>) -> String {
        id.to_string()
    }

    async fn call(uri: &str) -> (StatusCode, axum::body::Bytes) {
        let app = Router::new().route("/trucks/:id", get(show));
        let response = app
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes)
    }

    #[tokio::test]
    async fn test_malformed_id_is_json_bad_request() {
        let (status, bytes) = call("/trucks/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_valid_id_reaches_handler() {
        let id = Uuid::new_v4();
        let (status, bytes) = call(&format!("/trucks/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, id.to_string().as_bytes());
    }
}
