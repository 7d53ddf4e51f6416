use crate::dto::api_response::ApiResponse;
use crate::dto::trailer_dto::{CreateTrailerRequest, UpdateTrailerRequest};
use crate::models::Trailer;
use crate::repositories::TrailerRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TrailerController {
    repository: TrailerRepository,
}

impl TrailerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TrailerRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateTrailerRequest) -> Result<ApiResponse<Trailer>, AppError> {
        request.validate()?;

        if self.repository.registration_exists(&request.registration, None).await? {
            return Err(AppError::Duplicate("Registration number already exists".to_string()));
        }

        let trailer = self.repository.create(request).await?;
        tracing::info!("🚛 Remolque creado: {} ({})", trailer.registration, trailer.kind);

        Ok(ApiResponse::success_with_message(trailer, "Trailer created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<Trailer>, AppError> {
        let trailer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trailer", id))?;

        Ok(ApiResponse::success(trailer))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Trailer>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_all().await?))
    }

    pub async fn list_available(&self) -> Result<ApiResponse<Vec<Trailer>>, AppError> {
        Ok(ApiResponse::success(self.repository.find_available().await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateTrailerRequest) -> Result<ApiResponse<Trailer>, AppError> {
        request.validate()?;

        if let Some(registration) = &request.registration {
            if self.repository.registration_exists(registration, Some(id)).await? {
                return Err(AppError::Duplicate("Registration number already exists".to_string()));
            }
        }

        let trailer = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Trailer", id))?;

        Ok(ApiResponse::success_with_message(trailer, "Trailer updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Trailer", id));
        }

        tracing::info!("🗑️ Remolque {} eliminado", id);
        Ok(ApiResponse::message("Trailer deleted"))
    }
}
