use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;
use vitalog_core::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    NotFound {
        message: String,
        redirect: Option<String>,
    },

    #[error("{0}")]
    BadGateway(String),

    #[error("Internal server error")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Where a client without health data is sent to log its first record.
pub const HEALTH_RECORD_ENTRY_PATH: &str = "/health-records";

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::Unauthorized(_) => "E_UNAUTHORIZED",
            ApiError::NotFound { .. } => "E_NOT_FOUND",
            ApiError::BadGateway(_) => "E_BAD_GATEWAY",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
        }
    }

    pub fn body(&self) -> ApiErrorResponse {
        let redirect = match self {
            ApiError::NotFound { redirect, .. } => redirect.clone(),
            _ => None,
        };

        ApiErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            status: self.status().as_u16(),
            redirect,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NoHealthData => ApiError::NotFound {
                message: "No health data found. Log a health record first.".to_string(),
                redirect: Some(HEALTH_RECORD_ENTRY_PATH.to_string()),
            },
            CoreError::NotEnoughHealthData => ApiError::NotFound {
                message: "At least two health records are needed to summarise progress."
                    .to_string(),
                redirect: Some(HEALTH_RECORD_ENTRY_PATH.to_string()),
            },
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::GenerationFailed(reason) | CoreError::ContractViolation(reason) => {
                error!("Suggestion generation failed: {}", reason);
                ApiError::BadGateway(
                    "Could not generate suggestions right now. Please try again later.".to_string(),
                )
            }
            CoreError::ExternalServiceError(reason) => {
                error!("External service error: {}", reason);
                ApiError::BadGateway("An upstream service is unavailable.".to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value.validate().map_err(|e| {
            ApiError::BadRequest(format!("Validation error: {}", e).replace('\n', ", "))
        })?;

        Ok(ValidateJson(value))
    }
}
