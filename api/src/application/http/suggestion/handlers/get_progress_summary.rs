use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::user_middleware::UserContext;
use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitalog_core::domain::suggestion::entities::ProgressSummary;
use vitalog_core::domain::suggestion::ports::SuggestionService;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetProgressSummaryResponse {
    pub data: ProgressSummary,
}

#[utoipa::path(
    get,
    path = "/progress-summary",
    tag = "suggestion",
    summary = "Get progress summary",
    description = "Compares the user's two most recent health records.",
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, body = GetProgressSummaryResponse),
        (status = 404, description = "Fewer than two health records"),
        (status = 502, description = "The summary could not be generated")
    ),
)]
pub async fn get_progress_summary(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetProgressSummaryResponse>, ApiError> {
    let summary = state
        .service
        .get_progress_summary(user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetProgressSummaryResponse { data: summary }))
}
