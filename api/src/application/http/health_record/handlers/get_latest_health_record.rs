use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::user_middleware::UserContext;
use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitalog_core::domain::health_record::entities::HealthRecord;
use vitalog_core::domain::health_record::ports::HealthRecordService;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetLatestHealthRecordResponse {
    pub data: HealthRecord,
}

#[utoipa::path(
    get,
    path = "/latest",
    tag = "health-record",
    summary = "Get latest health record",
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, body = GetLatestHealthRecordResponse),
        (status = 404, description = "The user has not logged any health data yet")
    ),
)]
pub async fn get_latest_health_record(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetLatestHealthRecordResponse>, ApiError> {
    let record = state
        .service
        .get_latest_health_record(user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetLatestHealthRecordResponse { data: record }))
}
