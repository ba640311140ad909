use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::user_middleware::UserContext;
use axum::{
    Extension,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitalog_core::domain::health_record::entities::HealthRecord;
use vitalog_core::domain::health_record::ports::HealthRecordService;
use vitalog_core::domain::health_record::value_objects::GetHealthRecordsFilter;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetHealthRecordsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetHealthRecordsResponse {
    pub data: Vec<HealthRecord>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health-record",
    summary = "Get health records",
    description = "Lists the current user's health records, newest first.",
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
        GetHealthRecordsQuery
    ),
    responses(
        (status = 200, body = GetHealthRecordsResponse)
    ),
)]
pub async fn get_health_records(
    Query(query): Query<GetHealthRecordsQuery>,
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetHealthRecordsResponse>, ApiError> {
    let records = state
        .service
        .get_health_records(
            user.user_id,
            GetHealthRecordsFilter {
                limit: Some(query.limit.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE)),
                offset: query.offset,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetHealthRecordsResponse { data: records }))
}
