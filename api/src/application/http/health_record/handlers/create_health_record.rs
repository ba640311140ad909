use crate::application::http::health_record::validators::CreateHealthRecordValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::user_middleware::UserContext;
use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitalog_core::domain::health_record::entities::HealthRecord;
use vitalog_core::domain::health_record::ports::HealthRecordService;
use vitalog_core::domain::health_record::value_objects::CreateHealthRecordInput;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateHealthRecordResponse {
    pub data: HealthRecord,
}

#[utoipa::path(
    post,
    path = "",
    tag = "health-record",
    summary = "Log health record",
    description = "Stores a new snapshot of the current user's biometrics. The BMI is derived from height and weight.",
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 201, body = CreateHealthRecordResponse),
        (status = 400, description = "Invalid measurements")
    ),
    request_body = CreateHealthRecordValidator
)]
pub async fn create_health_record(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<CreateHealthRecordValidator>,
) -> Result<Response<CreateHealthRecordResponse>, ApiError> {
    let record = state
        .service
        .create_health_record(CreateHealthRecordInput {
            user_id: user.user_id,
            height: payload.height,
            weight: payload.weight,
            age: payload.age,
            blood_pressure: payload.blood_pressure,
            cholesterol: payload.cholesterol,
            sugar_levels: payload.sugar_levels,
            fats: payload.fats,
            blood_points: payload.blood_points,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateHealthRecordResponse { data: record }))
}
