use crate::application::http::{
    health_record::router::HealthRecordApiDoc, suggestion::router::SuggestionApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vitalog API"
    ),
    nest(
        (path = "/health-records", api = HealthRecordApiDoc),
        (path = "/suggestions", api = SuggestionApiDoc),
    )
)]
pub struct ApiDoc;
