use super::handlers::create_health_record::{__path_create_health_record, create_health_record};
use super::handlers::get_health_records::{__path_get_health_records, get_health_records};
use super::handlers::get_latest_health_record::{
    __path_get_latest_health_record, get_latest_health_record,
};
use crate::application::{http::server::app_state::AppState, user_middleware::user_context};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_health_record, get_health_records, get_latest_health_record))]
pub struct HealthRecordApiDoc;

pub fn health_record_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/health-records", state.args.server.root_path),
            post(create_health_record),
        )
        .route(
            &format!("{}/health-records", state.args.server.root_path),
            get(get_health_records),
        )
        .route(
            &format!("{}/health-records/latest", state.args.server.root_path),
            get(get_latest_health_record),
        )
        .layer(middleware::from_fn(user_context))
}
