use super::handlers::get_diet_suggestions::{__path_get_diet_suggestions, get_diet_suggestions};
use super::handlers::get_progress_summary::{__path_get_progress_summary, get_progress_summary};
use super::handlers::get_workout_suggestions::{
    __path_get_workout_suggestions, get_workout_suggestions,
};
use crate::application::{http::server::app_state::AppState, user_middleware::user_context};

use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_diet_suggestions, get_workout_suggestions, get_progress_summary))]
pub struct SuggestionApiDoc;

pub fn suggestion_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/suggestions/diet", state.args.server.root_path),
            get(get_diet_suggestions),
        )
        .route(
            &format!("{}/suggestions/workout", state.args.server.root_path),
            get(get_workout_suggestions),
        )
        .route(
            &format!("{}/suggestions/progress-summary", state.args.server.root_path),
            get(get_progress_summary),
        )
        .layer(middleware::from_fn(user_context))
}
