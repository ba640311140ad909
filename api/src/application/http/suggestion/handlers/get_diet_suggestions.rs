use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::suggestion::handlers::GetSuggestionsResponse;
use crate::application::user_middleware::UserContext;
use axum::{Extension, extract::State};
use vitalog_core::domain::suggestion::entities::SuggestionKind;
use vitalog_core::domain::suggestion::ports::SuggestionService;
use vitalog_core::domain::suggestion::value_objects::GetSuggestionsInput;

#[utoipa::path(
    get,
    path = "/diet",
    tag = "suggestion",
    summary = "Get dietary suggestions",
    description = "Returns dietary suggestions for the user's latest health record. A result generated earlier for the same record is served from the cache.",
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, body = GetSuggestionsResponse),
        (status = 404, description = "No health data; the response carries a redirect to the entry page"),
        (status = 502, description = "Suggestions could not be generated")
    ),
)]
pub async fn get_diet_suggestions(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetSuggestionsResponse>, ApiError> {
    let outcome = state
        .service
        .get_suggestions(GetSuggestionsInput {
            user_id: user.user_id,
            kind: SuggestionKind::Diet,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetSuggestionsResponse { data: outcome }))
}
