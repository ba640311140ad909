pub mod get_diet_suggestions;
pub mod get_progress_summary;
pub mod get_workout_suggestions;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vitalog_core::domain::suggestion::value_objects::SuggestionOutcome;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetSuggestionsResponse {
    pub data: SuggestionOutcome,
}
