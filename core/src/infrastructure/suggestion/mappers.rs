use chrono::{TimeZone, Utc};

use crate::domain::{
    common::entities::app_errors::CoreError,
    suggestion::entities::{CachedSuggestion, SuggestionKind, SuggestionResult},
};
use crate::entity::generated_suggestions::Model as GeneratedSuggestionModel;

impl TryFrom<GeneratedSuggestionModel> for CachedSuggestion {
    type Error = CoreError;

    /// Rows written by another version may not decode; callers treat that as a miss.
    fn try_from(model: GeneratedSuggestionModel) -> Result<Self, Self::Error> {
        let kind: SuggestionKind = model.kind.parse()?;
        let suggestion_data = SuggestionResult::from_value(kind, model.suggestion_data)?;

        Ok(CachedSuggestion {
            id: model.id,
            user_id: model.user_id,
            health_data_id: model.health_data_id,
            kind,
            suggestion_data,
            created_at: Utc.from_utc_datetime(&model.created_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::suggestion::test_support::{dietary_response, workout_response};
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn row(kind: &str, data: serde_json::Value) -> GeneratedSuggestionModel {
        GeneratedSuggestionModel {
            id: format!("user-1_{}_{kind}", Uuid::nil()),
            user_id: "user-1".to_string(),
            health_data_id: Uuid::nil(),
            kind: kind.to_string(),
            suggestion_data: data,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn row_decodes_with_its_stored_kind() {
        let cached = CachedSuggestion::try_from(row("workout", workout_response())).unwrap();

        assert_eq!(cached.kind, SuggestionKind::Workout);
        assert_eq!(cached.suggestion_data.kind(), SuggestionKind::Workout);
    }

    #[test]
    fn mismatched_payload_is_rejected() {
        assert!(CachedSuggestion::try_from(row("workout", dietary_response())).is_err());
        assert!(CachedSuggestion::try_from(row("sleep", dietary_response())).is_err());
    }
}
