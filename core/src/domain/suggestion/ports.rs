use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    suggestion::{
        entities::{ProgressSummary, SuggestionResult},
        value_objects::{CacheKey, GetSuggestionsInput, ImageRef, ImageRequest, SuggestionOutcome},
    },
};

/// Memoization of generated suggestions. Entries are written once and never expire.
#[cfg_attr(test, mockall::automock)]
pub trait SuggestionCacheRepository: Send + Sync {
    fn lookup(
        &self,
        key: CacheKey,
    ) -> impl Future<Output = Result<Option<SuggestionResult>, CoreError>> + Send;

    fn store(
        &self,
        key: CacheKey,
        result: SuggestionResult,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the raw JSON text the model produced under `response_schema`.
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Produces one image reference from a short text hint.
#[cfg_attr(test, mockall::automock)]
pub trait ImageGenerator: Send + Sync {
    fn generate_image(
        &self,
        request: ImageRequest,
    ) -> impl Future<Output = Result<ImageRef, CoreError>> + Send;
}

/// Service trait for suggestion orchestration
pub trait SuggestionService: Send + Sync {
    fn get_suggestions(
        &self,
        input: GetSuggestionsInput,
    ) -> impl Future<Output = Result<SuggestionOutcome, CoreError>> + Send;

    fn get_progress_summary(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<ProgressSummary, CoreError>> + Send;
}
