use std::future::Future;

use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    health_record::entities::HealthMetrics,
    suggestion::{
        contracts::{parse_progress_summary, parse_suggestions},
        entities::{ProgressSummary, SuggestionResult},
        ports::LLMClient,
        prompts::{render_progress_prompt, render_suggestion_prompt},
        schema::{get_progress_summary_schema, get_suggestions_schema},
        value_objects::{GenerationSettings, SuggestionRequest},
    },
};

/// Wraps an [`LLMClient`] with prompt rendering, contract validation and retries.
/// Every failure that survives the retry budget surfaces as [`CoreError::GenerationFailed`].
#[derive(Clone)]
pub struct SuggestionGenerator<L: LLMClient> {
    llm_client: L,
    settings: GenerationSettings,
}

impl<L: LLMClient> SuggestionGenerator<L> {
    pub fn new(llm_client: L, settings: GenerationSettings) -> Self {
        Self {
            llm_client,
            settings,
        }
    }

    pub async fn generate(&self, request: &SuggestionRequest) -> Result<SuggestionResult, CoreError> {
        let kind = request.kind();
        let prompt = render_suggestion_prompt(request);
        let schema = get_suggestions_schema(kind);

        let llm = &self.llm_client;

        self.with_retries(kind.as_str(), move || {
            let (prompt, schema) = (prompt.clone(), schema.clone());
            async move {
                let raw = llm.generate_with_text(prompt, schema).await?;
                parse_suggestions(kind, &raw)
            }
        })
        .await
    }

    pub async fn generate_progress_summary(
        &self,
        previous: &HealthMetrics,
        latest: &HealthMetrics,
    ) -> Result<ProgressSummary, CoreError> {
        let prompt = render_progress_prompt(previous, latest);
        let schema = get_progress_summary_schema();

        let llm = &self.llm_client;

        self.with_retries("progress_summary", move || {
            let (prompt, schema) = (prompt.clone(), schema.clone());
            async move {
                let raw = llm.generate_with_text(prompt, schema).await?;
                parse_progress_summary(&raw)
            }
        })
        .await
    }

    async fn with_retries<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => {
                    debug!(operation, attempt, "Generation succeeded");
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    let backoff = self.settings.backoff_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Generation attempt failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(operation, attempt, error = %e, "Generation failed");
                    return Err(if matches!(e, CoreError::GenerationFailed(_)) {
                        e
                    } else {
                        CoreError::GenerationFailed(e.to_string())
                    });
                }
            }
        }
    }
}
