use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health_record::{ports::HealthRecordRepository, value_objects::GetHealthRecordsFilter},
    suggestion::{
        enrichment::enrich,
        entities::{ProgressSummary, SuggestionResult},
        ports::{ImageGenerator, LLMClient, SuggestionCacheRepository, SuggestionService},
        value_objects::{
            CacheKey, GetSuggestionsInput, SuggestionOutcome, SuggestionRequest, SuggestionSource,
        },
    },
};

impl<HR, SC, LLM, IMG> Service<HR, SC, LLM, IMG>
where
    HR: HealthRecordRepository,
    SC: SuggestionCacheRepository,
    LLM: LLMClient,
    IMG: ImageGenerator,
{
    /// A failing cache read degrades to a miss.
    async fn cached(&self, key: &CacheKey) -> Option<SuggestionResult> {
        match self.suggestion_cache_repository.lookup(key.clone()).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(cache_key = %key.id(), error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }
}

impl<HR, SC, LLM, IMG> SuggestionService for Service<HR, SC, LLM, IMG>
where
    HR: HealthRecordRepository,
    SC: SuggestionCacheRepository,
    LLM: LLMClient,
    IMG: ImageGenerator,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id, kind = %input.kind))]
    async fn get_suggestions(
        &self,
        input: GetSuggestionsInput,
    ) -> Result<SuggestionOutcome, CoreError> {
        let GetSuggestionsInput { user_id, kind } = input;

        let record = self
            .health_record_repository
            .fetch_records_by_user(user_id.clone(), GetHealthRecordsFilter::latest(1))
            .await?
            .into_iter()
            .next()
            .ok_or(CoreError::NoHealthData)?;

        let key = CacheKey::new(user_id, record.id, kind);
        let outcome = |source, suggestions| SuggestionOutcome {
            health_data_id: record.id,
            kind,
            source,
            suggestions,
        };

        if let Some(hit) = self.cached(&key).await {
            info!(health_data_id = %record.id, "Suggestion served from cache");
            return Ok(outcome(SuggestionSource::Cache, hit));
        }

        let _in_flight = self.in_flight.acquire(&key).await;

        // Another caller may have generated while we waited.
        if let Some(hit) = self.cached(&key).await {
            info!(health_data_id = %record.id, "Suggestion served from cache after wait");
            return Ok(outcome(SuggestionSource::Cache, hit));
        }

        let request = SuggestionRequest::from_record(kind, &record);
        let generated = self.generator.generate(&request).await?;

        // Hits are returned as stored, images included.
        let suggestions = if self.enrichment.enabled_for(kind) {
            enrich(&self.image_generator, &self.enrichment, generated).await
        } else {
            generated
        };

        if let Err(e) = self
            .suggestion_cache_repository
            .store(key.clone(), suggestions.clone())
            .await
        {
            warn!(cache_key = %key.id(), error = %e, "Failed to cache suggestion");
        }

        info!(health_data_id = %record.id, "Suggestion generated");

        Ok(outcome(SuggestionSource::Generated, suggestions))
    }

    #[instrument(skip(self))]
    async fn get_progress_summary(&self, user_id: String) -> Result<ProgressSummary, CoreError> {
        let records = self
            .health_record_repository
            .fetch_records_by_user(user_id, GetHealthRecordsFilter::latest(2))
            .await?;

        let (latest, previous) = match records.as_slice() {
            [] => return Err(CoreError::NoHealthData),
            [_] => return Err(CoreError::NotEnoughHealthData),
            [latest, previous, ..] => (latest, previous),
        };

        self.generator
            .generate_progress_summary(&previous.metrics, &latest.metrics)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::domain::{
        health_record::{
            entities::HealthRecord, ports::HealthRecordService,
            value_objects::CreateHealthRecordInput,
        },
        suggestion::{
            entities::SuggestionKind,
            ports::MockSuggestionCacheRepository,
            test_support::{
                FakeCache, FakeHealthRecords, RecordingImages, ScriptedLlm, dietary_response,
                progress_response, sample_input, workout_response,
            },
            value_objects::{EnrichmentSettings, GenerationSettings},
        },
    };

    fn build<SC: SuggestionCacheRepository>(
        records: FakeHealthRecords,
        cache: SC,
        llm: ScriptedLlm,
        enrichment: EnrichmentSettings,
    ) -> Service<FakeHealthRecords, SC, ScriptedLlm, RecordingImages> {
        Service::new(
            records,
            cache,
            llm,
            RecordingImages::default(),
            GenerationSettings {
                max_attempts: 1,
                base_backoff: Duration::ZERO,
            },
            enrichment,
        )
    }

    fn with_record(records: &FakeHealthRecords, user_id: &str) -> HealthRecord {
        records.insert(HealthRecord::new(sample_input(user_id)))
    }

    fn diet(user_id: &str) -> GetSuggestionsInput {
        GetSuggestionsInput {
            user_id: user_id.to_string(),
            kind: SuggestionKind::Diet,
        }
    }

    #[tokio::test]
    async fn no_health_data_short_circuits_generation() {
        let llm = ScriptedLlm::new(vec![]);
        let service = build(
            FakeHealthRecords::default(),
            FakeCache::default(),
            llm.clone(),
            EnrichmentSettings::default(),
        );

        let result = service.get_suggestions(diet("user-1")).await;

        assert_eq!(result, Err(CoreError::NoHealthData));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn miss_generates_and_caches_under_the_record_key() {
        let records = FakeHealthRecords::default();
        let record = with_record(&records, "user-1");
        let cache = FakeCache::default();
        let service = build(
            records,
            cache.clone(),
            ScriptedLlm::new(vec![Ok(dietary_response().to_string())]),
            EnrichmentSettings::default(),
        );

        let outcome = service.get_suggestions(diet("user-1")).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Generated);
        assert_eq!(outcome.health_data_id, record.id);
        let key = CacheKey::new("user-1", record.id, SuggestionKind::Diet);
        assert_eq!(cache.get(&key), Some(outcome.suggestions));
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache_without_generation() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let llm = ScriptedLlm::new(vec![Ok(dietary_response().to_string())]);
        let service = build(
            records,
            FakeCache::default(),
            llm.clone(),
            EnrichmentSettings::default(),
        );

        let first = service.get_suggestions(diet("user-1")).await.unwrap();
        let second = service.get_suggestions(diet("user-1")).await.unwrap();

        assert_eq!(second.source, SuggestionSource::Cache);
        assert_eq!(first.suggestions, second.suggestions);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn kinds_are_cached_independently() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let llm = ScriptedLlm::new(vec![
            Ok(dietary_response().to_string()),
            Ok(workout_response().to_string()),
        ]);
        let cache = FakeCache::default();
        let service = build(records, cache.clone(), llm.clone(), EnrichmentSettings::default());

        service.get_suggestions(diet("user-1")).await.unwrap();
        let workout = service
            .get_suggestions(GetSuggestionsInput {
                user_id: "user-1".to_string(),
                kind: SuggestionKind::Workout,
            })
            .await
            .unwrap();

        assert_eq!(workout.source, SuggestionSource::Generated);
        assert_eq!(workout.suggestions.kind(), SuggestionKind::Workout);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn new_record_invalidates_by_changing_the_key() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let llm = ScriptedLlm::new(vec![
            Ok(dietary_response().to_string()),
            Ok(dietary_response().to_string()),
        ]);
        let service = build(
            records.clone(),
            FakeCache::default(),
            llm.clone(),
            EnrichmentSettings::default(),
        );

        service.get_suggestions(diet("user-1")).await.unwrap();
        let newer = with_record(&records, "user-1");
        let outcome = service.get_suggestions(diet("user-1")).await.unwrap();

        assert_eq!(outcome.health_data_id, newer.id);
        assert_eq!(outcome.source, SuggestionSource::Generated);
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn generation_failure_is_not_cached() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let mut cache = MockSuggestionCacheRepository::new();
        cache
            .expect_lookup()
            .returning(|_| Box::pin(async { Ok(None) }));
        cache.expect_store().never();
        let service = build(
            records,
            cache,
            ScriptedLlm::new(vec![Ok("{\"summary\": \"incomplete\"}".to_string())]),
            EnrichmentSettings::default(),
        );

        let result = service.get_suggestions(diet("user-1")).await;

        assert!(matches!(result, Err(CoreError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn cache_write_failure_still_returns_the_result() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let cache = FakeCache::failing_writes();
        let service = build(
            records,
            cache.clone(),
            ScriptedLlm::new(vec![Ok(dietary_response().to_string())]),
            EnrichmentSettings::default(),
        );

        let outcome = service.get_suggestions(diet("user-1")).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Generated);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn cache_read_failure_degrades_to_generation() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let llm = ScriptedLlm::new(vec![Ok(dietary_response().to_string())]);
        let service = build(
            records,
            FakeCache::failing_reads(),
            llm.clone(),
            EnrichmentSettings::default(),
        );

        let outcome = service.get_suggestions(diet("user-1")).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Generated);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn enriched_result_is_cached_and_served_with_its_images() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let cache = FakeCache::default();
        let service = build(
            records,
            cache.clone(),
            ScriptedLlm::new(vec![Ok(dietary_response().to_string())]),
            EnrichmentSettings {
                enrich_diet: true,
                ..Default::default()
            },
        );

        let generated = service.get_suggestions(diet("user-1")).await.unwrap();
        let cached = service.get_suggestions(diet("user-1")).await.unwrap();

        let SuggestionResult::Diet(generated) = generated.suggestions else {
            panic!("expected dietary suggestions");
        };
        assert!(generated.fruits.iter().all(|f| f.image_url.is_some()));
        assert_eq!(cached.source, SuggestionSource::Cache);
        let SuggestionResult::Diet(cached) = cached.suggestions else {
            panic!("expected dietary suggestions");
        };
        assert_eq!(cached, generated);
        assert!(cached.fruits.iter().all(|f| f.image_url.is_some()));
        assert_eq!(service.image_generator.started().len(), 15);
    }

    #[tokio::test]
    async fn disabled_enrichment_makes_no_image_calls() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let service = build(
            records,
            FakeCache::default(),
            ScriptedLlm::new(vec![Ok(workout_response().to_string())]),
            EnrichmentSettings {
                enrich_diet: true,
                enrich_workout: false,
                ..Default::default()
            },
        );

        service
            .get_suggestions(GetSuggestionsInput {
                user_id: "user-1".to_string(),
                kind: SuggestionKind::Workout,
            })
            .await
            .unwrap();

        assert!(service.image_generator.started().is_empty());
    }

    #[tokio::test]
    async fn concurrent_misses_generate_once() {
        let records = FakeHealthRecords::default();
        with_record(&records, "user-1");
        let llm = ScriptedLlm::new(vec![Ok(dietary_response().to_string())])
            .with_delay(Duration::from_millis(30));
        let service = Arc::new(build(
            records,
            FakeCache::default(),
            llm.clone(),
            EnrichmentSettings::default(),
        ));

        let calls = (0..4).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.get_suggestions(diet("user-1")).await })
        });
        let outcomes: Vec<_> = futures::future::join_all(calls).await;

        let mut generated = 0;
        for outcome in outcomes {
            if outcome.unwrap().unwrap().source == SuggestionSource::Generated {
                generated += 1;
            }
        }
        assert_eq!(generated, 1);
        assert_eq!(llm.calls(), 1);
        assert_eq!(service.in_flight.tracked_keys(), 0);
    }

    #[tokio::test]
    async fn progress_summary_needs_two_records() {
        let records = FakeHealthRecords::default();
        let llm = ScriptedLlm::new(vec![Ok(progress_response().to_string())]);
        let service = build(
            records.clone(),
            FakeCache::default(),
            llm.clone(),
            EnrichmentSettings::default(),
        );

        assert_eq!(
            service.get_progress_summary("user-1".to_string()).await,
            Err(CoreError::NoHealthData)
        );

        service
            .create_health_record(sample_input("user-1"))
            .await
            .unwrap();
        assert_eq!(
            service.get_progress_summary("user-1".to_string()).await,
            Err(CoreError::NotEnoughHealthData)
        );

        service
            .create_health_record(CreateHealthRecordInput {
                weight: 76.0,
                ..sample_input("user-1")
            })
            .await
            .unwrap();
        let summary = service
            .get_progress_summary("user-1".to_string())
            .await
            .unwrap();

        assert_eq!(summary.metric_changes.len(), 6);
        let (prompt, _) = llm.last_call().unwrap();
        let previous_at = prompt.find("Previous record").unwrap();
        let latest_at = prompt.find("Latest record").unwrap();
        assert!(prompt[previous_at..latest_at].contains("- Weight: 80 kg"));
        assert!(prompt[latest_at..].contains("- Weight: 76 kg"));
    }
}
