use crate::domain::{
    health_record::ports::HealthRecordRepository,
    suggestion::{
        generation::SuggestionGenerator,
        inflight::InFlight,
        ports::{ImageGenerator, LLMClient, SuggestionCacheRepository},
        value_objects::{EnrichmentSettings, GenerationSettings},
    },
};

/// The application service: every port the domain needs, injected at construction.
#[derive(Clone)]
pub struct Service<HR, SC, LLM, IMG>
where
    HR: HealthRecordRepository,
    SC: SuggestionCacheRepository,
    LLM: LLMClient,
    IMG: ImageGenerator,
{
    pub(crate) health_record_repository: HR,
    pub(crate) suggestion_cache_repository: SC,
    pub(crate) generator: SuggestionGenerator<LLM>,
    pub(crate) image_generator: IMG,
    pub(crate) enrichment: EnrichmentSettings,
    pub(crate) in_flight: InFlight,
}

impl<HR, SC, LLM, IMG> Service<HR, SC, LLM, IMG>
where
    HR: HealthRecordRepository,
    SC: SuggestionCacheRepository,
    LLM: LLMClient,
    IMG: ImageGenerator,
{
    pub fn new(
        health_record_repository: HR,
        suggestion_cache_repository: SC,
        llm_client: LLM,
        image_generator: IMG,
        generation: GenerationSettings,
        enrichment: EnrichmentSettings,
    ) -> Self {
        Self {
            health_record_repository,
            suggestion_cache_repository,
            generator: SuggestionGenerator::new(llm_client, generation),
            image_generator,
            enrichment,
            in_flight: InFlight::default(),
        }
    }
}
