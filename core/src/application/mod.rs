use crate::{
    domain::common::{VitalogConfig, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        health_record::PostgresHealthRecordRepository,
        llm::GeminiLLMClient,
        suggestion::PostgresSuggestionCacheRepository,
    },
};

pub type VitalogService = Service<
    PostgresHealthRecordRepository,
    PostgresSuggestionCacheRepository,
    GeminiLLMClient,
    GeminiLLMClient,
>;

pub async fn create_service(config: VitalogConfig) -> Result<VitalogService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let gemini = GeminiLLMClient::new(&config.llm)?;

    Ok(Service::new(
        PostgresHealthRecordRepository::new(postgres.get_db()),
        PostgresSuggestionCacheRepository::new(postgres.get_db()),
        gemini.clone(),
        gemini,
        config.generation,
        config.enrichment,
    ))
}
