use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use vitalog_core::domain::{
    common::{DatabaseConfig, LLMConfig, VitalogConfig},
    suggestion::value_objects::{
        DEFAULT_BASE_BACKOFF_MS, DEFAULT_BATCH_SIZE, DEFAULT_MAX_ATTEMPTS,
        DEFAULT_PLACEHOLDER_IMAGE, EnrichmentSettings, GenerationSettings, ImageRef, ImageStyle,
    },
};

#[derive(Debug, Clone, Parser)]
#[command(name = "vitalog", about = "Personalised diet and workout suggestions")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub enrichment: EnrichmentArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "vitalog")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "vitalog")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "vitalog")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(
        long = "gemini-image-model",
        env = "GEMINI_IMAGE_MODEL",
        default_value = "gemini-2.0-flash-preview-image-generation"
    )]
    pub gemini_image_model: String,

    #[arg(
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub gemini_base_url: String,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Total attempts per generation call; 1 disables retries.
    #[arg(long = "llm-max-attempts", env = "LLM_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(long = "llm-backoff-ms", env = "LLM_BACKOFF_MS", default_value_t = DEFAULT_BASE_BACKOFF_MS)]
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct EnrichmentArgs {
    #[arg(long = "enrichment-batch-size", env = "ENRICHMENT_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    #[arg(long = "enrichment-placeholder", env = "ENRICHMENT_PLACEHOLDER", default_value = DEFAULT_PLACEHOLDER_IMAGE)]
    pub placeholder: String,

    #[arg(long = "enrichment-style", env = "ENRICHMENT_STYLE", default_value = "photorealistic")]
    pub style: ImageStyle,

    #[arg(long = "enrich-diet", env = "ENRICH_DIET", default_value_t = false)]
    pub enrich_diet: bool,

    #[arg(long = "enrich-workout", env = "ENRICH_WORKOUT", default_value_t = false)]
    pub enrich_workout: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for VitalogConfig {
    fn from(args: Args) -> Self {
        VitalogConfig {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_image_model: args.llm.gemini_image_model,
                gemini_base_url: args.llm.gemini_base_url,
                timeout_secs: args.llm.timeout_secs,
            },
            generation: GenerationSettings {
                max_attempts: args.llm.max_attempts,
                base_backoff: Duration::from_millis(args.llm.backoff_ms),
            },
            enrichment: EnrichmentSettings {
                batch_size: args.enrichment.batch_size,
                placeholder: ImageRef::new(args.enrichment.placeholder),
                style: args.enrichment.style,
                enrich_diet: args.enrichment.enrich_diet,
                enrich_workout: args.enrichment.enrich_workout,
            },
        }
    }
}
