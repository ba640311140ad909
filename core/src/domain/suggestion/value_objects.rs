use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health_record::entities::{HealthMetrics, HealthRecord},
    suggestion::entities::{SuggestionKind, SuggestionResult},
};

/// Metrics sent for dietary suggestions. Identity, ownership and timestamps are stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietarySuggestionRequest {
    pub height: f64,
    pub weight: f64,
    pub age: i32,
    pub bmi: f64,
    pub blood_pressure: String,
    pub cholesterol: f64,
    pub sugar_levels: f64,
    pub fats: f64,
    pub blood_points: f64,
}

/// Metrics sent for workout suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSuggestionRequest {
    pub age: i32,
    pub weight: f64,
    pub bmi: f64,
    pub blood_pressure: String,
    pub cholesterol: f64,
    pub sugar_levels: f64,
    pub fats: f64,
    pub blood_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SuggestionRequest {
    Diet(DietarySuggestionRequest),
    Workout(WorkoutSuggestionRequest),
}

impl SuggestionRequest {
    pub fn from_metrics(kind: SuggestionKind, metrics: &HealthMetrics) -> Self {
        match kind {
            SuggestionKind::Diet => SuggestionRequest::Diet(DietarySuggestionRequest {
                height: metrics.height,
                weight: metrics.weight,
                age: metrics.age,
                bmi: metrics.bmi,
                blood_pressure: metrics.blood_pressure.clone(),
                cholesterol: metrics.cholesterol,
                sugar_levels: metrics.sugar_levels,
                fats: metrics.fats,
                blood_points: metrics.blood_points,
            }),
            SuggestionKind::Workout => SuggestionRequest::Workout(WorkoutSuggestionRequest {
                age: metrics.age,
                weight: metrics.weight,
                bmi: metrics.bmi,
                blood_pressure: metrics.blood_pressure.clone(),
                cholesterol: metrics.cholesterol,
                sugar_levels: metrics.sugar_levels,
                fats: metrics.fats,
                blood_points: metrics.blood_points,
            }),
        }
    }

    pub fn from_record(kind: SuggestionKind, record: &HealthRecord) -> Self {
        Self::from_metrics(kind, &record.metrics)
    }

    pub fn kind(&self) -> SuggestionKind {
        match self {
            SuggestionRequest::Diet(_) => SuggestionKind::Diet,
            SuggestionRequest::Workout(_) => SuggestionKind::Workout,
        }
    }
}

/// Memoization key of a generated suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user_id: String,
    pub health_data_id: Uuid,
    pub kind: SuggestionKind,
}

impl CacheKey {
    pub fn new(user_id: impl Into<String>, health_data_id: Uuid, kind: SuggestionKind) -> Self {
        Self {
            user_id: user_id.into(),
            health_data_id,
            kind,
        }
    }

    /// Document id: `{user}_{record}_{kind}`.
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.user_id, self.health_data_id, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSuggestionsInput {
    pub user_id: String,
    pub kind: SuggestionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Cache,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionOutcome {
    pub health_data_id: Uuid,
    pub kind: SuggestionKind,
    pub source: SuggestionSource,
    pub suggestions: SuggestionResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Photorealistic,
    Illustrative,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Photorealistic => "photorealistic",
            ImageStyle::Illustrative => "illustrative",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photorealistic" => Ok(ImageStyle::Photorealistic),
            "illustrative" => Ok(ImageStyle::Illustrative),
            other => Err(CoreError::Invalid(format!("unknown image style: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub hint: String,
    #[serde(default)]
    pub style: ImageStyle,
}

/// A renderable image reference: a data URI or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub image_url: String,
}

impl ImageRef {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }
}

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Total attempts per generation call; `1` disables retries.
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
        }
    }
}

impl GenerationSettings {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << exponent)
    }
}

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSettings {
    pub batch_size: usize,
    pub placeholder: ImageRef,
    pub style: ImageStyle,
    pub enrich_diet: bool,
    pub enrich_workout: bool,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            placeholder: ImageRef::new(DEFAULT_PLACEHOLDER_IMAGE),
            style: ImageStyle::default(),
            enrich_diet: false,
            enrich_workout: false,
        }
    }
}

impl EnrichmentSettings {
    pub fn enabled_for(&self, kind: SuggestionKind) -> bool {
        match kind {
            SuggestionKind::Diet => self.enrich_diet,
            SuggestionKind::Workout => self.enrich_workout,
        }
    }
}
