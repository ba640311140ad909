use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Diet,
    Workout,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Diet => "diet",
            SuggestionKind::Workout => "workout",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diet" => Ok(SuggestionKind::Diet),
            "workout" => Ok(SuggestionKind::Workout),
            other => Err(CoreError::Invalid(format!("unknown suggestion kind: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MetricStatus {
    High,
    Low,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WorkoutMetricStatus {
    High,
    Low,
    Normal,
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DietMetric {
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    Cholesterol,
    #[serde(rename = "Sugar Levels")]
    SugarLevels,
    Fats,
}

impl DietMetric {
    pub const ALL: [DietMetric; 4] = [
        DietMetric::BloodPressure,
        DietMetric::Cholesterol,
        DietMetric::SugarLevels,
        DietMetric::Fats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DietMetric::BloodPressure => "Blood Pressure",
            DietMetric::Cholesterol => "Cholesterol",
            DietMetric::SugarLevels => "Sugar Levels",
            DietMetric::Fats => "Fats",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WorkoutMetric {
    #[serde(rename = "BMI")]
    Bmi,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    Cholesterol,
    #[serde(rename = "Sugar Levels")]
    SugarLevels,
    Fats,
}

impl WorkoutMetric {
    pub const ALL: [WorkoutMetric; 5] = [
        WorkoutMetric::Bmi,
        WorkoutMetric::BloodPressure,
        WorkoutMetric::Cholesterol,
        WorkoutMetric::SugarLevels,
        WorkoutMetric::Fats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutMetric::Bmi => "BMI",
            WorkoutMetric::BloodPressure => "Blood Pressure",
            WorkoutMetric::Cholesterol => "Cholesterol",
            WorkoutMetric::SugarLevels => "Sugar Levels",
            WorkoutMetric::Fats => "Fats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DietAnalysis {
    pub metric: DietMetric,
    pub status: MetricStatus,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutAnalysis {
    pub metric: WorkoutMetric,
    pub status: WorkoutMetricStatus,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub name: String,
    /// Why this item is suggested, tied to the source metrics.
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DietCategory {
    Fruits,
    Vegetables,
    Proteins,
    SeedsAndNuts,
    FoodsToLimit,
}

impl DietCategory {
    pub const ALL: [DietCategory; 5] = [
        DietCategory::Fruits,
        DietCategory::Vegetables,
        DietCategory::Proteins,
        DietCategory::SeedsAndNuts,
        DietCategory::FoodsToLimit,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            DietCategory::Fruits => "fruits",
            DietCategory::Vegetables => "vegetables",
            DietCategory::Proteins => "proteins",
            DietCategory::SeedsAndNuts => "seedsAndNuts",
            DietCategory::FoodsToLimit => "foodsToLimit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietarySuggestions {
    pub analysis: Vec<DietAnalysis>,
    pub summary: String,
    pub fruits: Vec<SuggestionItem>,
    pub vegetables: Vec<SuggestionItem>,
    pub proteins: Vec<SuggestionItem>,
    pub seeds_and_nuts: Vec<SuggestionItem>,
    pub foods_to_limit: Vec<SuggestionItem>,
}

impl DietarySuggestions {
    pub fn category(&self, category: DietCategory) -> &[SuggestionItem] {
        match category {
            DietCategory::Fruits => &self.fruits,
            DietCategory::Vegetables => &self.vegetables,
            DietCategory::Proteins => &self.proteins,
            DietCategory::SeedsAndNuts => &self.seeds_and_nuts,
            DietCategory::FoodsToLimit => &self.foods_to_limit,
        }
    }

    pub fn category_mut(&mut self, category: DietCategory) -> &mut Vec<SuggestionItem> {
        match category {
            DietCategory::Fruits => &mut self.fruits,
            DietCategory::Vegetables => &mut self.vegetables,
            DietCategory::Proteins => &mut self.proteins,
            DietCategory::SeedsAndNuts => &mut self.seeds_and_nuts,
            DietCategory::FoodsToLimit => &mut self.foods_to_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    /// Repetitions or a duration, e.g. "10-12 reps" or "30 minutes".
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub day: String,
    pub title: String,
    pub description: String,
    /// Empty on rest days.
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSuggestions {
    pub analysis: Vec<WorkoutAnalysis>,
    pub summary: String,
    pub weekly_plan: Vec<DailyPlan>,
}

/// Schema-validated output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SuggestionResult {
    Diet(DietarySuggestions),
    Workout(WorkoutSuggestions),
}

impl SuggestionResult {
    pub fn kind(&self) -> SuggestionKind {
        match self {
            SuggestionResult::Diet(_) => SuggestionKind::Diet,
            SuggestionResult::Workout(_) => SuggestionKind::Workout,
        }
    }

    /// Decodes a payload whose kind is known from context (cache row, request).
    pub fn from_value(kind: SuggestionKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let decoded = match kind {
            SuggestionKind::Diet => serde_json::from_value(value).map(SuggestionResult::Diet),
            SuggestionKind::Workout => serde_json::from_value(value).map(SuggestionResult::Workout),
        };

        decoded.map_err(|e| CoreError::ContractViolation(format!("{kind} payload: {e}")))
    }
}

/// A previously computed result, keyed by (user, source record, kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CachedSuggestion {
    pub id: String,
    pub user_id: String,
    pub health_data_id: Uuid,
    pub kind: SuggestionKind,
    pub suggestion_data: SuggestionResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProgressStatus {
    Improved,
    Declined,
    Maintained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProgressMetric {
    Weight,
    #[serde(rename = "BMI")]
    Bmi,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    Cholesterol,
    #[serde(rename = "Sugar Levels")]
    SugarLevels,
    Fats,
}

impl ProgressMetric {
    pub const ALL: [ProgressMetric; 6] = [
        ProgressMetric::Weight,
        ProgressMetric::Bmi,
        ProgressMetric::BloodPressure,
        ProgressMetric::Cholesterol,
        ProgressMetric::SugarLevels,
        ProgressMetric::Fats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgressMetric::Weight => "Weight",
            ProgressMetric::Bmi => "BMI",
            ProgressMetric::BloodPressure => "Blood Pressure",
            ProgressMetric::Cholesterol => "Cholesterol",
            ProgressMetric::SugarLevels => "Sugar Levels",
            ProgressMetric::Fats => "Fats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricChange {
    pub metric: ProgressMetric,
    /// e.g. "-2 kg", "+5 mg/dL", "Maintained"
    pub change: String,
    pub comment: String,
    pub status: ProgressStatus,
}

/// Comparison of the two most recent health records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub overall_status: ProgressStatus,
    pub summary_text: String,
    pub metric_changes: Vec<MetricChange>,
}
