use serde_json::{Value, json};

use crate::domain::suggestion::{
    contracts::{DAILY_PLAN_COUNT, MIN_CATEGORY_ITEMS},
    entities::{DietCategory, DietMetric, ProgressMetric, SuggestionKind, WorkoutMetric},
};

fn labels(labels: &[&'static str]) -> Value {
    json!(labels)
}

fn suggestion_item_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "reason": { "type": "string" },
            "imageHint": { "type": "string" }
        },
        "required": ["name", "reason"]
    })
}

/// Returns the JSON schema for dietary suggestion LLM responses
pub fn get_dietary_suggestions_schema() -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "analysis".to_string(),
        json!({
            "type": "array",
            "minItems": DietMetric::ALL.len(),
            "maxItems": DietMetric::ALL.len(),
            "items": {
                "type": "object",
                "properties": {
                    "metric": {
                        "type": "string",
                        "enum": labels(&DietMetric::ALL.map(|m| m.label()))
                    },
                    "status": { "type": "string", "enum": ["High", "Low", "Normal"] },
                    "comment": { "type": "string" }
                },
                "required": ["metric", "status", "comment"]
            }
        }),
    );
    properties.insert("summary".to_string(), json!({ "type": "string" }));

    for category in DietCategory::ALL {
        properties.insert(
            category.field_name().to_string(),
            json!({
                "type": "array",
                "minItems": MIN_CATEGORY_ITEMS,
                "items": suggestion_item_schema()
            }),
        );
    }

    let mut required = vec!["analysis", "summary"];
    required.extend(DietCategory::ALL.map(|c| c.field_name()));

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Returns the JSON schema for workout suggestion LLM responses
pub fn get_workout_suggestions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "analysis": {
                "type": "array",
                "minItems": WorkoutMetric::ALL.len(),
                "maxItems": WorkoutMetric::ALL.len(),
                "items": {
                    "type": "object",
                    "properties": {
                        "metric": {
                            "type": "string",
                            "enum": labels(&WorkoutMetric::ALL.map(|m| m.label()))
                        },
                        "status": {
                            "type": "string",
                            "enum": [
                                "High", "Low", "Normal",
                                "Underweight", "Healthy", "Overweight", "Obese"
                            ]
                        },
                        "comment": { "type": "string" }
                    },
                    "required": ["metric", "status", "comment"]
                }
            },
            "summary": { "type": "string" },
            "weeklyPlan": {
                "type": "array",
                "minItems": DAILY_PLAN_COUNT,
                "maxItems": DAILY_PLAN_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "day": { "type": "string" },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "exercises": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "sets": { "type": "string" },
                                    "reps": { "type": "string" },
                                    "imageHint": { "type": "string" }
                                },
                                "required": ["name", "sets", "reps"]
                            }
                        }
                    },
                    "required": ["day", "title", "description", "exercises"]
                }
            }
        },
        "required": ["analysis", "summary", "weeklyPlan"]
    })
}

/// Returns the JSON schema for progress summary LLM responses
pub fn get_progress_summary_schema() -> Value {
    let statuses = json!(["Improved", "Declined", "Maintained"]);

    json!({
        "type": "object",
        "properties": {
            "overallStatus": { "type": "string", "enum": statuses },
            "summaryText": { "type": "string" },
            "metricChanges": {
                "type": "array",
                "minItems": ProgressMetric::ALL.len(),
                "maxItems": ProgressMetric::ALL.len(),
                "items": {
                    "type": "object",
                    "properties": {
                        "metric": {
                            "type": "string",
                            "enum": labels(&ProgressMetric::ALL.map(|m| m.label()))
                        },
                        "change": { "type": "string" },
                        "comment": { "type": "string" },
                        "status": { "type": "string", "enum": statuses }
                    },
                    "required": ["metric", "change", "comment", "status"]
                }
            }
        },
        "required": ["overallStatus", "summaryText", "metricChanges"]
    })
}

pub fn get_suggestions_schema(kind: SuggestionKind) -> Value {
    match kind {
        SuggestionKind::Diet => get_dietary_suggestions_schema(),
        SuggestionKind::Workout => get_workout_suggestions_schema(),
    }
}
