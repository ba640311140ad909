use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    health_record::value_objects::{CreateHealthRecordInput, compute_bmi},
};

/// One timestamped snapshot of a user's biometrics. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: String,
    pub metrics: HealthMetrics,
    pub created_at: DateTime<Utc>,
}

/// The biometric values of a record, without identity or ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    pub age: i32,
    /// "systolic/diastolic", e.g. "120/80"
    pub blood_pressure: String,
    /// mg/dL
    pub cholesterol: f64,
    /// Fasting, mg/dL
    pub sugar_levels: f64,
    /// Body fat percentage
    pub fats: f64,
    pub blood_points: f64,
    pub bmi: f64,
}

impl HealthRecord {
    /// Builds a record from validated input, deriving the BMI.
    pub fn new(input: CreateHealthRecordInput) -> Self {
        let (now, timestamp) = generate_timestamp();
        let bmi = compute_bmi(input.weight, input.height);

        Self {
            id: Uuid::new_v7(timestamp),
            user_id: input.user_id,
            metrics: HealthMetrics {
                height: input.height,
                weight: input.weight,
                age: input.age,
                blood_pressure: input.blood_pressure,
                cholesterol: input.cholesterol,
                sugar_levels: input.sugar_levels,
                fats: input.fats,
                blood_points: input.blood_points,
                bmi,
            },
            created_at: now,
        }
    }
}
