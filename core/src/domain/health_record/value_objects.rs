use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

static BLOOD_PRESSURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,3})/(\d{2,3})$").expect("blood pressure pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHealthRecordInput {
    pub user_id: String,
    pub height: f64,
    pub weight: f64,
    pub age: i32,
    pub blood_pressure: String,
    pub cholesterol: f64,
    pub sugar_levels: f64,
    pub fats: f64,
    pub blood_points: f64,
}

impl CreateHealthRecordInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();

        if self.user_id.trim().is_empty() {
            problems.push("user id must not be empty".to_string());
        }

        for (name, value) in [
            ("height", self.height),
            ("weight", self.weight),
            ("cholesterol", self.cholesterol),
            ("sugar levels", self.sugar_levels),
            ("blood points", self.blood_points),
        ] {
            if !value.is_finite() || value <= 0.0 {
                problems.push(format!("{name} must be a positive number"));
            }
        }

        if self.age <= 0 {
            problems.push("age must be a positive whole number".to_string());
        }

        if !self.fats.is_finite() || !(0.0..=100.0).contains(&self.fats) {
            problems.push("fats must be between 0 and 100".to_string());
        }

        if self.blood_pressure.parse::<BloodPressure>().is_err() {
            problems.push("blood pressure must look like 120/80".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Invalid(problems.join("; ")))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHealthRecordsFilter {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetHealthRecordsFilter {
    pub fn latest(count: u32) -> Self {
        Self {
            limit: Some(count),
            offset: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl FromStr for BloodPressure {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Invalid(format!("invalid blood pressure: {s}"));
        let captures = BLOOD_PRESSURE_PATTERN.captures(s.trim()).ok_or_else(invalid)?;

        let systolic = captures[1].parse().map_err(|_| invalid())?;
        let diastolic = captures[2].parse().map_err(|_| invalid())?;

        Ok(Self {
            systolic,
            diastolic,
        })
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// BMI rounded to two decimals; `0.0` when it cannot be computed.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    if bmi.is_finite() {
        (bmi * 100.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateHealthRecordInput {
        CreateHealthRecordInput {
            user_id: "user-1".to_string(),
            height: 180.0,
            weight: 81.0,
            age: 42,
            blood_pressure: "120/80".to_string(),
            cholesterol: 180.0,
            sugar_levels: 90.0,
            fats: 22.0,
            blood_points: 95.0,
        }
    }

    #[test]
    fn bmi_is_rounded_to_two_decimals() {
        assert_eq!(compute_bmi(81.0, 180.0), 25.0);
        assert_eq!(compute_bmi(70.0, 175.0), 22.86);
    }

    #[test]
    fn bmi_of_zero_height_is_zero() {
        assert_eq!(compute_bmi(70.0, 0.0), 0.0);
    }

    #[test]
    fn blood_pressure_parses_systolic_and_diastolic() {
        let bp: BloodPressure = "150/95".parse().unwrap();
        assert_eq!(bp.systolic, 150);
        assert_eq!(bp.diastolic, 95);
        assert_eq!(bp.to_string(), "150/95");
    }

    #[test]
    fn blood_pressure_rejects_malformed_values() {
        for raw in ["120", "120-80", "1200/80", "a/b", "9/80"] {
            assert!(raw.parse::<BloodPressure>().is_err(), "{raw} should fail");
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn validation_collects_every_problem() {
        let input = CreateHealthRecordInput {
            height: 0.0,
            age: 0,
            fats: 120.0,
            blood_pressure: "high".to_string(),
            ..valid_input()
        };

        let Err(CoreError::Invalid(message)) = input.validate() else {
            panic!("expected validation error");
        };

        assert!(message.contains("height"));
        assert!(message.contains("age"));
        assert!(message.contains("fats"));
        assert!(message.contains("blood pressure"));
    }
}
