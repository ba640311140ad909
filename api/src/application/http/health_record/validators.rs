use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

static BLOOD_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2,3}/\d{2,3}$").expect("blood pressure pattern is valid")
});

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthRecordValidator {
    /// Centimeters
    #[validate(range(exclusive_min = 0.0, message = "height must be positive"))]
    pub height: f64,

    /// Kilograms
    #[validate(range(exclusive_min = 0.0, message = "weight must be positive"))]
    pub weight: f64,

    #[validate(range(min = 1, message = "age must be a positive whole number"))]
    pub age: i32,

    #[validate(regex(path = *BLOOD_PRESSURE, message = "blood pressure must look like 120/80"))]
    pub blood_pressure: String,

    #[validate(range(exclusive_min = 0.0, message = "cholesterol must be positive"))]
    pub cholesterol: f64,

    #[validate(range(exclusive_min = 0.0, message = "sugar levels must be positive"))]
    pub sugar_levels: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "fats must be between 0 and 100"))]
    pub fats: f64,

    #[validate(range(exclusive_min = 0.0, message = "blood points must be positive"))]
    pub blood_points: f64,
}
