//! Reference ranges used to classify biometrics. The same ranges are written
//! into the generation prompts so the model and the local classification agree.

use crate::domain::{
    health_record::{entities::HealthMetrics, value_objects::BloodPressure},
    suggestion::entities::{DietMetric, MetricStatus, WorkoutMetric, WorkoutMetricStatus},
};

pub const BLOOD_PRESSURE_RANGE: &str = "Normal is around 120/80 mmHg; above 130/85 is High; below 90/60 is Low.";
pub const CHOLESTEROL_RANGE: &str = "Normal total cholesterol is below 200 mg/dL; below 120 mg/dL is Low.";
pub const SUGAR_RANGE: &str = "Normal fasting sugar is 70-99 mg/dL; 100 or above is High; below 70 is Low.";
pub const FATS_RANGE: &str = "For an average adult 20-30% body fat is Normal; above is High, below is Low.";
pub const BMI_RANGE: &str =
    "Underweight (<18.5), Healthy (18.5-24.9), Overweight (25.0-29.9), Obese (>=30.0).";

pub fn classify_blood_pressure(bp: &BloodPressure) -> MetricStatus {
    if bp.systolic > 130 || bp.diastolic > 85 {
        MetricStatus::High
    } else if bp.systolic < 90 || bp.diastolic < 60 {
        MetricStatus::Low
    } else {
        MetricStatus::Normal
    }
}

pub fn classify_cholesterol(mg_dl: f64) -> MetricStatus {
    if mg_dl >= 200.0 {
        MetricStatus::High
    } else if mg_dl < 120.0 {
        MetricStatus::Low
    } else {
        MetricStatus::Normal
    }
}

pub fn classify_sugar(mg_dl: f64) -> MetricStatus {
    if mg_dl >= 100.0 {
        MetricStatus::High
    } else if mg_dl < 70.0 {
        MetricStatus::Low
    } else {
        MetricStatus::Normal
    }
}

pub fn classify_fats(percent: f64) -> MetricStatus {
    if percent > 30.0 {
        MetricStatus::High
    } else if percent < 20.0 {
        MetricStatus::Low
    } else {
        MetricStatus::Normal
    }
}

pub fn classify_bmi(bmi: f64) -> WorkoutMetricStatus {
    if bmi < 18.5 {
        WorkoutMetricStatus::Underweight
    } else if bmi < 25.0 {
        WorkoutMetricStatus::Healthy
    } else if bmi < 30.0 {
        WorkoutMetricStatus::Overweight
    } else {
        WorkoutMetricStatus::Obese
    }
}

/// Local classification of the four dietary metrics, in declaration order.
/// Blood pressure is omitted when the stored value cannot be parsed.
pub fn classify_diet_metrics(metrics: &HealthMetrics) -> Vec<(DietMetric, MetricStatus)> {
    DietMetric::ALL
        .into_iter()
        .filter_map(|metric| {
            let status = match metric {
                DietMetric::BloodPressure => metrics
                    .blood_pressure
                    .parse::<BloodPressure>()
                    .ok()
                    .map(|bp| classify_blood_pressure(&bp))?,
                DietMetric::Cholesterol => classify_cholesterol(metrics.cholesterol),
                DietMetric::SugarLevels => classify_sugar(metrics.sugar_levels),
                DietMetric::Fats => classify_fats(metrics.fats),
            };
            Some((metric, status))
        })
        .collect()
}

pub fn classify_workout_metrics(metrics: &HealthMetrics) -> Vec<(WorkoutMetric, WorkoutMetricStatus)> {
    let mut classified = vec![(WorkoutMetric::Bmi, classify_bmi(metrics.bmi))];

    classified.extend(classify_diet_metrics(metrics).into_iter().map(|(metric, status)| {
        let metric = match metric {
            DietMetric::BloodPressure => WorkoutMetric::BloodPressure,
            DietMetric::Cholesterol => WorkoutMetric::Cholesterol,
            DietMetric::SugarLevels => WorkoutMetric::SugarLevels,
            DietMetric::Fats => WorkoutMetric::Fats,
        };
        (metric, status.into())
    }));

    classified
}

impl From<MetricStatus> for WorkoutMetricStatus {
    fn from(status: MetricStatus) -> Self {
        match status {
            MetricStatus::High => WorkoutMetricStatus::High,
            MetricStatus::Low => WorkoutMetricStatus::Low,
            MetricStatus::Normal => WorkoutMetricStatus::Normal,
        }
    }
}
