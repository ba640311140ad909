use chrono::{TimeZone, Utc};

use crate::domain::health_record::entities::{HealthMetrics, HealthRecord};
use crate::entity::health_records::Model as HealthRecordModel;

impl From<HealthRecordModel> for HealthRecord {
    fn from(model: HealthRecordModel) -> Self {
        HealthRecord {
            id: model.id,
            user_id: model.user_id,
            metrics: HealthMetrics {
                height: model.height,
                weight: model.weight,
                age: model.age,
                blood_pressure: model.blood_pressure,
                cholesterol: model.cholesterol,
                sugar_levels: model.sugar_levels,
                fats: model.fats,
                blood_points: model.blood_points,
                bmi: model.bmi,
            },
            created_at: Utc.from_utc_datetime(&model.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn model_maps_to_record_in_utc() {
        let created_at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let model = HealthRecordModel {
            id: Uuid::nil(),
            user_id: "user-1".to_string(),
            height: 180.0,
            weight: 81.0,
            age: 41,
            blood_pressure: "121/79".to_string(),
            cholesterol: 185.0,
            sugar_levels: 92.0,
            fats: 22.0,
            blood_points: 95.0,
            bmi: 25.0,
            created_at,
        };

        let record = HealthRecord::from(model);

        assert_eq!(record.metrics.blood_pressure, "121/79");
        assert_eq!(record.created_at, created_at.and_utc());
    }
}
