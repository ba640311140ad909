use tracing::{info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health_record::{
        entities::HealthRecord,
        ports::{HealthRecordRepository, HealthRecordService},
        value_objects::{CreateHealthRecordInput, GetHealthRecordsFilter},
    },
    suggestion::ports::{ImageGenerator, LLMClient, SuggestionCacheRepository},
};

impl<HR, SC, LLM, IMG> HealthRecordService for Service<HR, SC, LLM, IMG>
where
    HR: HealthRecordRepository,
    SC: SuggestionCacheRepository,
    LLM: LLMClient,
    IMG: ImageGenerator,
{
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    async fn create_health_record(
        &self,
        input: CreateHealthRecordInput,
    ) -> Result<HealthRecord, CoreError> {
        input.validate()?;

        let record = self
            .health_record_repository
            .create_record(HealthRecord::new(input))
            .await?;

        info!(record_id = %record.id, bmi = record.metrics.bmi, "Health record created");

        Ok(record)
    }

    async fn get_health_records(
        &self,
        user_id: String,
        filter: GetHealthRecordsFilter,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        self.health_record_repository
            .fetch_records_by_user(user_id, filter)
            .await
    }

    async fn get_latest_health_record(&self, user_id: String) -> Result<HealthRecord, CoreError> {
        self.health_record_repository
            .fetch_records_by_user(user_id, GetHealthRecordsFilter::latest(1))
            .await?
            .into_iter()
            .next()
            .ok_or(CoreError::NoHealthData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::suggestion::test_support::{FakeHealthRecords, service_with};

    fn input(user_id: &str, weight: f64) -> CreateHealthRecordInput {
        CreateHealthRecordInput {
            user_id: user_id.to_string(),
            height: 170.0,
            weight,
            age: 35,
            blood_pressure: "118/76".to_string(),
            cholesterol: 170.0,
            sugar_levels: 88.0,
            fats: 24.0,
            blood_points: 90.0,
        }
    }

    #[tokio::test]
    async fn create_derives_bmi_and_persists() {
        let service = service_with(FakeHealthRecords::default());

        let record = service
            .create_health_record(input("user-1", 72.25))
            .await
            .unwrap();

        assert_eq!(record.metrics.bmi, 25.0);
        assert_eq!(service.health_record_repository.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_writing() {
        let service = service_with(FakeHealthRecords::default());

        let result = service.create_health_record(input("user-1", -3.0)).await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
        assert_eq!(service.health_record_repository.len(), 0);
    }

    #[tokio::test]
    async fn latest_record_is_the_newest_for_that_user() {
        let service = service_with(FakeHealthRecords::default());
        service.create_health_record(input("user-1", 70.0)).await.unwrap();
        service.create_health_record(input("user-2", 90.0)).await.unwrap();
        let newest = service.create_health_record(input("user-1", 68.0)).await.unwrap();

        let latest = service
            .get_latest_health_record("user-1".to_string())
            .await
            .unwrap();

        assert_eq!(latest.id, newest.id);
    }

    #[tokio::test]
    async fn latest_record_without_data_is_no_health_data() {
        let service = service_with(FakeHealthRecords::default());

        let result = service.get_latest_health_record("nobody".to_string()).await;

        assert_eq!(result, Err(CoreError::NoHealthData));
    }

    #[tokio::test]
    async fn records_are_paginated_newest_first() {
        let service = service_with(FakeHealthRecords::default());
        for weight in [80.0, 79.0, 78.0] {
            service.create_health_record(input("user-1", weight)).await.unwrap();
        }

        let page = service
            .get_health_records(
                "user-1".to_string(),
                GetHealthRecordsFilter {
                    limit: Some(2),
                    offset: Some(1),
                },
            )
            .await
            .unwrap();

        let weights: Vec<f64> = page.iter().map(|r| r.metrics.weight).collect();
        assert_eq!(weights, vec![79.0, 80.0]);
    }
}
