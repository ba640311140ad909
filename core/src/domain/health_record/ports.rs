use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health_record::{
        entities::HealthRecord,
        value_objects::{CreateHealthRecordInput, GetHealthRecordsFilter},
    },
};

/// Repository trait for health record storage
#[cfg_attr(test, mockall::automock)]
pub trait HealthRecordRepository: Send + Sync {
    fn create_record(
        &self,
        record: HealthRecord,
    ) -> impl Future<Output = Result<HealthRecord, CoreError>> + Send;

    /// Records of one user, newest first.
    fn fetch_records_by_user(
        &self,
        user_id: String,
        filter: GetHealthRecordsFilter,
    ) -> impl Future<Output = Result<Vec<HealthRecord>, CoreError>> + Send;
}

/// Service trait for logging and reading health records
pub trait HealthRecordService: Send + Sync {
    fn create_health_record(
        &self,
        input: CreateHealthRecordInput,
    ) -> impl Future<Output = Result<HealthRecord, CoreError>> + Send;

    fn get_health_records(
        &self,
        user_id: String,
        filter: GetHealthRecordsFilter,
    ) -> impl Future<Output = Result<Vec<HealthRecord>, CoreError>> + Send;

    fn get_latest_health_record(
        &self,
        user_id: String,
    ) -> impl Future<Output = Result<HealthRecord, CoreError>> + Send;
}
