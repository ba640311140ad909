use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health_record::{
        entities::HealthRecord, ports::HealthRecordRepository,
        value_objects::GetHealthRecordsFilter,
    },
};
use crate::entity::health_records::{
    ActiveModel as HealthRecordActiveModel, Column as HealthRecordColumn,
    Entity as HealthRecordEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresHealthRecordRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthRecordRepository for PostgresHealthRecordRepository {
    async fn create_record(&self, record: HealthRecord) -> Result<HealthRecord, CoreError> {
        let metrics = record.metrics;

        HealthRecordEntity::insert(HealthRecordActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            height: Set(metrics.height),
            weight: Set(metrics.weight),
            age: Set(metrics.age),
            blood_pressure: Set(metrics.blood_pressure),
            cholesterol: Set(metrics.cholesterol),
            sugar_levels: Set(metrics.sugar_levels),
            fats: Set(metrics.fats),
            blood_points: Set(metrics.blood_points),
            bmi: Set(metrics.bmi),
            created_at: Set(record.created_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(HealthRecord::from)
        .map_err(|e| {
            error!("Failed to create health record: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn fetch_records_by_user(
        &self,
        user_id: String,
        filter: GetHealthRecordsFilter,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        let mut query = HealthRecordEntity::find()
            .filter(HealthRecordColumn::UserId.eq(user_id))
            .order_by_desc(HealthRecordColumn::CreatedAt)
            .order_by_desc(HealthRecordColumn::Id);

        if let Some(limit) = filter.limit {
            query = query.limit(limit as u64);
        }

        if let Some(offset) = filter.offset {
            query = query.offset(offset as u64);
        }

        let records = query
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch health records: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(HealthRecord::from)
            .collect();

        Ok(records)
    }
}
