use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{DatabaseConnection, EntityTrait, Insert};
use tracing::{error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    suggestion::{
        entities::{CachedSuggestion, SuggestionResult},
        ports::SuggestionCacheRepository,
        value_objects::CacheKey,
    },
};
use crate::entity::generated_suggestions::{
    ActiveModel as GeneratedSuggestionActiveModel, Column as GeneratedSuggestionColumn,
    Entity as GeneratedSuggestionEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresSuggestionCacheRepository {
    pub db: DatabaseConnection,
}

impl PostgresSuggestionCacheRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Insert-or-replace for one cache entry. `created_at` is always set by the database.
fn upsert(
    key: &CacheKey,
    suggestion_data: serde_json::Value,
) -> Insert<GeneratedSuggestionActiveModel> {
    GeneratedSuggestionEntity::insert(GeneratedSuggestionActiveModel {
        id: Set(key.id()),
        user_id: Set(key.user_id.clone()),
        health_data_id: Set(key.health_data_id),
        kind: Set(key.kind.to_string()),
        suggestion_data: Set(suggestion_data),
        created_at: NotSet,
    })
    .on_conflict(
        OnConflict::column(GeneratedSuggestionColumn::Id)
            .update_column(GeneratedSuggestionColumn::SuggestionData)
            .value(GeneratedSuggestionColumn::CreatedAt, Expr::current_timestamp())
            .to_owned(),
    )
}

impl SuggestionCacheRepository for PostgresSuggestionCacheRepository {
    async fn lookup(&self, key: CacheKey) -> Result<Option<SuggestionResult>, CoreError> {
        let row = GeneratedSuggestionEntity::find_by_id(key.id())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to read cached suggestion: {}", e);
                CoreError::InternalServerError
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        match CachedSuggestion::try_from(row) {
            Ok(cached) if cached.kind == key.kind => Ok(Some(cached.suggestion_data)),
            Ok(_) => {
                warn!(cache_key = %key.id(), "Cached suggestion has a different kind, ignoring");
                Ok(None)
            }
            Err(e) => {
                warn!(cache_key = %key.id(), error = %e, "Cached suggestion is unreadable, ignoring");
                Ok(None)
            }
        }
    }

    async fn store(&self, key: CacheKey, result: SuggestionResult) -> Result<(), CoreError> {
        let suggestion_data = serde_json::to_value(&result).map_err(|e| {
            error!("Failed to serialize suggestion: {}", e);
            CoreError::InternalServerError
        })?;

        upsert(&key, suggestion_data)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to store suggestion: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
