//! Settings repository. Unique on (namespace, key); upsert is idempotent.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::entities::setting::{self, ActiveModel, Entity as SettingEntity};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// All (key, value) pairs inside a namespace
    async fn get_by_namespace(&self, namespace: &str) -> AppResult<Vec<(String, String)>>;

    async fn get_value(&self, namespace: &str, key: &str) -> AppResult<Option<String>>;

    async fn exists(&self, namespace: &str, key: &str) -> AppResult<bool>;

    async fn insert(&self, namespace: &str, key: &str, value: &str) -> AppResult<()>;

    /// Update an existing key; false when the key is absent
    async fn update_value(&self, namespace: &str, key: &str, value: &str) -> AppResult<bool>;

    /// Insert-or-update on the (namespace, key) composite key
    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> AppResult<()>;
}

pub struct SettingStore {
    db: DatabaseConnection,
}

impl SettingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn by_key(namespace: &str, key: &str) -> sea_orm::Select<SettingEntity> {
        SettingEntity::find()
            .filter(setting::Column::Namespace.eq(namespace))
            .filter(setting::Column::Key.eq(key))
    }
}

#[async_trait]
impl SettingRepository for SettingStore {
    async fn get_by_namespace(&self, namespace: &str) -> AppResult<Vec<(String, String)>> {
        let models = SettingEntity::find()
            .filter(setting::Column::Namespace.eq(namespace))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(|m| (m.key, m.value)).collect())
    }

    async fn get_value(&self, namespace: &str, key: &str) -> AppResult<Option<String>> {
        let model = Self::by_key(namespace, key)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(|m| m.value))
    }

    async fn exists(&self, namespace: &str, key: &str) -> AppResult<bool> {
        Ok(Self::by_key(namespace, key)
            .count(&self.db)
            .await
            .map_err(AppError::from)?
            > 0)
    }

    async fn insert(&self, namespace: &str, key: &str, value: &str) -> AppResult<()> {
        let now = chrono::Utc::now();
        ActiveModel {
            namespace: Set(namespace.to_string()),
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            created_time: Set(now),
            updated_time: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    async fn update_value(&self, namespace: &str, key: &str, value: &str) -> AppResult<bool> {
        let existing = Self::by_key(namespace, key)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(model) = existing else {
            return Ok(false);
        };

        let mut active: ActiveModel = model.into();
        active.value = Set(value.to_string());
        active.updated_time = Set(chrono::Utc::now());
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(true)
    }

    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> AppResult<()> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            namespace: Set(namespace.to_string()),
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            created_time: Set(now),
            updated_time: Set(now),
            ..Default::default()
        };

        SettingEntity::insert(model)
            .on_conflict(
                OnConflict::columns([setting::Column::Namespace, setting::Column::Key])
                    .update_columns([setting::Column::Value, setting::Column::UpdatedTime])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
