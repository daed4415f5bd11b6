//! Settings service.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::setting::{SettingCreateOutcome, SettingEntry, SettingUpdateOutcome};
use crate::errors::AppResult;
use crate::infra::repositories::SettingRepository;

/// Setting service trait for dependency injection.
#[async_trait]
pub trait SettingService: Send + Sync {
    /// Key/value map of one namespace
    async fn get_by_namespace(&self, namespace: &str) -> AppResult<BTreeMap<String, String>>;

    /// Namespace → key/value maps for several namespaces at once
    async fn get_by_namespaces(
        &self,
        namespaces: Vec<String>,
    ) -> AppResult<BTreeMap<String, BTreeMap<String, String>>>;

    async fn get_value(&self, namespace: &str, key: &str) -> AppResult<Option<String>>;

    /// Insert entries, skipping keys that already exist
    async fn create_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingCreateOutcome>;

    /// Update entries, skipping keys that do not exist
    async fn update_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingUpdateOutcome>;

    /// Idempotent insert-or-update for every entry
    async fn upsert_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingUpdateOutcome>;
}

/// Concrete implementation of SettingService.
pub struct SettingManager {
    repo: Arc<dyn SettingRepository>,
}

impl SettingManager {
    pub fn new(repo: Arc<dyn SettingRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SettingService for SettingManager {
    async fn get_by_namespace(&self, namespace: &str) -> AppResult<BTreeMap<String, String>> {
        Ok(self
            .repo
            .get_by_namespace(namespace)
            .await?
            .into_iter()
            .collect())
    }

    async fn get_by_namespaces(
        &self,
        namespaces: Vec<String>,
    ) -> AppResult<BTreeMap<String, BTreeMap<String, String>>> {
        let mut out = BTreeMap::new();
        for namespace in namespaces {
            let values = self.get_by_namespace(&namespace).await?;
            out.insert(namespace, values);
        }
        Ok(out)
    }

    async fn get_value(&self, namespace: &str, key: &str) -> AppResult<Option<String>> {
        self.repo.get_value(namespace, key).await
    }

    async fn create_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingCreateOutcome> {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            if self.repo.exists(namespace, &entry.key).await? {
                skipped.push(entry.key);
                continue;
            }
            self.repo.insert(namespace, &entry.key, &entry.value).await?;
            created.push(entry.key);
        }

        Ok(SettingCreateOutcome {
            success: true,
            created,
            skipped,
        })
    }

    async fn update_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingUpdateOutcome> {
        let mut updated = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            if self
                .repo
                .update_value(namespace, &entry.key, &entry.value)
                .await?
            {
                updated.push(entry.key);
            } else {
                skipped.push(entry.key);
            }
        }

        Ok(SettingUpdateOutcome {
            success: true,
            updated,
            skipped,
        })
    }

    async fn upsert_many(
        &self,
        namespace: &str,
        entries: Vec<SettingEntry>,
    ) -> AppResult<SettingUpdateOutcome> {
        let mut updated = Vec::new();
        for entry in entries {
            self.repo.upsert(namespace, &entry.key, &entry.value).await?;
            updated.push(entry.key);
        }

        Ok(SettingUpdateOutcome {
            success: true,
            updated,
            skipped: Vec::new(),
        })
    }
}
