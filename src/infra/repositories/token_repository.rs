//! Single-use verification token repository.
//!
//! One row per email; issuing replaces, consuming clears. The raw token
//! string is looked up before any cryptographic verification so a cleared
//! record can never be replayed.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::entities::email_verification::{self, ActiveModel, Entity as VerificationEntity};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persisted verification-token record.
#[derive(Debug, Clone)]
pub struct VerificationRecord {
    pub id: i32,
    pub email: String,
    pub verify_token: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Existence check on the raw token string
    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRecord>>;

    /// Drop any prior token for the email and store a fresh one
    async fn replace(&self, email: &str, token: &str) -> AppResult<()>;

    /// Store a token, updating the existing row when present
    async fn upsert(&self, email: &str, token: &str) -> AppResult<()>;

    /// Null out the stored token after a successful reset
    async fn clear(&self, email: &str) -> AppResult<()>;

    /// Remove the record entirely after a successful verification
    async fn delete_by_email(&self, email: &str) -> AppResult<()>;
}

pub struct TokenStore {
    db: DatabaseConnection,
}

impl TokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenStore {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRecord>> {
        let result = VerificationEntity::find()
            .filter(email_verification::Column::VerifyToken.eq(token))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|m| VerificationRecord {
            id: m.id,
            email: m.email,
            verify_token: m.verify_token,
        }))
    }

    async fn replace(&self, email: &str, token: &str) -> AppResult<()> {
        VerificationEntity::delete_many()
            .filter(email_verification::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            email: Set(email.to_string()),
            verify_token: Set(Some(token.to_string())),
            created_time: Set(now),
            updated_time: Set(now),
            ..Default::default()
        };
        active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn upsert(&self, email: &str, token: &str) -> AppResult<()> {
        let existing = VerificationEntity::find()
            .filter(email_verification::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let now = chrono::Utc::now();
        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.verify_token = Set(Some(token.to_string()));
                active.updated_time = Set(now);
                active.update(&self.db).await.map_err(AppError::from)?;
            }
            None => {
                let active_model = ActiveModel {
                    email: Set(email.to_string()),
                    verify_token: Set(Some(token.to_string())),
                    created_time: Set(now),
                    updated_time: Set(now),
                    ..Default::default()
                };
                active_model.insert(&self.db).await.map_err(AppError::from)?;
            }
        }
        Ok(())
    }

    async fn clear(&self, email: &str) -> AppResult<()> {
        let existing = VerificationEntity::find()
            .filter(email_verification::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if let Some(model) = existing {
            let mut active: ActiveModel = model.into();
            active.verify_token = Set(None);
            active.updated_time = Set(chrono::Utc::now());
            active.update(&self.db).await.map_err(AppError::from)?;
        }
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> AppResult<()> {
        VerificationEntity::delete_many()
            .filter(email_verification::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
