//! User back-office service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::user::UserListItem;
use crate::errors::AppResult;
use crate::infra::repositories::UserRepository;
use crate::types::{FindParams, Pageable, SortParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<UserListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<UserListItem>> {
        self.repo.list(filter, pageable, sort).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        self.repo.count(filter).await
    }
}
