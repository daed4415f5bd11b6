//! User repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::user::{NewUser, User, UserListItem};
use crate::errors::{AppError, AppResult};
use crate::types::{FindParams, Pageable, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return the row regardless of its delete flag; the auth flows
/// inspect `delete_flg`/`status` themselves.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user
    async fn create(&self, data: NewUser) -> AppResult<User>;

    /// Set account status (email verification, rejection)
    async fn update_status(&self, id: i32, status: i32) -> AppResult<()>;

    /// Replace the stored credential hash
    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()>;

    /// Back-office listing (email substring search)
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<UserListItem>>;

    /// Row count for the same filter
    async fn count(&self, filter: FindParams) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &FindParams) -> sea_orm::Select<UserEntity> {
        let mut query = UserEntity::find();
        if let Some(search) = &filter.search {
            query = query.filter(user::Column::Email.contains(search.as_str()));
        }
        query
    }

    fn sorted(query: sea_orm::Select<UserEntity>, sort: &SortParams) -> sea_orm::Select<UserEntity> {
        let dir = sort.direction();
        match sort.sort_by.as_deref() {
            Some("email") => query.order_by(user::Column::Email, dir),
            Some("firstName") => query.order_by(user::Column::FirstName, dir),
            Some("lastName") => query.order_by(user::Column::LastName, dir),
            Some("status") => query.order_by(user::Column::Status, dir),
            _ => query.order_by(user::Column::CreatedTime, sea_orm::Order::Desc),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            email: Set(data.email),
            password: Set(data.password),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            business_name: Set(data.business_name),
            role: Set(data.role.to_string()),
            status: Set(data.status),
            delete_flg: Set(0),
            created_time: Set(now),
            updated_time: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_status(&self, id: i32, status: i32) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;

        let mut active: ActiveModel = user.into();
        active.status = Set(status);
        active.updated_time = Set(chrono::Utc::now());
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;

        let mut active: ActiveModel = user.into();
        active.password = Set(password_hash);
        active.updated_time = Set(chrono::Utc::now());
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<UserListItem>> {
        let query = Self::sorted(Self::filtered(&filter), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit);

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(|m| UserListItem {
                id: m.id,
                email: m.email,
                first_name: m.first_name,
                last_name: m.last_name,
                status: m.status,
            })
            .collect())
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        Self::filtered(&filter)
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
