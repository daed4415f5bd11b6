//! Category repository.
//!
//! Category deletion is physical: post links are removed first inside the
//! same transaction. The default-category swap is also transactional.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use super::entities::post_category::{self, Entity as PostCategoryEntity};
use crate::domain::category::{Category, CategoryRow, CreateCategory, UpdateCategory};
use crate::errors::{AppError, AppResult};
use crate::types::SortParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All live rows matching the name search, in the requested sort order.
    /// The service flattens the tree and paginates afterwards.
    async fn find_rows(&self, search: Option<String>, sort: SortParams)
        -> AppResult<Vec<CategoryRow>>;

    /// Live row count for the same search
    async fn count(&self, search: Option<String>) -> AppResult<u64>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    /// How many of the given ids exist (foreign-reference validation)
    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64>;

    /// (id, is_default) pairs for the ids that exist
    async fn find_flags_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<(i32, bool)>>;

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    /// Insert with an already-probed unique slug
    async fn create(&self, actor: i32, data: CreateCategory, final_slug: String)
        -> AppResult<i32>;

    /// Update with an already-probed slug
    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateCategory,
        final_slug: String,
    ) -> AppResult<()>;

    /// Physically delete categories and their post links, atomically
    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<()>;

    /// Clear previous default(s) and mark the given id, atomically
    async fn set_default(&self, actor: i32, id: i32) -> AppResult<()>;
}

pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_rows(
        &self,
        search: Option<String>,
        sort: SortParams,
    ) -> AppResult<Vec<CategoryRow>> {
        let mut query = CategoryEntity::find().filter(category::Column::DeleteFlg.eq(0));
        if let Some(search) = &search {
            query = query.filter(category::Column::Name.contains(search.as_str()));
        }

        let dir = sort.direction();
        query = match sort.sort_by.as_deref() {
            Some("name") => query.order_by(category::Column::Name, dir),
            Some("slug") => query.order_by(category::Column::Slug, dir),
            _ => query.order_by(category::Column::Id, sea_orm::Order::Asc),
        };

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(|m| CategoryRow {
                id: m.id,
                name: m.name,
                description: m.description,
                parent_id: m.parent_id,
                is_default: m.is_default,
            })
            .collect())
    }

    async fn count(&self, search: Option<String>) -> AppResult<u64> {
        let mut query = CategoryEntity::find().filter(category::Column::DeleteFlg.eq(0));
        if let Some(search) = &search {
            query = query.filter(category::Column::Name.contains(search.as_str()));
        }
        query.count(&self.db).await.map_err(AppError::from)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|m| Category {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            parent_id: m.parent_id,
            is_default: m.is_default,
            delete_flg: m.delete_flg,
            created_time: m.created_time,
            created_user: m.created_user,
            updated_time: m.updated_time,
            updated_user: m.updated_user,
        }))
    }

    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64> {
        CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_flags_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<(i32, bool)>> {
        let models = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(|m| (m.id, m.is_default)).collect())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let mut query = CategoryEntity::find().filter(category::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(category::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await.map_err(AppError::from)? > 0)
    }

    async fn create(
        &self,
        actor: i32,
        data: CreateCategory,
        final_slug: String,
    ) -> AppResult<i32> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            name: Set(data.name),
            slug: Set(final_slug),
            description: Set(data.description),
            parent_id: Set(data.parent_id),
            is_default: Set(false),
            delete_flg: Set(0),
            created_time: Set(now),
            created_user: Set(Some(actor)),
            updated_time: Set(now),
            updated_user: Set(Some(actor)),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateCategory,
        final_slug: String,
    ) -> AppResult<()> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Danh mục không tồn tại"))?;

        let mut active: ActiveModel = model.into();
        active.name = Set(data.name);
        active.slug = Set(final_slug);
        active.description = Set(data.description);
        active.parent_id = Set(data.parent_id);
        active.updated_time = Set(chrono::Utc::now());
        active.updated_user = Set(Some(actor));
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        PostCategoryEntity::delete_many()
            .filter(post_category::Column::CategoryId.is_in(ids.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        CategoryEntity::delete_many()
            .filter(category::Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }

    async fn set_default(&self, actor: i32, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        CategoryEntity::update_many()
            .col_expr(category::Column::IsDefault, Expr::value(false))
            .filter(category::Column::IsDefault.eq(true))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        CategoryEntity::update_many()
            .col_expr(category::Column::IsDefault, Expr::value(true))
            .col_expr(category::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(
                category::Column::UpdatedTime,
                Expr::value(chrono::Utc::now()),
            )
            .filter(category::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }
}
