//! Blog post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use super::entities::post_category::{self, Entity as PostCategoryEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::post::{
    CategoryRef, CreatePost, Post, PostDetail, PostListItem, PublicPostDetail, PublicPostItem,
    UpdatePost,
};
use crate::domain::user::AuthorRef;
use crate::errors::{AppError, AppResult};
use crate::types::{FindParams, Pageable, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PostListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    /// Published, live posts with their author names
    async fn list_public(
        &self,
        search: Option<String>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicPostItem>>;

    async fn count_public(&self, search: Option<String>) -> AppResult<u64>;

    async fn find_by_slug_public(&self, slug: &str) -> AppResult<Option<PublicPostDetail>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>>;

    /// Live post with author and category references
    async fn find_detail(&self, id: i32) -> AppResult<Option<PostDetail>>;

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    /// Insert the post and its category links
    async fn create(&self, actor: i32, data: CreatePost, final_slug: String) -> AppResult<i32>;

    /// Update the post; when category ids are supplied the links are
    /// replaced in the same transaction
    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdatePost,
        final_slug: String,
    ) -> AppResult<()>;

    /// Flip delete_flg on the live rows among `ids`; returns the ids touched
    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    /// Clear delete_flg on the deleted rows among `ids`; returns the ids touched
    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    /// Physically remove rows and their category links, atomically
    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>>;
}

pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &FindParams) -> sea_orm::Select<PostEntity> {
        let mut query =
            PostEntity::find().filter(post::Column::DeleteFlg.eq(filter.delete_flg.unwrap_or(0)));
        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(status));
        }
        if let Some(search) = &filter.search {
            query = query.filter(post::Column::Title.contains(search.as_str()));
        }
        query
    }

    fn public_filtered(search: &Option<String>) -> sea_orm::Select<PostEntity> {
        let mut query = PostEntity::find()
            .filter(post::Column::Status.eq(1))
            .filter(post::Column::DeleteFlg.eq(0));
        if let Some(search) = search {
            query = query.filter(post::Column::Title.contains(search.as_str()));
        }
        query
    }

    fn sorted(query: sea_orm::Select<PostEntity>, sort: &SortParams) -> sea_orm::Select<PostEntity> {
        let dir = sort.direction();
        match sort.sort_by.as_deref() {
            Some("title") => query.order_by(post::Column::Title, dir),
            Some("status") => query.order_by(post::Column::Status, dir),
            Some("createdTime") => query.order_by(post::Column::CreatedTime, dir),
            _ => query.order_by(post::Column::CreatedTime, sea_orm::Order::Desc),
        }
    }

    async fn authors_by_ids(&self, ids: Vec<i32>) -> AppResult<HashMap<i32, AuthorRef>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(users
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    AuthorRef {
                        first_name: u.first_name,
                        last_name: u.last_name,
                    },
                )
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PostListItem>> {
        let models = Self::sorted(Self::filtered(&filter), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(|m| PostListItem {
                id: m.id,
                title: m.title,
                created_time: m.created_time,
                delete_flg: m.delete_flg,
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

    async fn list_public(
        &self,
        search: Option<String>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicPostItem>> {
        let models = Self::sorted(Self::public_filtered(&search), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let authors = self
            .authors_by_ids(models.iter().map(|m| m.author_id).collect())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let author = authors.get(&m.author_id).cloned().unwrap_or(AuthorRef {
                    first_name: None,
                    last_name: None,
                });
                PublicPostItem {
                    id: m.id,
                    title: m.title,
                    excerpt: m.excerpt,
                    content: m.content.unwrap_or_default(),
                    author,
                    created_time: m.created_time,
                }
            })
            .collect())
    }

    async fn count_public(&self, search: Option<String>) -> AppResult<u64> {
        Self::public_filtered(&search)
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_slug_public(&self, slug: &str) -> AppResult<Option<PublicPostDetail>> {
        let model = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(1))
            .filter(post::Column::DeleteFlg.eq(0))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(m) = model else {
            return Ok(None);
        };

        let author = self
            .authors_by_ids(vec![m.author_id])
            .await?
            .remove(&m.author_id);

        Ok(Some(PublicPostDetail {
            id: m.id,
            title: m.title,
            slug: m.slug,
            excerpt: m.excerpt,
            content: m.content,
            author,
            created_time: m.created_time,
            updated_time: m.updated_time,
        }))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|m| Post {
            id: m.id,
            title: m.title,
            content: m.content,
            excerpt: m.excerpt,
            slug: m.slug,
            status: m.status,
            password: m.password,
            thumbnail: m.thumbnail,
            author_id: m.author_id,
            delete_flg: m.delete_flg,
            created_time: m.created_time,
            updated_time: m.updated_time,
        }))
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<PostDetail>> {
        let model = PostEntity::find_by_id(id)
            .filter(post::Column::DeleteFlg.eq(0))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(m) = model else {
            return Ok(None);
        };

        let author = self
            .authors_by_ids(vec![m.author_id])
            .await?
            .remove(&m.author_id);

        let links = PostCategoryEntity::find()
            .filter(post_category::Column::PostId.eq(id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let categories = if links.is_empty() {
            Vec::new()
        } else {
            CategoryEntity::find()
                .filter(
                    category::Column::Id.is_in(links.iter().map(|l| l.category_id).collect::<Vec<_>>()),
                )
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|c| CategoryRef {
                    id: c.id,
                    name: c.name,
                    slug: c.slug,
                })
                .collect()
        };

        Ok(Some(PostDetail {
            id: m.id,
            title: m.title,
            content: m.content,
            excerpt: m.excerpt,
            slug: m.slug,
            status: m.status,
            password: m.password,
            thumbnail: m.thumbnail,
            created_time: m.created_time,
            updated_time: m.updated_time,
            author,
            categories,
        }))
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(post::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await.map_err(AppError::from)? > 0)
    }

    async fn create(&self, actor: i32, data: CreatePost, final_slug: String) -> AppResult<i32> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            title: Set(data.title),
            content: Set(data.content),
            excerpt: Set(data.excerpt),
            slug: Set(final_slug),
            status: Set(data.status.unwrap_or(0)),
            password: Set(data.password),
            thumbnail: Set(data.thumbnail),
            author_id: Set(actor),
            delete_flg: Set(0),
            created_time: Set(now),
            created_user: Set(Some(actor)),
            updated_time: Set(now),
            updated_user: Set(Some(actor)),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        if let Some(category_ids) = data.category_ids.filter(|ids| !ids.is_empty()) {
            let links: Vec<post_category::ActiveModel> = category_ids
                .into_iter()
                .map(|category_id| post_category::ActiveModel {
                    post_id: Set(model.id),
                    category_id: Set(category_id),
                    ..Default::default()
                })
                .collect();
            PostCategoryEntity::insert_many(links)
                .exec(&self.db)
                .await
                .map_err(AppError::from)?;
        }

        Ok(model.id)
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdatePost,
        final_slug: String,
    ) -> AppResult<()> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Bài viết không tồn tại"))?;

        let txn = self.db.begin().await.map_err(AppError::from)?;

        if let Some(category_ids) = data.category_ids.clone().filter(|ids| !ids.is_empty()) {
            PostCategoryEntity::delete_many()
                .filter(post_category::Column::PostId.eq(id))
                .exec(&txn)
                .await
                .map_err(AppError::from)?;

            let links: Vec<post_category::ActiveModel> = category_ids
                .into_iter()
                .map(|category_id| post_category::ActiveModel {
                    post_id: Set(id),
                    category_id: Set(category_id),
                    ..Default::default()
                })
                .collect();
            PostCategoryEntity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(AppError::from)?;
        }

        let mut active: ActiveModel = model.into();
        active.title = Set(data.title);
        active.content = Set(data.content);
        active.excerpt = Set(data.excerpt);
        active.slug = Set(final_slug);
        active.status = Set(data.status.unwrap_or(0));
        active.password = Set(data.password);
        active.thumbnail = Set(data.thumbnail);
        active.updated_time = Set(chrono::Utc::now());
        active.updated_user = Set(Some(actor));
        active.update(&txn).await.map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let live: Vec<i32> = PostEntity::find()
            .filter(post::Column::Id.is_in(ids))
            .filter(post::Column::DeleteFlg.eq(0))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if live.is_empty() {
            return Ok(live);
        }

        PostEntity::update_many()
            .col_expr(post::Column::DeleteFlg, Expr::value(1))
            .col_expr(post::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(post::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(post::Column::Id.is_in(live.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(live)
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let deleted: Vec<i32> = PostEntity::find()
            .filter(post::Column::Id.is_in(ids))
            .filter(post::Column::DeleteFlg.eq(1))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if deleted.is_empty() {
            return Ok(deleted);
        }

        PostEntity::update_many()
            .col_expr(post::Column::DeleteFlg, Expr::value(0))
            .col_expr(post::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(post::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(post::Column::Id.is_in(deleted.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(deleted)
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let existing: Vec<i32> = PostEntity::find()
            .filter(post::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if existing.is_empty() {
            return Ok(existing);
        }

        let txn = self.db.begin().await.map_err(AppError::from)?;

        PostCategoryEntity::delete_many()
            .filter(post_category::Column::PostId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        PostEntity::delete_many()
            .filter(post::Column::Id.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(existing)
    }
}
