//! Media metadata repository. File-system work happens in the service
//! layer; this store only tracks the rows.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::media::{self, ActiveModel, Entity as MediaEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::media::{MediaListItem, MediaType, StoredUpload};
use crate::domain::user::UserRef;
use crate::errors::{AppError, AppResult};
use crate::types::{FindParams, Pageable, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Row subset needed to remove a backing file.
#[derive(Debug, Clone)]
pub struct MediaFileRef {
    pub id: i32,
    /// Relative storage path
    pub slug: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<MediaListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    /// Register an upload already written to disk; returns (id, url)
    async fn create(&self, actor: i32, upload: StoredUpload, kind: MediaType)
        -> AppResult<(i32, String)>;

    /// File refs for the rows among `ids` that exist
    async fn find_files_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MediaFileRef>>;

    /// Remove rows whose backing files were deleted
    async fn delete_by_ids(&self, ids: Vec<i32>) -> AppResult<()>;
}

pub struct MediaStore {
    db: DatabaseConnection,
}

impl MediaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaRepository for MediaStore {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<MediaListItem>> {
        let mut query = MediaEntity::find();
        if let Some(search) = &filter.search {
            query = query.filter(media::Column::Name.contains(search.as_str()));
        }

        let dir = sort.direction();
        query = match sort.sort_by.as_deref() {
            Some("name") => query.order_by(media::Column::Name, dir),
            Some("size") => query.order_by(media::Column::Size, dir),
            Some("createdTime") => query.order_by(media::Column::CreatedTime, dir),
            _ => query.order_by(media::Column::CreatedTime, sea_orm::Order::Desc),
        };

        let models = query
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let uploader_ids: Vec<i32> = models.iter().map(|m| m.uploaded_by_id).collect();
        let uploaders: HashMap<i32, UserRef> = if uploader_ids.is_empty() {
            HashMap::new()
        } else {
            UserEntity::find()
                .filter(user::Column::Id.is_in(uploader_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|u| {
                    (
                        u.id,
                        UserRef {
                            id: u.id,
                            first_name: u.first_name,
                            last_name: u.last_name,
                            email: u.email,
                        },
                    )
                })
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| MediaListItem {
                id: m.id,
                name: m.name,
                slug: m.slug,
                created_time: m.created_time,
                uploaded_by: uploaders.get(&m.uploaded_by_id).cloned(),
            })
            .collect())
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        let mut query = MediaEntity::find();
        if let Some(search) = &filter.search {
            query = query.filter(media::Column::Name.contains(search.as_str()));
        }
        query.count(&self.db).await.map_err(AppError::from)
    }

    async fn create(
        &self,
        actor: i32,
        upload: StoredUpload,
        kind: MediaType,
    ) -> AppResult<(i32, String)> {
        // Strip the extension and turn separators into spaces for alt text
        let readable_name = upload
            .original_name
            .rsplit_once('.')
            .map(|(base, _)| base)
            .unwrap_or(&upload.original_name)
            .replace(['-', '_'], " ")
            .trim()
            .to_string();

        let now = chrono::Utc::now();
        let model = ActiveModel {
            name: Set(upload.original_name),
            slug: Set(upload.relative_path.clone()),
            kind: Set(kind.to_string()),
            mime_type: Set(upload.mime_type),
            size: Set(upload.size),
            url: Set(upload.relative_path),
            alt_text: Set(Some(readable_name.clone())),
            description: Set(Some(readable_name)),
            uploaded_by_id: Set(actor),
            created_time: Set(now),
            created_user: Set(Some(actor)),
            updated_time: Set(now),
            updated_user: Set(Some(actor)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        Ok((model.id, model.url))
    }

    async fn find_files_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MediaFileRef>> {
        let models = MediaEntity::find()
            .filter(media::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(|m| MediaFileRef {
                id: m.id,
                slug: m.slug,
            })
            .collect())
    }

    async fn delete_by_ids(&self, ids: Vec<i32>) -> AppResult<()> {
        MediaEntity::delete_many()
            .filter(media::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
