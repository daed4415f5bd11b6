//! Media service: writes uploads under `uploads/YYYY/MM/`, registers the
//! metadata, and removes backing files before their rows on delete.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::config::UPLOAD_DIR;
use crate::domain::media::{
    FailedDelete, MediaDeleteOutcome, MediaListItem, MediaType, MediaUploadOutcome, StoredUpload,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::MediaRepository;
use crate::types::{FindParams, Pageable, SortParams, SuccessType};

/// Media service trait for dependency injection.
#[async_trait]
pub trait MediaService: Send + Sync {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<MediaListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    /// Write one uploaded file to disk and register it
    async fn store_upload(
        &self,
        actor: i32,
        original_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    ) -> AppResult<MediaUploadOutcome>;

    /// Delete media: backing files first, then the rows of the files
    /// that could be removed. Per-item failures are reported, not raised.
    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<MediaDeleteOutcome>;
}

/// Concrete implementation of MediaService.
pub struct MediaManager {
    repo: Arc<dyn MediaRepository>,
}

impl MediaManager {
    pub fn new(repo: Arc<dyn MediaRepository>) -> Self {
        Self { repo }
    }

    /// `uploads/YYYY/MM` under the working directory, created on demand.
    async fn upload_dir(&self) -> AppResult<(PathBuf, String)> {
        let now = Utc::now();
        let relative = format!("{}/{:04}/{:02}", UPLOAD_DIR, now.year(), now.month());
        let absolute = PathBuf::from(&relative);
        tokio::fs::create_dir_all(&absolute)
            .await
            .map_err(|e| AppError::internal(format!("cannot create upload dir: {}", e)))?;
        Ok((absolute, relative))
    }

    /// Probe `name.ext`, `name-1.ext`, ... until a free file name is found.
    async fn free_file_name(dir: &Path, original_name: &str) -> String {
        let (base, ext) = match original_name.rsplit_once('.') {
            Some((base, ext)) => (base.to_string(), format!(".{}", ext)),
            None => (original_name.to_string(), String::new()),
        };

        let mut candidate = format!("{}{}", base, ext);
        let mut counter = 1;
        while tokio::fs::try_exists(dir.join(&candidate)).await.unwrap_or(false) {
            candidate = format!("{}-{}{}", base, counter, ext);
            counter += 1;
        }
        candidate
    }
}

#[async_trait]
impl MediaService for MediaManager {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<MediaListItem>> {
        self.repo.list(filter, pageable, sort).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        self.repo.count(filter).await
    }

    async fn store_upload(
        &self,
        actor: i32,
        original_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    ) -> AppResult<MediaUploadOutcome> {
        let (dir, relative_dir) = self.upload_dir().await?;
        let file_name = Self::free_file_name(&dir, &original_name).await;

        let size = bytes.len() as i64;
        tokio::fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(|e| AppError::internal(format!("cannot write upload: {}", e)))?;

        let kind = MediaType::from_mime(&mime_type);
        let upload = StoredUpload {
            original_name,
            relative_path: format!("/{}/{}", relative_dir, file_name),
            mime_type,
            size,
        };

        let (id, url) = self.repo.create(actor, upload, kind).await?;
        Ok(MediaUploadOutcome {
            id,
            url,
            success: true,
            kind: SuccessType::Create,
        })
    }

    async fn delete_many(&self, ids: Vec<i32>) -> AppResult<MediaDeleteOutcome> {
        let files = self.repo.find_files_by_ids(ids).await?;

        let mut deleted = Vec::new();
        let mut failed = Vec::new();

        for file in files {
            let path = PathBuf::from(file.slug.trim_start_matches('/'));
            match tokio::fs::remove_file(&path).await {
                Ok(()) => deleted.push(file.id),
                // A missing file is already gone; only a real I/O failure
                // keeps the row alive
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => deleted.push(file.id),
                Err(e) => {
                    tracing::warn!(id = file.id, path = %path.display(), error = %e, "file removal failed");
                    failed.push(FailedDelete {
                        id: file.id,
                        reason: "Lỗi khi xoá file vật lý".to_string(),
                    });
                }
            }
        }

        if !deleted.is_empty() {
            self.repo.delete_by_ids(deleted.clone()).await?;
        }

        Ok(MediaDeleteOutcome {
            success: true,
            deleted,
            failed,
        })
    }
}
