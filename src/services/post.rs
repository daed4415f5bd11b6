//! Blog post service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::post::{
    CreatePost, PostDetail, PostListItem, PublicPostDetail, PublicPostItem, UpdatePost,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{CategoryRepository, PostRepository};
use crate::types::{
    BulkMutationResponse, FindParams, MutationResponse, Pageable, SortParams, SuccessType,
};
use crate::utils::slug::{is_valid_slug, probe_candidate};

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PostListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    /// Published posts for the public surface; content optionally
    /// truncated to `limit_words`
    async fn find_all_public(
        &self,
        search: Option<String>,
        limit_words: Option<usize>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicPostItem>>;

    async fn count_public(&self, search: Option<String>) -> AppResult<u64>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<PublicPostDetail>;

    async fn find_one(&self, id: i32) -> AppResult<PostDetail>;

    async fn create(&self, actor: i32, data: CreatePost) -> AppResult<MutationResponse>;

    async fn update(&self, actor: i32, id: i32, data: UpdatePost) -> AppResult<MutationResponse>;

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;
}

/// Concrete implementation of PostService.
pub struct PostManager {
    repo: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl PostManager {
    pub fn new(repo: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { repo, categories }
    }

    async fn probe_slug(&self, base: &str, exclude_id: Option<i32>) -> AppResult<String> {
        let mut index = 0;
        loop {
            let candidate = probe_candidate(base, index);
            if !self.repo.slug_exists(&candidate, exclude_id).await? {
                return Ok(candidate);
            }
            index += 1;
        }
    }

    /// Linked categories must exist before the owning write
    async fn ensure_categories_exist(&self, category_ids: &Option<Vec<i32>>) -> AppResult<()> {
        if let Some(ids) = category_ids {
            if !ids.is_empty() {
                let found = self.categories.count_by_ids(ids.clone()).await?;
                if found != ids.len() as u64 {
                    return Err(AppError::bad_request("Một hoặc nhiều danh mục không tồn tại."));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PostListItem>> {
        self.repo.list(filter, pageable, sort).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        self.repo.count(filter).await
    }

    async fn find_all_public(
        &self,
        search: Option<String>,
        limit_words: Option<usize>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicPostItem>> {
        let mut posts = self.repo.list_public(search, pageable, sort).await?;

        if let Some(limit) = limit_words {
            for post in &mut posts {
                post.content = post
                    .content
                    .split_whitespace()
                    .take(limit)
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        }

        Ok(posts)
    }

    async fn count_public(&self, search: Option<String>) -> AppResult<u64> {
        self.repo.count_public(search).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<PublicPostDetail> {
        self.repo
            .find_by_slug_public(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Bài viết không tồn tại"))
    }

    async fn find_one(&self, id: i32) -> AppResult<PostDetail> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Bài viết không tồn tại"))
    }

    async fn create(&self, actor: i32, data: CreatePost) -> AppResult<MutationResponse> {
        let base_slug = data.slug.trim().to_string();
        if !is_valid_slug(&base_slug) {
            return Err(AppError::bad_request(
                "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
            ));
        }

        let final_slug = self.probe_slug(&base_slug, None).await?;
        self.ensure_categories_exist(&data.category_ids).await?;

        let id = self.repo.create(actor, data, final_slug).await?;
        Ok(MutationResponse::new(id, SuccessType::Create))
    }

    async fn update(&self, actor: i32, id: i32, data: UpdatePost) -> AppResult<MutationResponse> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Bài viết không tồn tại"))?;

        let final_slug = match data.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() && slug != post.slug => {
                if !is_valid_slug(slug) {
                    return Err(AppError::bad_request(
                        "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
                    ));
                }
                self.probe_slug(slug, Some(id)).await?
            }
            _ => post.slug.clone(),
        };

        self.ensure_categories_exist(&data.category_ids).await?;

        self.repo.update(actor, id, data, final_slug).await?;
        Ok(MutationResponse::new(id, SuccessType::Update))
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_soft_delete(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found("Không có bài viết nào hợp lệ để xoá"));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Delete))
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_restore(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có bài viết nào hợp lệ để khôi phục",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Restore))
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_hard_delete(ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có bài viết nào hợp lệ để xoá vĩnh viễn",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::HardDelete))
    }
}
