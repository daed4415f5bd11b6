//! Catalog service managing the bookable Service entities.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::service::{
    CreateService, PublicServiceDetail, PublicServiceItem, ServiceDetail, ServiceListItem,
    UpdateService,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::ServiceRepository;
use crate::types::{
    BulkMutationResponse, FindParams, MutationResponse, Pageable, SortParams, SuccessType,
};
use crate::utils::slug::{is_valid_slug, probe_candidate};

/// Related services shown on a public detail page.
const RELATED_LIMIT: u64 = 6;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<ServiceListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    async fn find_all_public(
        &self,
        search: Option<String>,
        kind: Option<i32>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicServiceItem>>;

    async fn count_public(&self, search: Option<String>, kind: Option<i32>) -> AppResult<u64>;

    /// Public detail by slug, with up to six related services of the
    /// same type
    async fn find_by_slug(&self, slug: &str) -> AppResult<PublicServiceDetail>;

    async fn find_one(&self, id: i32) -> AppResult<ServiceDetail>;

    async fn create(&self, actor: i32, data: CreateService) -> AppResult<MutationResponse>;

    async fn update(&self, actor: i32, id: i32, data: UpdateService)
        -> AppResult<MutationResponse>;

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;
}

/// Concrete implementation of CatalogService.
pub struct CatalogManager {
    repo: Arc<dyn ServiceRepository>,
}

impl CatalogManager {
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self {
        Self { repo }
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
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<ServiceListItem>> {
        self.repo.list(filter, pageable, sort).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        self.repo.count(filter).await
    }

    async fn find_all_public(
        &self,
        search: Option<String>,
        kind: Option<i32>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicServiceItem>> {
        self.repo.list_public(search, kind, pageable, sort).await
    }

    async fn count_public(&self, search: Option<String>, kind: Option<i32>) -> AppResult<u64> {
        self.repo.count_public(search, kind).await
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<PublicServiceDetail> {
        let mut detail = self
            .repo
            .find_by_slug_public(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Dịch vụ không tồn tại"))?;

        detail.related_services = self
            .repo
            .list_related(detail.kind, detail.id, RELATED_LIMIT)
            .await?;

        Ok(detail)
    }

    async fn find_one(&self, id: i32) -> AppResult<ServiceDetail> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Dịch vụ không tồn tại"))
    }

    async fn create(&self, actor: i32, data: CreateService) -> AppResult<MutationResponse> {
        let base_slug = data.slug.trim().to_string();
        if !is_valid_slug(&base_slug) {
            return Err(AppError::bad_request(
                "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
            ));
        }

        let final_slug = self.probe_slug(&base_slug, None).await?;
        let id = self.repo.create(actor, data, final_slug).await?;
        Ok(MutationResponse::new(id, SuccessType::Create))
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateService,
    ) -> AppResult<MutationResponse> {
        let service = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Dịch vụ không tồn tại"))?;

        let final_slug = match data.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() && slug != service.slug => {
                if !is_valid_slug(slug) {
                    return Err(AppError::bad_request(
                        "Slug không hợp lệ. Chỉ dùng chữ thường, số và dấu gạch ngang.",
                    ));
                }
                self.probe_slug(slug, Some(id)).await?
            }
            _ => service.slug.clone(),
        };

        self.repo.update(actor, id, data, final_slug).await?;
        Ok(MutationResponse::new(id, SuccessType::Update))
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_soft_delete(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found("Không có dịch vụ nào hợp lệ để xoá"));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Delete))
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_restore(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có dịch vụ nào hợp lệ để khôi phục",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Restore))
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_hard_delete(ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có dịch vụ nào hợp lệ để xoá vĩnh viễn",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::HardDelete))
    }
}
