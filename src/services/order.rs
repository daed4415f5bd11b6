//! Order service. Public submissions carry no account; back-office
//! creates are stamped with the acting user.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::order::{CreateOrder, OrderView, UpdateOrder};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{OrderRepository, ServiceRepository};
use crate::types::{
    BulkMutationResponse, FindParams, MutationResponse, Pageable, SortParams, SuccessType,
};

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<OrderView>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    async fn find_one(&self, id: i32) -> AppResult<OrderView>;

    /// Anonymous submission from the public surface
    async fn create_public(&self, data: CreateOrder) -> AppResult<MutationResponse>;

    /// Back-office create on behalf of the acting user
    async fn create(&self, actor: i32, data: CreateOrder) -> AppResult<MutationResponse>;

    async fn update(&self, actor: i32, id: i32, data: UpdateOrder) -> AppResult<MutationResponse>;

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse>;
}

/// Concrete implementation of OrderService.
pub struct OrderManager {
    repo: Arc<dyn OrderRepository>,
    services: Arc<dyn ServiceRepository>,
}

impl OrderManager {
    pub fn new(repo: Arc<dyn OrderRepository>, services: Arc<dyn ServiceRepository>) -> Self {
        Self { repo, services }
    }

    /// Referenced services must exist before the order write
    async fn ensure_services_exist(&self, data: &CreateOrder) -> AppResult<()> {
        let mut ids: Vec<i32> = data.items.iter().map(|i| i.service_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let found = self.services.count_by_ids(ids.clone()).await?;
        if found != ids.len() as u64 {
            return Err(AppError::bad_request("Một hoặc nhiều dịch vụ không tồn tại."));
        }
        Ok(())
    }

    async fn ensure_update_services_exist(&self, data: &UpdateOrder) -> AppResult<()> {
        if data.items.is_empty() {
            return Ok(());
        }
        let mut ids: Vec<i32> = data.items.iter().map(|i| i.service_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let found = self.services.count_by_ids(ids.clone()).await?;
        if found != ids.len() as u64 {
            return Err(AppError::bad_request("Một hoặc nhiều dịch vụ không tồn tại."));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn find_all(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<OrderView>> {
        self.repo.list(filter, pageable, sort).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        self.repo.count(filter).await
    }

    async fn find_one(&self, id: i32) -> AppResult<OrderView> {
        self.repo
            .find_view(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    async fn create_public(&self, data: CreateOrder) -> AppResult<MutationResponse> {
        self.ensure_services_exist(&data).await?;
        let id = self.repo.create(None, None, data).await?;
        Ok(MutationResponse::new(id, SuccessType::Create))
    }

    async fn create(&self, actor: i32, data: CreateOrder) -> AppResult<MutationResponse> {
        self.ensure_services_exist(&data).await?;
        let id = self.repo.create(Some(actor), Some(actor), data).await?;
        Ok(MutationResponse::new(id, SuccessType::Create))
    }

    async fn update(&self, actor: i32, id: i32, data: UpdateOrder) -> AppResult<MutationResponse> {
        if self.repo.find_view(id).await?.is_none() {
            return Err(AppError::not_found("Order not found"));
        }

        self.ensure_update_services_exist(&data).await?;

        self.repo.update(actor, id, data).await?;
        Ok(MutationResponse::new(id, SuccessType::Update))
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_soft_delete(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found("Không có đơn hàng nào hợp lệ để xoá"));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Delete))
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_restore(actor, ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có đơn hàng nào hợp lệ để khôi phục",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::Restore))
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<BulkMutationResponse> {
        let touched = self.repo.bulk_hard_delete(ids).await?;
        if touched.is_empty() {
            return Err(AppError::not_found(
                "Không có đơn hàng nào hợp lệ để xoá vĩnh viễn",
            ));
        }
        Ok(BulkMutationResponse::new(touched, SuccessType::HardDelete))
    }
}
