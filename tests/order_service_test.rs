//! Order lifecycle tests over in-memory repositories: service-reference
//! validation, price snapshots and the batch soft-delete/restore filters.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use studio_api::domain::order::{CreateOrder, OrderItemInput, OrderItemView, OrderView, UpdateOrder};
use studio_api::domain::service::{
    CreateService, PublicServiceDetail, PublicServiceItem, Service, ServiceDetail,
    ServiceListItem, UpdateService,
};
use studio_api::errors::{AppError, AppResult};
use studio_api::infra::repositories::{OrderRepository, ServiceRepository};
use studio_api::services::{OrderManager, OrderService};
use studio_api::types::{FindParams, Pageable, SortParams};

// =============================================================================
// Fakes
// =============================================================================

/// Catalog fake that only knows which service ids exist.
struct KnownServices {
    ids: Vec<i32>,
}

#[async_trait]
impl ServiceRepository for KnownServices {
    async fn list(
        &self,
        _filter: FindParams,
        _pageable: Pageable,
        _sort: SortParams,
    ) -> AppResult<Vec<ServiceListItem>> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: FindParams) -> AppResult<u64> {
        Ok(0)
    }

    async fn list_public(
        &self,
        _search: Option<String>,
        _kind: Option<i32>,
        _pageable: Pageable,
        _sort: SortParams,
    ) -> AppResult<Vec<PublicServiceItem>> {
        Ok(Vec::new())
    }

    async fn count_public(&self, _search: Option<String>, _kind: Option<i32>) -> AppResult<u64> {
        Ok(0)
    }

    async fn find_by_slug_public(&self, _slug: &str) -> AppResult<Option<PublicServiceDetail>> {
        Ok(None)
    }

    async fn list_related(
        &self,
        _kind: i32,
        _exclude_id: i32,
        _limit: u64,
    ) -> AppResult<Vec<PublicServiceItem>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i32) -> AppResult<Option<Service>> {
        Ok(None)
    }

    async fn find_detail(&self, _id: i32) -> AppResult<Option<ServiceDetail>> {
        Ok(None)
    }

    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64> {
        Ok(ids.iter().filter(|id| self.ids.contains(id)).count() as u64)
    }

    async fn slug_exists(&self, _slug: &str, _exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(false)
    }

    async fn create(
        &self,
        _actor: i32,
        _data: CreateService,
        _final_slug: String,
    ) -> AppResult<i32> {
        Ok(1)
    }

    async fn update(
        &self,
        _actor: i32,
        _id: i32,
        _data: UpdateService,
        _final_slug: String,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn bulk_soft_delete(&self, _actor: i32, _ids: Vec<i32>) -> AppResult<Vec<i32>> {
        Ok(Vec::new())
    }

    async fn bulk_restore(&self, _actor: i32, _ids: Vec<i32>) -> AppResult<Vec<i32>> {
        Ok(Vec::new())
    }

    async fn bulk_hard_delete(&self, _ids: Vec<i32>) -> AppResult<Vec<i32>> {
        Ok(Vec::new())
    }
}

struct StoredOrder {
    view: OrderView,
}

#[derive(Default)]
struct InMemoryOrders {
    rows: Mutex<Vec<StoredOrder>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn list(
        &self,
        filter: FindParams,
        _pageable: Pageable,
        _sort: SortParams,
    ) -> AppResult<Vec<OrderView>> {
        let wanted_flag = filter.delete_flg.unwrap_or(0);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.view.delete_flg == wanted_flag)
            .map(|o| o.view.clone())
            .collect())
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        Ok(self
            .list(filter, Pageable::default(), SortParams::default())
            .await?
            .len() as u64)
    }

    async fn find_view(&self, id: i32) -> AppResult<Option<OrderView>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.view.id == id)
            .map(|o| o.view.clone()))
    }

    async fn create(
        &self,
        user_id: Option<i32>,
        _actor: Option<i32>,
        data: CreateOrder,
    ) -> AppResult<i32> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        let items = data
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| OrderItemView {
                id: i as i32 + 1,
                service: None,
                service_id: item.service_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        rows.push(StoredOrder {
            view: OrderView {
                id,
                name: data.name,
                email: data.email,
                phone: data.phone,
                address: data.address,
                note: data.note,
                input_file_url: data.input_file_url,
                output_file_url: data.output_file_url,
                status: data.status.unwrap_or(0),
                created_time: Utc::now(),
                delete_flg: 0,
                user: user_id.map(|uid| studio_api::domain::user::UserRef {
                    id: uid,
                    first_name: None,
                    last_name: None,
                    email: String::new(),
                }),
                items,
            },
        });
        Ok(id)
    }

    async fn update(&self, _actor: i32, id: i32, data: UpdateOrder) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let order = rows
            .iter_mut()
            .find(|o| o.view.id == id)
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        order.view.name = data.name;
        order.view.email = data.email;
        order.view.items = data
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| OrderItemView {
                id: i as i32 + 1,
                service: None,
                service_id: item.service_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        Ok(())
    }

    async fn bulk_soft_delete(&self, _actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let mut touched = Vec::new();
        for order in self.rows.lock().unwrap().iter_mut() {
            if ids.contains(&order.view.id) && order.view.delete_flg == 0 {
                order.view.delete_flg = 1;
                touched.push(order.view.id);
            }
        }
        Ok(touched)
    }

    async fn bulk_restore(&self, _actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let mut touched = Vec::new();
        for order in self.rows.lock().unwrap().iter_mut() {
            if ids.contains(&order.view.id) && order.view.delete_flg == 1 {
                order.view.delete_flg = 0;
                touched.push(order.view.id);
            }
        }
        Ok(touched)
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let mut rows = self.rows.lock().unwrap();
        let touched: Vec<i32> = rows
            .iter()
            .filter(|o| ids.contains(&o.view.id))
            .map(|o| o.view.id)
            .collect();
        rows.retain(|o| !ids.contains(&o.view.id));
        Ok(touched)
    }
}

fn order_input(service_id: i32, price: i64) -> CreateOrder {
    CreateOrder {
        name: "Khach".to_string(),
        email: "khach@example.com".to_string(),
        phone: None,
        address: None,
        note: None,
        input_file_url: None,
        output_file_url: None,
        status: None,
        items: vec![OrderItemInput {
            service_id,
            quantity: 2,
            price,
        }],
    }
}

fn manager(orders: Arc<InMemoryOrders>, known: Vec<i32>) -> OrderManager {
    OrderManager::new(orders, Arc::new(KnownServices { ids: known }))
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn public_submission_rejects_unknown_services() {
    let svc = manager(Arc::new(InMemoryOrders::default()), vec![1]);
    let result = svc.create_public(order_input(99, 100_000)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn public_submission_is_anonymous_and_snapshots_price() {
    let orders = Arc::new(InMemoryOrders::default());
    let svc = manager(orders.clone(), vec![1]);

    let created = svc.create_public(order_input(1, 150_000)).await.unwrap();

    let view = orders.find_view(created.id).await.unwrap().unwrap();
    assert!(view.user.is_none());
    assert_eq!(view.items[0].price, 150_000);
    assert_eq!(view.items[0].quantity, 2);
}

#[tokio::test]
async fn back_office_create_is_attributed_to_the_actor() {
    let orders = Arc::new(InMemoryOrders::default());
    let svc = manager(orders.clone(), vec![1]);

    let created = svc.create(7, order_input(1, 80_000)).await.unwrap();

    let view = orders.find_view(created.id).await.unwrap().unwrap();
    assert_eq!(view.user.as_ref().map(|u| u.id), Some(7));
}

// =============================================================================
// Update & bulk lifecycle
// =============================================================================

#[tokio::test]
async fn update_of_unknown_order_fails_not_found() {
    let svc = manager(Arc::new(InMemoryOrders::default()), vec![1]);
    let result = svc
        .update(
            1,
            42,
            UpdateOrder {
                name: "X".to_string(),
                email: "x@y.com".to_string(),
                phone: None,
                address: None,
                note: None,
                input_file_url: None,
                output_file_url: None,
                status: None,
                items: Vec::new(),
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn soft_delete_filters_unknown_and_already_deleted_ids() {
    let orders = Arc::new(InMemoryOrders::default());
    let svc = manager(orders.clone(), vec![1]);

    let a = svc.create_public(order_input(1, 1_000)).await.unwrap();
    let b = svc.create_public(order_input(1, 2_000)).await.unwrap();

    let first = svc.bulk_soft_delete(1, vec![a.id, 99]).await.unwrap();
    assert_eq!(first.ids, vec![a.id]);

    // Already-deleted ids fall out of the batch instead of aborting it
    let second = svc.bulk_soft_delete(1, vec![a.id, b.id]).await.unwrap();
    assert_eq!(second.ids, vec![b.id]);

    // Nothing left to delete
    let third = svc.bulk_soft_delete(1, vec![a.id, b.id]).await;
    assert!(matches!(third, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn restore_then_hard_delete_removes_everything() {
    let orders = Arc::new(InMemoryOrders::default());
    let svc = manager(orders.clone(), vec![1]);

    let a = svc.create_public(order_input(1, 1_000)).await.unwrap();
    svc.bulk_soft_delete(1, vec![a.id]).await.unwrap();

    let restored = svc.bulk_restore(1, vec![a.id]).await.unwrap();
    assert_eq!(restored.ids, vec![a.id]);

    let removed = svc.bulk_hard_delete(vec![a.id]).await.unwrap();
    assert_eq!(removed.ids, vec![a.id]);
    assert!(orders.find_view(a.id).await.unwrap().is_none());
}
