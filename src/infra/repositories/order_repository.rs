//! Order repository.
//!
//! Item prices are stored as submitted (snapshot at order time). Updates
//! rewrite the item set inside one transaction; hard deletes remove items
//! before their orders so no orphaned rows can survive.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::order::{self, ActiveModel, Entity as OrderEntity};
use super::entities::order_item::{self, Entity as OrderItemEntity};
use super::entities::service::{self, Entity as ServiceEntity};
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::order::{CreateOrder, OrderItemView, OrderView, ServiceRef, UpdateOrder};
use crate::domain::user::UserRef;
use crate::errors::{AppError, AppResult};
use crate::types::{FindParams, Pageable, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<OrderView>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    async fn find_view(&self, id: i32) -> AppResult<Option<OrderView>>;

    /// Insert the order and its items atomically. `user_id` is None for
    /// anonymous public submissions; `actor` stamps created/updated_user.
    async fn create(
        &self,
        user_id: Option<i32>,
        actor: Option<i32>,
        data: CreateOrder,
    ) -> AppResult<i32>;

    /// Update the order and rewrite its item set atomically
    async fn update(&self, actor: i32, id: i32, data: UpdateOrder) -> AppResult<()>;

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    /// Remove order items, then the orders themselves, atomically
    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>>;
}

pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &FindParams) -> sea_orm::Select<OrderEntity> {
        let mut query =
            OrderEntity::find().filter(order::Column::DeleteFlg.eq(filter.delete_flg.unwrap_or(0)));
        if let Some(status) = filter.status {
            query = query.filter(order::Column::Status.eq(status));
        }
        if let Some(search) = &filter.search {
            query = query.filter(order::Column::Email.contains(search.as_str()));
        }
        query
    }

    fn sorted(query: sea_orm::Select<OrderEntity>, sort: &SortParams) -> sea_orm::Select<OrderEntity> {
        let dir = sort.direction();
        match sort.sort_by.as_deref() {
            Some("name") => query.order_by(order::Column::Name, dir),
            Some("email") => query.order_by(order::Column::Email, dir),
            Some("status") => query.order_by(order::Column::Status, dir),
            Some("createdTime") => query.order_by(order::Column::CreatedTime, dir),
            _ => query.order_by(order::Column::CreatedTime, sea_orm::Order::Desc),
        }
    }

    /// Assemble order views with their users, items and service refs.
    async fn to_views(&self, models: Vec<order::Model>) -> AppResult<Vec<OrderView>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let user_ids: Vec<i32> = models.iter().filter_map(|m| m.user_id).collect();

        let users: HashMap<i32, UserRef> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            UserEntity::find()
                .filter(user::Column::Id.is_in(user_ids))
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

        let items = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let service_ids: Vec<i32> = items.iter().map(|i| i.service_id).collect();
        let services: HashMap<i32, ServiceRef> = if service_ids.is_empty() {
            HashMap::new()
        } else {
            ServiceEntity::find()
                .filter(service::Column::Id.is_in(service_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|s| {
                    (
                        s.id,
                        ServiceRef {
                            id: s.id,
                            title: s.title,
                            original_price: Some(s.original_price),
                            discounted_price: s.discounted_price,
                        },
                    )
                })
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let order_items = items
                    .iter()
                    .filter(|i| i.order_id == m.id)
                    .map(|i| OrderItemView {
                        id: i.id,
                        service: services.get(&i.service_id).cloned(),
                        service_id: i.service_id,
                        quantity: i.quantity,
                        price: i.price,
                    })
                    .collect();

                OrderView {
                    id: m.id,
                    name: m.name,
                    email: m.email,
                    phone: m.phone,
                    address: m.address,
                    note: m.note,
                    input_file_url: m.input_file_url,
                    output_file_url: m.output_file_url,
                    status: m.status,
                    created_time: m.created_time,
                    delete_flg: m.delete_flg,
                    user: m.user_id.and_then(|uid| users.get(&uid).cloned()),
                    items: order_items,
                }
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<OrderView>> {
        let models = Self::sorted(Self::filtered(&filter), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.to_views(models).await
    }

    async fn count(&self, filter: FindParams) -> AppResult<u64> {
        Self::filtered(&filter)
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_view(&self, id: i32) -> AppResult<Option<OrderView>> {
        let model = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(model) = model else {
            return Ok(None);
        };

        Ok(self.to_views(vec![model]).await?.into_iter().next())
    }

    async fn create(
        &self,
        user_id: Option<i32>,
        actor: Option<i32>,
        data: CreateOrder,
    ) -> AppResult<i32> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let now = chrono::Utc::now();
        let model = ActiveModel {
            user_id: Set(user_id),
            name: Set(data.name),
            email: Set(data.email),
            phone: Set(data.phone),
            address: Set(data.address),
            note: Set(data.note),
            input_file_url: Set(data.input_file_url),
            output_file_url: Set(data.output_file_url),
            status: Set(data.status.unwrap_or(0)),
            delete_flg: Set(0),
            created_time: Set(now),
            created_user: Set(actor),
            updated_time: Set(now),
            updated_user: Set(actor),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        let rows: Vec<order_item::ActiveModel> = data
            .items
            .into_iter()
            .map(|item| order_item::ActiveModel {
                order_id: Set(model.id),
                service_id: Set(item.service_id),
                quantity: Set(item.quantity),
                price: Set(item.price),
                ..Default::default()
            })
            .collect();

        if !rows.is_empty() {
            OrderItemEntity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(AppError::from)?;
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update(&self, actor: i32, id: i32, data: UpdateOrder) -> AppResult<()> {
        let model = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let txn = self.db.begin().await.map_err(AppError::from)?;

        let mut active: ActiveModel = model.into();
        active.name = Set(data.name);
        active.email = Set(data.email);
        active.phone = Set(data.phone);
        active.address = Set(data.address);
        active.note = Set(data.note);
        active.input_file_url = Set(data.input_file_url);
        active.output_file_url = Set(data.output_file_url);
        if let Some(status) = data.status {
            active.status = Set(status);
        }
        active.updated_time = Set(chrono::Utc::now());
        active.updated_user = Set(Some(actor));
        active.update(&txn).await.map_err(AppError::from)?;

        OrderItemEntity::delete_many()
            .filter(order_item::Column::OrderId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if !data.items.is_empty() {
            let rows: Vec<order_item::ActiveModel> = data
                .items
                .into_iter()
                .map(|item| order_item::ActiveModel {
                    order_id: Set(id),
                    service_id: Set(item.service_id),
                    quantity: Set(item.quantity),
                    price: Set(item.price),
                    ..Default::default()
                })
                .collect();
            OrderItemEntity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(AppError::from)?;
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let live: Vec<i32> = OrderEntity::find()
            .filter(order::Column::Id.is_in(ids))
            .filter(order::Column::DeleteFlg.eq(0))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if live.is_empty() {
            return Ok(live);
        }

        OrderEntity::update_many()
            .col_expr(order::Column::DeleteFlg, Expr::value(1))
            .col_expr(order::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(order::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(order::Column::Id.is_in(live.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(live)
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let deleted: Vec<i32> = OrderEntity::find()
            .filter(order::Column::Id.is_in(ids))
            .filter(order::Column::DeleteFlg.eq(1))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if deleted.is_empty() {
            return Ok(deleted);
        }

        OrderEntity::update_many()
            .col_expr(order::Column::DeleteFlg, Expr::value(0))
            .col_expr(order::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(order::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(order::Column::Id.is_in(deleted.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(deleted)
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let existing: Vec<i32> = OrderEntity::find()
            .filter(order::Column::Id.is_in(ids))
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

        // Items first so no orphaned rows survive a failure
        OrderItemEntity::delete_many()
            .filter(order_item::Column::OrderId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        OrderEntity::delete_many()
            .filter(order::Column::Id.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(existing)
    }
}
