//! Bookable-service repository.
//!
//! Update semantics for child collections: images, ideal-for tags,
//! included items and add-ons are replaced wholesale; steps (and their
//! nested detail rows) are reconciled — rows with an incoming id are
//! updated, rows without one are created, and existing rows whose id is
//! absent from the input are pruned. The whole update runs in one
//! transaction.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::service::{self, ActiveModel, Entity as ServiceEntity};
use super::entities::service_add_on::{self, Entity as AddOnEntity};
use super::entities::service_ideal_for::{self, Entity as IdealForEntity};
use super::entities::service_image::{self, Entity as ImageEntity};
use super::entities::service_include::{self, Entity as IncludeEntity};
use super::entities::service_step::{self, Entity as StepEntity};
use super::entities::service_step_detail::{self, Entity as StepDetailEntity};
use crate::domain::service::{
    AddOnInput, AddOnItem, CreateService, ImageInput, ImagePair, LabelInput, LabelItem,
    PublicServiceDetail, PublicServiceItem, Service, ServiceDetail, ServiceListItem, StepDetailItem,
    StepInput, StepItem, UpdateService,
};
use crate::errors::{AppError, AppResult};
use crate::types::{FindParams, Pageable, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<ServiceListItem>>;

    async fn count(&self, filter: FindParams) -> AppResult<u64>;

    /// Published, live services with images, optionally filtered by type
    async fn list_public(
        &self,
        search: Option<String>,
        kind: Option<i32>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicServiceItem>>;

    async fn count_public(&self, search: Option<String>, kind: Option<i32>) -> AppResult<u64>;

    async fn find_by_slug_public(&self, slug: &str) -> AppResult<Option<PublicServiceDetail>>;

    /// Up to `limit` other services of the same type
    async fn list_related(
        &self,
        kind: i32,
        exclude_id: i32,
        limit: u64,
    ) -> AppResult<Vec<PublicServiceItem>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>>;

    async fn find_detail(&self, id: i32) -> AppResult<Option<ServiceDetail>>;

    /// How many of the given ids exist (order item validation)
    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64>;

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    /// Insert the service and all child rows atomically
    async fn create(&self, actor: i32, data: CreateService, final_slug: String) -> AppResult<i32>;

    /// Update the service, replacing/reconciling children atomically
    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateService,
        final_slug: String,
    ) -> AppResult<()>;

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>>;

    /// Physically remove services and every dependent child row, atomically
    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>>;
}

pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &FindParams) -> sea_orm::Select<ServiceEntity> {
        let mut query = ServiceEntity::find()
            .filter(service::Column::DeleteFlg.eq(filter.delete_flg.unwrap_or(0)));
        if let Some(status) = filter.status {
            query = query.filter(service::Column::Status.eq(status));
        }
        if let Some(search) = &filter.search {
            query = query.filter(service::Column::Title.contains(search.as_str()));
        }
        query
    }

    fn public_filtered(
        search: &Option<String>,
        kind: Option<i32>,
    ) -> sea_orm::Select<ServiceEntity> {
        let mut query = ServiceEntity::find()
            .filter(service::Column::DeleteFlg.eq(0))
            .filter(service::Column::Status.eq(1));
        if let Some(kind) = kind {
            query = query.filter(service::Column::Kind.eq(kind));
        }
        if let Some(search) = search {
            query = query.filter(service::Column::Title.contains(search.as_str()));
        }
        query
    }

    fn sorted(
        query: sea_orm::Select<ServiceEntity>,
        sort: &SortParams,
    ) -> sea_orm::Select<ServiceEntity> {
        let dir = sort.direction();
        match sort.sort_by.as_deref() {
            Some("title") => query.order_by(service::Column::Title, dir),
            Some("originalPrice") => query.order_by(service::Column::OriginalPrice, dir),
            Some("rating") => query.order_by(service::Column::Rating, dir),
            Some("orderCount") => query.order_by(service::Column::OrderCount, dir),
            Some("createdTime") => query.order_by(service::Column::CreatedTime, dir),
            _ => query.order_by(service::Column::CreatedTime, sea_orm::Order::Desc),
        }
    }

    async fn images_for(&self, service_ids: &[i32]) -> AppResult<Vec<service_image::Model>> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }
        ImageEntity::find()
            .filter(service_image::Column::ServiceId.is_in(service_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    fn to_public_items(
        models: Vec<service::Model>,
        images: Vec<service_image::Model>,
    ) -> Vec<PublicServiceItem> {
        models
            .into_iter()
            .map(|m| {
                let images = images
                    .iter()
                    .filter(|img| img.service_id == m.id)
                    .map(|img| ImagePair {
                        id: Some(img.id),
                        before_url: img.before_url.clone(),
                        after_url: img.after_url.clone(),
                    })
                    .collect();
                PublicServiceItem {
                    id: m.id,
                    slug: m.slug,
                    title: m.title,
                    content: m.content,
                    original_price: m.original_price,
                    discounted_price: m.discounted_price,
                    order_count: m.order_count,
                    rating: m.rating,
                    kind: m.kind,
                    images,
                }
            })
            .collect()
    }

    async fn insert_children(
        txn: &DatabaseTransaction,
        service_id: i32,
        images: &[ImageInput],
        ideal_fors: &[LabelInput],
        includes: &[LabelInput],
        add_ons: &[AddOnInput],
    ) -> AppResult<()> {
        if !images.is_empty() {
            let rows: Vec<service_image::ActiveModel> = images
                .iter()
                .map(|img| service_image::ActiveModel {
                    service_id: Set(service_id),
                    before_url: Set(img.before_url.clone()),
                    after_url: Set(img.after_url.clone()),
                    ..Default::default()
                })
                .collect();
            ImageEntity::insert_many(rows).exec(txn).await.map_err(AppError::from)?;
        }

        if !ideal_fors.is_empty() {
            let rows: Vec<service_ideal_for::ActiveModel> = ideal_fors
                .iter()
                .map(|item| service_ideal_for::ActiveModel {
                    service_id: Set(service_id),
                    label: Set(item.label.clone()),
                    ..Default::default()
                })
                .collect();
            IdealForEntity::insert_many(rows).exec(txn).await.map_err(AppError::from)?;
        }

        if !includes.is_empty() {
            let rows: Vec<service_include::ActiveModel> = includes
                .iter()
                .map(|item| service_include::ActiveModel {
                    service_id: Set(service_id),
                    label: Set(item.label.clone()),
                    ..Default::default()
                })
                .collect();
            IncludeEntity::insert_many(rows).exec(txn).await.map_err(AppError::from)?;
        }

        if !add_ons.is_empty() {
            let rows: Vec<service_add_on::ActiveModel> = add_ons
                .iter()
                .map(|item| service_add_on::ActiveModel {
                    service_id: Set(service_id),
                    title: Set(item.title.clone()),
                    description: Set(item.description.clone()),
                    ..Default::default()
                })
                .collect();
            AddOnEntity::insert_many(rows).exec(txn).await.map_err(AppError::from)?;
        }

        Ok(())
    }

    async fn insert_step(
        txn: &DatabaseTransaction,
        service_id: i32,
        step: &StepInput,
    ) -> AppResult<i32> {
        let model = service_step::ActiveModel {
            service_id: Set(service_id),
            before_url: Set(step.before_url.clone()),
            after_url: Set(step.after_url.clone()),
            video_url: Set(step.video_url.clone()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(AppError::from)?;

        for detail in &step.steps {
            service_step_detail::ActiveModel {
                step_id: Set(model.id),
                title: Set(detail.title.clone()),
                content: Set(detail.content.clone()),
                before_url: Set(detail.before_url.clone()),
                after_url: Set(detail.after_url.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(AppError::from)?;
        }

        Ok(model.id)
    }

    /// Reconcile the steps of a service: prune rows whose id is not in the
    /// input, update rows with an id, create the rest.
    async fn reconcile_steps(
        txn: &DatabaseTransaction,
        service_id: i32,
        steps: &[StepInput],
    ) -> AppResult<()> {
        let incoming_ids: Vec<i32> = steps.iter().filter_map(|s| s.id).collect();

        let orphan_ids: Vec<i32> = StepEntity::find()
            .filter(service_step::Column::ServiceId.eq(service_id))
            .filter(service_step::Column::Id.is_not_in(incoming_ids.clone()))
            .all(txn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if !orphan_ids.is_empty() {
            StepDetailEntity::delete_many()
                .filter(service_step_detail::Column::StepId.is_in(orphan_ids.clone()))
                .exec(txn)
                .await
                .map_err(AppError::from)?;
            StepEntity::delete_many()
                .filter(service_step::Column::Id.is_in(orphan_ids))
                .exec(txn)
                .await
                .map_err(AppError::from)?;
        }

        for step in steps {
            match step.id {
                Some(step_id) => {
                    let existing = StepEntity::find_by_id(step_id)
                        .filter(service_step::Column::ServiceId.eq(service_id))
                        .one(txn)
                        .await
                        .map_err(AppError::from)?;

                    match existing {
                        Some(model) => {
                            let mut active: service_step::ActiveModel = model.into();
                            active.before_url = Set(step.before_url.clone());
                            active.after_url = Set(step.after_url.clone());
                            active.video_url = Set(step.video_url.clone());
                            active.update(txn).await.map_err(AppError::from)?;

                            Self::reconcile_step_details(txn, step_id, step).await?;
                        }
                        // Unknown id: treat as create, like an upsert would
                        None => {
                            Self::insert_step(txn, service_id, step).await?;
                        }
                    }
                }
                None => {
                    Self::insert_step(txn, service_id, step).await?;
                }
            }
        }

        Ok(())
    }

    async fn reconcile_step_details(
        txn: &DatabaseTransaction,
        step_id: i32,
        step: &StepInput,
    ) -> AppResult<()> {
        let incoming_ids: Vec<i32> = step.steps.iter().filter_map(|d| d.id).collect();

        StepDetailEntity::delete_many()
            .filter(service_step_detail::Column::StepId.eq(step_id))
            .filter(service_step_detail::Column::Id.is_not_in(incoming_ids))
            .exec(txn)
            .await
            .map_err(AppError::from)?;

        for detail in &step.steps {
            match detail.id {
                Some(detail_id) => {
                    let existing = StepDetailEntity::find_by_id(detail_id)
                        .filter(service_step_detail::Column::StepId.eq(step_id))
                        .one(txn)
                        .await
                        .map_err(AppError::from)?;

                    match existing {
                        Some(model) => {
                            let mut active: service_step_detail::ActiveModel = model.into();
                            active.title = Set(detail.title.clone());
                            active.content = Set(detail.content.clone());
                            active.before_url = Set(detail.before_url.clone());
                            active.after_url = Set(detail.after_url.clone());
                            active.update(txn).await.map_err(AppError::from)?;
                        }
                        None => {
                            service_step_detail::ActiveModel {
                                step_id: Set(step_id),
                                title: Set(detail.title.clone()),
                                content: Set(detail.content.clone()),
                                before_url: Set(detail.before_url.clone()),
                                after_url: Set(detail.after_url.clone()),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await
                            .map_err(AppError::from)?;
                        }
                    }
                }
                None => {
                    service_step_detail::ActiveModel {
                        step_id: Set(step_id),
                        title: Set(detail.title.clone()),
                        content: Set(detail.content.clone()),
                        before_url: Set(detail.before_url.clone()),
                        after_url: Set(detail.after_url.clone()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(AppError::from)?;
                }
            }
        }

        Ok(())
    }

    async fn children_for_detail(
        &self,
        service_id: i32,
    ) -> AppResult<(Vec<ImagePair>, Vec<LabelItem>, Vec<LabelItem>, Vec<AddOnItem>)> {
        let images = ImageEntity::find()
            .filter(service_image::Column::ServiceId.eq(service_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|img| ImagePair {
                id: Some(img.id),
                before_url: img.before_url,
                after_url: img.after_url,
            })
            .collect();

        let ideal_fors = IdealForEntity::find()
            .filter(service_ideal_for::Column::ServiceId.eq(service_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| LabelItem {
                id: m.id,
                label: m.label,
            })
            .collect();

        let includes = IncludeEntity::find()
            .filter(service_include::Column::ServiceId.eq(service_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| LabelItem {
                id: m.id,
                label: m.label,
            })
            .collect();

        let add_ons = AddOnEntity::find()
            .filter(service_add_on::Column::ServiceId.eq(service_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| AddOnItem {
                id: m.id,
                title: m.title,
                description: m.description,
            })
            .collect();

        Ok((images, ideal_fors, includes, add_ons))
    }
}

#[async_trait]
impl ServiceRepository for ServiceStore {
    async fn list(
        &self,
        filter: FindParams,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<ServiceListItem>> {
        let models = Self::sorted(Self::filtered(&filter), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(|m| ServiceListItem {
                id: m.id,
                title: m.title,
                original_price: m.original_price,
                discounted_price: m.discounted_price,
                order_count: m.order_count,
                rating: m.rating,
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
        kind: Option<i32>,
        pageable: Pageable,
        sort: SortParams,
    ) -> AppResult<Vec<PublicServiceItem>> {
        let models = Self::sorted(Self::public_filtered(&search, kind), &sort)
            .offset(pageable.offset)
            .limit(pageable.limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let images = self.images_for(&ids).await?;

        Ok(Self::to_public_items(models, images))
    }

    async fn count_public(&self, search: Option<String>, kind: Option<i32>) -> AppResult<u64> {
        Self::public_filtered(&search, kind)
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_slug_public(&self, slug: &str) -> AppResult<Option<PublicServiceDetail>> {
        let model = ServiceEntity::find()
            .filter(service::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(m) = model else {
            return Ok(None);
        };

        let (images, ideal_fors, includes, add_ons) = self.children_for_detail(m.id).await?;

        Ok(Some(PublicServiceDetail {
            id: m.id,
            title: m.title,
            content: m.content,
            slug: m.slug,
            kind: m.kind,
            original_price: m.original_price,
            discounted_price: m.discounted_price,
            rating: m.rating,
            order_count: m.order_count,
            images,
            ideal_fors,
            includes,
            add_ons,
            related_services: Vec::new(),
        }))
    }

    async fn list_related(
        &self,
        kind: i32,
        exclude_id: i32,
        limit: u64,
    ) -> AppResult<Vec<PublicServiceItem>> {
        let models = ServiceEntity::find()
            .filter(service::Column::Kind.eq(kind))
            .filter(service::Column::Id.ne(exclude_id))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let images = self.images_for(&ids).await?;

        Ok(Self::to_public_items(models, images))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|m| Service {
            id: m.id,
            title: m.title,
            content: m.content,
            slug: m.slug,
            kind: m.kind,
            status: m.status,
            original_price: m.original_price,
            discounted_price: m.discounted_price,
            rating: m.rating,
            order_count: m.order_count,
            author_id: m.author_id,
            delete_flg: m.delete_flg,
            created_time: m.created_time,
            updated_time: m.updated_time,
        }))
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<ServiceDetail>> {
        let model = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(m) = model else {
            return Ok(None);
        };

        let (images, ideal_fors, includes, add_ons) = self.children_for_detail(m.id).await?;

        let step_models = StepEntity::find()
            .filter(service_step::Column::ServiceId.eq(m.id))
            .order_by_asc(service_step::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let step_ids: Vec<i32> = step_models.iter().map(|s| s.id).collect();
        let detail_models = if step_ids.is_empty() {
            Vec::new()
        } else {
            StepDetailEntity::find()
                .filter(service_step_detail::Column::StepId.is_in(step_ids))
                .order_by_asc(service_step_detail::Column::Id)
                .all(&self.db)
                .await
                .map_err(AppError::from)?
        };

        let steps = step_models
            .into_iter()
            .map(|s| StepItem {
                id: s.id,
                before_url: s.before_url,
                after_url: s.after_url,
                video_url: s.video_url,
                steps: detail_models
                    .iter()
                    .filter(|d| d.step_id == s.id)
                    .map(|d| StepDetailItem {
                        id: d.id,
                        title: d.title.clone(),
                        content: d.content.clone(),
                        before_url: d.before_url.clone(),
                        after_url: d.after_url.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Some(ServiceDetail {
            id: m.id,
            title: m.title,
            content: m.content,
            slug: m.slug,
            status: m.status,
            kind: m.kind,
            original_price: m.original_price,
            discounted_price: m.discounted_price,
            rating: m.rating,
            order_count: m.order_count,
            author_id: m.author_id,
            created_time: m.created_time,
            created_user: m.created_user,
            updated_time: m.updated_time,
            updated_user: m.updated_user,
            images,
            ideal_fors,
            includes,
            add_ons,
            steps,
        }))
    }

    async fn count_by_ids(&self, ids: Vec<i32>) -> AppResult<u64> {
        ServiceEntity::find()
            .filter(service::Column::Id.is_in(ids))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let mut query = ServiceEntity::find().filter(service::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(service::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await.map_err(AppError::from)? > 0)
    }

    async fn create(&self, actor: i32, data: CreateService, final_slug: String) -> AppResult<i32> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let now = chrono::Utc::now();
        let model = ActiveModel {
            title: Set(data.title.clone()),
            content: Set(data.content.clone()),
            slug: Set(final_slug),
            kind: Set(data.kind),
            status: Set(data.status.unwrap_or(0)),
            original_price: Set(data.original_price),
            discounted_price: Set(data.discounted_price),
            rating: Set(data.rating),
            order_count: Set(data.order_count.unwrap_or(0)),
            author_id: Set(Some(actor)),
            delete_flg: Set(0),
            created_time: Set(now),
            created_user: Set(Some(actor)),
            updated_time: Set(now),
            updated_user: Set(Some(actor)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        Self::insert_children(
            &txn,
            model.id,
            &data.images,
            &data.ideal_fors,
            &data.includes,
            &data.add_ons,
        )
        .await?;

        for step in &data.steps {
            Self::insert_step(&txn, model.id, step).await?;
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update(
        &self,
        actor: i32,
        id: i32,
        data: UpdateService,
        final_slug: String,
    ) -> AppResult<()> {
        let model = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Dịch vụ không tồn tại"))?;

        let txn = self.db.begin().await.map_err(AppError::from)?;

        // Full replace for the non-identified child collections
        ImageEntity::delete_many()
            .filter(service_image::Column::ServiceId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        IdealForEntity::delete_many()
            .filter(service_ideal_for::Column::ServiceId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        IncludeEntity::delete_many()
            .filter(service_include::Column::ServiceId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        AddOnEntity::delete_many()
            .filter(service_add_on::Column::ServiceId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        Self::insert_children(
            &txn,
            id,
            &data.images,
            &data.ideal_fors,
            &data.includes,
            &data.add_ons,
        )
        .await?;

        Self::reconcile_steps(&txn, id, &data.steps).await?;

        let mut active: ActiveModel = model.into();
        active.title = Set(data.title);
        active.content = Set(data.content);
        active.slug = Set(final_slug);
        active.kind = Set(data.kind);
        active.status = Set(data.status.unwrap_or(0));
        active.original_price = Set(data.original_price);
        active.discounted_price = Set(data.discounted_price);
        active.rating = Set(data.rating);
        active.order_count = Set(data.order_count.unwrap_or(0));
        active.updated_time = Set(chrono::Utc::now());
        active.updated_user = Set(Some(actor));
        active.update(&txn).await.map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }

    async fn bulk_soft_delete(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let live: Vec<i32> = ServiceEntity::find()
            .filter(service::Column::Id.is_in(ids))
            .filter(service::Column::DeleteFlg.eq(0))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if live.is_empty() {
            return Ok(live);
        }

        ServiceEntity::update_many()
            .col_expr(service::Column::DeleteFlg, Expr::value(1))
            .col_expr(service::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(service::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(service::Column::Id.is_in(live.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(live)
    }

    async fn bulk_restore(&self, actor: i32, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let deleted: Vec<i32> = ServiceEntity::find()
            .filter(service::Column::Id.is_in(ids))
            .filter(service::Column::DeleteFlg.eq(1))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if deleted.is_empty() {
            return Ok(deleted);
        }

        ServiceEntity::update_many()
            .col_expr(service::Column::DeleteFlg, Expr::value(0))
            .col_expr(service::Column::UpdatedUser, Expr::value(Some(actor)))
            .col_expr(service::Column::UpdatedTime, Expr::value(chrono::Utc::now()))
            .filter(service::Column::Id.is_in(deleted.clone()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(deleted)
    }

    async fn bulk_hard_delete(&self, ids: Vec<i32>) -> AppResult<Vec<i32>> {
        let existing: Vec<i32> = ServiceEntity::find()
            .filter(service::Column::Id.is_in(ids))
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

        let step_ids: Vec<i32> = StepEntity::find()
            .filter(service_step::Column::ServiceId.is_in(existing.clone()))
            .all(&txn)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if !step_ids.is_empty() {
            StepDetailEntity::delete_many()
                .filter(service_step_detail::Column::StepId.is_in(step_ids))
                .exec(&txn)
                .await
                .map_err(AppError::from)?;
        }

        StepEntity::delete_many()
            .filter(service_step::Column::ServiceId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        ImageEntity::delete_many()
            .filter(service_image::Column::ServiceId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        IdealForEntity::delete_many()
            .filter(service_ideal_for::Column::ServiceId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        IncludeEntity::delete_many()
            .filter(service_include::Column::ServiceId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;
        AddOnEntity::delete_many()
            .filter(service_add_on::Column::ServiceId.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        ServiceEntity::delete_many()
            .filter(service::Column::Id.is_in(existing.clone()))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(existing)
    }
}
