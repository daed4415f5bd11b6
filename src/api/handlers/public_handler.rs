//! Public façade: unauthenticated, read-only catalog/blog views plus
//! order submission and public settings.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::order::CreateOrder;
use crate::domain::post::{PublicPostDetail, PublicPostItem};
use crate::domain::service::{PublicServiceDetail, PublicServiceItem};
use crate::errors::{AppError, AppResult};
use crate::types::{ListQuery, ListResponse, MutationResponse};

/// Comma-separated namespaces query, e.g. `?namespaces=general,email`
#[derive(Debug, Deserialize, IntoParams)]
pub struct NamespacesQuery {
    pub namespaces: Option<String>,
}

/// Create the public routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(post_by_slug))
        .route("/services", get(list_services))
        .route("/services/:slug", get(service_by_slug))
        .route("/orders", post(submit_order))
        .route("/settings", get(settings_by_namespaces))
        .route("/settings/:namespace", get(settings_by_namespace))
}

/// Published posts; `limitWords` truncates the content preview
#[utoipa::path(
    get,
    path = "/public/posts",
    tag = "Public",
    params(ListQuery),
    responses((status = 200, description = "Paged published posts"))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<PublicPostItem>>> {
    let search = query.filter().search;
    let data = state
        .post_service
        .find_all_public(search.clone(), query.limit_words, query.pageable(), query.sort())
        .await?;
    let total = state.post_service.count_public(search).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// One published post by slug
#[utoipa::path(
    get,
    path = "/public/posts/{slug}",
    tag = "Public",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = PublicPostDetail),
        (status = 404, description = "Not found")
    )
)]
pub async fn post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PublicPostDetail>> {
    Ok(Json(state.post_service.find_by_slug(&slug).await?))
}

/// Published services; `category` filters by catalog type
#[utoipa::path(
    get,
    path = "/public/services",
    tag = "Public",
    params(ListQuery),
    responses((status = 200, description = "Paged published services"))
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<PublicServiceItem>>> {
    let search = query.filter().search;
    let data = state
        .catalog_service
        .find_all_public(search.clone(), query.category, query.pageable(), query.sort())
        .await?;
    let total = state
        .catalog_service
        .count_public(search, query.category)
        .await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// One service by slug, with related offerings of the same type
#[utoipa::path(
    get,
    path = "/public/services/{slug}",
    tag = "Public",
    params(("slug" = String, Path, description = "Service slug")),
    responses(
        (status = 200, description = "Service", body = PublicServiceDetail),
        (status = 404, description = "Not found")
    )
)]
pub async fn service_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PublicServiceDetail>> {
    Ok(Json(state.catalog_service.find_by_slug(&slug).await?))
}

/// Anonymous order submission. The confirmation mail is dispatched after
/// the order has been persisted; a mail failure surfaces but the order
/// stays committed.
#[utoipa::path(
    post,
    path = "/public/orders",
    tag = "Public",
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Order created", body = MutationResponse),
        (status = 400, description = "Unknown service reference")
    )
)]
pub async fn submit_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrder>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.order_service.create_public(payload).await?;

    state.mail_service.send_order_email(result.id).await?;

    Ok(Json(result))
}

/// Key/value maps for several namespaces at once
#[utoipa::path(
    get,
    path = "/public/settings",
    tag = "Public",
    params(NamespacesQuery),
    responses((status = 200, description = "Namespace → key/value maps"))
)]
pub async fn settings_by_namespaces(
    State(state): State<AppState>,
    Query(query): Query<NamespacesQuery>,
) -> AppResult<Json<BTreeMap<String, BTreeMap<String, String>>>> {
    let namespaces: Vec<String> = query
        .namespaces
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if namespaces.is_empty() {
        return Err(AppError::bad_request("namespaces query is required"));
    }

    Ok(Json(state.setting_service.get_by_namespaces(namespaces).await?))
}

/// Key/value map of one namespace
#[utoipa::path(
    get,
    path = "/public/settings/{namespace}",
    tag = "Public",
    params(("namespace" = String, Path, description = "Settings namespace")),
    responses((status = 200, description = "Key/value map"))
)]
pub async fn settings_by_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> AppResult<Json<BTreeMap<String, String>>> {
    Ok(Json(state.setting_service.get_by_namespace(&namespace).await?))
}
