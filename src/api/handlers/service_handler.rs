//! Catalog (bookable service) back-office handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, patch},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::order::BulkIds;
use crate::domain::service::{CreateService, ServiceDetail, ServiceListItem, UpdateService};
use crate::errors::AppResult;
use crate::types::{BulkMutationResponse, ListQuery, ListResponse, MutationResponse};

/// Create catalog routes
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).put(update))
        .route("/delete", patch(soft_delete))
        .route("/restore", patch(restore))
        .route("/permanent", delete(hard_delete))
}

/// List services
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses((status = 200, description = "Paged service list"))
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<ServiceListItem>>> {
    let data = state
        .catalog_service
        .find_all(query.filter(), query.pageable(), query.sort())
        .await?;
    let total = state.catalog_service.count(query.filter()).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// Create a service with its child collections
#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateService,
    responses(
        (status = 200, description = "Created", body = MutationResponse),
        (status = 400, description = "Invalid slug")
    )
)]
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateService>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.catalog_service.create(user.id, payload).await?;
    Ok(Json(result))
}

/// Fetch one service with all child collections
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = ServiceDetail),
        (status = 404, description = "Not found")
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ServiceDetail>> {
    Ok(Json(state.catalog_service.find_one(id).await?))
}

/// Update a service; flat children are replaced, steps reconciled by id
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateService,
    responses(
        (status = 200, description = "Updated", body = MutationResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateService>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.catalog_service.update(user.id, id, payload).await?;
    Ok(Json(result))
}

/// Soft-delete services
#[utoipa::path(
    patch,
    path = "/services/delete",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Flagged deleted", body = BulkMutationResponse))
)]
pub async fn soft_delete(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state
        .catalog_service
        .bulk_soft_delete(user.id, payload.ids)
        .await?;
    Ok(Json(result))
}

/// Restore soft-deleted services
#[utoipa::path(
    patch,
    path = "/services/restore",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Restored", body = BulkMutationResponse))
)]
pub async fn restore(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.catalog_service.bulk_restore(user.id, payload.ids).await?;
    Ok(Json(result))
}

/// Permanently delete services and every dependent child row
#[utoipa::path(
    delete,
    path = "/services/permanent",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Removed", body = BulkMutationResponse))
)]
pub async fn hard_delete(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.catalog_service.bulk_hard_delete(payload.ids).await?;
    Ok(Json(result))
}
