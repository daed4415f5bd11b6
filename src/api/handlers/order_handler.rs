//! Order back-office handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, patch},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::order::{BulkIds, CreateOrder, OrderView, UpdateOrder};
use crate::errors::AppResult;
use crate::types::{BulkMutationResponse, ListQuery, ListResponse, MutationResponse};

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).put(update))
        .route("/delete", patch(soft_delete))
        .route("/restore", patch(restore))
        .route("/permanent", delete(hard_delete))
}

/// List orders (email substring search)
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses((status = 200, description = "Paged order list"))
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<OrderView>>> {
    let data = state
        .order_service
        .find_all(query.filter(), query.pageable(), query.sort())
        .await?;
    let total = state.order_service.count(query.filter()).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// Create an order on behalf of the acting user
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Created", body = MutationResponse),
        (status = 400, description = "Unknown service reference")
    )
)]
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrder>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.order_service.create(user.id, payload).await?;
    Ok(Json(result))
}

/// Fetch one order with items
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = OrderView),
        (status = 404, description = "Not found")
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderView>> {
    Ok(Json(state.order_service.find_one(id).await?))
}

/// Update an order, rewriting its item set
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Updated", body = MutationResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOrder>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.order_service.update(user.id, id, payload).await?;
    Ok(Json(result))
}

/// Soft-delete orders
#[utoipa::path(
    patch,
    path = "/orders/delete",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Flagged deleted", body = BulkMutationResponse))
)]
pub async fn soft_delete(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.order_service.bulk_soft_delete(user.id, payload.ids).await?;
    Ok(Json(result))
}

/// Restore soft-deleted orders
#[utoipa::path(
    patch,
    path = "/orders/restore",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Restored", body = BulkMutationResponse))
)]
pub async fn restore(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.order_service.bulk_restore(user.id, payload.ids).await?;
    Ok(Json(result))
}

/// Permanently delete orders; items are removed before their orders
#[utoipa::path(
    delete,
    path = "/orders/permanent",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Removed", body = BulkMutationResponse))
)]
pub async fn hard_delete(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.order_service.bulk_hard_delete(payload.ids).await?;
    Ok(Json(result))
}
