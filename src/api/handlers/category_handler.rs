//! Category back-office handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::category::{CategoryDetail, CategoryNode, CreateCategory, UpdateCategory};
use crate::errors::AppResult;
use crate::types::{BulkMutationResponse, ListQuery, ListResponse, MutationResponse};

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).put(update).delete(delete_one))
        .route("/:id/default", post(set_default))
}

/// List categories as a depth-annotated flattened tree
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses((status = 200, description = "Flattened tree page"))
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<CategoryNode>>> {
    let search = query.filter().search;
    let data = state
        .category_service
        .find_all(search.clone(), query.pageable(), query.sort())
        .await?;
    let total = state.category_service.count(search).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 200, description = "Created", body = MutationResponse),
        (status = 400, description = "Invalid slug"),
        (status = 404, description = "Parent category missing")
    )
)]
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategory>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.category_service.create(user.id, payload).await?;
    Ok(Json(result))
}

/// Fetch one category
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryDetail),
        (status = 404, description = "Not found")
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CategoryDetail>> {
    Ok(Json(state.category_service.find_one(id).await?))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Updated", body = MutationResponse),
        (status = 400, description = "Invalid slug or self-parenting"),
        (status = 404, description = "Category or parent missing")
    )
)]
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCategory>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.category_service.update(user.id, id, payload).await?;
    Ok(Json(result))
}

/// Delete a category (physical; fails on the default category)
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted", body = BulkMutationResponse),
        (status = 400, description = "Target is the default category"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.category_service.delete_many(vec![id]).await?;
    Ok(Json(result))
}

/// Mark a category as the single default
#[utoipa::path(
    post,
    path = "/categories/{id}/default",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Default switched", body = MutationResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_default(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.category_service.set_default(user.id, id).await?;
    Ok(Json(result))
}
