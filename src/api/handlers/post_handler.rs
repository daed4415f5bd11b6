//! Blog post back-office handlers.

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
use crate::domain::post::{CreatePost, PostDetail, PostListItem, UpdatePost};
use crate::errors::AppResult;
use crate::types::{BulkMutationResponse, ListQuery, ListResponse, MutationResponse};

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/:id", get(find_one).put(update))
        .route("/delete", patch(soft_delete))
        .route("/restore", patch(restore))
        .route("/permanent", delete(hard_delete))
}

/// List posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses((status = 200, description = "Paged post list"))
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<PostListItem>>> {
    let data = state
        .post_service
        .find_all(query.filter(), query.pageable(), query.sort())
        .await?;
    let total = state.post_service.count(query.filter()).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = CreatePost,
    responses(
        (status = 200, description = "Created", body = MutationResponse),
        (status = 400, description = "Invalid slug or unknown category")
    )
)]
pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePost>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.post_service.create(user.id, payload).await?;
    Ok(Json(result))
}

/// Fetch one post with author and categories
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post", body = PostDetail),
        (status = 404, description = "Not found")
    )
)]
pub async fn find_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PostDetail>> {
    Ok(Json(state.post_service.find_one(id).await?))
}

/// Update a post; category links are replaced when supplied
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdatePost,
    responses(
        (status = 200, description = "Updated", body = MutationResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdatePost>,
) -> AppResult<Json<MutationResponse>> {
    let result = state.post_service.update(user.id, id, payload).await?;
    Ok(Json(result))
}

/// Soft-delete posts
#[utoipa::path(
    patch,
    path = "/posts/delete",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Flagged deleted", body = BulkMutationResponse))
)]
pub async fn soft_delete(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.post_service.bulk_soft_delete(user.id, payload.ids).await?;
    Ok(Json(result))
}

/// Restore soft-deleted posts
#[utoipa::path(
    patch,
    path = "/posts/restore",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Restored", body = BulkMutationResponse))
)]
pub async fn restore(
    user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.post_service.bulk_restore(user.id, payload.ids).await?;
    Ok(Json(result))
}

/// Permanently delete posts and their category links
#[utoipa::path(
    delete,
    path = "/posts/permanent",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = BulkIds,
    responses((status = 200, description = "Removed", body = BulkMutationResponse))
)]
pub async fn hard_delete(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkIds>,
) -> AppResult<Json<BulkMutationResponse>> {
    let result = state.post_service.bulk_hard_delete(payload.ids).await?;
    Ok(Json(result))
}
