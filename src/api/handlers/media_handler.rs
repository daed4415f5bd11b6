//! Media library handlers.

use axum::{
    extract::{Multipart, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::media::{MediaDeleteOutcome, MediaListItem};
use crate::errors::{AppError, AppResult};
use crate::types::{ListQuery, ListResponse};

/// Create media routes
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/", get(find_all).post(upload).delete(delete_many))
}

/// List media with uploader info
#[utoipa::path(
    get,
    path = "/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses((status = 200, description = "Paged media list"))
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<MediaListItem>>> {
    let data = state
        .media_service
        .find_all(query.filter(), query.pageable(), query.sort())
        .await?;
    let total = state.media_service.count(query.filter()).await?;
    Ok(Json(ListResponse::new(total, data)))
}

/// Upload one or more files (multipart). A single file returns an object,
/// several return an array.
#[utoipa::path(
    post,
    path = "/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Upload registered"),
        (status = 400, description = "No file in the request body")
    )
)]
pub async fn upload(
    user: CurrentUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut results = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.to_string()))?
            .to_vec();

        let outcome = state
            .media_service
            .store_upload(user.id, file_name, mime_type, bytes)
            .await?;
        results.push(outcome);
    }

    if results.is_empty() {
        return Err(AppError::bad_request("Không có file nào được tải lên"));
    }

    let body = if results.len() == 1 {
        json!(results[0])
    } else {
        json!(results)
    };
    Ok(Json(body))
}

/// Delete media records and their backing files; per-item failures are
/// reported in `failed`, not raised
#[utoipa::path(
    delete,
    path = "/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Per-item outcome", body = MediaDeleteOutcome))
)]
pub async fn delete_many(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i32>>,
) -> AppResult<Json<MediaDeleteOutcome>> {
    if ids.is_empty() {
        return Err(AppError::bad_request("Danh sách ID không được để trống"));
    }
    Ok(Json(state.media_service.delete_many(ids).await?))
}
