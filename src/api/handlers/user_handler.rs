//! User back-office handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::user::UserListItem;
use crate::errors::AppResult;
use crate::types::{ListQuery, ListResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(find_all))
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Paged user list"),
        (status = 403, description = "Missing USER_READ permission")
    )
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse<UserListItem>>> {
    let data = state
        .user_service
        .find_all(query.filter(), query.pageable(), query.sort())
        .await?;
    let total = state.user_service.count(query.filter()).await?;
    Ok(Json(ListResponse::new(total, data)))
}
