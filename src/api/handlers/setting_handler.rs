//! Settings back-office handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{post, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::setting::{SettingBatch, SettingCreateOutcome, SettingUpdateOutcome};
use crate::errors::AppResult;

/// Create setting routes
pub fn setting_routes() -> Router<AppState> {
    Router::new()
        .route("/:namespace", post(create_many).put(update_many))
        .route("/:namespace/upsert", put(upsert_many))
}

/// Insert settings into a namespace; colliding keys are skipped
#[utoipa::path(
    post,
    path = "/settings/{namespace}",
    tag = "Settings",
    security(("bearer_auth" = [])),
    params(("namespace" = String, Path, description = "Settings namespace")),
    request_body = SettingBatch,
    responses((status = 200, description = "Created and skipped keys", body = SettingCreateOutcome))
)]
pub async fn create_many(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    ValidatedJson(payload): ValidatedJson<SettingBatch>,
) -> AppResult<Json<SettingCreateOutcome>> {
    let result = state
        .setting_service
        .create_many(&namespace, payload.settings)
        .await?;
    Ok(Json(result))
}

/// Update settings in a namespace; missing keys are skipped
#[utoipa::path(
    put,
    path = "/settings/{namespace}",
    tag = "Settings",
    security(("bearer_auth" = [])),
    params(("namespace" = String, Path, description = "Settings namespace")),
    request_body = SettingBatch,
    responses((status = 200, description = "Updated and skipped keys", body = SettingUpdateOutcome))
)]
pub async fn update_many(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    ValidatedJson(payload): ValidatedJson<SettingBatch>,
) -> AppResult<Json<SettingUpdateOutcome>> {
    let result = state
        .setting_service
        .update_many(&namespace, payload.settings)
        .await?;
    Ok(Json(result))
}

/// Idempotent insert-or-update of every entry
#[utoipa::path(
    put,
    path = "/settings/{namespace}/upsert",
    tag = "Settings",
    security(("bearer_auth" = [])),
    params(("namespace" = String, Path, description = "Settings namespace")),
    request_body = SettingBatch,
    responses((status = 200, description = "Upserted keys", body = SettingUpdateOutcome))
)]
pub async fn upsert_many(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    ValidatedJson(payload): ValidatedJson<SettingBatch>,
) -> AppResult<Json<SettingUpdateOutcome>> {
    let result = state
        .setting_service
        .upsert_many(&namespace, payload.settings)
        .await?;
    Ok(Json(result))
}
