//! Transactional mail endpoints: SMTP test, contact form, order
//! notification.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::ContactSubmission;
use crate::types::MessageResponse;

/// Test mail request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendTestEmailRequest {
    #[validate(email(message = "Email không hợp lệ"))]
    pub to: String,
}

/// Create mail routes
pub fn mail_routes() -> Router<AppState> {
    Router::new()
        .route("/test", post(send_test))
        .route("/contact", post(submit_contact))
        .route("/send-order/:order_id", post(send_order))
}

/// Send a test mail to verify the SMTP configuration
#[utoipa::path(
    post,
    path = "/mail/test",
    tag = "Mail",
    request_body = SendTestEmailRequest,
    responses(
        (status = 200, description = "Sent", body = MessageResponse),
        (status = 500, description = "SMTP dispatch failed")
    )
)]
pub async fn send_test(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendTestEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(state.mail_service.send_test(payload.to).await?))
}

/// Contact form submission: acknowledges the sender and notifies the admin
#[utoipa::path(
    post,
    path = "/mail/contact",
    tag = "Mail",
    request_body = ContactSubmission,
    responses(
        (status = 200, description = "Mails sent", body = MessageResponse),
        (status = 500, description = "SMTP dispatch failed")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactSubmission>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(state.mail_service.submit_contact(payload).await?))
}

/// Send the order-created mail to the customer and the admin copy
#[utoipa::path(
    post,
    path = "/mail/send-order/{order_id}",
    tag = "Mail",
    params(("order_id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Mails sent", body = MessageResponse),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn send_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(state.mail_service.send_order_email(order_id).await?))
}
