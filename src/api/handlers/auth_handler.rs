//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::LoginResponse;
use crate::types::{MessageResponse, MutationResponse};

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address, unique across accounts
    #[validate(email(message = "Email không hợp lệ"))]
    #[schema(example = "khach@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Mật khẩu phải có ít nhất 8 ký tự"))]
    #[schema(example = "MatKhauManh1!", min_length = 8)]
    pub password: String,
    #[validate(length(min = 1, message = "Tên không được để trống"))]
    #[schema(example = "Anh")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Họ không được để trống"))]
    #[schema(example = "Tran")]
    pub last_name: String,
}

/// Email verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Token không được để trống"))]
    pub verify_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email không hợp lệ"))]
    #[schema(example = "khach@example.com")]
    pub email: String,
    #[schema(example = "MatKhauManh1!")]
    pub password: String,
}

/// Password reset initiation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
}

/// Password reset completion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token không được để trống"))]
    pub token: String,
    #[validate(length(min = 8, message = "Mật khẩu phải có ít nhất 8 ký tự"))]
    pub new_password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Token không được để trống"))]
    pub token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/verify-email", post(verify_email))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/refresh-token", post(refresh_token))
}

/// Register a new account; verification mail is sent before the response
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification mail sent", body = MutationResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MutationResponse>)> {
    let result = state
        .auth_service
        .register(
            payload.email,
            payload.password,
            payload.first_name,
            payload.last_name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Consume a verification token and activate the account
#[utoipa::path(
    post,
    path = "/auth/verify-email",
    tag = "Auth",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Account activated", body = MessageResponse),
        (status = 400, description = "Unknown, expired or already-consumed token")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let result = state.auth_service.verify_email(payload.verify_token).await?;
    Ok(Json(result))
}

/// Authenticate and receive an access/refresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Wrong password"),
        (status = 404, description = "Unknown, deleted or unverified account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let result = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;
    Ok(Json(result))
}

/// Issue a reset token and send the reset mail
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset mail sent", body = MessageResponse),
        (status = 400, description = "Account not yet activated"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let result = state.auth_service.forgot_password(payload.email).await?;
    Ok(Json(result))
}

/// Consume a reset token and replace the password
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = MessageResponse),
        (status = 400, description = "Unknown, expired or already-consumed token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let result = state
        .auth_service
        .reset_password(payload.token, payload.new_password)
        .await?;
    Ok(Json(result))
}

/// Derive a fresh token pair from a refresh token
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    tag = "Auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Fresh pair issued", body = LoginResponse),
        (status = 401, description = "Expired, malformed or wrong-secret token")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<LoginResponse>> {
    let result = state.auth_service.refresh_token(payload.token)?;
    Ok(Json(result))
}
