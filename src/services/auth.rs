//! Authentication workflows: registration, email verification, login,
//! password reset and token refresh.
//!
//! Single-use tokens are consumed in two phases: the persisted record is
//! looked up by the raw token string first, then the signature/expiry is
//! verified. Mail is dispatched only after the primary write has
//! committed; a dispatch failure surfaces but cannot roll it back.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{KEY_SITE_NAME, KEY_SITE_URL, NS_GENERAL, STATUS_ACTIVATED, STATUS_DEACTIVATED};
use crate::domain::user::{Identity, NewUser, UserRole};
use crate::domain::Password;
use crate::errors::{AppError, AppResult};
use crate::infra::mailer::{MailMessage, MailTemplate, Mailer};
use crate::infra::repositories::{SettingRepository, TokenRepository, UserRepository};
use crate::types::{MessageResponse, MutationResponse, SuccessType};

use super::token::{TokenPair, TokenService};

/// Identity fields plus the token pair, returned by login and refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: i32,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_name: Option<String>,
    pub role: UserRole,
    pub status: i32,
    pub access_token: String,
    pub refresh_token: String,
    pub expired_at: i64,
}

impl LoginResponse {
    fn new(identity: Identity, pair: TokenPair) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            business_name: identity.business_name,
            role: identity.role,
            status: identity.status,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expired_at: pair.expired_at,
        }
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new customer account and send the verification mail
    async fn register(
        &self,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<MutationResponse>;

    /// Consume a verification token and activate the account
    async fn verify_email(&self, token: String) -> AppResult<MessageResponse>;

    /// Authenticate and issue a token pair
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Derive a fresh token pair from a valid refresh token
    fn refresh_token(&self, refresh_token: String) -> AppResult<LoginResponse>;

    /// Issue a reset token and send the reset mail
    async fn forgot_password(&self, email: String) -> AppResult<MessageResponse>;

    /// Consume a reset token and replace the credential
    async fn reset_password(&self, token: String, new_password: String)
        -> AppResult<MessageResponse>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    verifications: Arc<dyn TokenRepository>,
    settings: Arc<dyn SettingRepository>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        verifications: Arc<dyn TokenRepository>,
        settings: Arc<dyn SettingRepository>,
        mailer: Arc<dyn Mailer>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            verifications,
            settings,
            mailer,
            tokens,
        }
    }

    async fn site_context(&self) -> AppResult<(String, String)> {
        let site_name = self
            .settings
            .get_value(NS_GENERAL, KEY_SITE_NAME)
            .await?
            .unwrap_or_default();
        let site_url = self
            .settings
            .get_value(NS_GENERAL, KEY_SITE_URL)
            .await?
            .unwrap_or_default();
        Ok((site_name, site_url))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<MutationResponse> {
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::bad_request("Email đã tồn tại"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let business_name = format!("{} {}", first_name, last_name);

        let user = self
            .users
            .create(NewUser {
                email,
                password: password_hash,
                first_name: Some(first_name),
                last_name: Some(last_name),
                business_name: Some(business_name),
                role: UserRole::Customer,
                status: STATUS_DEACTIVATED,
            })
            .await?;

        let token = self.tokens.issue_single_use(user.id, &user.email)?;
        self.verifications.replace(&user.email, &token).await?;

        let (site_name, site_url) = self.site_context().await?;
        // Minimal percent-encoding; only the characters an email can contain
        let encoded_email = user.email.replace('+', "%2B").replace('@', "%40");
        let verify_url = format!(
            "{}/auth/verify-email?token={}&email={}",
            site_url, token, encoded_email
        );

        self.mailer
            .send(MailMessage {
                to: vec![user.email.clone()],
                subject: "Xác minh địa chỉ email".to_string(),
                from: None,
                template: MailTemplate::Signup {
                    verify_url,
                    website: site_name,
                },
            })
            .await?;

        Ok(MutationResponse::new(user.id, SuccessType::Create))
    }

    async fn verify_email(&self, token: String) -> AppResult<MessageResponse> {
        // Storage lookup first: a consumed record rejects even a token
        // whose signature is still valid
        if self.verifications.find_by_token(&token).await?.is_none() {
            return Err(AppError::bad_request("Token không hợp lệ hoặc đã hết hạn."));
        }

        let payload = self
            .tokens
            .verify_single_use(&token)
            .map_err(|_| AppError::bad_request("Token đã hết hạn."))?;

        let user = self
            .users
            .find_by_id(payload.id)
            .await?
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;

        self.users.update_status(user.id, STATUS_ACTIVATED).await?;
        self.verifications.delete_by_email(&user.email).await?;

        Ok(MessageResponse::new("Tài khoản đã được xác minh."))
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user = self.users.find_by_email(&email).await?;

        let user = match user {
            Some(user) if !user.is_deleted() => user,
            _ => {
                return Err(AppError::not_found(
                    "Tài khoản không tồn tại hoặc đã bị xóa.",
                ))
            }
        };

        if user.status == STATUS_DEACTIVATED {
            return Err(AppError::not_found("Tài khoản chưa xác thực"));
        }

        if !Password::from_hash(user.password.clone()).verify(&password) {
            return Err(AppError::bad_request("Mật khẩu không chính xác."));
        }

        let identity = user.identity();
        let pair = self.tokens.issue_pair(identity.clone())?;
        Ok(LoginResponse::new(identity, pair))
    }

    fn refresh_token(&self, refresh_token: String) -> AppResult<LoginResponse> {
        let (identity, pair) = self.tokens.refresh(&refresh_token)?;
        Ok(LoginResponse::new(identity, pair))
    }

    async fn forgot_password(&self, email: String) -> AppResult<MessageResponse> {
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("Email không tồn tại trong hệ thống."))?;

        if user.status == STATUS_DEACTIVATED {
            return Err(AppError::bad_request("Tài khoản chưa được kích hoạt."));
        }

        let token = self.tokens.issue_single_use(user.id, &user.email)?;
        self.verifications.upsert(&user.email, &token).await?;

        let (site_name, site_url) = self.site_context().await?;
        let reset_link = format!("{}/auth/reset-password?token={}", site_url, token);

        self.mailer
            .send(MailMessage {
                to: vec![user.email.clone()],
                subject: "Yêu cầu đặt lại mật khẩu".to_string(),
                from: None,
                template: MailTemplate::ForgotPassword {
                    name: user.display_name(),
                    reset_link,
                    website: site_name,
                },
            })
            .await?;

        Ok(MessageResponse::new("Đã gửi email đặt lại mật khẩu."))
    }

    async fn reset_password(
        &self,
        token: String,
        new_password: String,
    ) -> AppResult<MessageResponse> {
        let record = self
            .verifications
            .find_by_token(&token)
            .await?
            .ok_or_else(|| AppError::bad_request("Token không hợp lệ hoặc đã hết hạn."))?;

        let payload = self
            .tokens
            .verify_single_use(&token)
            .map_err(|_| AppError::bad_request("Token không hợp lệ hoặc đã hết hạn."))?;

        let user = self
            .users
            .find_by_id(payload.id)
            .await?
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.update_password(user.id, password_hash).await?;
        self.verifications.clear(&record.email).await?;

        Ok(MessageResponse::new("Đặt lại mật khẩu thành công."))
    }
}
