//! Authentication flow tests over in-memory stores.
//!
//! Exercises the registration → verification → login → refresh and
//! forgot → reset lifecycles end to end, without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use studio_api::domain::user::{NewUser, User, UserListItem, UserRole};
use studio_api::errors::{AppError, AppResult};
use studio_api::infra::mailer::{MailMessage, Mailer};
use studio_api::infra::repositories::{
    SettingRepository, TokenRepository, UserRepository, VerificationRecord,
};
use studio_api::services::{AuthService, Authenticator, TokenService};
use studio_api::types::{FindParams, Pageable, SortParams};

// =============================================================================
// In-memory fakes
// =============================================================================

#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: rows.len() as i32 + 1,
            email: data.email,
            password: data.password,
            first_name: data.first_name,
            last_name: data.last_name,
            business_name: data.business_name,
            role: data.role,
            status: data.status,
            delete_flg: 0,
            created_time: now,
            updated_time: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_status(&self, id: i32, status: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;
        user.status = status;
        Ok(())
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("Người dùng không tồn tại."))?;
        user.password = password_hash;
        Ok(())
    }

    async fn list(
        &self,
        _filter: FindParams,
        _pageable: Pageable,
        _sort: SortParams,
    ) -> AppResult<Vec<UserListItem>> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: FindParams) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

/// One verification row per email, mirroring the unique constraint.
#[derive(Default)]
struct InMemoryTokens {
    rows: Mutex<Vec<VerificationRecord>>,
}

impl InMemoryTokens {
    fn current_token(&self, email: &str) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .and_then(|r| r.verify_token.clone())
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokens {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.verify_token.as_deref() == Some(token))
            .cloned())
    }

    async fn replace(&self, email: &str, token: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| r.email != email);
        let next_id = rows.len() as i32 + 1;
        rows.push(VerificationRecord {
            id: next_id,
            email: email.to_string(),
            verify_token: Some(token.to_string()),
        });
        Ok(())
    }

    async fn upsert(&self, email: &str, token: &str) -> AppResult<()> {
        self.replace(email, token).await
    }

    async fn clear(&self, email: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.email == email) {
            row.verify_token = None;
        }
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|r| r.email != email);
        Ok(())
    }
}

/// Static site settings; nothing writable.
struct StaticSettings;

#[async_trait]
impl SettingRepository for StaticSettings {
    async fn get_by_namespace(&self, _namespace: &str) -> AppResult<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    async fn get_value(&self, namespace: &str, key: &str) -> AppResult<Option<String>> {
        Ok(match (namespace, key) {
            ("general", "siteName") => Some("Studio".to_string()),
            ("general", "siteUrl") => Some("https://studio.test".to_string()),
            _ => None,
        })
    }

    async fn exists(&self, _namespace: &str, _key: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn insert(&self, _namespace: &str, _key: &str, _value: &str) -> AppResult<()> {
        Ok(())
    }

    async fn update_value(&self, _namespace: &str, _key: &str, _value: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn upsert(&self, _namespace: &str, _key: &str, _value: &str) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    auth: Authenticator,
    users: Arc<InMemoryUsers>,
    tokens: Arc<InMemoryTokens>,
    mailer: Arc<RecordingMailer>,
    token_service: TokenService,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUsers::default());
    let tokens = Arc::new(InMemoryTokens::default());
    let mailer = Arc::new(RecordingMailer::default());
    let token_service = TokenService::with_secrets(
        b"integration-access-secret-0123456789",
        b"integration-refresh-secret-012345678",
        1,
        7,
    );

    let auth = Authenticator::new(
        users.clone(),
        tokens.clone(),
        Arc::new(StaticSettings),
        mailer.clone(),
        token_service.clone(),
    );

    Harness {
        auth,
        users,
        tokens,
        mailer,
        token_service,
    }
}

async fn register_default(h: &Harness) {
    h.auth
        .register(
            "a@x.com".to_string(),
            "password-123".to_string(),
            "An".to_string(),
            "Nguyen".to_string(),
        )
        .await
        .expect("registration succeeds");
}

async fn register_and_verify(h: &Harness) {
    register_default(h).await;
    let token = h.tokens.current_token("a@x.com").expect("token stored");
    h.auth.verify_email(token).await.expect("verification succeeds");
}

// =============================================================================
// Registration & verification
// =============================================================================

#[tokio::test]
async fn registration_creates_deactivated_account_and_sends_mail() {
    let h = harness();
    register_default(&h).await;

    let user = h.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(user.status, 0);
    assert_eq!(user.role, UserRole::Customer);
    assert_eq!(user.business_name.as_deref(), Some("An Nguyen"));

    assert!(h.tokens.current_token("a@x.com").is_some());

    let sent = h.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Xác minh địa chỉ email");
    assert_eq!(sent[0].to, vec!["a@x.com".to_string()]);
}

#[tokio::test]
async fn duplicate_registration_fails_with_email_exists() {
    let h = harness();
    register_default(&h).await;

    let result = h
        .auth
        .register(
            "a@x.com".to_string(),
            "password-456".to_string(),
            "Binh".to_string(),
            "Le".to_string(),
        )
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Email đã tồn tại"),
        other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn verify_with_unknown_token_fails_bad_request() {
    let h = harness();
    let result = h.auth.verify_email("no-such-token".to_string()).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn verify_activates_account_and_consumes_token() {
    let h = harness();
    register_default(&h).await;
    let token = h.tokens.current_token("a@x.com").unwrap();

    h.auth.verify_email(token.clone()).await.unwrap();

    let user = h.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(user.status, 1);
    assert!(h.tokens.current_token("a@x.com").is_none());

    // The record is gone, so the cryptographically-valid token is dead
    let replay = h.auth.verify_email(token).await;
    assert!(matches!(replay, Err(AppError::BadRequest(_))));
}

// =============================================================================
// Login & refresh
// =============================================================================

#[tokio::test]
async fn login_before_verification_fails_not_found() {
    let h = harness();
    register_default(&h).await;

    let result = h
        .auth
        .login("a@x.com".to_string(), "password-123".to_string())
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Tài khoản chưa xác thực"),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn login_with_unknown_email_fails_not_found() {
    let h = harness();
    let result = h
        .auth
        .login("nobody@x.com".to_string(), "whatever-123".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn login_with_wrong_password_fails_bad_request() {
    let h = harness();
    register_and_verify(&h).await;

    let result = h
        .auth
        .login("a@x.com".to_string(), "wrong-password".to_string())
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Mật khẩu không chính xác."),
        other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn login_issues_verifiable_token_pair() {
    let h = harness();
    register_and_verify(&h).await;

    let response = h
        .auth
        .login("a@x.com".to_string(), "password-123".to_string())
        .await
        .unwrap();

    assert_eq!(response.email, "a@x.com");
    assert_eq!(response.status, 1);

    let claims = h.token_service.verify_access(&response.access_token).unwrap();
    assert_eq!(claims.identity.id, response.id);
    assert_eq!(claims.identity.role, UserRole::Customer);
    assert_eq!(claims.exp, response.expired_at);
}

#[tokio::test]
async fn refresh_re_signs_the_same_identity() {
    let h = harness();
    register_and_verify(&h).await;

    let login = h
        .auth
        .login("a@x.com".to_string(), "password-123".to_string())
        .await
        .unwrap();

    let refreshed = h.auth.refresh_token(login.refresh_token).unwrap();
    assert_eq!(refreshed.id, login.id);
    assert_eq!(refreshed.email, login.email);

    let claims = h.token_service.verify_access(&refreshed.access_token).unwrap();
    assert_eq!(claims.identity.email, "a@x.com");
}

#[tokio::test]
async fn refresh_with_garbage_fails_unauthorized() {
    let h = harness();
    let result = h.auth.refresh_token("not-a-jwt".to_string());
    assert!(matches!(result, Err(AppError::Unauthorized)));
}

// =============================================================================
// Password reset
// =============================================================================

#[tokio::test]
async fn forgot_password_requires_known_activated_account() {
    let h = harness();

    let unknown = h.auth.forgot_password("nobody@x.com".to_string()).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    register_default(&h).await;
    let unverified = h.auth.forgot_password("a@x.com".to_string()).await;
    match unverified {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Tài khoản chưa được kích hoạt."),
        other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn reset_password_replaces_credential_and_consumes_token() {
    let h = harness();
    register_and_verify(&h).await;

    h.auth.forgot_password("a@x.com".to_string()).await.unwrap();
    assert_eq!(h.mailer.sent.lock().unwrap().last().unwrap().subject, "Yêu cầu đặt lại mật khẩu");

    let token = h.tokens.current_token("a@x.com").unwrap();
    h.auth
        .reset_password(token.clone(), "new-password-456".to_string())
        .await
        .unwrap();

    // Old password is dead, new one works
    assert!(h
        .auth
        .login("a@x.com".to_string(), "password-123".to_string())
        .await
        .is_err());
    assert!(h
        .auth
        .login("a@x.com".to_string(), "new-password-456".to_string())
        .await
        .is_ok());

    // The cleared record rejects a second use of the same token
    let replay = h
        .auth
        .reset_password(token, "another-password-789".to_string())
        .await;
    assert!(matches!(replay, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn soft_deleted_account_cannot_login() {
    let h = harness();
    register_and_verify(&h).await;

    h.users
        .rows
        .lock()
        .unwrap()
        .iter_mut()
        .for_each(|u| u.delete_flg = 1);

    let result = h
        .auth
        .login("a@x.com".to_string(), "password-123".to_string())
        .await;

    match result {
        Err(AppError::NotFound(msg)) => {
            assert_eq!(msg, "Tài khoản không tồn tại hoặc đã bị xóa.")
        }
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}
