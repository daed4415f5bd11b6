//! Token issuance and verification.
//!
//! Access and refresh tokens are signed with distinct secrets and
//! lifetimes but carry the same identity claims. Single-use tokens back
//! the email-verification and password-reset flows.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, SINGLE_USE_TOKEN_HOURS};
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

/// Access/refresh pair handed out on login and refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token, read back from its decoded `exp`
    pub expired_at: i64,
}

/// Full claims payload: identity plus the time fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a single-use verification/reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleUseClaims {
    pub id: i32,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies every token the application issues.
#[derive(Clone)]
pub struct TokenService {
    access_secret: Vec<u8>,
    refresh_secret: Vec<u8>,
    access_hours: i64,
    refresh_days: i64,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            access_secret: config.jwt_secret_bytes().to_vec(),
            refresh_secret: config.jwt_refresh_secret_bytes().to_vec(),
            access_hours: config.access_token_hours,
            refresh_days: config.refresh_token_days,
        }
    }

    /// Construct from raw parts (tests, tooling).
    pub fn with_secrets(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_hours: i64,
        refresh_days: i64,
    ) -> Self {
        Self {
            access_secret: access_secret.to_vec(),
            refresh_secret: refresh_secret.to_vec(),
            access_hours,
            refresh_days,
        }
    }

    /// Sign an access/refresh pair from the same identity claims.
    pub fn issue_pair(&self, identity: Identity) -> AppResult<TokenPair> {
        let now = Utc::now();

        let access_claims = Claims {
            identity: identity.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.access_hours)).timestamp(),
        };
        let access_token = encode(
            &Header::default(),
            &access_claims,
            &EncodingKey::from_secret(&self.access_secret),
        )?;

        let refresh_claims = Claims {
            identity,
            iat: now.timestamp(),
            exp: (now + Duration::days(self.refresh_days)).timestamp(),
        };
        let refresh_token = encode(
            &Header::default(),
            &refresh_claims,
            &EncodingKey::from_secret(&self.refresh_secret),
        )?;

        // Read the expiry back from the signed access token
        let expired_at = self.verify_access(&access_token)?.exp;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expired_at,
        })
    }

    /// Verify an access token and extract its claims.
    pub fn verify_access(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.access_secret),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Verify a refresh token and derive a fresh pair from its claims,
    /// with `iat`/`exp` stripped before re-signing. Every verification
    /// failure (expired, malformed, wrong secret) collapses to
    /// `Unauthorized`.
    pub fn refresh(&self, refresh_token: &str) -> AppResult<(Identity, TokenPair)> {
        let data = decode::<Claims>(
            refresh_token,
            &DecodingKey::from_secret(&self.refresh_secret),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        let identity = data.claims.identity;
        let pair = self.issue_pair(identity.clone())?;
        Ok((identity, pair))
    }

    /// Sign a short-lived single-use token carrying id + email.
    pub fn issue_single_use(&self, id: i32, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = SingleUseClaims {
            id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SINGLE_USE_TOKEN_HOURS)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.access_secret),
        )?;
        Ok(token)
    }

    /// Cryptographic half of single-use consumption; the storage lookup
    /// happens first in the auth workflows.
    pub fn verify_single_use(&self, token: &str) -> AppResult<SingleUseClaims> {
        let data = decode::<SingleUseClaims>(
            token,
            &DecodingKey::from_secret(&self.access_secret),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn service() -> TokenService {
        TokenService::with_secrets(
            b"test-access-secret-0123456789abcdef",
            b"test-refresh-secret-0123456789abcde",
            1,
            7,
        )
    }

    fn identity() -> Identity {
        Identity {
            id: 7,
            email: "khach@example.com".to_string(),
            first_name: Some("Anh".to_string()),
            last_name: Some("Tran".to_string()),
            business_name: Some("Anh Tran".to_string()),
            role: UserRole::Customer,
            status: 1,
        }
    }

    #[test]
    fn pair_round_trips_through_access_verification() {
        let svc = service();
        let pair = svc.issue_pair(identity()).unwrap();

        let claims = svc.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.identity.id, 7);
        assert_eq!(claims.identity.email, "khach@example.com");
        assert_eq!(claims.exp, pair.expired_at);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_preserves_identity_claims() {
        let svc = service();
        let pair = svc.issue_pair(identity()).unwrap();

        let (refreshed, new_pair) = svc.refresh(&pair.refresh_token).unwrap();
        assert_eq!(refreshed.id, 7);
        assert_eq!(refreshed.email, "khach@example.com");
        assert_eq!(refreshed.role, UserRole::Customer);

        let claims = svc.verify_access(&new_pair.access_token).unwrap();
        assert_eq!(claims.identity.business_name, Some("Anh Tran".to_string()));
    }

    #[test]
    fn access_token_is_not_a_valid_refresh_token() {
        let svc = service();
        let pair = svc.issue_pair(identity()).unwrap();

        // Signed with the access secret, so refresh verification must fail
        let result = svc.refresh(&pair.access_token);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_secret_refresh_fails_unauthorized() {
        let svc = service();
        let other = TokenService::with_secrets(
            b"test-access-secret-0123456789abcdef",
            b"another-refresh-secret-0123456789ab",
            1,
            7,
        );
        let pair = other.issue_pair(identity()).unwrap();

        assert!(matches!(
            svc.refresh(&pair.refresh_token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn expired_refresh_token_fails_unauthorized() {
        let svc = service();
        let now = Utc::now();
        let claims = Claims {
            identity: identity(),
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-refresh-secret-0123456789abcde"),
        )
        .unwrap();

        assert!(matches!(svc.refresh(&stale), Err(AppError::Unauthorized)));
    }

    #[test]
    fn single_use_token_round_trips() {
        let svc = service();
        let token = svc.issue_single_use(3, "a@x.com").unwrap();
        let claims = svc.verify_single_use(&token).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn tampered_single_use_token_fails() {
        let svc = service();
        let mut token = svc.issue_single_use(3, "a@x.com").unwrap();
        token.push('x');
        assert!(svc.verify_single_use(&token).is_err());
    }
}
