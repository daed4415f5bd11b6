//! Authentication middleware: bearer access tokens for users, the
//! X-API-KEY header for service-to-service callers.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{API_KEY_HEADER, BEARER_TOKEN_PREFIX};
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from the access token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub status: i32,
}

/// Marker for a request authenticated by API key rather than a user.
#[derive(Clone, Debug)]
pub struct ApiClient;

/// Extract the authenticated user, failing with 401 when the request was
/// not authenticated as a user (e.g. an API-key caller hitting a route
/// that stamps an acting user).
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Validate credentials and stamp the caller identity into request
/// extensions. API-key callers get the [`ApiClient`] marker instead of a
/// user identity.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(presented) = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        return match &state.api_key {
            Some(expected) if presented == expected => {
                request.extensions_mut().insert(ApiClient);
                Ok(next.run(request).await)
            }
            _ => Err(AppError::Unauthorized),
        };
    }

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify_access(token)?;

    let current_user = CurrentUser {
        id: claims.identity.id,
        email: claims.identity.email,
        role: claims.identity.role,
        status: claims.identity.status,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
