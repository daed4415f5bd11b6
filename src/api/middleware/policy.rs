//! Permission enforcement middleware.
//!
//! Routes are associated with their required permissions in an explicit
//! table keyed by `"METHOD /matched/path"`; the middleware resolves the
//! matched route pattern and asks the policy engine to authorize the
//! caller. Routes absent from the table require no permissions.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::api::AppState;
use crate::domain::{Module, Permission, Required};
use crate::errors::AppError;

use super::auth::{ApiClient, CurrentUser};

/// Route → required permissions association table.
static ROUTE_PERMISSIONS: Lazy<HashMap<&'static str, Vec<Required>>> = Lazy::new(|| {
    use Module::*;
    use Permission::*;

    let entries: &[(&str, Module, Permission)] = &[
        // Users
        ("GET /users", User, Read),
        // Categories (listing is open to any authenticated caller)
        ("POST /categories", Category, Create),
        ("GET /categories/:id", Category, Read),
        ("PUT /categories/:id", Category, Update),
        ("DELETE /categories/:id", Category, Delete),
        ("POST /categories/:id/default", Category, Update),
        // Posts
        ("GET /posts", Post, Read),
        ("POST /posts", Post, Create),
        ("GET /posts/:id", Post, Read),
        ("PUT /posts/:id", Post, Update),
        ("PATCH /posts/delete", Post, Delete),
        ("PATCH /posts/restore", Post, Restore),
        ("DELETE /posts/permanent", Post, Delete),
        // Services
        ("GET /services", Service, Read),
        ("POST /services", Service, Create),
        ("GET /services/:id", Service, Read),
        ("PUT /services/:id", Service, Update),
        ("PATCH /services/delete", Service, Delete),
        ("PATCH /services/restore", Service, Restore),
        ("DELETE /services/permanent", Service, Delete),
        // Orders
        ("GET /orders", Order, Read),
        ("POST /orders", Order, Create),
        ("GET /orders/:id", Order, Read),
        ("PUT /orders/:id", Order, Update),
        ("PATCH /orders/delete", Order, Delete),
        ("PATCH /orders/restore", Order, Restore),
        ("DELETE /orders/permanent", Order, Delete),
        // Media
        ("GET /media", Media, Read),
        ("POST /media", Media, Create),
        ("DELETE /media", Media, Delete),
        // Settings
        ("POST /settings/:namespace", Setting, Create),
        ("PUT /settings/:namespace", Setting, Update),
        ("PUT /settings/:namespace/upsert", Setting, Update),
    ];

    entries
        .iter()
        .map(|(route, module, permission)| {
            (*route, vec![Required::new(*module, *permission)])
        })
        .collect()
});

/// Required permissions for a matched route, empty when unlisted.
pub fn route_permissions(method: &str, path: &str) -> &'static [Required] {
    ROUTE_PERMISSIONS
        .get(format!("{} {}", method, path).as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Deny the request unless the caller's role grants every permission the
/// matched route requires. API-key callers bypass the table.
pub async fn policy_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.extensions().get::<ApiClient>().is_some() {
        return Ok(next.run(request).await);
    }

    let required = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| route_permissions(request.method().as_str(), p.as_str()))
        .unwrap_or(&[]);

    let role = request.extensions().get::<CurrentUser>().map(|u| u.role);

    if !state.policy.authorize(role, required) {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_routes_resolve_their_permission() {
        let perms = route_permissions("PATCH", "/orders/delete");
        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0].key(), "ORDER_DELETE");
    }

    #[test]
    fn unlisted_routes_require_nothing() {
        assert!(route_permissions("GET", "/categories").is_empty());
        assert!(route_permissions("GET", "/nope").is_empty());
    }
}
