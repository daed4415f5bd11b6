//! Authorization policy engine.
//!
//! Evaluates whether a caller may perform a set of (module, permission)
//! actions. The role → permission-key table is loaded once at startup
//! from a JSON resource and the engine is immutable afterwards; a reload
//! requires a restart.

use std::collections::{HashMap, HashSet};

use crate::domain::{Required, UserRole};
use crate::errors::{AppError, AppResult};

/// Immutable role → permission-key table.
pub struct PolicyEngine {
    table: HashMap<String, HashSet<String>>,
}

impl PolicyEngine {
    /// Load the table from a JSON file of shape
    /// `{"CUSTOMER": ["post_read", ...], ...}`. Keys are case-normalized.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::internal(format!("cannot read permission table {}: {}", path, e))
        })?;
        let parsed: HashMap<String, Vec<String>> = serde_json::from_str(&raw).map_err(|e| {
            AppError::internal(format!("invalid permission table {}: {}", path, e))
        })?;
        Ok(Self::from_map(parsed))
    }

    pub fn from_map(map: HashMap<String, Vec<String>>) -> Self {
        let table = map
            .into_iter()
            .map(|(role, perms)| {
                (
                    role.to_uppercase(),
                    perms.into_iter().map(|p| p.to_uppercase()).collect(),
                )
            })
            .collect();
        Self { table }
    }

    /// Decide whether `role` may perform an action gated by `required`.
    ///
    /// - no required permissions: allow
    /// - no role: deny
    /// - admin: allow unconditionally
    /// - otherwise: allow only when every required key is granted
    pub fn authorize(&self, role: Option<UserRole>, required: &[Required]) -> bool {
        if required.is_empty() {
            return true;
        }

        let Some(role) = role else {
            return false;
        };

        if role.is_admin() {
            return true;
        }

        match self.table.get(&role.to_string()) {
            Some(granted) => required.iter().all(|r| granted.contains(&r.key())),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Module, Permission};

    fn engine() -> PolicyEngine {
        let mut map = HashMap::new();
        map.insert(
            "CUSTOMER".to_string(),
            vec![
                "post_read".to_string(),
                "POST_CREATE".to_string(),
                "media_read".to_string(),
                "order_create".to_string(),
            ],
        );
        PolicyEngine::from_map(map)
    }

    const POST_READ: Required = Required::new(Module::Post, Permission::Read);
    const POST_CREATE: Required = Required::new(Module::Post, Permission::Create);
    const POST_DELETE: Required = Required::new(Module::Post, Permission::Delete);

    #[test]
    fn empty_requirements_always_authorize() {
        let engine = engine();
        assert!(engine.authorize(None, &[]));
        assert!(engine.authorize(Some(UserRole::Customer), &[]));
    }

    #[test]
    fn missing_role_denies() {
        assert!(!engine().authorize(None, &[POST_READ]));
    }

    #[test]
    fn admin_bypasses_the_table() {
        assert!(engine().authorize(Some(UserRole::Admin), &[POST_DELETE]));
    }

    #[test]
    fn customer_needs_every_required_key() {
        let engine = engine();
        assert!(engine.authorize(Some(UserRole::Customer), &[POST_READ]));
        assert!(engine.authorize(Some(UserRole::Customer), &[POST_READ, POST_CREATE]));
        // Conjunction: one missing key denies the whole action
        assert!(!engine.authorize(Some(UserRole::Customer), &[POST_READ, POST_DELETE]));
        assert!(!engine.authorize(Some(UserRole::Customer), &[POST_DELETE]));
    }

    #[test]
    fn keys_are_case_normalized_at_load() {
        let engine = engine();
        // "post_read" and "POST_CREATE" were both lowercase/uppercase in the file
        assert!(engine.authorize(Some(UserRole::Customer), &[POST_CREATE]));
    }

    #[test]
    fn role_absent_from_table_denies() {
        let engine = PolicyEngine::from_map(HashMap::new());
        assert!(!engine.authorize(Some(UserRole::Customer), &[POST_READ]));
    }
}
