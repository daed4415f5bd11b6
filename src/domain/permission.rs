//! Role-based permission model.
//!
//! A permission key is the normalized `{MODULE}_{PERMISSION}` string looked
//! up in the role → permission table.

use serde::{Deserialize, Serialize};

/// Application modules gated by permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Module {
    User,
    Media,
    Post,
    Category,
    Service,
    Order,
    Setting,
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Module::User => "USER",
            Module::Media => "MEDIA",
            Module::Post => "POST",
            Module::Category => "CATEGORY",
            Module::Service => "SERVICE",
            Module::Order => "ORDER",
            Module::Setting => "SETTING",
        };
        write!(f, "{}", name)
    }
}

/// Actions a role may be granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Read,
    Create,
    Update,
    Delete,
    Import,
    Export,
    Restore,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Permission::Read => "READ",
            Permission::Create => "CREATE",
            Permission::Update => "UPDATE",
            Permission::Delete => "DELETE",
            Permission::Import => "IMPORT",
            Permission::Export => "EXPORT",
            Permission::Restore => "RESTORE",
        };
        write!(f, "{}", name)
    }
}

/// A single (module, permission) requirement declared on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required {
    pub module: Module,
    pub permission: Permission,
}

impl Required {
    pub const fn new(module: Module, permission: Permission) -> Self {
        Self { module, permission }
    }

    /// Normalized lookup key, e.g. `POST_CREATE`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.module, self.permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_module_underscore_permission_uppercase() {
        let r = Required::new(Module::Post, Permission::Create);
        assert_eq!(r.key(), "POST_CREATE");
        let r = Required::new(Module::Setting, Permission::Update);
        assert_eq!(r.key(), "SETTING_UPDATE");
    }
}
