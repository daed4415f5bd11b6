//! Category taxonomy types.
//!
//! Categories form a parent-pointer tree. Listings flatten the tree
//! depth-first with a level annotation before pagination is applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Full category aggregate as stored.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub is_default: bool,
    pub delete_flg: i32,
    pub created_time: DateTime<Utc>,
    pub created_user: Option<i32>,
    pub updated_time: DateTime<Utc>,
    pub updated_user: Option<i32>,
}

impl From<Category> for CategoryDetail {
    fn from(c: Category) -> Self {
        CategoryDetail {
            id: c.id,
            name: c.name,
            description: c.description,
            parent_id: c.parent_id,
            created_time: c.created_time,
            created_user: c.created_user,
            updated_time: c.updated_time,
            updated_user: c.updated_user,
        }
    }
}

/// Flat category row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub is_default: bool,
}

/// Depth-annotated node in the flattened listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub is_default: bool,
    /// Depth in the tree: roots are 0
    pub level: usize,
}

/// Single-category payload for the back office.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub created_time: DateTime<Utc>,
    pub created_user: Option<i32>,
    pub updated_time: DateTime<Utc>,
    pub updated_user: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Tên danh mục không được để trống"))]
    pub name: String,
    #[validate(length(min = 1, message = "Slug không được để trống"))]
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Tên danh mục không được để trống"))]
    pub name: String,
    /// Re-validated and re-probed only when it differs from the stored slug
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}
