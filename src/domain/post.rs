//! Blog post types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::AuthorRef;

/// Full post aggregate as stored.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: String,
    pub status: i32,
    pub password: Option<String>,
    pub thumbnail: Option<String>,
    pub author_id: i32,
    pub delete_flg: i32,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

/// Back-office listing row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListItem {
    pub id: i32,
    pub title: String,
    pub created_time: DateTime<Utc>,
    pub delete_flg: i32,
    pub status: i32,
}

/// Public listing row; content may be truncated to a word limit.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicPostItem {
    pub id: i32,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: AuthorRef,
    pub created_time: DateTime<Utc>,
}

/// Category reference attached to a post payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Full post payload for the back office.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: String,
    pub status: i32,
    pub password: Option<String>,
    pub thumbnail: Option<String>,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
    pub author: Option<AuthorRef>,
    pub categories: Vec<CategoryRef>,
}

/// Public post payload fetched by slug.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicPostDetail {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorRef>,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    #[validate(length(min = 1, message = "Tiêu đề không được để trống"))]
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "Slug không được để trống"))]
    pub slug: String,
    pub status: Option<i32>,
    pub password: Option<String>,
    pub thumbnail: Option<String>,
    pub category_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    #[validate(length(min = 1, message = "Tiêu đề không được để trống"))]
    pub title: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    /// Re-validated and re-probed only when it differs from the stored slug
    pub slug: Option<String>,
    pub status: Option<i32>,
    pub password: Option<String>,
    pub thumbnail: Option<String>,
    pub category_ids: Option<Vec<i32>>,
}
