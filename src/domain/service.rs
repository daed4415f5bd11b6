//! Bookable service (catalog offering) types.
//!
//! Services carry several child collections. Images, ideal-for tags,
//! included items and add-ons are replaced wholesale on update; steps and
//! their detail rows are reconciled by id (upsert present ids, create rows
//! without an id, prune the rest).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Full service aggregate row as stored (children fetched separately).
#[derive(Debug, Clone)]
pub struct Service {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub slug: String,
    pub kind: i32,
    pub status: i32,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: i32,
    pub author_id: Option<i32>,
    pub delete_flg: i32,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

/// Back-office listing row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListItem {
    pub id: i32,
    pub title: String,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub order_count: i32,
    pub rating: Option<f64>,
    pub created_time: DateTime<Utc>,
    pub delete_flg: i32,
    pub status: i32,
}

/// Public catalog row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicServiceItem {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub order_count: i32,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub kind: i32,
    pub images: Vec<ImagePair>,
}

/// Before/after image pair.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePair {
    pub id: Option<i32>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
}

/// Labelled child row (ideal-for tag or included item).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelItem {
    pub id: i32,
    pub label: String,
}

/// Optional paid extra attached to a service.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOnItem {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// Workflow step with its nested detail rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    pub id: i32,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
    pub video_url: Option<String>,
    pub steps: Vec<StepDetailItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepDetailItem {
    pub id: i32,
    pub title: Option<String>,
    pub content: Option<String>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
}

/// Full service payload for the back office.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub slug: String,
    pub status: i32,
    #[serde(rename = "type")]
    pub kind: i32,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: i32,
    pub author_id: Option<i32>,
    pub created_time: DateTime<Utc>,
    pub created_user: Option<i32>,
    pub updated_time: DateTime<Utc>,
    pub updated_user: Option<i32>,
    pub images: Vec<ImagePair>,
    pub ideal_fors: Vec<LabelItem>,
    pub includes: Vec<LabelItem>,
    pub add_ons: Vec<AddOnItem>,
    pub steps: Vec<StepItem>,
}

/// Public service payload fetched by slug, with related offerings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicServiceDetail {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: i32,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: i32,
    pub images: Vec<ImagePair>,
    pub ideal_fors: Vec<LabelItem>,
    pub includes: Vec<LabelItem>,
    pub add_ons: Vec<AddOnItem>,
    /// Up to six other published services of the same type
    pub related_services: Vec<PublicServiceItem>,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub before_url: Option<String>,
    pub after_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LabelInput {
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOnInput {
    pub title: String,
    pub description: Option<String>,
}

/// Step input; `id` present means upsert, absent means create.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    pub id: Option<i32>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDetailInput>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepDetailInput {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    #[validate(length(min = 1, message = "Tiêu đề không được để trống"))]
    pub title: String,
    pub content: Option<String>,
    #[validate(length(min = 1, message = "Slug không được để trống"))]
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: i32,
    pub status: Option<i32>,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: Option<i32>,
    #[serde(default)]
    pub images: Vec<ImageInput>,
    #[serde(default)]
    pub ideal_fors: Vec<LabelInput>,
    #[serde(default)]
    pub includes: Vec<LabelInput>,
    #[serde(default)]
    pub add_ons: Vec<AddOnInput>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[validate(length(min = 1, message = "Tiêu đề không được để trống"))]
    pub title: String,
    pub content: Option<String>,
    /// Re-validated only when it differs from the stored slug
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: i32,
    pub status: Option<i32>,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: Option<i32>,
    #[serde(default)]
    pub images: Vec<ImageInput>,
    #[serde(default)]
    pub ideal_fors: Vec<LabelInput>,
    #[serde(default)]
    pub includes: Vec<LabelInput>,
    #[serde(default)]
    pub add_ons: Vec<AddOnInput>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}
