//! Order types.
//!
//! Item prices are captured at order time; later changes to the service's
//! price never touch existing orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UserRef;

/// Service reference embedded in an order item payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRef {
    pub id: i32,
    pub title: String,
    pub original_price: Option<i64>,
    pub discounted_price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: i32,
    pub service: Option<ServiceRef>,
    pub service_id: i32,
    pub quantity: i32,
    /// Price snapshot taken when the order was placed
    pub price: i64,
}

/// Listing/detail payload for the back office.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub input_file_url: Option<String>,
    pub output_file_url: Option<String>,
    pub status: i32,
    pub created_time: DateTime<Utc>,
    pub delete_flg: i32,
    pub user: Option<UserRef>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub service_id: i32,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[validate(length(min = 1, message = "Tên khách hàng không được để trống"))]
    pub name: String,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub input_file_url: Option<String>,
    pub output_file_url: Option<String>,
    pub status: Option<i32>,
    #[validate(length(min = 1, message = "Đơn hàng phải có ít nhất một dịch vụ"))]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    #[validate(length(min = 1, message = "Tên khách hàng không được để trống"))]
    pub name: String,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub input_file_url: Option<String>,
    pub output_file_url: Option<String>,
    pub status: Option<i32>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Bulk operation target, e.g. `{"ids": [10, 11]}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkIds {
    #[validate(length(min = 1, message = "Danh sách ID không được để trống"))]
    pub ids: Vec<i32>,
}
