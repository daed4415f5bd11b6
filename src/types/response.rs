//! Response envelopes shared across handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome marker carried in mutation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuccessType {
    Create,
    Update,
    Delete,
    Restore,
    HardDelete,
    SetDefault,
}

/// List envelope: `{total, data}`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub total: u64,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(total: u64, data: Vec<T>) -> Self {
        Self { total, data }
    }
}

/// Single-row mutation outcome: `{id, success, type}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    pub id: i32,
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: SuccessType,
}

impl MutationResponse {
    pub fn new(id: i32, kind: SuccessType) -> Self {
        Self {
            id,
            success: true,
            kind,
        }
    }
}

/// Bulk mutation outcome: `{ids, success, type}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkMutationResponse {
    pub ids: Vec<i32>,
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: SuccessType,
}

impl BulkMutationResponse {
    pub fn new(ids: Vec<i32>, kind: SuccessType) -> Self {
        Self {
            ids,
            success: true,
            kind,
        }
    }
}

/// Message-only success payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
