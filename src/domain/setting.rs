//! Namespaced key/value settings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One key/value pair inside a namespace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

/// Batch create/update payload: `{"settings": [...]}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SettingBatch {
    #[validate(length(min = 1, message = "Danh sách settings không được để trống"))]
    pub settings: Vec<SettingEntry>,
}

/// Batch create outcome; colliding keys are skipped, not fatal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SettingCreateOutcome {
    pub success: bool,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Batch update outcome; missing keys are skipped, not fatal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SettingUpdateOutcome {
    pub success: bool,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}
