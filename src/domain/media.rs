//! Media library types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::user::UserRef;

/// MIME-derived classification of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Pdf,
    Doc,
    Other,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaType::Image
        } else if mime.starts_with("video/") {
            MediaType::Video
        } else if mime.starts_with("audio/") {
            MediaType::Audio
        } else if mime == "application/pdf" {
            MediaType::Pdf
        } else if mime == "application/msword"
            || mime == "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        {
            MediaType::Doc
        } else {
            MediaType::Other
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
            MediaType::Audio => "AUDIO",
            MediaType::Pdf => "PDF",
            MediaType::Doc => "DOC",
            MediaType::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

/// Listing row for the media library.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaListItem {
    pub id: i32,
    pub name: String,
    /// Relative storage path, doubles as the public URL
    pub slug: String,
    pub created_time: DateTime<Utc>,
    pub uploaded_by: Option<UserRef>,
}

/// An uploaded file already written to disk, pending registration.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub original_name: String,
    /// Path relative to the working directory, e.g. `/uploads/2025/07/x.jpg`
    pub relative_path: String,
    pub mime_type: String,
    pub size: i64,
}

/// Outcome of registering one uploaded file.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadOutcome {
    pub id: i32,
    pub url: String,
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: crate::types::SuccessType,
}

/// Per-item failure while deleting media backing files.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailedDelete {
    pub id: i32,
    pub reason: String,
}

/// Outcome of a bulk media delete: partial failure is reported, not raised.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaDeleteOutcome {
    pub success: bool,
    pub deleted: Vec<i32>,
    pub failed: Vec<FailedDelete>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_mime_types() {
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Image);
        assert_eq!(MediaType::from_mime("video/mp4"), MediaType::Video);
        assert_eq!(MediaType::from_mime("audio/ogg"), MediaType::Audio);
        assert_eq!(MediaType::from_mime("application/pdf"), MediaType::Pdf);
        assert_eq!(MediaType::from_mime("application/msword"), MediaType::Doc);
        assert_eq!(MediaType::from_mime("text/csv"), MediaType::Other);
    }
}
