use serde::{Deserialize, Serialize};

use crate::ids::DocumentId;

use super::null_as_default;

/// A file attached to an answer, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Download URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(default)]
    pub uploaded_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_size_display: String,
}

impl Document {
    /// The server-formatted size, or the same formatting applied locally when
    /// the server left it out.
    pub fn size_label(&self) -> String {
        if self.file_size_display.is_empty() {
            stored_size_label(self.file_size)
        } else {
            self.file_size_display.clone()
        }
    }
}

/// Whole-unit size label for stored documents (`512 B`, `3 KB`, `2 MB`).
pub fn stored_size_label(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{} MB", bytes / (1024 * 1024))
    }
}

/// One-decimal kilobyte label for files that are still queued locally.
pub fn pending_size_label(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
