use serde::{Deserialize, Serialize};

/// Fonts and colours for exported results documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub body_font: String,
    pub heading_font: String,
    /// Body text size in points.
    pub body_size: usize,
    pub title_size: usize,
    pub section_size: usize,
    pub subsection_size: usize,
    /// Hex RGB without the leading `#`.
    pub heading_color: String,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            title_size: 20,
            section_size: 15,
            subsection_size: 12,
            heading_color: "1B5E20".to_string(),
        }
    }
}
