use serde::{Deserialize, Serialize};

pub const HIGH_PRIORITY: &str = "High";

/// Improvement suggestion attached to a completed attempt by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: String,
    pub suggestion: String,
}

impl Recommendation {
    pub fn is_high_priority(&self) -> bool {
        self.priority == HIGH_PRIORITY
    }
}
