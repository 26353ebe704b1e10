use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Lowest score on the Dignity Index.
pub const MIN_SCORE: i64 = 1;
/// Highest score on the Dignity Index.
pub const MAX_SCORE: i64 = 8;

/// The side of the scale a statement falls on, as judged by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Contempt,
    Dignity,
}

impl Category {
    /// The capitalized label shown on the category badge.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Contempt => "Contempt",
            Category::Dignity => "Dignity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The structured outcome of one classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalysisResult {
    /// Dignity Index score, 1 (contempt) to 8 (dignity).
    #[validate(range(min = 1, max = 8))]
    pub score: i64,
    /// Category assigned by the service. Not derived from the score locally.
    pub category: Category,
    /// Free-text rationale from the service.
    pub explanation: String,
}
