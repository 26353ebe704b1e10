//! Score presentation.
//!
//! Pure mappings from a Dignity Index score to what the result card shows:
//! badge variant, score color, level description and progress fill. Every
//! function is total over `i64`; nothing here clamps or rejects a score.

use crate::models::{AnalysisResult, Category, MAX_SCORE, MIN_SCORE};
use serde::Serialize;

/// Canned description of each level, indexed by `score - 1`.
pub const LEVEL_DESCRIPTIONS: [&str; 8] = [
    "Level one escalates from violent words to violent actions.",
    "Level two accuses the other side of promoting evil.",
    "Level three attacks the other side's moral character.",
    "Level four mocks and attacks the other side's background or beliefs.",
    "Level five listens to other views and explains own goals.",
    "Level six works with others to find common ground.",
    "Level seven fully engages with the other side to discuss disagreements.",
    "Seeing oneself in every human being, offering dignity to everyone.",
];

/// Visual style of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Warning,
    Secondary,
    Success,
}

/// Color token for the large score figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Red,
    Orange,
    Blue,
    Green,
}

pub fn badge_variant(score: i64) -> BadgeVariant {
    if score <= 2 {
        BadgeVariant::Destructive
    } else if score <= 4 {
        BadgeVariant::Warning
    } else if score <= 6 {
        BadgeVariant::Secondary
    } else {
        BadgeVariant::Success
    }
}

pub fn score_color(score: i64) -> ScoreColor {
    if score <= 2 {
        ScoreColor::Red
    } else if score <= 4 {
        ScoreColor::Orange
    } else if score <= 6 {
        ScoreColor::Blue
    } else {
        ScoreColor::Green
    }
}

/// Description for an exact level, or `""` when the score is not 1-8.
pub fn description(score: i64) -> &'static str {
    match score {
        MIN_SCORE..=MAX_SCORE => LEVEL_DESCRIPTIONS[(score - MIN_SCORE) as usize],
        _ => "",
    }
}

/// Progress bar fill, 12.5% per level.
pub fn progress_percent(score: i64) -> f64 {
    score as f64 * (100.0 / MAX_SCORE as f64)
}

pub fn score_label(score: i64) -> String {
    format!("{}/{}", score, MAX_SCORE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub variant: BadgeVariant,
    pub label: &'static str,
}

/// Everything the result view renders for one `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub score: i64,
    pub score_label: String,
    pub color: ScoreColor,
    pub progress_percent: f64,
    pub badge: Badge,
    pub category: Category,
    pub description: &'static str,
    pub explanation: String,
}

impl ResultCard {
    /// The badge style follows the score band; its label names the category.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            score: result.score,
            score_label: score_label(result.score),
            color: score_color(result.score),
            progress_percent: progress_percent(result.score),
            badge: Badge {
                variant: badge_variant(result.score),
                label: result.category.label(),
            },
            category: result.category,
            description: description(result.score),
            explanation: result.explanation.clone(),
        }
    }
}
