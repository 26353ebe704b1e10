//! Terminal and JSON rendering of a `ResultCard`.

use crate::presentation::{BadgeVariant, ResultCard, ScoreColor};
use colored::{Color, ColoredString, Colorize};
use std::fmt::Write;

const BAR_WIDTH: usize = 32;

fn color_of(color: ScoreColor) -> Color {
    match color {
        ScoreColor::Red => Color::Red,
        ScoreColor::Orange => Color::TrueColor { r: 255, g: 140, b: 0 },
        ScoreColor::Blue => Color::Blue,
        ScoreColor::Green => Color::Green,
    }
}

fn badge(variant: BadgeVariant, label: &str) -> ColoredString {
    let text = format!(" {} ", label);
    match variant {
        BadgeVariant::Destructive => text.white().on_red(),
        BadgeVariant::Warning => text.black().on_yellow(),
        BadgeVariant::Secondary => text.white().on_purple(),
        BadgeVariant::Success => text.black().on_green(),
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Renders the card as it appears in the terminal.
///
/// Colors follow the `colored` global override, so the same output is plain
/// text when color is disabled.
pub fn render_text(card: &ResultCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", "Analysis Results".bold(), badge(card.badge.variant, card.badge.label));
    if !card.description.is_empty() {
        let _ = writeln!(out, "{}", card.description.dimmed());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Contempt {} Dignity", progress_bar(card.progress_percent));
    let _ = writeln!(
        out,
        "Score: {}",
        card.score_label.color(color_of(card.color)).bold()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Explanation:".bold());
    let _ = writeln!(out, "{}", card.explanation);
    out
}

pub fn render_json(card: &ResultCard) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(card)
}
