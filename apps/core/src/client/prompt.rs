use crate::presentation::LEVEL_DESCRIPTIONS;

const PREAMBLE: &str = "You are a trained Dignity Index scorer. The Dignity Index rates a statement \
on an eight-point scale from contempt (1) to dignity (8). Score the speech, not the speaker. \
Scores 1-4 are divisive language and belong to the \"contempt\" category; \
scores 5-8 are grounded in dignity and belong to the \"dignity\" category.";

const INSTRUCTIONS: &str = "Respond with a single JSON object and nothing else, shaped as \
{\"score\": <integer 1-8>, \"category\": \"contempt\" | \"dignity\", \"explanation\": <string>}. \
The explanation should cite the phrases that determined the score.";

/// Builds the scoring prompt for one statement.
pub fn build_prompt(text: &str) -> String {
    let scale = LEVEL_DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(i, desc)| format!("{}. {}", i + 1, desc))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{}\n\nScale:\n{}\n\n{}\n\nText to evaluate:\n\"\"\"\n{}\n\"\"\"",
        PREAMBLE, scale, INSTRUCTIONS, text
    )
}
