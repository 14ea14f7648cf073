// All model prompt text for readings lives here.
// The JSON schema block is the contract the output parser depends on.

/// Persona line that opens every reading prompt.
pub const READING_PERSONA: &str =
    "You are a fantastical and entertaining career astrologer.";

/// Tone instructions appended after the subject line.
pub const READING_TONE: &str = "Be funny, creative, and use lots of emojis. \
The tone is fun and encouraging, never negative. \
Invent amusing concepts (Career Ascendant, Cosmic Score, etc.)";

/// Exact output schema. Field names and list lengths must stay in sync with
/// `reading::models::ReadingResult`.
pub const READING_SCHEMA: &str = r#"Return ONLY valid JSON with this exact structure:
{
  "sign": "The person's career zodiac sign (invented fun name)",
  "ascendant": "Career Ascendant (invented fun concept)",
  "cosmicScore": 85,
  "powers": [
    {"name": "Power Name", "description": "Short fun description", "emoji": "relevant emoji"},
    {"name": "Power Name", "description": "Short fun description", "emoji": "relevant emoji"},
    {"name": "Power Name", "description": "Short fun description", "emoji": "relevant emoji"}
  ],
  "traps": [
    {"name": "Trap Name", "description": "Short fun description", "emoji": "relevant emoji"},
    {"name": "Trap Name", "description": "Short fun description", "emoji": "relevant emoji"},
    {"name": "Trap Name", "description": "Short fun description", "emoji": "relevant emoji"}
  ],
  "prediction": "Fun and encouraging career prediction for 2026 (2-3 sentences)",
  "compatibleJobs": ["Job 1", "Job 2", "Job 3"],
  "avoidJobs": ["Job 1 (with funny reason)", "Job 2 (with funny reason)", "Job 3 (with funny reason)"]
}"#;

/// Builds the full reading prompt.
///
/// `cv_excerpt` must already be truncated (see `ReadingRequest::new`); it is
/// embedded verbatim inside double quotes.
pub fn build_reading_prompt(birth_date: &str, cv_excerpt: Option<&str>) -> String {
    let cv_clause = match cv_excerpt {
        Some(excerpt) => format!(" and this CV extract: \"{excerpt}\""),
        None => String::new(),
    };

    format!(
        "{READING_PERSONA} Based on the birth date {birth_date}{cv_clause}, \
generate a complete astro-punch reading.\n\n{READING_TONE}\n\n{READING_SCHEMA}"
    )
}
