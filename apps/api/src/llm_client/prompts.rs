// Shared prompt fragments. Each feature keeps its own prompts.rs alongside it;
// this file holds the pieces every recommendation prompt agrees on, because the
// response parser depends on them.

/// Asks for the `1. **Title** ... - [Label](url)` entry shape the parser reads.
pub fn numbered_list_instruction(count_label: &str, example_entry: &str) -> String {
    format!("Format as numbered list ({count_label}):\n{example_entry}")
}

/// The single short opening line that becomes the intro.
pub const INTRO_LINE_INSTRUCTION: &str = "Start with one engaging intro line.";
