pub const SUMMARIZE_TEMPLATE: &str = "Summarize this text in a clear and concise way:\n\n{text}";

pub const QUIZ_TEMPLATE: &str = "Create 5 quiz questions with answers from this text. \
Format each question with \"Q: [question]\" and \"A: [answer]\" on separate lines:\n\n{text}";

pub const ANSWER_TEMPLATE: &str = "Based on this text:\n\n{text}\n\nAnswer this question: {question}";

pub fn summarize_prompt(text: &str) -> String {
    SUMMARIZE_TEMPLATE.replace("{text}", text)
}

pub fn quiz_prompt(text: &str) -> String {
    QUIZ_TEMPLATE.replace("{text}", text)
}

/// The question is substituted first so braces in the note text are left alone.
pub fn answer_prompt(text: &str, question: &str) -> String {
    ANSWER_TEMPLATE
        .replace("{question}", question)
        .replace("{text}", text)
}
