//! Study helpers over a note: summary, quiz and question answering.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationError, TextGenerator};
use crate::notes::prompts::{answer_prompt, quiz_prompt, summarize_prompt};
use crate::recommendations::parser::{is_entry_line, strip_bold_markers};

pub const EMPTY_SUMMARIZE_MESSAGE: &str = "Please enter some text to summarize.";
pub const EMPTY_QUIZ_MESSAGE: &str = "Please enter some text to generate a quiz from.";
pub const EMPTY_ANSWER_MESSAGE: &str = "Please provide both note text and a question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistKind {
    Summarize,
    Quiz,
    Answer,
}

impl AssistKind {
    fn empty_result_message(self) -> &'static str {
        match self {
            AssistKind::Summarize => "No summary generated.",
            AssistKind::Quiz => "No quiz generated.",
            AssistKind::Answer => "No answer found.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssistOutcome {
    Generated {
        kind: AssistKind,
        text: String,
        /// Only filled for quizzes.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        questions: Vec<QuizQuestion>,
    },
    Empty {
        kind: AssistKind,
        message: String,
    },
    Failed {
        kind: AssistKind,
        message: String,
    },
}

/// Splits quiz text into question/answer pairs.
///
/// A `Q:` line opens a question, the next `A:` line answers it. Other
/// non-blank lines continue whichever field was written last. Lines before
/// the first `Q:` are ignored. Numbering and bold markers are tolerated.
pub fn parse_quiz(text: &str) -> Vec<QuizQuestion> {
    let mut questions: Vec<QuizQuestion> = Vec::new();

    for raw in text.lines() {
        let line = strip_bold_markers(raw);
        let line = clean_quiz_line(&line);
        if line.is_empty() {
            continue;
        }

        if let Some(question) = strip_label(line, 'Q') {
            questions.push(QuizQuestion {
                question: question.to_string(),
                answer: None,
            });
        } else if let Some(answer) = strip_label(line, 'A') {
            if let Some(last) = questions.last_mut() {
                match &mut last.answer {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(answer);
                    }
                    None => last.answer = Some(answer.to_string()),
                }
            }
        } else if let Some(last) = questions.last_mut() {
            let field = last.answer.as_mut().unwrap_or(&mut last.question);
            field.push(' ');
            field.push_str(line);
        }
    }

    questions
}

fn clean_quiz_line(line: &str) -> &str {
    let line = line.trim();
    if is_entry_line(line) {
        line.trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start_matches('.')
            .trim()
    } else {
        line
    }
}

fn strip_label(line: &str, label: char) -> Option<&str> {
    let rest = line.strip_prefix(label)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}

/// Runs one assist request; `None` result text means the service had nothing to say.
pub fn build_assist_outcome(
    kind: AssistKind,
    result: Result<Option<String>, GenerationError>,
) -> AssistOutcome {
    match result {
        Ok(Some(text)) if !text.trim().is_empty() => {
            let questions = match kind {
                AssistKind::Quiz => parse_quiz(&text),
                _ => Vec::new(),
            };
            AssistOutcome::Generated {
                kind,
                text,
                questions,
            }
        }
        Ok(_) => AssistOutcome::Empty {
            kind,
            message: kind.empty_result_message().to_string(),
        },
        Err(e) => {
            warn!("Note {kind:?} failed: {e}");
            AssistOutcome::Failed {
                kind,
                message: e.user_message(),
            }
        }
    }
}

pub async fn summarize(llm: &dyn TextGenerator, text: &str) -> Result<AssistOutcome, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_SUMMARIZE_MESSAGE.to_string()));
    }
    info!("Summarizing note ({} chars)", text.chars().count());
    let result = llm.generate(&summarize_prompt(text)).await;
    Ok(build_assist_outcome(AssistKind::Summarize, result))
}

pub async fn quiz(llm: &dyn TextGenerator, text: &str) -> Result<AssistOutcome, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_QUIZ_MESSAGE.to_string()));
    }
    info!("Generating quiz for note ({} chars)", text.chars().count());
    let result = llm.generate(&quiz_prompt(text)).await;
    Ok(build_assist_outcome(AssistKind::Quiz, result))
}

pub async fn answer(
    llm: &dyn TextGenerator,
    text: &str,
    question: &str,
) -> Result<AssistOutcome, AppError> {
    if text.trim().is_empty() || question.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_ANSWER_MESSAGE.to_string()));
    }
    let result = llm.generate(&answer_prompt(text, question)).await;
    Ok(build_assist_outcome(AssistKind::Answer, result))
}
