//! Axum route handlers for notes and the note assistant.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::notes::assistant::{self, AssistOutcome};
use crate::notes::models::{Note, NoteInput};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
    pub question: String,
}

fn validated(input: NoteInput) -> Result<NoteInput, AppError> {
    input
        .normalized()
        .ok_or_else(|| AppError::Validation("Note text cannot be empty".to_string()))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Note {id} not found"))
}

/// GET /api/v1/notes
///
/// Bounded by `NOTES_FETCH_TIMEOUT_MS`. A timeout or a store error yields an
/// empty list, never an error response.
pub async fn handle_list_notes(
    State(state): State<AppState>,
    session: Session,
) -> Json<Vec<Note>> {
    let fetch = state.store.list_notes(&session.user_id);
    match tokio::time::timeout(state.config.notes_fetch_timeout, fetch).await {
        Ok(Ok(notes)) => Json(notes),
        Ok(Err(e)) => {
            warn!("Loading notes failed, showing none: {e}");
            Json(Vec::new())
        }
        Err(_) => {
            warn!(
                "Loading notes timed out after {:?}, showing none",
                state.config.notes_fetch_timeout
            );
            Json(Vec::new())
        }
    }
}

/// POST /api/v1/notes
pub async fn handle_create_note(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<NoteInput>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let note = state
        .store
        .insert_note(&session.user_id, validated(input)?)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes/:id
pub async fn handle_get_note(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, AppError> {
    state
        .store
        .get_note(&session.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PUT /api/v1/notes/:id
pub async fn handle_update_note(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(input): Json<NoteInput>,
) -> Result<Json<Note>, AppError> {
    let note = state
        .store
        .update_note(&session.user_id, id, validated(input)?)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!("Saved note {id}");
    Ok(Json(note))
}

/// DELETE /api/v1/notes/:id
pub async fn handle_delete_note(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_note(&session.user_id, id).await? {
        info!("Deleted note {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/notes/assist/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<AssistOutcome>, AppError> {
    Ok(Json(assistant::summarize(state.llm.as_ref(), &request.text).await?))
}

/// POST /api/v1/notes/assist/quiz
pub async fn handle_quiz(
    State(state): State<AppState>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<AssistOutcome>, AppError> {
    Ok(Json(assistant::quiz(state.llm.as_ref(), &request.text).await?))
}

/// POST /api/v1/notes/assist/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AssistOutcome>, AppError> {
    Ok(Json(
        assistant::answer(state.llm.as_ref(), &request.text, &request.question).await?,
    ))
}
