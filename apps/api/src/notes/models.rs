use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub note_text: String,
    pub summary: String,
    pub quiz: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a note save. Summary and quiz are whatever the editor last generated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    pub note_text: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub quiz: String,
}

impl NoteInput {
    /// Trims the note text; blank notes are not saved.
    pub fn normalized(mut self) -> Option<Self> {
        let trimmed = self.note_text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.note_text = trimmed.to_string();
        Some(self)
    }
}
