//! Per-user document storage for saved list items and notes.
//!
//! `AppState` holds an `Arc<dyn HubStore>`. Production uses `PgStore`; router
//! tests use the in-memory `MemoryStore`.
//!
//! Every write is last-write-wins. There are no version tokens and no
//! conflict detection between concurrent edits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lists::models::{NewListItem, SavedListItem};
use crate::lists::schedule::ScheduleDate;
use crate::notes::models::{Note, NoteInput};
use crate::recommendations::category::Category;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait HubStore: Send + Sync {
    /// Inserts with a generated id. Sports matches start with notifications off.
    async fn insert_item(&self, user_id: &str, item: NewListItem)
        -> Result<SavedListItem, AppError>;

    /// Items of one (user, category) partition, newest first.
    async fn list_items(
        &self,
        user_id: &str,
        category: Category,
    ) -> Result<Vec<SavedListItem>, AppError>;

    async fn get_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError>;

    /// Sets or overwrites both schedule fields. `None` if the item does not exist.
    async fn schedule_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
        schedule: &ScheduleDate,
    ) -> Result<Option<SavedListItem>, AppError>;

    /// Flips the notification flag of a sports match.
    async fn toggle_notification(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError>;

    /// Returns whether anything was deleted.
    async fn delete_item(&self, user_id: &str, category: Category, id: Uuid)
        -> Result<bool, AppError>;

    async fn insert_note(&self, user_id: &str, note: NoteInput) -> Result<Note, AppError>;

    /// Notes newest first.
    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, AppError>;

    async fn get_note(&self, user_id: &str, id: Uuid) -> Result<Option<Note>, AppError>;

    /// Merge-save: replaces text, summary and quiz, keeps `created_at`.
    async fn update_note(
        &self,
        user_id: &str,
        id: Uuid,
        note: NoteInput,
    ) -> Result<Option<Note>, AppError>;

    async fn delete_note(&self, user_id: &str, id: Uuid) -> Result<bool, AppError>;
}
