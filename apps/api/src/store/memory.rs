use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lists::models::{NewListItem, SavedListItem};
use crate::lists::schedule::ScheduleDate;
use crate::notes::models::{Note, NoteInput};
use crate::recommendations::category::Category;
use crate::store::HubStore;

/// Test double for `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<SavedListItem>>,
    notes: RwLock<Vec<Note>>,
    clock: RwLock<Option<DateTime<Utc>>>,
    list_notes_delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `list_notes` sleep before answering.
    pub fn with_list_notes_delay(mut self, delay: Duration) -> Self {
        self.list_notes_delay = Some(delay);
        self
    }

    /// Strictly increasing timestamps so newest-first ordering is deterministic.
    async fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.write().await;
        let now = Utc::now();
        let next = match *clock {
            Some(last) if last >= now => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        *clock = Some(next);
        next
    }
}

#[async_trait]
impl HubStore for MemoryStore {
    async fn insert_item(
        &self,
        user_id: &str,
        item: NewListItem,
    ) -> Result<SavedListItem, AppError> {
        let saved = SavedListItem {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            category: item.category,
            title: item.title,
            description: item.description,
            link: item.link,
            created_at: self.tick().await,
            scheduled_date: None,
            scheduled_date_formatted: None,
            notification: item.category.supports_notification().then_some(false),
        };
        self.items.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn list_items(
        &self,
        user_id: &str,
        category: Category,
    ) -> Result<Vec<SavedListItem>, AppError> {
        let mut items: Vec<SavedListItem> = self
            .items
            .read()
            .await
            .iter()
            .filter(|item| item.user_id == user_id && item.category == category)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id == id && item.user_id == user_id && item.category == category)
            .cloned())
    }

    async fn schedule_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
        schedule: &ScheduleDate,
    ) -> Result<Option<SavedListItem>, AppError> {
        let mut items = self.items.write().await;
        Ok(items
            .iter_mut()
            .find(|item| item.id == id && item.user_id == user_id && item.category == category)
            .map(|item| {
                item.scheduled_date = Some(schedule.date.clone());
                item.scheduled_date_formatted = Some(schedule.formatted.clone());
                item.clone()
            }))
    }

    async fn toggle_notification(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError> {
        let mut items = self.items.write().await;
        Ok(items
            .iter_mut()
            .find(|item| {
                item.id == id && item.user_id == user_id && item.category == Category::Sport
            })
            .map(|item| {
                item.notification = Some(!item.notification.unwrap_or(false));
                item.clone()
            }))
    }

    async fn delete_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
    ) -> Result<bool, AppError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| !(item.id == id && item.user_id == user_id && item.category == category));
        Ok(items.len() < before)
    }

    async fn insert_note(&self, user_id: &str, note: NoteInput) -> Result<Note, AppError> {
        let now = self.tick().await;
        let saved = Note {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            note_text: note.note_text,
            summary: note.summary,
            quiz: note.quiz,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, AppError> {
        if let Some(delay) = self.list_notes_delay {
            tokio::time::sleep(delay).await;
        }
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn get_note(&self, user_id: &str, id: Uuid) -> Result<Option<Note>, AppError> {
        Ok(self
            .notes
            .read()
            .await
            .iter()
            .find(|note| note.id == id && note.user_id == user_id)
            .cloned())
    }

    async fn update_note(
        &self,
        user_id: &str,
        id: Uuid,
        input: NoteInput,
    ) -> Result<Option<Note>, AppError> {
        let now = self.tick().await;
        let mut notes = self.notes.write().await;
        Ok(notes
            .iter_mut()
            .find(|note| note.id == id && note.user_id == user_id)
            .map(|note| {
                note.note_text = input.note_text;
                note.summary = input.summary;
                note.quiz = input.quiz;
                note.updated_at = now;
                note.clone()
            }))
    }

    async fn delete_note(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| !(note.id == id && note.user_id == user_id));
        Ok(notes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(category: Category, title: &str) -> NewListItem {
        NewListItem {
            category,
            title: title.to_string(),
            description: format!("1. **{title}**"),
            link: String::new(),
        }
    }

    #[tokio::test]
    async fn test_items_are_partitioned_by_user_and_category() {
        let store = MemoryStore::new();
        store.insert_item("alice", new_item(Category::Book, "Dune")).await.unwrap();
        store.insert_item("alice", new_item(Category::Movie, "Alien")).await.unwrap();
        store.insert_item("bob", new_item(Category::Book, "Emma")).await.unwrap();

        let books = store.list_items("alice", Category::Book).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_items_list_newest_first() {
        let store = MemoryStore::new();
        store.insert_item("alice", new_item(Category::Song, "First")).await.unwrap();
        store.insert_item("alice", new_item(Category::Song, "Second")).await.unwrap();

        let songs = store.list_items("alice", Category::Song).await.unwrap();
        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_only_sport_items_carry_notification() {
        let store = MemoryStore::new();
        let song = store.insert_item("alice", new_item(Category::Song, "Hey")).await.unwrap();
        let game = store.insert_item("alice", new_item(Category::Sport, "Final")).await.unwrap();
        assert_eq!(song.notification, None);
        assert_eq!(game.notification, Some(false));

        assert!(store.toggle_notification("alice", song.id).await.unwrap().is_none());
        let toggled = store.toggle_notification("alice", game.id).await.unwrap().unwrap();
        assert_eq!(toggled.notification, Some(true));
    }

    #[tokio::test]
    async fn test_update_note_keeps_created_at() {
        let store = MemoryStore::new();
        let note = store
            .insert_note(
                "alice",
                NoteInput {
                    note_text: "draft".to_string(),
                    summary: String::new(),
                    quiz: String::new(),
                },
            )
            .await
            .unwrap();

        let updated = store
            .update_note(
                "alice",
                note.id,
                NoteInput {
                    note_text: "final".to_string(),
                    summary: "short".to_string(),
                    quiz: String::new(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.note_text, "final");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn test_other_users_cannot_delete() {
        let store = MemoryStore::new();
        let item = store.insert_item("alice", new_item(Category::Book, "Dune")).await.unwrap();
        assert!(!store.delete_item("bob", Category::Book, item.id).await.unwrap());
        assert!(store.delete_item("alice", Category::Book, item.id).await.unwrap());
    }
}
