use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lists::models::{NewListItem, SavedListItem};
use crate::lists::schedule::ScheduleDate;
use crate::notes::models::{Note, NoteInput};
use crate::recommendations::category::Category;
use crate::store::HubStore;

/// PostgreSQL-backed store. Tables are created by `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HubStore for PgStore {
    async fn insert_item(
        &self,
        user_id: &str,
        item: NewListItem,
    ) -> Result<SavedListItem, AppError> {
        let id = Uuid::new_v4();
        let notification = item.category.supports_notification().then_some(false);

        let saved = sqlx::query_as::<_, SavedListItem>(
            r#"
            INSERT INTO list_items (id, user_id, category, title, description, link, notification)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(item.category)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.link)
        .bind(notification)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved {} '{}' for user {user_id}", item.category, item.title);
        Ok(saved)
    }

    async fn list_items(
        &self,
        user_id: &str,
        category: Category,
    ) -> Result<Vec<SavedListItem>, AppError> {
        Ok(sqlx::query_as::<_, SavedListItem>(
            "SELECT * FROM list_items WHERE user_id = $1 AND category = $2 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError> {
        Ok(sqlx::query_as::<_, SavedListItem>(
            "SELECT * FROM list_items WHERE id = $1 AND user_id = $2 AND category = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn schedule_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
        schedule: &ScheduleDate,
    ) -> Result<Option<SavedListItem>, AppError> {
        Ok(sqlx::query_as::<_, SavedListItem>(
            r#"
            UPDATE list_items
            SET scheduled_date = $1, scheduled_date_formatted = $2
            WHERE id = $3 AND user_id = $4 AND category = $5
            RETURNING *
            "#,
        )
        .bind(&schedule.date)
        .bind(&schedule.formatted)
        .bind(id)
        .bind(user_id)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn toggle_notification(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<SavedListItem>, AppError> {
        Ok(sqlx::query_as::<_, SavedListItem>(
            r#"
            UPDATE list_items
            SET notification = NOT COALESCE(notification, FALSE)
            WHERE id = $1 AND user_id = $2 AND category = 'sport'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_item(
        &self,
        user_id: &str,
        category: Category,
        id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM list_items WHERE id = $1 AND user_id = $2 AND category = $3")
                .bind(id)
                .bind(user_id)
                .bind(category)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_note(&self, user_id: &str, note: NoteInput) -> Result<Note, AppError> {
        let saved = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, user_id, note_text, summary, quiz)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&note.note_text)
        .bind(&note.summary)
        .bind(&note.quiz)
        .fetch_one(&self.pool)
        .await?;

        info!("Created note {} for user {user_id}", saved.id);
        Ok(saved)
    }

    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>, AppError> {
        Ok(sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_note(&self, user_id: &str, id: Uuid) -> Result<Option<Note>, AppError> {
        Ok(
            sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn update_note(
        &self,
        user_id: &str,
        id: Uuid,
        note: NoteInput,
    ) -> Result<Option<Note>, AppError> {
        Ok(sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET note_text = $1, summary = $2, quiz = $3, updated_at = clock_timestamp()
            WHERE id = $4 AND user_id = $5
            RETURNING *
            "#,
        )
        .bind(&note.note_text)
        .bind(&note.summary)
        .bind(&note.quiz)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_note(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
