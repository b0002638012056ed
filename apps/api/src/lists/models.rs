use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::recommendations::category::Category;

/// A recommendation a user accepted into one of their lists.
///
/// `title`, `description`, `link` and `category` never change after insert.
/// `scheduled_date` and `scheduled_date_formatted` are written together.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedListItem {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub category: Category,
    pub title: String,
    /// The full entry line the item was saved from.
    pub description: String,
    /// Empty when the entry had no link.
    pub link: String,
    pub created_at: DateTime<Utc>,
    /// ISO `YYYY-MM-DD`, kept as text so legacy values survive a round trip.
    pub scheduled_date: Option<String>,
    pub scheduled_date_formatted: Option<String>,
    /// Sports matches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<bool>,
}

/// Insert payload; the store assigns id, timestamp and the notification default.
#[derive(Debug, Clone)]
pub struct NewListItem {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub link: String,
}
