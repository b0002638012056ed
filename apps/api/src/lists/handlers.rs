//! Axum route handlers for the saved lists (playlist, watchlist, reading list, match schedule).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lists::models::{NewListItem, SavedListItem};
use crate::lists::partition::{partition_by_schedule, PartitionedList};
use crate::lists::schedule::parse_schedule_date;
use crate::recommendations::category::Category;
use crate::recommendations::parser::extract_item;
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveItemRequest {
    /// One entry line exactly as the assistant produced it.
    pub line: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub category: Category,
    pub collection: &'static str,
    pub schedule_verb: &'static str,
    #[serde(flatten)]
    pub items: PartitionedList<SavedListItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub category: Category,
    pub collection: &'static str,
    pub total: usize,
    pub scheduled: usize,
}

/// Builds the insert payload for an accepted entry line.
pub fn new_item_from_line(category: Category, line: &str) -> Result<NewListItem, AppError> {
    let line = line.trim();
    let item = extract_item(line);
    let title = item
        .title
        .ok_or_else(|| AppError::Validation("Entry line has no title to save".to_string()))?;

    Ok(NewListItem {
        category,
        title,
        description: line.to_string(),
        link: item.link.unwrap_or_default(),
    })
}

fn not_found(category: Category, id: Uuid) -> AppError {
    AppError::NotFound(format!("No {category} with id {id}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/lists/:category
pub async fn handle_save_item(
    State(state): State<AppState>,
    session: Session,
    Path(category): Path<Category>,
    Json(request): Json<SaveItemRequest>,
) -> Result<(StatusCode, Json<SavedListItem>), AppError> {
    let item = new_item_from_line(category, &request.line)?;
    let saved = state.store.insert_item(&session.user_id, item).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/lists/:category
pub async fn handle_list_items(
    State(state): State<AppState>,
    session: Session,
    Path(category): Path<Category>,
) -> Result<Json<ListView>, AppError> {
    let items = state.store.list_items(&session.user_id, category).await?;
    Ok(Json(ListView {
        category,
        collection: category.collection(),
        schedule_verb: category.schedule_verb(),
        items: partition_by_schedule(items),
    }))
}

/// GET /api/v1/lists
///
/// Dashboard counts for every category.
pub async fn handle_list_summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ListSummary>>, AppError> {
    let mut summaries = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let items = state.store.list_items(&session.user_id, category).await?;
        let partitioned = partition_by_schedule(items);
        summaries.push(ListSummary {
            category,
            collection: category.collection(),
            total: partitioned.scheduled.len() + partitioned.unscheduled.len(),
            scheduled: partitioned.scheduled.len(),
        });
    }
    Ok(Json(summaries))
}

/// GET /api/v1/lists/:category/:id
pub async fn handle_get_item(
    State(state): State<AppState>,
    session: Session,
    Path((category, id)): Path<(Category, Uuid)>,
) -> Result<Json<SavedListItem>, AppError> {
    state
        .store
        .get_item(&session.user_id, category, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(category, id))
}

/// PUT /api/v1/lists/:category/:id/schedule
pub async fn handle_schedule_item(
    State(state): State<AppState>,
    session: Session,
    Path((category, id)): Path<(Category, Uuid)>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<SavedListItem>, AppError> {
    let schedule = parse_schedule_date(&request.date, Utc::now().date_naive())?;
    let item = state
        .store
        .schedule_item(&session.user_id, category, id, &schedule)
        .await?
        .ok_or_else(|| not_found(category, id))?;

    info!("Scheduled {category} {id} for {}", schedule.formatted);
    Ok(Json(item))
}

/// POST /api/v1/lists/:category/:id/notification
///
/// Only sports matches carry a notification flag.
pub async fn handle_toggle_notification(
    State(state): State<AppState>,
    session: Session,
    Path((category, id)): Path<(Category, Uuid)>,
) -> Result<Json<SavedListItem>, AppError> {
    if !category.supports_notification() {
        return Err(AppError::Validation(format!(
            "Notifications are only available for sport, not {category}"
        )));
    }

    let item = state
        .store
        .toggle_notification(&session.user_id, id)
        .await?
        .ok_or_else(|| not_found(category, id))?;
    Ok(Json(item))
}

/// DELETE /api/v1/lists/:category/:id
pub async fn handle_delete_item(
    State(state): State<AppState>,
    session: Session,
    Path((category, id)): Path<(Category, Uuid)>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_item(&session.user_id, category, id).await? {
        info!("Deleted {category} {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(category, id))
    }
}
