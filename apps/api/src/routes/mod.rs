pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::lists::handlers as lists;
use crate::notes::handlers as notes;
use crate::recommendations::handlers as recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation assistants
        .route(
            "/api/v1/recommendations/:category",
            post(recommendations::handle_recommend),
        )
        .route(
            "/api/v1/recommendations/:category/bulk",
            post(recommendations::handle_bulk),
        )
        // Saved lists
        .route("/api/v1/lists", get(lists::handle_list_summary))
        .route(
            "/api/v1/lists/:category",
            get(lists::handle_list_items).post(lists::handle_save_item),
        )
        .route(
            "/api/v1/lists/:category/:id",
            get(lists::handle_get_item).delete(lists::handle_delete_item),
        )
        .route(
            "/api/v1/lists/:category/:id/schedule",
            put(lists::handle_schedule_item),
        )
        .route(
            "/api/v1/lists/:category/:id/notification",
            post(lists::handle_toggle_notification),
        )
        // Notes
        .route(
            "/api/v1/notes",
            get(notes::handle_list_notes).post(notes::handle_create_note),
        )
        .route(
            "/api/v1/notes/:id",
            get(notes::handle_get_note)
                .put(notes::handle_update_note)
                .delete(notes::handle_delete_note),
        )
        .route("/api/v1/notes/assist/summarize", post(notes::handle_summarize))
        .route("/api/v1/notes/assist/quiz", post(notes::handle_quiz))
        .route("/api/v1/notes/assist/answer", post(notes::handle_answer))
        .with_state(state)
}
