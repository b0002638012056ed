//! Axum route handlers for the recommendation assistants.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::GenerationError;
use crate::recommendations::category::Category;
use crate::recommendations::parser::{strip_bold_markers, ParsedResponse, RecommendationItem};
use crate::recommendations::prompts::{bulk_prompt, query_prompt};
use crate::state::AppState;

const MAX_BULK_COUNT: u32 = 50;
const EMPTY_QUERY_RESULT: &str = "No recommendations generated.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkParams {
    pub count: Option<u32>,
}

/// What the front-end renders for one generation request.
/// Failures are data here, not HTTP errors.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Generated {
        category: Category,
        raw: String,
        intro: Option<String>,
        items: Vec<RecommendationItem>,
        other: Vec<String>,
    },
    Empty {
        category: Category,
        message: String,
    },
    Failed {
        category: Category,
        message: String,
    },
}

/// Turns one generation result into display fragments.
pub fn build_outcome(
    category: Category,
    result: Result<Option<String>, GenerationError>,
    empty_message: &str,
    intro_max_chars: usize,
) -> RecommendationOutcome {
    match result {
        Ok(Some(raw)) if !raw.trim().is_empty() => {
            let parsed = ParsedResponse::parse(&raw, intro_max_chars);
            RecommendationOutcome::Generated {
                category,
                intro: parsed.intro.as_deref().map(strip_bold_markers),
                items: parsed.items,
                other: parsed.other.iter().map(|l| strip_bold_markers(l)).collect(),
                raw,
            }
        }
        Ok(_) => RecommendationOutcome::Empty {
            category,
            message: empty_message.to_string(),
        },
        Err(e) => {
            warn!("{category} generation failed: {e}");
            RecommendationOutcome::Failed {
                category,
                message: e.user_message(),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations/:category
///
/// Generates 8-10 picks for a free-text request ("rainy day jazz").
pub async fn handle_recommend(
    State(state): State<AppState>,
    Path(category): Path<Category>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation(
            category.empty_query_message().to_string(),
        ));
    }

    info!("Generating {category} recommendations");
    let prompt = query_prompt(category, &request.query, Utc::now().date_naive());
    let result = state.llm.generate(&prompt).await;

    Ok(Json(build_outcome(
        category,
        result,
        EMPTY_QUERY_RESULT,
        state.config.intro_max_chars,
    )))
}

/// POST /api/v1/recommendations/:category/bulk?count=N
///
/// Playlist / new releases / new books / upcoming matches, with per-category defaults.
pub async fn handle_bulk(
    State(state): State<AppState>,
    Path(category): Path<Category>,
    Query(params): Query<BulkParams>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    let count = params.count.unwrap_or_else(|| category.default_bulk_count());
    if count == 0 || count > MAX_BULK_COUNT {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_BULK_COUNT}"
        )));
    }

    info!("Generating {count} {category} items in bulk");
    let prompt = bulk_prompt(category, count, Utc::now().date_naive());
    let result = state.llm.generate(&prompt).await;

    Ok(Json(build_outcome(
        category,
        result,
        category.empty_bulk_message(),
        state.config.intro_max_chars,
    )))
}
