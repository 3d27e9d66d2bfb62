//! Classification Route

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiError, AppState};
use taxonomy::{Category, Priority};

/// Request body for the classify endpoint
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub description: String,
}

/// Response for the classify endpoint. Both fields are null when the
/// engine produced no result.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub suggested_category: Option<Category>,
    pub suggested_priority: Option<Priority>,
}

/// Suggest a category and priority for a ticket description.
///
/// Always 200 once the input validates; oracle faults are absorbed by
/// the engine and resolved through the keyword fallback.
pub async fn classify_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    if body.description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "description must not be blank".to_string(),
        ));
    }

    let result = state.classifier.classify(&body.description).await;
    Ok(Json(ClassifyResponse {
        suggested_category: result.map(|c| c.category),
        suggested_priority: result.map(|c| c.priority),
    }))
}
