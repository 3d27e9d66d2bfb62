//! Stats Route

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{ApiError, AppState};
use storage::TicketStats;

/// Aggregate ticket stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TicketStats>, ApiError> {
    Ok(Json(state.repository.stats()?))
}
