//! Ticket CRUD Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiError, AppState};
use storage::{NewTicket, Ticket, TicketFilter, TicketPatch};
use taxonomy::{Category, Priority, TicketStatus};

/// Query parameters for the ticket listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by priority
    pub priority: Option<Priority>,
    /// Filter by status
    pub status: Option<TicketStatus>,
    /// Substring search over title and description
    pub search: Option<String>,
}

/// Response for the ticket listing endpoint
#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub data: Vec<Ticket>,
    pub count: usize,
}

/// Request body for ticket creation
#[derive(Debug, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
}

/// Request body for partial ticket updates
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
}

/// List tickets, newest first
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<TicketListResponse>, ApiError> {
    let filter = TicketFilter {
        category: params.category,
        priority: params.priority,
        status: params.status,
        search: params.search,
    };
    let data = state.repository.list(&filter)?;
    Ok(Json(TicketListResponse {
        count: data.len(),
        data,
    }))
}

/// Create a ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTicket>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be blank".to_string()));
    }
    if body.description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "description must not be blank".to_string(),
        ));
    }

    let ticket = state.repository.insert(NewTicket {
        title: body.title,
        description: body.description,
        category: body.category.unwrap_or(Category::General),
        priority: body.priority.unwrap_or(Priority::Medium),
        status: body.status.unwrap_or(TicketStatus::Open),
    })?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Fetch a single ticket
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(state.repository.get(id)?))
}

/// Apply a partial update to a ticket
pub async fn patch_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTicket>,
) -> Result<Json<Ticket>, ApiError> {
    if matches!(&body.title, Some(t) if t.trim().is_empty()) {
        return Err(ApiError::BadRequest("title must not be blank".to_string()));
    }

    let ticket = state.repository.update(
        id,
        TicketPatch {
            title: body.title,
            description: body.description,
            category: body.category,
            priority: body.priority,
            status: body.status,
        },
    )?;
    Ok(Json(ticket))
}
