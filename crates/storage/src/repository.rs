//! Repository Implementation

use crate::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, info};
use taxonomy::{Category, Priority, TicketStatus};

/// Stored support ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a ticket; id and created_at are assigned by
/// the repository
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: TicketStatus,
}

/// Partial update of a stored ticket
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
}

/// Listing filter; all fields are conjunctive, `search` is a
/// case-insensitive substring over title and description
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
    pub search: Option<String>,
}

/// Aggregate ticket stats
#[derive(Debug, Clone, Serialize)]
pub struct TicketStats {
    pub total_tickets: usize,
    pub open_tickets: usize,
    pub avg_tickets_per_day: f64,
    /// Count per priority; every priority is present, zero-filled
    pub priority_breakdown: BTreeMap<String, usize>,
    /// Count per category; every category is present, zero-filled
    pub category_breakdown: BTreeMap<String, usize>,
}

/// In-memory ticket repository
pub struct Repository {
    tickets: Mutex<Vec<Ticket>>,
    next_id: Mutex<i64>,
}

impl Repository {
    /// Create a new empty repository
    pub fn new() -> Self {
        info!("Creating in-memory ticket repository");
        Self {
            tickets: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Insert a ticket, assigning its id and creation time
    pub fn insert(&self, new: NewTicket) -> Result<Ticket, StorageError> {
        self.insert_at(new, Utc::now())
    }

    /// Insert with an explicit creation time (stats tests need
    /// control over the day grouping)
    pub fn insert_at(
        &self,
        new: NewTicket,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket, StorageError> {
        let mut id = self
            .next_id
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let ticket = Ticket {
            id: *id,
            title: new.title,
            description: new.description,
            category: new.category,
            priority: new.priority,
            status: new.status,
            created_at,
        };
        *id += 1;

        let mut tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tickets.push(ticket.clone());
        debug!(id = ticket.id, "Inserted ticket");
        Ok(ticket)
    }

    /// Fetch a single ticket
    pub fn get(&self, id: i64) -> Result<Ticket, StorageError> {
        let tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    /// Apply a partial update and return the updated ticket
    pub fn update(&self, id: i64, patch: TicketPatch) -> Result<Ticket, StorageError> {
        let mut tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StorageError::NotFound(id))?;

        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        if let Some(category) = patch.category {
            ticket.category = category;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }

        debug!(id, "Updated ticket");
        Ok(ticket.clone())
    }

    /// List tickets matching the filter, newest first
    pub fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, StorageError> {
        let tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        let search = filter
            .search
            .as_ref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matched: Vec<Ticket> = tickets
            .iter()
            .filter(|t| filter.category.map_or(true, |c| t.category == c))
            .filter(|t| filter.priority.map_or(true, |p| t.priority == p))
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| {
                search.as_ref().map_or(true, |needle| {
                    t.title.to_lowercase().contains(needle)
                        || t.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    /// Compute aggregate stats over all tickets
    pub fn stats(&self) -> Result<TicketStats, StorageError> {
        let tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        let total = tickets.len();
        let open = tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Open)
            .count();

        let days: HashSet<_> = tickets.iter().map(|t| t.created_at.date_naive()).collect();
        let avg = if days.is_empty() {
            0.0
        } else {
            let raw = total as f64 / days.len() as f64;
            (raw * 10.0).round() / 10.0
        };

        let mut priority_breakdown: BTreeMap<String, usize> = Priority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), 0))
            .collect();
        let mut category_breakdown: BTreeMap<String, usize> = Category::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), 0))
            .collect();
        for ticket in tickets.iter() {
            *priority_breakdown
                .entry(ticket.priority.as_str().to_string())
                .or_default() += 1;
            *category_breakdown
                .entry(ticket.category.as_str().to_string())
                .or_default() += 1;
        }

        Ok(TicketStats {
            total_tickets: total,
            open_tickets: open,
            avg_tickets_per_day: avg,
            priority_breakdown,
            category_breakdown,
        })
    }

    /// Total ticket count
    pub fn count(&self) -> Result<usize, StorageError> {
        let tickets = self
            .tickets
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(tickets.len())
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
