//! Ticket Storage Layer
//!
//! In-memory repository for tickets: CRUD, filtered listing, search,
//! and aggregate stats. Persistence behind a real database is a
//! caller concern; the classification engine never touches storage.

mod repository;

pub use repository::{
    NewTicket, Repository, Ticket, TicketFilter, TicketPatch, TicketStats,
};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("ticket {0} not found")]
    NotFound(i64),
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}
