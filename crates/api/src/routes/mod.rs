//! API Routes

pub mod classify;
pub mod stats;
pub mod tickets;
