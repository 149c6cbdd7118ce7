//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, week resolution) plus init/status
//! - `balance` - Balance commands (set-balance, balance projection)
//! - `records` - Record commands (add, show-records)
//! - `weekly` - Estimate commands (set-weekly, show-weekly, current-week,
//!   week-stats)
//! - `chat` - Interactive chat session over stdin

pub mod balance;
pub mod chat;
pub mod core;
pub mod records;
pub mod weekly;

// Re-export command functions for main.rs
pub use balance::*;
pub use chat::*;
pub use core::*;
pub use records::*;
pub use weekly::*;
