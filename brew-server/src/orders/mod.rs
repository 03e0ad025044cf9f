//! Order lifecycle
//!
//! State machine per order: `nonexistent -> open -> closed`, plus
//! `open -> nonexistent` (delete before close). The [`OrderManager`] is
//! the sole writer of status transitions and the sole trigger of
//! inventory adjustments.

pub mod manager;

pub use manager::OrderManager;
