//! Background Tasks Module
//!
//! Contains optional background tasks that run periodically.
//!
//! # Tasks
//! - Expired-entry sweep: removes stale cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_sweep_task;
