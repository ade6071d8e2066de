//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: drops memory-store entries whose sliding window lapsed

mod cleanup;

pub use cleanup::spawn_cleanup_task;
