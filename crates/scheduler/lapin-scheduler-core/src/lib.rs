//! Lapin Scheduler Core
//!
//! Deferred callbacks fired in time order when the scheduler is pumped.

pub mod scheduler;

pub use scheduler::{Callback, Scheduler};
