//! Batch scheduling
//!
//! The coordinator owns the generation counter and the in-flight batch;
//! the run loop funnels every trigger (periodic tick, connectivity
//! events) into `BatchCoordinator::start`, so overlapping batches cannot
//! occur by construction.

mod coordinator;
mod runloop;

pub use coordinator::{BatchCoordinator, BatchOutcome, BatchState};
pub use runloop::Scheduler;
