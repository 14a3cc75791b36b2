//! Change notifications.
//!
//! Services report each persisted change through a [`ChangeSink`] so the
//! rendering side knows what to re-read. Nothing in the core renders.

mod planner_change;
mod sink;

pub use planner_change::*;
pub use sink::*;
