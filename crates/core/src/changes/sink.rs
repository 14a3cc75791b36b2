//! Change sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use super::PlannerChange;

/// Receives changes after they have been persisted.
///
/// `emit()` must not block and must not fail the operation that produced the
/// change; delivery is best-effort.
pub trait ChangeSink: Send + Sync {
    fn emit(&self, change: PlannerChange);

    fn emit_batch(&self, changes: Vec<PlannerChange>) {
        for change in changes {
            self.emit(change);
        }
    }
}

/// Discards every change.
#[derive(Clone, Default)]
pub struct NoOpChangeSink;

impl ChangeSink for NoOpChangeSink {
    fn emit(&self, _change: PlannerChange) {}
}

/// Keeps every change in memory, in emission order.
#[derive(Clone, Default)]
pub struct RecordingChangeSink {
    changes: Arc<Mutex<Vec<PlannerChange>>>,
}

impl RecordingChangeSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<PlannerChange>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.changes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn changes(&self) -> Vec<PlannerChange> {
        self.guard().clone()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

impl ChangeSink for RecordingChangeSink {
    fn emit(&self, change: PlannerChange) {
        self.guard().push(change);
    }
}
