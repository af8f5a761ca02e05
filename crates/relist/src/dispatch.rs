#![forbid(unsafe_code)]

//! Replay dispatcher: emits a batch to the observer in deterministic order
//! and resets the accumulator.
//!
//! # Replay order
//!
//! 1. [`will_change_content`](crate::ChangeObserver::will_change_content)
//! 2. Inserted sections, then deleted sections (arrival order within each)
//! 3. Inserted, deleted, updated, then moved objects (arrival order within
//!    each bucket)
//! 4. [`did_change_content`](crate::ChangeObserver::did_change_content)
//! 5. Buckets cleared
//!
//! A batch the safety gate refuses skips steps 1–4 entirely: the observer
//! receives a single [`unsafe_changes`](crate::ChangeObserver::unsafe_changes)
//! call, and the buckets are still cleared — a refused batch never leaks into
//! the next cycle.
//!
//! Reclassification must have run before dispatch;
//! [`ChangeEngine`](crate::ChangeEngine) enforces that sequencing for callers
//! driving the engine surface.

use crate::batch::{BatchStats, ChangeBatch};
use crate::observer::ChangeObserver;

/// What dispatch did with a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The batch replayed in full; counts describe what was forwarded.
    Replayed(BatchStats),
    /// The safety gate refused the batch; only the unsafe hook fired.
    Refused,
}

impl DispatchOutcome {
    /// Whether the batch was refused by the safety gate.
    #[must_use]
    pub fn is_refused(&self) -> bool {
        matches!(self, Self::Refused)
    }
}

/// Replay `batch` into `observer`, then clear the batch.
pub fn dispatch<T, S, O>(batch: &mut ChangeBatch<T, S>, observer: &mut O) -> DispatchOutcome
where
    O: ChangeObserver<T, S> + ?Sized,
{
    if batch.is_unsafe() {
        tracing::warn!(
            section_changes = batch.section_change_count(),
            "refusing batch with multiple section changes"
        );
        observer.unsafe_changes();
        batch.clear();
        return DispatchOutcome::Refused;
    }

    let stats = batch.stats();
    tracing::debug!(?stats, "replaying batch");

    observer.will_change_content();

    for change in batch.inserted_sections() {
        observer.section_changed(change.info(), change.index(), change.kind());
    }
    for change in batch.deleted_sections() {
        observer.section_changed(change.info(), change.index(), change.kind());
    }

    for change in batch
        .inserted_objects()
        .iter()
        .chain(batch.deleted_objects())
        .chain(batch.updated_objects())
        .chain(batch.moved_objects())
    {
        observer.object_changed(
            change.object(),
            change.original(),
            change.kind(),
            change.result(),
        );
    }

    observer.did_change_content();
    batch.clear();

    DispatchOutcome::Replayed(stats)
}
