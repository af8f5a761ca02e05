//! Consumer-facing observer trait with optional hooks.
//!
//! Every hook has a default no-op body, so implementors override only what
//! they render. This is the capability-checked delegate pattern without a
//! capability query: an un-overridden hook *is* the "not implemented" case,
//! and skipping it costs nothing.
//!
//! Hooks are invoked synchronously during replay, in the fixed order
//! documented on [`dispatch`](crate::dispatch::dispatch): begin, section
//! changes, object changes, end — or a single [`unsafe_changes`] call when
//! the batch is refused.
//!
//! [`unsafe_changes`]: ChangeObserver::unsafe_changes

use crate::change::{IndexPath, ObjectChangeKind, SectionChangeKind};

/// Receiver for a corrected, ordered change stream.
///
/// `T` is the object payload, `S` the section descriptor; both arrive exactly
/// as the notifier supplied them.
pub trait ChangeObserver<T, S> {
    /// A batch is about to replay.
    fn will_change_content(&mut self) {}

    /// A section was inserted or deleted.
    fn section_changed(&mut self, info: &S, index: usize, kind: SectionChangeKind) {
        let _ = (info, index, kind);
    }

    /// An object was inserted, deleted, updated, or moved.
    ///
    /// An `Update` with `result` present was flagged as a possible disguised
    /// move: the consumer should treat it as carrying a destination (reload
    /// or move the row) rather than redrawing in place.
    fn object_changed(
        &mut self,
        object: &T,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) {
        let _ = (object, original, kind, result);
    }

    /// The batch finished replaying.
    fn did_change_content(&mut self) {}

    /// The batch carried multiple section-level changes and was refused.
    ///
    /// No other hook fires for a refused batch. The typical recovery is a
    /// wholesale reload of the list.
    fn unsafe_changes(&mut self) {}
}
