#![forbid(unsafe_code)]

//! Notifier-facing engine surface: one cycle at a time, begin to end.
//!
//! [`ChangeEngine`] is the object the change notifier drives. A cycle is
//! `begin_changes` → any interleaving of `section_changed` /
//! `object_changed` → `end_changes`, which runs the safety gate, the
//! reclassifier, and the replay dispatcher in that order and leaves the
//! engine ready for the next cycle.
//!
//! # Invariants
//!
//! 1. **Non-reentrant**: cycles never overlap. `begin_changes` inside an
//!    open cycle panics, as does recording or ending outside one — the
//!    notifier contract guarantees strict begin/end pairing, so a violation
//!    is a programming error upstream.
//! 2. **Gate before reclassify**: a batch the gate refuses is never
//!    reclassified; it is dropped whole after the unsafe notification.
//! 3. **Clean slate**: after `end_changes` returns, the accumulator is
//!    empty regardless of outcome.
//!
//! # Example
//!
//! ```
//! use relist::{ChangeEngine, ChangeObserver, IndexPath, ObjectChangeKind};
//!
//! #[derive(Default)]
//! struct Counter {
//!     objects: usize,
//! }
//!
//! impl ChangeObserver<&'static str, &'static str> for Counter {
//!     fn object_changed(
//!         &mut self,
//!         _object: &&'static str,
//!         _original: Option<IndexPath>,
//!         _kind: ObjectChangeKind,
//!         _result: Option<IndexPath>,
//!     ) {
//!         self.objects += 1;
//!     }
//! }
//!
//! let mut engine = ChangeEngine::new();
//! let mut counter = Counter::default();
//!
//! engine.begin_changes();
//! engine.object_changed("new row", None, ObjectChangeKind::Insert,
//!     Some(IndexPath::new(0, 0)));
//! let outcome = engine.end_changes(&mut counter);
//!
//! assert!(!outcome.is_refused());
//! assert_eq!(counter.objects, 1);
//! ```

use crate::batch::{BatchStats, ChangeBatch};
use crate::change::{IndexPath, ObjectChangeKind, SectionChangeKind};
use crate::dispatch::{DispatchOutcome, dispatch};
use crate::observer::ChangeObserver;
use crate::reclassify::reclassify;

/// Change-batch reconciliation engine for one sectioned list.
///
/// Single-threaded and synchronous: every operation runs on the caller's
/// thread with no internal suspension points, and observer hooks fire
/// synchronously inside [`end_changes`](Self::end_changes).
#[derive(Debug)]
pub struct ChangeEngine<T, S> {
    batch: ChangeBatch<T, S>,
    in_cycle: bool,
}

impl<T, S> Default for ChangeEngine<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ChangeEngine<T, S> {
    /// Create an engine with no cycle in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            batch: ChangeBatch::new(),
            in_cycle: false,
        }
    }

    /// Whether a cycle is currently open.
    #[must_use]
    pub fn in_cycle(&self) -> bool {
        self.in_cycle
    }

    /// Per-bucket counts collected so far in the open cycle.
    #[must_use]
    pub fn pending_stats(&self) -> BatchStats {
        self.batch.stats()
    }

    /// Open a notification cycle.
    ///
    /// # Panics
    ///
    /// Panics if a cycle is already open.
    pub fn begin_changes(&mut self) {
        assert!(
            !self.in_cycle,
            "begin_changes called while a cycle is already open"
        );
        debug_assert!(self.batch.is_empty(), "stale records outside a cycle");
        self.in_cycle = true;
        tracing::trace!("cycle opened");
    }

    /// Record a section insert or delete reported by the notifier.
    ///
    /// # Panics
    ///
    /// Panics if no cycle is open.
    pub fn section_changed(&mut self, info: S, index: usize, kind: SectionChangeKind) {
        assert!(self.in_cycle, "section_changed called outside a cycle");
        tracing::trace!(index, %kind, "section change recorded");
        self.batch.record_section(info, index, kind);
    }

    /// Record an object change reported by the notifier.
    ///
    /// # Panics
    ///
    /// Panics if no cycle is open, or if the path-presence invariants for
    /// `kind` are violated.
    pub fn object_changed(
        &mut self,
        object: T,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) {
        assert!(self.in_cycle, "object_changed called outside a cycle");
        tracing::trace!(%kind, ?original, ?result, "object change recorded");
        self.batch.record_object(object, original, kind, result);
    }

    /// Close the cycle: gate, reclassify, and replay into `observer`.
    ///
    /// A batch with more than one section-level change is refused — the
    /// observer receives only
    /// [`unsafe_changes`](ChangeObserver::unsafe_changes) and should fall
    /// back to a wholesale reload. Otherwise updates that may be disguised
    /// moves are promoted and the corrected batch replays in the fixed
    /// dispatch order. Either way the accumulator is empty on return.
    ///
    /// # Panics
    ///
    /// Panics if no cycle is open.
    pub fn end_changes<O>(&mut self, observer: &mut O) -> DispatchOutcome
    where
        O: ChangeObserver<T, S> + ?Sized,
    {
        assert!(self.in_cycle, "end_changes called without an open cycle");
        self.in_cycle = false;

        if !self.batch.is_unsafe() {
            reclassify(&mut self.batch);
        }
        dispatch(&mut self.batch, observer)
    }
}
