//! Batch accumulator: six insertion-ordered buckets for one notification cycle.
//!
//! A [`ChangeBatch`] buffers every change record the notifier reports between
//! its begin and end signals. Records are routed to a bucket by kind and
//! appended in arrival order; nothing is reordered, merged, or deduplicated
//! here — the replay dispatcher depends on arrival order being intact.
//!
//! The batch also hosts the safety gate ([`ChangeBatch::is_unsafe`]): a batch
//! carrying more than one section-level structural change is refused rather
//! than replayed, because applying two simultaneous section changes
//! incrementally can corrupt a list widget's row/section accounting even when
//! each change is individually valid.
//!
//! # Invariants
//!
//! 1. **Arrival order**: within each bucket, iteration order equals the order
//!    records were recorded.
//! 2. **Single consumer**: a batch is populated, consumed once by
//!    reclassify + dispatch, then cleared. It is never shared across cycles.
//! 3. **Routing only**: recording performs no validation beyond the record
//!    constructors' own contract checks.

use smallvec::SmallVec;

use crate::change::{
    IndexPath, ObjectChange, ObjectChangeKind, SectionChange, SectionChangeKind,
};

/// Per-bucket record counts, captured for logging and dispatch summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    /// Sections inserted in this cycle.
    pub inserted_sections: usize,
    /// Sections deleted in this cycle.
    pub deleted_sections: usize,
    /// Objects inserted in this cycle.
    pub inserted_objects: usize,
    /// Objects deleted in this cycle.
    pub deleted_objects: usize,
    /// Objects updated in this cycle (including promoted updates).
    pub updated_objects: usize,
    /// Objects moved in this cycle.
    pub moved_objects: usize,
}

impl BatchStats {
    /// Total records across all six buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.inserted_sections
            + self.deleted_sections
            + self.inserted_objects
            + self.deleted_objects
            + self.updated_objects
            + self.moved_objects
    }
}

/// All change records collected during one notification cycle.
///
/// `T` is the consumer's object payload, `S` its section descriptor; both
/// pass through opaquely. Most cycles touch at most one section, so the
/// section buckets are inline-allocated.
#[derive(Debug, Clone)]
pub struct ChangeBatch<T, S> {
    inserted_sections: SmallVec<[SectionChange<S>; 1]>,
    deleted_sections: SmallVec<[SectionChange<S>; 1]>,
    inserted_objects: Vec<ObjectChange<T>>,
    deleted_objects: Vec<ObjectChange<T>>,
    updated_objects: Vec<ObjectChange<T>>,
    moved_objects: Vec<ObjectChange<T>>,
}

impl<T, S> Default for ChangeBatch<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ChangeBatch<T, S> {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inserted_sections: SmallVec::new(),
            deleted_sections: SmallVec::new(),
            inserted_objects: Vec::new(),
            deleted_objects: Vec::new(),
            updated_objects: Vec::new(),
            moved_objects: Vec::new(),
        }
    }

    /// Append a section change to the bucket selected by `kind`.
    pub fn record_section(&mut self, info: S, index: usize, kind: SectionChangeKind) {
        let record = SectionChange::new(info, index, kind);
        match kind {
            SectionChangeKind::Insert => self.inserted_sections.push(record),
            SectionChangeKind::Delete => self.deleted_sections.push(record),
        }
    }

    /// Append an object change to the bucket selected by `kind`.
    ///
    /// # Panics
    ///
    /// Panics when the path-presence invariants for `kind` are violated
    /// (see [`ObjectChange::new`]).
    pub fn record_object(
        &mut self,
        object: T,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) {
        let record = ObjectChange::new(object, original, kind, result);
        match kind {
            ObjectChangeKind::Insert => self.inserted_objects.push(record),
            ObjectChangeKind::Delete => self.deleted_objects.push(record),
            ObjectChangeKind::Update => self.updated_objects.push(record),
            ObjectChangeKind::Move => self.moved_objects.push(record),
        }
    }

    /// Sections inserted this cycle, in arrival order.
    #[must_use]
    pub fn inserted_sections(&self) -> &[SectionChange<S>] {
        &self.inserted_sections
    }

    /// Sections deleted this cycle, in arrival order.
    #[must_use]
    pub fn deleted_sections(&self) -> &[SectionChange<S>] {
        &self.deleted_sections
    }

    /// Objects inserted this cycle, in arrival order.
    #[must_use]
    pub fn inserted_objects(&self) -> &[ObjectChange<T>] {
        &self.inserted_objects
    }

    /// Objects deleted this cycle, in arrival order.
    #[must_use]
    pub fn deleted_objects(&self) -> &[ObjectChange<T>] {
        &self.deleted_objects
    }

    /// Objects updated this cycle, in arrival order.
    #[must_use]
    pub fn updated_objects(&self) -> &[ObjectChange<T>] {
        &self.updated_objects
    }

    /// Objects moved this cycle, in arrival order.
    #[must_use]
    pub fn moved_objects(&self) -> &[ObjectChange<T>] {
        &self.moved_objects
    }

    /// Mutable view of the updated bucket, for the reclassifier only.
    pub(crate) fn updated_objects_mut(&mut self) -> &mut [ObjectChange<T>] {
        &mut self.updated_objects
    }

    /// Total section-level structural changes (inserts + deletes).
    #[must_use]
    pub fn section_change_count(&self) -> usize {
        self.inserted_sections.len() + self.deleted_sections.len()
    }

    /// Safety gate: true iff the batch carries more than one section-level
    /// structural change and must be refused rather than replayed.
    ///
    /// Zero or one section change dispatches normally regardless of how many
    /// object changes the batch carries.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        self.section_change_count() > 1
    }

    /// Total records across all six buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats().total()
    }

    /// Whether no records have been collected this cycle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of per-bucket counts.
    #[must_use]
    pub fn stats(&self) -> BatchStats {
        BatchStats {
            inserted_sections: self.inserted_sections.len(),
            deleted_sections: self.deleted_sections.len(),
            inserted_objects: self.inserted_objects.len(),
            deleted_objects: self.deleted_objects.len(),
            updated_objects: self.updated_objects.len(),
            moved_objects: self.moved_objects.len(),
        }
    }

    /// Drop all records, readying the batch for the next cycle.
    pub fn clear(&mut self) {
        self.inserted_sections.clear();
        self.deleted_sections.clear();
        self.inserted_objects.clear();
        self.deleted_objects.clear();
        self.updated_objects.clear();
        self.moved_objects.clear();
    }
}
