//! Change record model: index paths, change kinds, and the two record shapes.
//!
//! A notification cycle produces two shapes of record: [`SectionChange`]
//! (a whole section inserted or deleted) and [`ObjectChange`] (a single item
//! inserted, deleted, updated, or moved). Both are immutable after
//! construction with one deliberate exception: an [`ObjectChange`] with
//! [`ObjectChangeKind::Update`] may have its result path *set* exactly once
//! by the reclassifier, marking the update as a possible disguised move.
//!
//! # Invariants
//!
//! 1. **Path presence by kind**: `Insert` carries a result path and no
//!    original path; `Delete` and `Update` carry an original path and start
//!    with no result path; `Move` carries both, and they are distinct.
//!    Constructors panic on violation — the notifier is a trusted
//!    collaborator and a malformed record is a contract bug, not input to
//!    recover from.
//!
//! 2. **One-shot promotion**: an `Update` record's result path transitions
//!    at most once, from absent to present, via the crate-private
//!    [`ObjectChange::promote`]. It is never cleared and never rewritten.
//!
//! 3. **Opaque payloads**: the section descriptor `S` and object payload `T`
//!    pass through the engine untouched and uninspected.

use core::fmt;

/// Position of an item inside a sectioned list: `(section, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    /// Section index within the list.
    pub section: usize,
    /// Row index within the section.
    pub row: usize,
}

impl IndexPath {
    /// Create an index path from a section and row index.
    #[must_use]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.row)
    }
}

/// Kind of a section-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionChangeKind {
    /// The section was inserted at its index.
    Insert,
    /// The section was deleted from its index.
    Delete,
}

impl fmt::Display for SectionChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Kind of an object-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectChangeKind {
    /// The object was inserted at its result path.
    Insert,
    /// The object was deleted from its original path.
    Delete,
    /// The object's content changed in place.
    Update,
    /// The object moved from its original path to its result path.
    Move,
}

impl fmt::Display for ObjectChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Delete => f.write_str("delete"),
            Self::Update => f.write_str("update"),
            Self::Move => f.write_str("move"),
        }
    }
}

/// A single section insertion or deletion.
///
/// The descriptor `S` is whatever the consumer needs to render the section
/// (title, item count, ...); the engine forwards it without looking inside.
#[derive(Debug, Clone)]
pub struct SectionChange<S> {
    info: S,
    index: usize,
    kind: SectionChangeKind,
}

impl<S> SectionChange<S> {
    /// Create a section change record.
    #[must_use]
    pub fn new(info: S, index: usize, kind: SectionChangeKind) -> Self {
        Self { info, index, kind }
    }

    /// The consumer-facing section descriptor.
    #[must_use]
    pub fn info(&self) -> &S {
        &self.info
    }

    /// Section position at the time of the event.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the section was inserted or deleted.
    #[must_use]
    pub fn kind(&self) -> SectionChangeKind {
        self.kind
    }
}

/// A single object insertion, deletion, update, or move.
#[derive(Debug, Clone)]
pub struct ObjectChange<T> {
    object: T,
    original: Option<IndexPath>,
    kind: ObjectChangeKind,
    result: Option<IndexPath>,
}

impl<T> ObjectChange<T> {
    /// Create an object change record, enforcing the path-presence
    /// invariants for `kind`.
    ///
    /// # Panics
    ///
    /// Panics when a required path is missing, when a path that must be
    /// absent is present, or when a `Move` has identical source and
    /// destination. These are upstream contract violations; masking them
    /// would reintroduce the stale-cell bug this engine exists to fix.
    #[must_use]
    pub fn new(
        object: T,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) -> Self {
        match kind {
            ObjectChangeKind::Insert => {
                assert!(
                    original.is_none(),
                    "insert object change must not carry an original path"
                );
                assert!(
                    result.is_some(),
                    "insert object change requires a result path"
                );
            }
            ObjectChangeKind::Delete => {
                assert!(
                    original.is_some(),
                    "delete object change requires an original path"
                );
                assert!(
                    result.is_none(),
                    "delete object change must not carry a result path"
                );
            }
            ObjectChangeKind::Update => {
                assert!(
                    original.is_some(),
                    "update object change requires an original path"
                );
                assert!(
                    result.is_none(),
                    "update object change must start with no result path"
                );
            }
            ObjectChangeKind::Move => {
                assert!(
                    original.is_some() && result.is_some(),
                    "move object change requires both original and result paths"
                );
                assert!(
                    original != result,
                    "move object change requires distinct original and result paths"
                );
            }
        }
        Self {
            object,
            original,
            kind,
            result,
        }
    }

    /// The changed entity, passed through untouched.
    #[must_use]
    pub fn object(&self) -> &T {
        &self.object
    }

    /// Index path before the batch. Absent only for inserts.
    #[must_use]
    pub fn original(&self) -> Option<IndexPath> {
        self.original
    }

    /// The change kind. `Update` is the only kind the reclassifier may
    /// annotate (by setting the result path); kinds themselves are never
    /// rewritten.
    #[must_use]
    pub fn kind(&self) -> ObjectChangeKind {
        self.kind
    }

    /// Index path after the batch. Present for `Insert` and `Move`; for
    /// `Update`, present only once the reclassifier has flagged the record
    /// as a possible disguised move.
    #[must_use]
    pub fn result(&self) -> Option<IndexPath> {
        self.result
    }

    /// Whether this update has already been flagged by the reclassifier.
    ///
    /// Always true for `Insert` and `Move`; always false for `Delete`.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.result.is_some()
    }

    /// One-shot promotion of an update to update-with-destination.
    ///
    /// Sole mutation point for `result`. Callers guard on
    /// [`is_promoted`](Self::is_promoted) first.
    pub(crate) fn promote(&mut self, result: IndexPath) {
        assert!(
            self.kind == ObjectChangeKind::Update,
            "only update records can be promoted"
        );
        assert!(
            self.result.is_none(),
            "update record promoted twice"
        );
        self.result = Some(result);
    }
}
