#![forbid(unsafe_code)]

//! Collision detector: finds updates that are disguised moves and promotes
//! them in place.
//!
//! The upstream notifier reports a plain "update" whenever an item's final
//! index path is numerically equal to its original one — even when concurrent
//! insertions or deletions mean the item actually moved. Replaying such an
//! update naively redraws a cell at a position that no longer holds the item,
//! showing stale or duplicated content.
//!
//! [`reclassify`] scans the updated bucket against an index of every
//! structural change in the batch and promotes each update that *could* be
//! affected: its result path is set to the (numerically unchanged) original
//! path, signalling the consumer to treat the record as an
//! update-with-destination rather than an in-place redraw.
//!
//! # Detection rule
//!
//! An update at `(s, r)` is promoted when any of these counts is nonzero:
//!
//! - inserted or deleted sections with index in `[0, s]`
//! - insert-side rows in `[0, r]` within section `s` (object inserts, plus
//!   move destinations — a move is an insertion from its destination's
//!   perspective)
//! - delete-side rows in `[0, r]` within section `s` (object deletes, plus
//!   move origins — a move is a deletion from its origin's perspective)
//!
//! The prefix-count test is deliberately coarse: any structural change at or
//! before the update's position flags it, whether or not it truly displaced
//! the item. A false positive costs the consumer a redundant
//! equal-source/destination path; a false negative reproduces the stale-cell
//! bug. The asymmetry is the point — over-flag, never under-flag.
//!
//! # Invariants
//!
//! 1. Only the updated bucket is mutated; all other buckets are read-only
//!    inputs.
//! 2. Promotion is one-shot: an already-promoted record is skipped, so a
//!    second pass is a no-op (idempotence).
//! 3. Kinds are never rewritten and result paths are never cleared.
//! 4. Order-independent: every update is evaluated against the same fixed
//!    index, so iteration order over the bucket cannot change the outcome.

use ahash::{AHashMap, AHashSet};

use crate::batch::ChangeBatch;

/// Section-index sets and per-section row sets for every structural change
/// in a batch. Built once per [`reclassify`] call, then read-only.
struct StructuralIndex {
    inserted_sections: AHashSet<usize>,
    deleted_sections: AHashSet<usize>,
    insert_rows: AHashMap<usize, AHashSet<usize>>,
    delete_rows: AHashMap<usize, AHashSet<usize>>,
}

impl StructuralIndex {
    fn build<T, S>(batch: &ChangeBatch<T, S>) -> Self {
        let inserted_sections = batch
            .inserted_sections()
            .iter()
            .map(|c| c.index())
            .collect();
        let deleted_sections = batch
            .deleted_sections()
            .iter()
            .map(|c| c.index())
            .collect();

        let mut insert_rows: AHashMap<usize, AHashSet<usize>> = AHashMap::new();
        let mut delete_rows: AHashMap<usize, AHashSet<usize>> = AHashMap::new();

        for change in batch.inserted_objects() {
            let path = change
                .result()
                .expect("insert object change carries a result path");
            insert_rows.entry(path.section).or_default().insert(path.row);
        }
        for change in batch.deleted_objects() {
            let path = change
                .original()
                .expect("delete object change carries an original path");
            delete_rows.entry(path.section).or_default().insert(path.row);
        }
        // A move contributes to both sides: destination as an insert,
        // origin as a delete.
        for change in batch.moved_objects() {
            let dst = change
                .result()
                .expect("move object change carries a result path");
            let src = change
                .original()
                .expect("move object change carries an original path");
            insert_rows.entry(dst.section).or_default().insert(dst.row);
            delete_rows.entry(src.section).or_default().insert(src.row);
        }

        Self {
            inserted_sections,
            deleted_sections,
            insert_rows,
            delete_rows,
        }
    }

    /// Structural changes at or before `(section, row)`: section changes with
    /// index ≤ section, plus insert/delete rows ≤ row within the section.
    fn prefix_count(&self, section: usize, row: usize) -> usize {
        let sections = count_le(&self.inserted_sections, section)
            + count_le(&self.deleted_sections, section);
        let rows = rows_le(&self.insert_rows, section, row) + rows_le(&self.delete_rows, section, row);
        sections + rows
    }
}

fn count_le(set: &AHashSet<usize>, bound: usize) -> usize {
    set.iter().filter(|&&idx| idx <= bound).count()
}

fn rows_le(map: &AHashMap<usize, AHashSet<usize>>, section: usize, row: usize) -> usize {
    map.get(&section)
        .map_or(0, |rows| rows.iter().filter(|&&r| r <= row).count())
}

/// Promote every update that may be a disguised move.
///
/// Mutates only the updated bucket; no-op when it is empty. Idempotent:
/// records promoted by an earlier pass are skipped.
pub fn reclassify<T, S>(batch: &mut ChangeBatch<T, S>) {
    if batch.updated_objects().is_empty() {
        return;
    }

    let index = StructuralIndex::build(batch);
    let mut promoted = 0usize;

    for change in batch.updated_objects_mut() {
        if change.is_promoted() {
            continue;
        }
        let path = change
            .original()
            .expect("update object change carries an original path");
        if index.prefix_count(path.section, path.row) > 0 {
            change.promote(path);
            promoted += 1;
        }
    }

    if promoted > 0 {
        tracing::trace!(promoted, "promoted updates to update-with-destination");
    }
}
