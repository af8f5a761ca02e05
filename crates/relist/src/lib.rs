#![forbid(unsafe_code)]

//! Change-batch reconciliation engine for sectioned list views.
//!
//! `relist` sits between a data-change notifier — which reports incremental
//! mutations to an ordered, sectioned collection — and a consumer applying
//! those mutations to a rendered list. Some notifiers have a structural flaw:
//! when an item's update coincides with an insertion or deletion that leaves
//! the item's final index path numerically equal to its original one, the
//! notifier reports a plain "update" instead of the true move. Replaying that
//! update literally redraws a cell at a position that no longer holds the
//! item, showing stale or duplicated content — or corrupting the list's row
//! accounting outright.
//!
//! The engine buffers each notification cycle into a [`ChangeBatch`], refuses
//! batches with multiple section-level changes (the safety gate), promotes
//! updates that may be disguised moves ([`reclassify`]), and replays the
//! corrected batch to a [`ChangeObserver`] in a fixed, deterministic order
//! ([`dispatch`]).
//!
//! # Pipeline
//!
//! ```text
//! notifier ── begin / section / object / end ──▶ ChangeEngine
//!                                                   │
//!                              ┌── unsafe? ──▶ unsafe_changes() only
//!                              │
//!                         reclassify (promote disguised moves)
//!                              │
//!                         dispatch: begin, sections, objects, end
//! ```
//!
//! # Example
//!
//! ```
//! use relist::{ChangeEngine, ChangeObserver, IndexPath, ObjectChangeKind};
//!
//! struct Println;
//! impl ChangeObserver<String, String> for Println {
//!     fn object_changed(
//!         &mut self,
//!         object: &String,
//!         _original: Option<IndexPath>,
//!         kind: ObjectChangeKind,
//!         result: Option<IndexPath>,
//!     ) {
//!         println!("{kind}: {object} -> {result:?}");
//!     }
//! }
//!
//! let mut engine = ChangeEngine::new();
//! engine.begin_changes();
//! engine.object_changed(
//!     "Adam West".to_string(),
//!     None,
//!     ObjectChangeKind::Insert,
//!     Some(IndexPath::new(0, 0)),
//! );
//! engine.object_changed(
//!     "Benjamin Zacharias".to_string(),
//!     Some(IndexPath::new(0, 1)),
//!     ObjectChangeKind::Update,
//!     None,
//! );
//! // The insert at (0, 0) shifts row 1, so the update replays with a
//! // destination path instead of as an in-place redraw.
//! engine.end_changes(&mut Println);
//! ```
//!
//! # Concurrency
//!
//! The engine is single-threaded, synchronous, and non-reentrant: observer
//! hooks run on the caller's thread inside
//! [`end_changes`](ChangeEngine::end_changes), and cycles never overlap.
//! Contract violations (overlapping cycles, malformed records) panic rather
//! than recover — masking them would reintroduce the bug class this crate
//! exists to eliminate.

pub mod batch;
pub mod change;
pub mod dispatch;
pub mod engine;
pub mod observer;
pub mod reclassify;

pub use batch::{BatchStats, ChangeBatch};
pub use change::{IndexPath, ObjectChange, ObjectChangeKind, SectionChange, SectionChangeKind};
pub use dispatch::{DispatchOutcome, dispatch};
pub use engine::ChangeEngine;
pub use observer::ChangeObserver;
pub use reclassify::reclassify;
