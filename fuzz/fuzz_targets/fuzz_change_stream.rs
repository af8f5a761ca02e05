#![no_main]

//! Drives the engine with arbitrary well-formed change streams and checks
//! that replay preserves order, never clears a promoted result path, and
//! refuses exactly the batches with more than one section change.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relist::{ChangeEngine, ChangeObserver, IndexPath, ObjectChangeKind, SectionChangeKind};

#[derive(Debug, Arbitrary)]
enum RawChange {
    SectionInsert { index: u8 },
    SectionDelete { index: u8 },
    Insert { section: u8, row: u8 },
    Delete { section: u8, row: u8 },
    Update { section: u8, row: u8 },
    Move { from: (u8, u8), to: (u8, u8) },
}

#[derive(Default)]
struct Check {
    section_changes: usize,
    object_order: Vec<(ObjectChangeKind, usize)>,
    unsafe_signals: usize,
    begin: usize,
    end: usize,
}

impl ChangeObserver<usize, u8> for Check {
    fn will_change_content(&mut self) {
        self.begin += 1;
    }

    fn section_changed(&mut self, _info: &u8, _index: usize, _kind: SectionChangeKind) {
        self.section_changes += 1;
    }

    fn object_changed(
        &mut self,
        object: &usize,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) {
        match kind {
            ObjectChangeKind::Insert => assert!(result.is_some()),
            ObjectChangeKind::Delete => {
                assert!(original.is_some());
                assert!(result.is_none());
            }
            ObjectChangeKind::Update => {
                assert!(original.is_some());
                if let Some(res) = result {
                    // Promotion always mirrors the original path.
                    assert_eq!(Some(res), original);
                }
            }
            ObjectChangeKind::Move => {
                assert!(original.is_some() && result.is_some());
                assert_ne!(original, result);
            }
        }
        self.object_order.push((kind, *object));
    }

    fn did_change_content(&mut self) {
        self.end += 1;
    }

    fn unsafe_changes(&mut self) {
        self.unsafe_signals += 1;
    }
}

fuzz_target!(|changes: Vec<RawChange>| {
    let mut engine: ChangeEngine<usize, u8> = ChangeEngine::new();
    let mut check = Check::default();

    engine.begin_changes();
    let mut section_changes = 0usize;
    let mut objects = 0usize;
    for (i, change) in changes.iter().enumerate() {
        match *change {
            RawChange::SectionInsert { index } => {
                engine.section_changed(index, index as usize, SectionChangeKind::Insert);
                section_changes += 1;
            }
            RawChange::SectionDelete { index } => {
                engine.section_changed(index, index as usize, SectionChangeKind::Delete);
                section_changes += 1;
            }
            RawChange::Insert { section, row } => {
                engine.object_changed(
                    i,
                    None,
                    ObjectChangeKind::Insert,
                    Some(IndexPath::new(section as usize, row as usize)),
                );
                objects += 1;
            }
            RawChange::Delete { section, row } => {
                engine.object_changed(
                    i,
                    Some(IndexPath::new(section as usize, row as usize)),
                    ObjectChangeKind::Delete,
                    None,
                );
                objects += 1;
            }
            RawChange::Update { section, row } => {
                engine.object_changed(
                    i,
                    Some(IndexPath::new(section as usize, row as usize)),
                    ObjectChangeKind::Update,
                    None,
                );
                objects += 1;
            }
            RawChange::Move { from, to } => {
                if from == to {
                    continue;
                }
                engine.object_changed(
                    i,
                    Some(IndexPath::new(from.0 as usize, from.1 as usize)),
                    ObjectChangeKind::Move,
                    Some(IndexPath::new(to.0 as usize, to.1 as usize)),
                );
                objects += 1;
            }
        }
    }
    let outcome = engine.end_changes(&mut check);

    if section_changes > 1 {
        assert!(outcome.is_refused());
        assert_eq!(check.unsafe_signals, 1);
        assert_eq!(check.begin, 0);
        assert!(check.object_order.is_empty());
    } else {
        assert!(!outcome.is_refused());
        assert_eq!(check.begin, 1);
        assert_eq!(check.end, 1);
        assert_eq!(check.section_changes, section_changes);
        assert_eq!(check.object_order.len(), objects);
        // Within each bucket, arrival order (recording index) is preserved,
        // so each kind's subsequence of the replay is strictly increasing.
        for kind in [
            ObjectChangeKind::Insert,
            ObjectChangeKind::Delete,
            ObjectChangeKind::Update,
            ObjectChangeKind::Move,
        ] {
            let replayed: Vec<usize> = check
                .object_order
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, i)| *i)
                .collect();
            assert!(replayed.windows(2).all(|w| w[0] < w[1]));
        }
    }
    assert!(!engine.in_cycle());
});
