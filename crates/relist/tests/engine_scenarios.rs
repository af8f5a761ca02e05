//! End-to-end scenarios driving the full notifier → engine → observer path.

use relist::{
    ChangeEngine, ChangeObserver, DispatchOutcome, IndexPath, ObjectChangeKind, SectionChangeKind,
};

fn path(section: usize, row: usize) -> Option<IndexPath> {
    Some(IndexPath::new(section, row))
}

/// Observer capturing every hook invocation in order.
#[derive(Default)]
struct Capture {
    begin: usize,
    end: usize,
    unsafe_signals: usize,
    sections: Vec<(String, usize, SectionChangeKind)>,
    objects: Vec<(String, Option<IndexPath>, ObjectChangeKind, Option<IndexPath>)>,
}

impl ChangeObserver<String, String> for Capture {
    fn will_change_content(&mut self) {
        self.begin += 1;
    }

    fn section_changed(&mut self, info: &String, index: usize, kind: SectionChangeKind) {
        self.sections.push((info.clone(), index, kind));
    }

    fn object_changed(
        &mut self,
        object: &String,
        original: Option<IndexPath>,
        kind: ObjectChangeKind,
        result: Option<IndexPath>,
    ) {
        self.objects.push((object.clone(), original, kind, result));
    }

    fn did_change_content(&mut self) {
        self.end += 1;
    }

    fn unsafe_changes(&mut self) {
        self.unsafe_signals += 1;
    }
}

// ── Named scenarios ─────────────────────────────────────────────────

#[test]
fn insert_collision_promotes_coinciding_update() {
    // No section changes. Insert "Adam West" at (0,0); "Benjamin Zacharias"
    // reported as a plain update at (0,1). The insert at row 0 means the
    // update's position only *looks* stable — it must replay carrying a
    // destination path equal to its original.
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.object_changed("Adam West".into(), None, ObjectChangeKind::Insert, path(0, 0));
    engine.object_changed(
        "Benjamin Zacharias".into(),
        path(0, 1),
        ObjectChangeKind::Update,
        None,
    );
    let outcome = engine.end_changes(&mut capture);

    assert!(matches!(outcome, DispatchOutcome::Replayed(_)));
    let update = capture
        .objects
        .iter()
        .find(|(name, ..)| name == "Benjamin Zacharias")
        .expect("update was replayed");
    assert_eq!(update.2, ObjectChangeKind::Update);
    assert_eq!(update.1, path(0, 1));
    assert_eq!(update.3, path(0, 1), "update carries a destination path");
}

#[test]
fn two_section_changes_refuse_the_whole_batch() {
    // One section inserted at 2, one deleted at 0: unsafe regardless of the
    // update riding along. Only the unsafe signal reaches the observer.
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.section_changed("Incoming".into(), 2, SectionChangeKind::Insert);
    engine.section_changed("Outgoing".into(), 0, SectionChangeKind::Delete);
    engine.object_changed("rider".into(), path(1, 3), ObjectChangeKind::Update, None);
    let outcome = engine.end_changes(&mut capture);

    assert!(outcome.is_refused());
    assert_eq!(capture.unsafe_signals, 1);
    assert_eq!(capture.begin, 0);
    assert_eq!(capture.end, 0);
    assert!(capture.sections.is_empty());
    assert!(capture.objects.is_empty());
}

#[test]
fn update_above_all_structural_changes_stays_plain() {
    // Structural changes touch only sections 0..=2; an update in section 4
    // is provably unaffected and must replay without a destination.
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.object_changed("a".into(), None, ObjectChangeKind::Insert, path(0, 3));
    engine.object_changed("b".into(), path(1, 0), ObjectChangeKind::Delete, None);
    engine.object_changed("c".into(), path(2, 2), ObjectChangeKind::Move, path(2, 6));
    engine.object_changed("target".into(), path(4, 2), ObjectChangeKind::Update, None);
    engine.end_changes(&mut capture);

    let update = capture
        .objects
        .iter()
        .find(|(name, ..)| name == "target")
        .expect("update was replayed");
    assert_eq!(update.3, None);
}

#[test]
fn move_rows_above_the_update_do_not_promote() {
    // Move (2,3) -> (1,5): the delete side of section 2 gains row 3 only.
    // The update at (2,1) has no delete row <= 1, so the move alone does
    // not flag it.
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.object_changed("mover".into(), path(2, 3), ObjectChangeKind::Move, path(1, 5));
    engine.object_changed("stable".into(), path(2, 1), ObjectChangeKind::Update, None);
    engine.end_changes(&mut capture);

    let update = capture
        .objects
        .iter()
        .find(|(name, ..)| name == "stable")
        .expect("update was replayed");
    assert_eq!(update.3, None);
}

// ── Gate exactness ──────────────────────────────────────────────────

#[test]
fn single_section_change_dispatches_normally() {
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.section_changed("New".into(), 1, SectionChangeKind::Insert);
    for row in 0..20 {
        engine.object_changed(format!("row {row}"), None, ObjectChangeKind::Insert, path(1, row));
    }
    let outcome = engine.end_changes(&mut capture);

    assert!(!outcome.is_refused());
    assert_eq!(capture.unsafe_signals, 0);
    assert_eq!(capture.begin, 1);
    assert_eq!(capture.end, 1);
    assert_eq!(capture.sections.len(), 1);
    assert_eq!(capture.objects.len(), 20);
}

#[test]
fn two_inserted_sections_are_also_unsafe() {
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.section_changed("A".into(), 0, SectionChangeKind::Insert);
    engine.section_changed("B".into(), 1, SectionChangeKind::Insert);
    let outcome = engine.end_changes(&mut capture);

    assert!(outcome.is_refused());
}

// ── Replay ordering across a mixed batch ────────────────────────────

#[test]
fn mixed_batch_replays_in_bucket_then_arrival_order() {
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.section_changed("S".into(), 0, SectionChangeKind::Insert);
    engine.object_changed("m1".into(), path(1, 1), ObjectChangeKind::Move, path(1, 9));
    engine.object_changed("u1".into(), path(2, 0), ObjectChangeKind::Update, None);
    engine.object_changed("i1".into(), None, ObjectChangeKind::Insert, path(0, 0));
    engine.object_changed("d1".into(), path(1, 4), ObjectChangeKind::Delete, None);
    engine.object_changed("i2".into(), None, ObjectChangeKind::Insert, path(0, 1));
    engine.end_changes(&mut capture);

    let names: Vec<&str> = capture.objects.iter().map(|(n, ..)| n.as_str()).collect();
    assert_eq!(names, vec!["i1", "i2", "d1", "u1", "m1"]);
}

#[test]
fn consecutive_cycles_do_not_leak_records() {
    let mut engine = ChangeEngine::new();
    let mut capture = Capture::default();

    engine.begin_changes();
    engine.section_changed("A".into(), 0, SectionChangeKind::Insert);
    engine.section_changed("B".into(), 1, SectionChangeKind::Delete);
    let refused = engine.end_changes(&mut capture);
    assert!(refused.is_refused());

    // The refused batch must not bleed into the next cycle.
    engine.begin_changes();
    engine.object_changed("solo".into(), None, ObjectChangeKind::Insert, path(0, 0));
    let outcome = engine.end_changes(&mut capture);

    match outcome {
        DispatchOutcome::Replayed(stats) => {
            assert_eq!(stats.total(), 1);
            assert_eq!(stats.inserted_sections, 0);
        }
        DispatchOutcome::Refused => panic!("clean cycle refused"),
    }
    assert_eq!(capture.objects.len(), 1);
    assert!(capture.sections.is_empty());
}
