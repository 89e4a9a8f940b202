/// Scenario 1: Single Line Change
///
/// One substituted line between two matching lines is reported as a paired
/// `Change`, framed by the untouched lines.
use linediff_core::{diff_lines, ChangePairing, EntryKind, LineComparator};

#[test]
fn test_scenario_01_substitution_becomes_change() {
    // GIVEN two sequences differing in the middle line
    let before = ["a", "b", "c"];
    let after = ["a", "x", "c"];

    // WHEN aligning them exactly
    let script = diff_lines(&before, &after, &LineComparator::Exact, ChangePairing::Pairwise);

    // THEN the script is Equal, Change, Equal
    let shape: Vec<_> = script
        .iter()
        .map(|e| (e.kind, e.before_index, e.after_index))
        .collect();
    assert_eq!(
        shape,
        vec![
            (EntryKind::Equal, Some(0), Some(0)),
            (EntryKind::Change, Some(1), Some(1)),
            (EntryKind::Equal, Some(2), Some(2)),
        ]
    );

    // AND the change carries both original texts
    let change = &script.entries()[1];
    assert_eq!(change.before_text, "b");
    assert_eq!(change.after_text, "x");
    assert_eq!(change.before_label, "2");
    assert_eq!(change.after_label, "2");
}

#[test]
fn test_scenario_01_never_pairing_keeps_delete_insert() {
    // GIVEN the same inputs
    let before = ["a", "b", "c"];
    let after = ["a", "x", "c"];

    // WHEN pairing is disabled
    let script = diff_lines(&before, &after, &LineComparator::Exact, ChangePairing::Never);

    // THEN the middle is a deletion followed by an insertion
    let kinds: Vec<_> = script.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EntryKind::Equal,
            EntryKind::Delete,
            EntryKind::Insert,
            EntryKind::Equal
        ]
    );
}

#[test]
fn test_scenario_01_uneven_block_pairs_shorter_side() {
    // GIVEN three lines replaced by one
    let before = ["keep", "b1", "b2", "b3", "tail"];
    let after = ["keep", "x", "tail"];

    // WHEN aligning with the default pairing
    let script = diff_lines(&before, &after, &LineComparator::Exact, ChangePairing::Pairwise);

    // THEN one Change pairs b1 with x and the rest are trailing deletions
    let kinds: Vec<_> = script.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EntryKind::Equal,
            EntryKind::Change,
            EntryKind::Delete,
            EntryKind::Delete,
            EntryKind::Equal
        ]
    );
    assert_eq!(script.entries()[1].before_text, "b1");
    assert_eq!(script.entries()[1].after_text, "x");
    assert!(script.check_coverage(before.len(), after.len()).is_ok());
}
