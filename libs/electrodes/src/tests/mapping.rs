use test_log::test;

use crate::issues::Severity;
use crate::mapping::*;

fn identity_table(ids: &[i64], offset: i64) -> MappingTable {
    ids.iter().map(|&id| (id, id * offset)).collect()
}

#[test]
fn single_mismatch_is_a_hard_failure() {
    let old = NumberingGrid::new(vec![vec![1, 2], vec![3, 4]]);
    let new = NumberingGrid::new(vec![vec![10, 20], vec![30, 41]]);
    let table = identity_table(&[1, 2, 3, 4], 10);

    let report = check_mapping(&old, &new, &table);
    assert_eq!(report.total_positions, 4);
    assert_eq!(
        report.mismatches,
        vec![Mismatch {
            row: 1,
            col: 1,
            old: 4,
            expected_new: 40,
            actual_new: 41,
        }]
    );
    assert!(report.missing.is_empty());
    assert_eq!(report.outcome(), Outcome::Hard);
    assert!(report.outcome().is_failure());
    assert!(report.issues.has_error());
}

#[test]
fn missing_key_is_a_soft_pass() {
    let old = NumberingGrid::new(vec![vec![1, 2], vec![3, 4]]);
    let new = NumberingGrid::new(vec![vec![10, 20], vec![30, 40]]);
    let table = identity_table(&[1, 2, 4], 10);

    let report = check_mapping(&old, &new, &table);
    assert_eq!(
        report.missing,
        vec![MissingEntry {
            row: 1,
            col: 0,
            old: 3,
            actual_new: 30,
        }]
    );
    assert!(report.mismatches.is_empty());
    assert_eq!(report.outcome(), Outcome::Soft);
    assert!(!report.outcome().is_failure());
    assert!(!report.issues.has_error());
}

#[test]
fn duplicate_ids_are_counted() {
    let old = NumberingGrid::new(vec![vec![5, 5], vec![1, 2]]);
    let new = NumberingGrid::new(vec![vec![50, 51], vec![10, 20]]);
    let table: MappingTable = [(5, 50), (1, 10), (2, 20)].into_iter().collect();

    let report = check_mapping(&old, &new, &table);
    assert_eq!(report.duplicate_old, vec![DuplicateCount { value: 5, count: 2 }]);
    assert!(report.duplicate_new.is_empty());
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].col, 1);
}

#[test]
fn unused_table_entries_are_sorted() {
    let old = NumberingGrid::new(vec![vec![1, 2]]);
    let new = NumberingGrid::new(vec![vec![10, 20]]);
    let table: MappingTable = [(99, 0), (1, 10), (7, 70), (2, 20)].into_iter().collect();

    let report = check_mapping(&old, &new, &table);
    assert_eq!(report.unused, vec![7, 99]);
    assert_eq!(report.outcome(), Outcome::Soft);
}

#[test]
fn duplicate_table_keys_use_the_last_entry() {
    let table: MappingTable = [(1, 10), (2, 20), (1, 11)].into_iter().collect();
    assert_eq!(table.get(1), Some(11));
    assert_eq!(table.len(), 2);
    assert_eq!(table.duplicate_keys(), vec![1]);

    let old = NumberingGrid::new(vec![vec![1, 2]]);
    let new = NumberingGrid::new(vec![vec![11, 20]]);
    let report = check_mapping(&old, &new, &table);
    assert!(report.mismatches.is_empty());
    assert_eq!(report.duplicate_keys, vec![1]);
    assert_eq!(report.outcome(), Outcome::Soft);
}

#[test]
fn differing_shapes_compare_the_common_region() {
    let old = NumberingGrid::new(vec![vec![1, 2, 3], vec![4, 5]]);
    let new = NumberingGrid::new(vec![vec![10, 20]]);
    let table = identity_table(&[1, 2, 3, 4, 5], 10);

    let report = check_mapping(&old, &new, &table);
    assert_eq!(report.total_positions, 2);
    assert_eq!(
        report.shape_mismatch,
        Some(ShapeMismatch {
            old_rows: 2,
            new_rows: 1,
            ragged_rows: vec![0],
        })
    );
    // Unused entries are computed against the whole old grid.
    assert!(report.unused.is_empty());
    assert_eq!(report.outcome(), Outcome::Soft);
    assert_eq!(report.issues.max_severity(), Some(Severity::Warning));
}

#[test]
fn consistent_numbering_is_clean() {
    let old = NumberingGrid::new(vec![vec![1, 2], vec![3, 4]]);
    let new = NumberingGrid::new(vec![vec![3, 6], vec![9, 12]]);
    let report = check_mapping(&old, &new, &identity_table(&[1, 2, 3, 4], 3));
    assert_eq!(report.outcome(), Outcome::Clean);
    assert!(report.issues.is_empty());
    let summary = report.to_string();
    assert!(summary.contains("Total positions checked: 4"));
    assert!(summary.ends_with("Result: clean"));
}

#[test]
fn grids_deserialize_from_nested_lists() {
    let grid: NumberingGrid = serde_json::from_str("[[1, 2], [3]]").unwrap();
    assert_eq!(grid.get(1, 0), Some(3));
    assert_eq!(grid.get(1, 1), None);
    assert!(!grid.is_rectangular());
    assert_eq!(grid.len(), 3);
}
