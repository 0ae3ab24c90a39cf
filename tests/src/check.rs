use std::fs;

use electrodes::io::{
    read_mapping_table, read_numbering, write_report, DUPLICATE_NEW_FILE, DUPLICATE_OLD_FILE,
    MISMATCHES_FILE, MISSING_FILE, UNUSED_FILE,
};
use electrodes::{check_mapping, Error, Outcome};
use test_log::test;

use crate::paths::{get_path, test_data};

#[test]
fn check_writes_report_files() {
    let numbering = read_numbering(test_data("numbering.yaml")).unwrap();
    let table = read_mapping_table(test_data("mea_map.csv")).unwrap();
    let report = check_mapping(&numbering.old, &numbering.new, &table);
    assert_eq!(report.total_positions, 6);
    assert_eq!(report.outcome(), Outcome::Hard);

    let dir = get_path("check_writes_report_files", "");
    let _ = fs::remove_dir_all(&dir);
    let written = write_report(&dir, &report).unwrap();
    assert_eq!(written.len(), 4);

    let read = |name: &str| fs::read_to_string(dir.join(name)).unwrap();
    assert_eq!(
        read(MISMATCHES_FILE),
        "row,col,old,expected_new,actual_new\n1,1,5,50,51\n"
    );
    assert_eq!(read(MISSING_FILE), "row,col,old,actual_new\n0,2,3,30\n");
    assert_eq!(read(UNUSED_FILE), "unused_csv_old\n9\n");
    assert_eq!(read(DUPLICATE_OLD_FILE), "value,count\n5,2\n");
    assert!(!dir.join(DUPLICATE_NEW_FILE).exists());
}

#[test]
fn clean_check_writes_nothing() {
    let numbering = read_numbering(test_data("numbering_clean.json")).unwrap();
    let table = read_mapping_table(test_data("mea_map_clean.csv")).unwrap();
    let report = check_mapping(&numbering.old, &numbering.new, &table);
    assert_eq!(report.outcome(), Outcome::Clean);

    let dir = get_path("clean_check_writes_nothing", "");
    let written = write_report(&dir, &report).unwrap();
    assert!(written.is_empty());
}

#[test]
fn missing_table_is_input_absent() {
    let result = read_mapping_table(test_data("no_such_map.csv"));
    assert!(matches!(result, Err(Error::InputAbsent { .. })));
}
