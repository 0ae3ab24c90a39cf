use geometry::prelude::*;
use test_log::test;

use crate::error::Error;
use crate::extract::PolygonRecord;
use crate::io::{parse_mapping_table, parse_point_list, read_mapping_table, read_to_string};

#[test]
fn point_list_skips_invalid_entries() {
    let yaml = r#"
name: MEA16
pos:
  - [0.0, 1.5]
  - null
  - [2.0]
  - [3.0, null]
  - [4, 5]
  - [1.0, 2.0, 3.0]
  - not a point
"#;
    let points = parse_point_list(yaml).unwrap();
    assert_eq!(points, vec![Point::new(0., 1.5), Point::new(4., 5.)]);
}

#[test]
fn point_list_without_positions_is_empty() {
    assert!(parse_point_list("name: empty\n").unwrap().is_empty());
}

#[test]
fn mapping_table_ignores_extra_columns() {
    let csv = "label,old,new\na, 1,10\nb,2, 20\nc,1,11\n";
    let table = parse_mapping_table(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1), Some(11));
    assert_eq!(table.get(2), Some(20));
    assert_eq!(table.duplicate_keys(), vec![1]);
}

#[test]
fn mapping_table_requires_old_and_new_columns() {
    let result = parse_mapping_table("old,value\n1,2\n".as_bytes());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn mapping_table_rejects_non_integer_ids() {
    let result = parse_mapping_table("old,new\n1,x\n".as_bytes());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn missing_files_are_input_absent() {
    let path = "/nonexistent/electrodes/mea_map.csv";
    assert!(matches!(
        read_mapping_table(path),
        Err(Error::InputAbsent { .. })
    ));
    let err = read_to_string(path).unwrap_err();
    assert!(err.is_input_absent());
}

#[test]
fn polygon_records_parse_with_optional_area() {
    let json = r#"[
        {"vertex_count": 64, "layer": 2, "bounding_box": [[0.0, 0.0], [30.0, 30.0]]},
        {"vertex_count": 4, "layer": 2, "bounding_box": [[0.0, 0.0], [40.0, 40.0]], "area": 1600.0}
    ]"#;
    let records: Vec<PolygonRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records[0].area, None);
    assert!(!records[0].is_rectangular(1e-3));
    assert!(records[1].is_rectangular(1e-3));
    assert_eq!(records[1].bounding_box.center(), Point::new(20., 20.));
}

#[test]
fn polygon_records_summarize_polygons() {
    let polygon = Polygon::from_verts(vec![
        Point::new(0., 0.),
        Point::new(10., 0.),
        Point::new(10., 5.),
        Point::new(0., 5.),
    ]);
    let record = PolygonRecord::from_polygon(&polygon, 2).unwrap();
    assert_eq!(record.vertex_count, 4);
    assert_eq!(record.bounding_box, Rect::from_sides(0., 0., 10., 5.));
    assert!(record.is_rectangular(1e-9));
    assert!(PolygonRecord::from_polygon(&Polygon::default(), 2).is_none());
}
