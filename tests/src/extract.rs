use approx::assert_relative_eq;
use electrodes::extract::expected_count_from_name;
use electrodes::io::{read_polygons, write_layout};
use electrodes::issues::Cause;
use electrodes::{Config, CountPolicy, ElectrodeLayout, Error, Extractor};
use geometry::prelude::*;
use test_log::test;

use crate::paths::{get_path, test_data};

#[test]
fn extract_layout_from_polygon_records() {
    let input = test_data("MEA16_rec.json");
    let polygons = read_polygons(&input).unwrap();
    let expected = expected_count_from_name(input.to_str().unwrap());
    assert_eq!(expected, Some(16));

    let config = Config::from_file(test_data("strict.toml")).unwrap();
    assert_eq!(config.count_policy, CountPolicy::Error);
    let extraction = Extractor::new(&config)
        .expected_count(expected)
        .extract(&polygons)
        .unwrap();

    assert_eq!(extraction.electrodes.len(), 16);
    assert_eq!(extraction.stimulus.len(), 2);
    assert!(extraction
        .issues
        .iter()
        .any(|i| matches!(i.cause(), Cause::StrayShapes { rejected: 1, .. })));

    let out = get_path("extract_layout_from_polygon_records", "electrode_positions_MEA16_rec.json");
    write_layout(&out, &extraction.layout).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    let layout: ElectrodeLayout = serde_json::from_str(&text).unwrap();
    assert_eq!(layout, extraction.layout);

    let records = &layout.electrode_coordinates;
    assert_eq!(records.len(), 18);
    assert_relative_eq!(records[0].position, Point::new(1850., 1850.));
    assert_relative_eq!(records[16].position, Point::new(1650., 2000.));
    assert_relative_eq!(records[17].position, Point::new(2350., 2000.));
    assert_eq!(
        layout.bounding_box,
        Rect::from_sides(1750., 1750., 2250., 2250.)
    );
}

#[test]
fn count_mismatch_aborts_under_error_policy() {
    let polygons = read_polygons(test_data("MEA16_rec.json")).unwrap();
    let config = Config::from_file(test_data("strict.toml")).unwrap();
    let result = Extractor::new(&config)
        .expected_count(expected_count_from_name("MEA20_rec"))
        .extract(&polygons);
    assert!(matches!(
        result,
        Err(Error::CountMismatch {
            expected: 20,
            actual: 16
        })
    ));
}

#[test]
fn missing_polygon_file_is_input_absent() {
    let err = read_polygons(test_data("MEA32_missing.json")).unwrap_err();
    assert!(err.is_input_absent());
    let err = Config::from_file(test_data("missing.toml")).unwrap_err();
    assert!(err.is_input_absent());
}
