use electrodes::config::GridConfig;
use electrodes::io::{read_point_list, write_json};
use electrodes::label::{label, LabeledElectrode};
use electrodes::{fill_missing, IssueSet};
use geometry::prelude::*;
use test_log::test;

use crate::paths::{get_path, test_data};

#[test]
fn fill_sparse_position_list() {
    let known = read_point_list(test_data("positions.yaml")).unwrap();
    assert_eq!(known.len(), 9);

    let mut issues = IssueSet::new();
    let grid = fill_missing(&known, None, &GridConfig::default(), &mut issues).unwrap();
    assert!(issues.is_empty());
    assert_eq!(grid.points.len(), 12);
    assert_eq!(grid.added(), 3);
    for missing in [
        Point::new(10., 0.),
        Point::new(20., 10.),
        Point::new(20., 20.),
    ] {
        assert!(grid.points.contains(&missing));
        assert!(!known.contains(&missing));
    }

    let labeled = label(grid.points.iter().copied());
    assert_eq!(labeled[0], LabeledElectrode::from((0, 0., 0.)));
    assert_eq!(labeled[11], LabeledElectrode::from((11, 30., 20.)));

    let out = get_path("fill_sparse_position_list", "filled.json");
    write_json(&out, &labeled).unwrap();
    let back: Vec<LabeledElectrode> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back, labeled);
}
