use approx::{assert_abs_diff_eq, assert_relative_eq};
use geometry::prelude::*;
use test_log::test;

use super::grid_points;
use crate::config::NormalizeConfig;
use crate::error::Error;
use crate::normalize::{median, median_spacing, normalize, Normalization};
use crate::set::ElectrodeSet;

fn irregular_set() -> ElectrodeSet {
    ElectrodeSet::with_default_tolerance([
        Point::new(3., 7.),
        Point::new(45., 9.),
        Point::new(101., 2.),
        Point::new(5., 61.),
        Point::new(52., 48.),
        Point::new(98., 57.),
        Point::new(-40., 130.),
    ])
}

#[test]
fn output_spacing_and_centroid_match_targets() {
    let config = NormalizeConfig::new(100., Point::new(2000., 2000.));
    for set in [
        irregular_set(),
        ElectrodeSet::with_default_tolerance(grid_points(Point::new(-310., 45.), 17.5, 5, 4)),
    ] {
        let out = normalize(&set, &config).unwrap();
        assert_eq!(out.len(), set.len());
        assert_relative_eq!(
            median_spacing(&out.to_vec()).unwrap(),
            100.,
            max_relative = 1e-6
        );
        let centroid = Point::centroid(out.iter()).unwrap();
        assert_relative_eq!(centroid, Point::new(2000., 2000.), max_relative = 1e-6);
    }
}

#[test]
fn default_target_is_the_grid_center() {
    let out = normalize(&irregular_set(), &NormalizeConfig::default()).unwrap();
    let centroid = Point::centroid(out.iter()).unwrap();
    assert_relative_eq!(centroid, Point::new(2000., 2000.), max_relative = 1e-6);
}

#[test]
fn shrinking_keeps_nearby_electrodes_apart() {
    let set = ElectrodeSet::new(
        [
            Point::new(0.0011, 0.),
            Point::new(0.0019, 0.),
            Point::new(1000., 0.),
            Point::new(2000., 0.),
            Point::new(3000., 0.),
        ],
        1e-3,
    );
    assert_eq!(set.len(), 5);
    let config = NormalizeConfig::new(100., Point::new(2000., 2000.));
    let fit = Normalization::fit(&set, &config).unwrap();
    assert_relative_eq!(fit.scale(), 0.1, max_relative = 1e-9);

    let out = normalize(&set, &config).unwrap();
    assert_eq!(out.len(), set.len());
    for (p, q) in set.iter().zip(out.iter()) {
        assert_relative_eq!(fit.apply(p), q);
    }
}

#[test]
fn normalizing_twice_changes_nothing() {
    let config = NormalizeConfig::new(100., Point::new(500., -250.));
    let once = normalize(&irregular_set(), &config).unwrap();
    let twice = normalize(&once, &config).unwrap();
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn fitted_transform_projects_auxiliary_points() {
    let set = ElectrodeSet::with_default_tolerance(grid_points(Point::new(0., 0.), 200., 4, 4));
    let fit = Normalization::fit(&set, &NormalizeConfig::new(100., Point::new(0., 0.))).unwrap();
    assert_eq!(fit.centroid(), Point::new(300., 300.));
    assert_eq!(fit.spacing(), 200.);
    assert_eq!(fit.scale(), 0.5);
    assert_eq!(fit.apply(Point::new(-100., 300.)), Point::new(-200., 0.));
}

#[test]
fn fewer_than_two_points_fail() {
    let config = NormalizeConfig::default();
    let single = ElectrodeSet::with_default_tolerance([Point::new(1., 1.)]);
    assert!(matches!(
        normalize(&single, &config),
        Err(Error::DegenerateGeometry(_))
    ));
    let coincident =
        ElectrodeSet::with_default_tolerance([Point::new(1., 1.), Point::new(1., 1.)]);
    assert_eq!(coincident.len(), 1);
    assert!(matches!(
        normalize(&coincident, &config),
        Err(Error::DegenerateGeometry(_))
    ));
}

#[test]
fn zero_spacing_fails() {
    let p = Point::new(4., 4.);
    assert!(matches!(
        median_spacing(&[p, p, p]),
        Err(Error::DegenerateGeometry(_))
    ));
}

#[test]
fn median_of_even_count_is_the_mean_of_the_middle_values() {
    assert_eq!(median(&[10., 1., 7., 3.]), Some(5.));
}
