use geometry::prelude::*;
use test_log::test;

use crate::error::Error;
use crate::filter::{filter_with, remove_outliers, MostCommonShape, ShapeClassifier};

fn square(x: f64, y: f64, side: f64) -> Rect {
    Rect::from_sides(x, y, x + side, y + side)
}

#[test]
fn strays_are_excluded() {
    let mut boxes: Vec<Rect> = (0..5).map(|i| square(i as f64 * 50., 0., 10.)).collect();
    boxes.insert(2, Rect::from_sides(0., 100., 20., 105.));
    boxes.push(square(500., 500., 100.));

    let kept = remove_outliers(&boxes).unwrap();
    assert_eq!(kept.len(), 5);
    assert!(kept.iter().all(|r| r.dims() == Dims::new(10., 10.)));
    assert_eq!(kept[2], square(100., 0., 10.));
}

#[test]
fn ties_resolve_to_the_smallest_area() {
    let boxes = vec![
        square(0., 0., 20.),
        square(100., 0., 20.),
        square(0., 100., 10.),
        square(100., 100., 10.),
    ];
    let kept = remove_outliers(&boxes).unwrap();
    assert_eq!(kept, boxes[2..].to_vec());
}

#[test]
fn equal_area_ties_resolve_to_the_smallest_width() {
    let boxes = vec![
        Rect::from_sides(0., 0., 40., 10.),
        Rect::from_sides(100., 0., 140., 10.),
        Rect::from_sides(0., 100., 10., 140.),
        Rect::from_sides(100., 100., 110., 140.),
    ];
    let kept = remove_outliers(&boxes).unwrap();
    assert_eq!(kept, boxes[2..].to_vec());
}

#[test]
fn dimensions_are_compared_up_to_tolerance() {
    let boxes = vec![
        Rect::from_sides(0., 0., 10., 10.),
        Rect::from_sides(50., 0., 60.0001, 10.),
        Rect::from_sides(0., 50., 30., 60.),
    ];
    let kept = MostCommonShape::new(1e-3).classify(&boxes).unwrap();
    assert_eq!(kept, vec![0, 1]);
}

#[test]
fn empty_input_fails() {
    assert!(matches!(remove_outliers(&[]), Err(Error::EmptyResult(_))));
}

struct Widest;

impl ShapeClassifier for Widest {
    fn classify(&self, boxes: &[Rect]) -> crate::Result<Vec<usize>> {
        let max = boxes.iter().map(Rect::width).fold(f64::MIN, f64::max);
        Ok((0..boxes.len()).filter(|&i| boxes[i].width() == max).collect())
    }
}

#[test]
fn custom_classifiers_can_be_plugged_in() {
    let boxes = vec![square(0., 0., 10.), square(0., 0., 10.), square(50., 50., 30.)];
    let kept = filter_with(&Widest, &boxes).unwrap();
    assert_eq!(kept, vec![square(50., 50., 30.)]);
}
