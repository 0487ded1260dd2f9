#![allow(missing_docs)]
//! Host-level tests for individual spots.

use border_spots::Spot;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

#[test]
fn accessors_describe_the_sampled_box() {
    let spot = Spot::new(Point::new(10, 20), Size::new(30, 40));
    assert_eq!((spot.x(), spot.y()), (10, 20));
    assert_eq!((spot.width(), spot.height()), (30, 40));
    assert_eq!(spot.rectangle(), Rectangle::new(Point::new(10, 20), Size::new(30, 40)));
    // even sizes round toward the top-left
    assert_eq!(spot.center(), Point::new(24, 39));
    assert!(!spot.is_first());
    assert!(!spot.has_missing_value());
}

#[test]
fn missing_value_flag_ignores_equality_and_survives_clone() {
    let spot = Spot::new(Point::new(1, 2), Size::new(3, 4));
    let fresh = spot.clone();

    spot.indicate_missing_value();
    assert!(spot.has_missing_value());
    assert_eq!(spot, fresh);

    let copy = spot.clone();
    assert!(copy.has_missing_value());

    spot.clear_missing_value();
    assert!(!spot.has_missing_value());
    assert!(copy.has_missing_value());
}
