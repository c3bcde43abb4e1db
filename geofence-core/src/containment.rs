//! Containment and Proximity Evaluation
//!
//! Answers one question: is a given position inside a zone? Polygon
//! containment is delegated to the geometry library; circles use planar
//! distance in projected meters.
//!
//! Multiple zones (and multiple rings within a polygon zone) are
//! OR-combined, short-circuiting on the first hit.

use geo::{Contains, EuclideanDistance};

use crate::position::Position;
use crate::zone::{ZoneSet, ZoneShape};

/// Planar distance between two projected positions, in meters.
pub fn distance(a: &Position, b: &Position) -> f64 {
    geo::Point::from(*a).euclidean_distance(&geo::Point::from(*b))
}

/// Whether a position falls inside a single zone shape.
///
/// Circle boundary behavior is pinned: a position exactly at the radius
/// is outside.
pub fn shape_contains(shape: &ZoneShape, position: &Position) -> bool {
    match shape {
        ZoneShape::Polygons { rings } => {
            let point = geo::Point::from(*position);
            rings.iter().any(|ring| ring.to_polygon().contains(&point))
        }
        ZoneShape::Circle { center, radius } => distance(center, position) < *radius,
    }
}

/// Whether a position falls inside any enabled zone of the set.
pub fn zones_contain(zones: &ZoneSet, position: &Position) -> bool {
    zones
        .zones()
        .iter()
        .filter(|z| z.enabled)
        .any(|z| shape_contains(&z.shape, position))
}
