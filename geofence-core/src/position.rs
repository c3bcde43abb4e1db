//! Position Types
//!
//! A position is a 2D coordinate in the working projection (Web Mercator,
//! EPSG:3857), expressed in meters. "No fix yet" is always modeled as
//! `Option<Position>`, never as a sentinel coordinate.

use serde::{Deserialize, Serialize};

/// A projected position in EPSG:3857 meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Easting in meters
    pub x: f64,

    /// Northing in meters
    pub y: f64,

    /// Horizontal accuracy in meters, if the fix reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Position {
    /// Create a position without accuracy information.
    pub fn new(x: f64, y: f64) -> Self {
        Position {
            x,
            y,
            accuracy: None,
        }
    }

    /// Create a position with a reported horizontal accuracy.
    pub fn with_accuracy(x: f64, y: f64, accuracy: f64) -> Self {
        Position {
            x,
            y,
            accuracy: Some(accuracy),
        }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Position> for geo::Point<f64> {
    fn from(p: Position) -> Self {
        geo::Point::new(p.x, p.y)
    }
}
