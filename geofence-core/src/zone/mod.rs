//! Zone Definitions
//!
//! A zone is a geographic area against which the live position is tested:
//! either a set of polygon rings (union semantics) or a single reference
//! center with a radius in meters. Zones live in projected (EPSG:3857)
//! coordinates; reprojection happens before construction.
//!
//! # Example
//!
//! ```rust
//! use geofence_core::{Position, Ring, Zone, ZoneSet};
//!
//! let ring = Ring::new(vec![
//!     (0.0, 0.0),
//!     (100.0, 0.0),
//!     (100.0, 100.0),
//!     (0.0, 100.0),
//! ])
//! .unwrap();
//!
//! let mut zones = ZoneSet::new();
//! zones.add(Zone::polygon(1, "market square", vec![ring]));
//! zones.add(Zone::circle(2, "around me", Position::new(500.0, 500.0), 1000.0).unwrap());
//! ```

mod style;

pub use style::{MarkerStyle, Rgba, ZoneStyle, MARKER_STYLE, ZONE_STYLE};

use serde::{Deserialize, Serialize};

use crate::error::ZoneError;
use crate::position::Position;

/// An ordered, closed ring of projected coordinates.
///
/// Construction normalizes the ring: if the first and last vertex differ
/// the ring is closed by repeating the first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    points: Vec<(f64, f64)>,
}

impl Ring {
    /// Build a ring from projected vertices.
    ///
    /// Rejects rings with non-finite coordinates or with fewer than
    /// 4 vertices after closing.
    pub fn new(mut points: Vec<(f64, f64)>) -> Result<Self, ZoneError> {
        if points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ZoneError::NonFiniteCoordinate);
        }
        if let Some(first) = points.first().copied() {
            if points.last() != Some(&first) {
                points.push(first);
            }
        }
        if points.len() < 4 {
            return Err(ZoneError::DegenerateRing {
                vertices: points.len(),
            });
        }
        Ok(Ring { points })
    }

    /// The closed vertex list, first vertex repeated at the end.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of vertices, including the closing vertex.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The ring as a geometry-library polygon (no holes).
    pub(crate) fn to_polygon(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(geo::LineString::from(self.points.clone()), vec![])
    }
}

/// The geometry of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ZoneShape {
    /// One or more polygon rings. Containment is the union: inside any
    /// ring means inside the zone.
    Polygons { rings: Vec<Ring> },

    /// A reference center and radius in meters. Inside means strictly
    /// closer than the radius; exactly at the radius is outside.
    Circle { center: Position, radius: f64 },
}

/// A named zone against which positions are evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: u32,
    pub name: String,
    pub shape: ZoneShape,
    /// Disabled zones are skipped during evaluation
    pub enabled: bool,
}

impl Zone {
    /// Create a polygon zone from already-projected rings.
    pub fn polygon(id: u32, name: impl Into<String>, rings: Vec<Ring>) -> Self {
        Zone {
            id,
            name: name.into(),
            shape: ZoneShape::Polygons { rings },
            enabled: true,
        }
    }

    /// Create a circular zone around a reference center.
    pub fn circle(
        id: u32,
        name: impl Into<String>,
        center: Position,
        radius: f64,
    ) -> Result<Self, ZoneError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ZoneError::InvalidRadius(radius));
        }
        Ok(Zone {
            id,
            name: name.into(),
            shape: ZoneShape::Circle { center, radius },
            enabled: true,
        })
    }

    /// Replace a circle zone's center in place, keeping its radius.
    pub fn recenter(&mut self, new_center: Position) -> Result<(), ZoneError> {
        match &mut self.shape {
            ZoneShape::Circle { center, .. } => {
                *center = new_center;
                Ok(())
            }
            ZoneShape::Polygons { .. } => Err(ZoneError::NotACircle(self.id)),
        }
    }

    /// Whether this zone is a circle.
    pub fn is_circle(&self) -> bool {
        matches!(self.shape, ZoneShape::Circle { .. })
    }
}

/// The set of zones currently monitored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new() -> Self {
        ZoneSet::default()
    }

    pub fn add(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    /// Remove a zone by id.
    pub fn remove(&mut self, id: u32) -> Option<Zone> {
        let idx = self.zones.iter().position(|z| z.id == id)?;
        Some(self.zones.remove(idx))
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// The first circle zone, if any. This is the zone that manual
    /// recentering targets.
    pub fn circle_mut(&mut self) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.is_circle())
    }

    /// Smallest id not yet in use.
    pub fn next_id(&self) -> u32 {
        self.zones.iter().map(|z| z.id).max().map_or(1, |m| m + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_closes_open_input() {
        let ring = Ring::new(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.points().first(), ring.points().last());
    }

    #[test]
    fn test_ring_rejects_degenerate() {
        let err = Ring::new(vec![(0.0, 0.0), (10.0, 0.0)]).unwrap_err();
        assert_eq!(err, ZoneError::DegenerateRing { vertices: 3 });

        let err = Ring::new(vec![]).unwrap_err();
        assert_eq!(err, ZoneError::DegenerateRing { vertices: 0 });
    }

    #[test]
    fn test_ring_rejects_non_finite() {
        let err = Ring::new(vec![(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]).unwrap_err();
        assert_eq!(err, ZoneError::NonFiniteCoordinate);
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        let center = Position::new(0.0, 0.0);
        assert!(Zone::circle(1, "z", center, 0.0).is_err());
        assert!(Zone::circle(1, "z", center, -5.0).is_err());
        assert!(Zone::circle(1, "z", center, f64::NAN).is_err());
        assert!(Zone::circle(1, "z", center, 1000.0).is_ok());
    }

    #[test]
    fn test_recenter_circle() {
        let mut zone = Zone::circle(1, "z", Position::new(0.0, 0.0), 500.0).unwrap();
        zone.recenter(Position::new(42.0, 43.0)).unwrap();
        match zone.shape {
            ZoneShape::Circle { center, radius } => {
                assert_eq!(center, Position::new(42.0, 43.0));
                assert_eq!(radius, 500.0);
            }
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn test_recenter_polygon_fails() {
        let ring = Ring::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        let mut zone = Zone::polygon(7, "z", vec![ring]);
        let err = zone.recenter(Position::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err, ZoneError::NotACircle(7));
    }

    #[test]
    fn test_zone_set_ids() {
        let mut zones = ZoneSet::new();
        assert_eq!(zones.next_id(), 1);
        zones.add(Zone::circle(3, "a", Position::new(0.0, 0.0), 10.0).unwrap());
        assert_eq!(zones.next_id(), 4);
        assert!(zones.remove(3).is_some());
        assert!(zones.remove(3).is_none());
        assert!(zones.is_empty());
    }
}
