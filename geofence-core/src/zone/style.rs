//! Immutable style configuration for the zone overlay and the live
//! position marker.
//!
//! These are constant configuration values, constructed once and served
//! to rendering clients as-is. Nothing in this crate draws anything.

use serde::{Deserialize, Serialize};

/// An RGBA color; alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }
}

/// Fill style for the zone overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    pub fill: Rgba,
}

/// Style for the live position marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Marker radius in pixels
    pub radius: f64,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f64,
}

/// Translucent blue zone fill.
pub const ZONE_STYLE: ZoneStyle = ZoneStyle {
    fill: Rgba::new(0, 0, 255, 0.3),
};

/// Black dot with a white outline.
pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    radius: 7.0,
    fill: Rgba::new(0, 0, 0, 1.0),
    stroke: Rgba::new(255, 255, 255, 1.0),
    stroke_width: 2.0,
};
