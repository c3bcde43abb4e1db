//! Error types for zone construction and mutation.

use thiserror::Error;

/// Errors raised while building or mutating zones.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    /// Ring has too few vertices to enclose an area
    #[error("ring has {vertices} vertices, a closed ring needs at least 4")]
    DegenerateRing { vertices: usize },

    /// Ring contains NaN or infinite coordinates
    #[error("ring contains a non-finite coordinate")]
    NonFiniteCoordinate,

    /// Circle radius is not a positive finite number
    #[error("circle radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    /// Recenter requested on a polygon zone
    #[error("zone {0} is not a circle")]
    NotACircle(u32),

    /// Operation needs a position but none has been received yet
    #[error("no position fix yet")]
    NoPositionFix,
}
