//! Platform-independent geofence logic.
//!
//! This crate decides whether a live position is inside a set of
//! geographic zones and turns that decision into edge-triggered entry
//! and exit events. It contains no I/O and no async code; feeding it
//! position fixes and zone data is the embedding application's job.
//!
//! # Architecture
//!
//! - **position**: projected position types
//! - **projection**: WGS84 lon/lat ↔ Web Mercator (EPSG:3857) conversion
//! - **zone**: zone definitions (polygon rings, circles) and styling
//! - **containment**: point-in-polygon and proximity evaluation
//! - **monitor**: the zone-membership state machine
//!
//! # Usage
//!
//! ```rust
//! use geofence_core::{Position, Zone, ZoneMonitor, ZoneSet, ZoneTransition};
//!
//! let mut zones = ZoneSet::new();
//! zones.add(Zone::circle(1, "home", Position::new(0.0, 0.0), 1000.0).unwrap());
//!
//! let mut monitor = ZoneMonitor::new(zones);
//!
//! // First fix inside the circle: one entry transition.
//! let t = monitor.update_position(Some(Position::new(10.0, 10.0)));
//! assert!(matches!(t, Some(ZoneTransition::Entered { .. })));
//!
//! // Staying inside does not re-fire.
//! assert!(monitor.update_position(Some(Position::new(20.0, 20.0))).is_none());
//! ```

pub mod containment;
pub mod error;
pub mod monitor;
pub mod position;
pub mod projection;
pub mod zone;

pub use error::ZoneError;
pub use monitor::{ZoneMonitor, ZoneTransition, VIBRATE_MS};
pub use position::Position;
pub use zone::{Ring, Zone, ZoneSet, ZoneShape};
