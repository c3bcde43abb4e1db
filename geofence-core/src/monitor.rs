//! Zone Membership Monitoring
//!
//! The state machine at the center of the application: it holds the zone
//! set and the last position fix, and turns containment changes into
//! edge-triggered transitions. Entry transitions carry a vibration pulse
//! for the client device; sustained containment and exits do not re-fire
//! it.
//!
//! Evaluation is skipped entirely while no position fix exists: state is
//! retained and no transition is produced. Zone mutations (reload,
//! recenter) re-evaluate against the last fix immediately, or defer until
//! the first fix arrives.

use serde::{Deserialize, Serialize};

use crate::containment;
use crate::error::ZoneError;
use crate::position::Position;
use crate::zone::{Zone, ZoneSet};

/// Duration of the vibration pulse requested on zone entry, in
/// milliseconds.
pub const VIBRATE_MS: u64 = 300;

/// An edge-triggered containment transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ZoneTransition {
    /// The position crossed from outside to inside. Fires exactly once
    /// per crossing and asks the client to vibrate.
    Entered { vibrate_ms: u64 },

    /// The position crossed from inside to outside. No vibration.
    Exited,
}

/// Tracks zone membership for a stream of position fixes.
#[derive(Debug, Clone)]
pub struct ZoneMonitor {
    zones: ZoneSet,
    position: Option<Position>,
    inside: bool,
}

impl ZoneMonitor {
    /// Create a monitor over an initial zone set. No position is known
    /// yet; the first evaluation happens on the first fix.
    pub fn new(zones: ZoneSet) -> Self {
        ZoneMonitor {
            zones,
            position: None,
            inside: false,
        }
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    /// The last position fix, if any.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Current membership, or `None` while no fix has been evaluated.
    ///
    /// Membership is derived state; it is only meaningful once a position
    /// exists, so callers get `None` rather than a fabricated "outside".
    pub fn zone_state(&self) -> Option<bool> {
        self.position.map(|_| self.inside)
    }

    /// Feed a position update and evaluate containment.
    ///
    /// `None` means the provider has no fix; the update is skipped
    /// entirely: no state change, no transition.
    pub fn update_position(&mut self, position: Option<Position>) -> Option<ZoneTransition> {
        let position = position?;
        if !position.is_finite() {
            return None;
        }
        self.position = Some(position);
        self.evaluate()
    }

    /// Replace the zone set and re-evaluate against the last fix.
    pub fn set_zones(&mut self, zones: ZoneSet) -> Option<ZoneTransition> {
        self.zones = zones;
        self.evaluate()
    }

    /// Move the circular zone's center to the current position.
    ///
    /// If no circle zone exists yet, one is created with `radius` meters.
    /// Fails with [`ZoneError::NoPositionFix`] when no fix has been
    /// received. Re-evaluates on success, so recentering onto one's own
    /// position produces an entry transition when previously outside.
    pub fn recenter_circle(
        &mut self,
        radius: f64,
    ) -> Result<Option<ZoneTransition>, ZoneError> {
        let center = self.position.ok_or(ZoneError::NoPositionFix)?;

        if let Some(zone) = self.zones.circle_mut() {
            zone.recenter(center)?;
        } else {
            let id = self.zones.next_id();
            self.zones.add(Zone::circle(id, "custom", center, radius)?);
        }
        Ok(self.evaluate())
    }

    /// Recompute membership against the last fix. Deferred (returns
    /// `None` without touching state) while no fix exists.
    fn evaluate(&mut self) -> Option<ZoneTransition> {
        let position = self.position?;
        let inside = containment::zones_contain(&self.zones, &position);
        let transition = match (self.inside, inside) {
            (false, true) => Some(ZoneTransition::Entered {
                vibrate_ms: VIBRATE_MS,
            }),
            (true, false) => Some(ZoneTransition::Exited),
            _ => None,
        };
        self.inside = inside;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Ring;

    fn square_zone(id: u32, x0: f64, y0: f64, size: f64) -> Zone {
        let ring = Ring::new(vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
        .unwrap();
        Zone::polygon(id, "test", vec![ring])
    }

    fn monitor_with_square() -> ZoneMonitor {
        let mut zones = ZoneSet::new();
        zones.add(square_zone(1, 0.0, 0.0, 100.0));
        ZoneMonitor::new(zones)
    }

    #[test]
    fn test_entry_fires_once() {
        let mut monitor = monitor_with_square();

        // Outside, no transition
        assert_eq!(monitor.update_position(Some(Position::new(500.0, 500.0))), None);
        assert_eq!(monitor.zone_state(), Some(false));

        // Entry fires with the vibration pulse
        assert_eq!(
            monitor.update_position(Some(Position::new(50.0, 50.0))),
            Some(ZoneTransition::Entered {
                vibrate_ms: VIBRATE_MS
            })
        );

        // Sustained containment does not re-fire
        assert_eq!(monitor.update_position(Some(Position::new(60.0, 60.0))), None);
        assert_eq!(monitor.update_position(Some(Position::new(60.0, 60.0))), None);
        assert_eq!(monitor.zone_state(), Some(true));
    }

    #[test]
    fn test_exit_transition() {
        let mut monitor = monitor_with_square();
        monitor.update_position(Some(Position::new(50.0, 50.0)));

        assert_eq!(
            monitor.update_position(Some(Position::new(500.0, 500.0))),
            Some(ZoneTransition::Exited)
        );
        // Sustained outside does not re-fire
        assert_eq!(monitor.update_position(Some(Position::new(501.0, 500.0))), None);
    }

    #[test]
    fn test_no_fix_skips_evaluation() {
        let mut monitor = monitor_with_square();

        assert_eq!(monitor.update_position(None), None);
        assert_eq!(monitor.zone_state(), None);
        assert_eq!(monitor.position(), None);

        // A fix inside, then a missing fix: state is retained
        monitor.update_position(Some(Position::new(50.0, 50.0)));
        assert_eq!(monitor.update_position(None), None);
        assert_eq!(monitor.zone_state(), Some(true));
    }

    #[test]
    fn test_non_finite_fix_ignored() {
        let mut monitor = monitor_with_square();
        assert_eq!(
            monitor.update_position(Some(Position::new(f64::NAN, 0.0))),
            None
        );
        assert_eq!(monitor.zone_state(), None);
    }

    #[test]
    fn test_zone_reload_with_no_fix_is_deferred() {
        let mut monitor = ZoneMonitor::new(ZoneSet::new());

        let mut zones = ZoneSet::new();
        zones.add(square_zone(1, 0.0, 0.0, 100.0));
        assert_eq!(monitor.set_zones(zones), None);
        assert_eq!(monitor.zone_state(), None);

        // First fix inside the freshly loaded zone fires the entry
        assert!(matches!(
            monitor.update_position(Some(Position::new(10.0, 10.0))),
            Some(ZoneTransition::Entered { .. })
        ));
    }

    #[test]
    fn test_zone_reload_can_trigger_entry() {
        let mut monitor = ZoneMonitor::new(ZoneSet::new());
        monitor.update_position(Some(Position::new(50.0, 50.0)));
        assert_eq!(monitor.zone_state(), Some(false));

        // Loading a zone around the current position enters it
        let mut zones = ZoneSet::new();
        zones.add(square_zone(1, 0.0, 0.0, 100.0));
        assert!(matches!(
            monitor.set_zones(zones),
            Some(ZoneTransition::Entered { .. })
        ));
    }

    #[test]
    fn test_recenter_without_fix_fails() {
        let mut monitor = ZoneMonitor::new(ZoneSet::new());
        assert_eq!(
            monitor.recenter_circle(1000.0).unwrap_err(),
            ZoneError::NoPositionFix
        );
        assert!(monitor.zones().is_empty());
    }

    #[test]
    fn test_recenter_creates_circle_and_enters() {
        let mut monitor = ZoneMonitor::new(ZoneSet::new());
        monitor.update_position(Some(Position::new(1234.0, 5678.0)));

        // Creating the circle at the current position is an entry
        let transition = monitor.recenter_circle(1000.0).unwrap();
        assert!(matches!(transition, Some(ZoneTransition::Entered { .. })));
        assert_eq!(monitor.zones().len(), 1);

        // Resampling the unchanged position: still inside, no re-fire
        assert_eq!(
            monitor.update_position(Some(Position::new(1234.0, 5678.0))),
            None
        );
        assert_eq!(monitor.zone_state(), Some(true));
    }

    #[test]
    fn test_recenter_replaces_existing_circle() {
        let mut zones = ZoneSet::new();
        zones.add(Zone::circle(1, "old", Position::new(100_000.0, 100_000.0), 500.0).unwrap());
        let mut monitor = ZoneMonitor::new(zones);

        monitor.update_position(Some(Position::new(0.0, 0.0)));
        assert_eq!(monitor.zone_state(), Some(false));

        monitor.recenter_circle(1000.0).unwrap();
        assert_eq!(monitor.zones().len(), 1);
        assert_eq!(monitor.zone_state(), Some(true));
        match monitor.zones().zones()[0].shape {
            crate::zone::ZoneShape::Circle { center, radius } => {
                assert_eq!(center, Position::new(0.0, 0.0));
                assert_eq!(radius, 500.0);
            }
            _ => panic!("expected circle"),
        }
    }
}
