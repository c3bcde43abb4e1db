//! Event stream payloads.
//!
//! Every position evaluation and containment transition is published to
//! event-stream subscribers as one of these messages. Entry events carry
//! the vibration pulse length for the client device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geofence_core::{Position, ZoneTransition};

/// A message on the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    /// A position fix was evaluated
    Position {
        position: Position,
        inside: bool,
        time: DateTime<Utc>,
    },

    /// The position crossed into a zone; clients should vibrate
    ZoneEntered { vibrate_ms: u64, time: DateTime<Utc> },

    /// The position crossed out of the zone set
    ZoneExited { time: DateTime<Utc> },
}

impl Event {
    pub fn position(position: Position, inside: bool) -> Self {
        Event::Position {
            position,
            inside,
            time: Utc::now(),
        }
    }

    pub fn from_transition(transition: ZoneTransition) -> Self {
        match transition {
            ZoneTransition::Entered { vibrate_ms } => Event::ZoneEntered {
                vibrate_ms,
                time: Utc::now(),
            },
            ZoneTransition::Exited => Event::ZoneExited { time: Utc::now() },
        }
    }
}
