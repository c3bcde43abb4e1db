//! Shared application state.
//!
//! All monitor mutation goes through this type so that every state
//! change is published to the event channel exactly once. Subscribers
//! get an explicit broadcast receiver; dropping it (or closing the
//! WebSocket that owns it) ends the subscription. Lagging subscribers
//! lose old events instead of buffering unboundedly.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};

use geofence_core::{Position, ZoneError, ZoneMonitor, ZoneSet, ZoneTransition};

use crate::config::Settings;
use crate::events::Event;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Outcome of evaluating one fix or zone mutation.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub position: Position,
    pub inside: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<ZoneTransition>,
}

/// Cloneable handle to the shared server state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    monitor: RwLock<ZoneMonitor>,
    events: broadcast::Sender<Event>,
    settings: Settings,
}

impl AppState {
    pub fn new(zones: ZoneSet, settings: Settings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        AppState {
            inner: Arc::new(Inner {
                monitor: RwLock::new(ZoneMonitor::new(zones)),
                events,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Subscribe to the event stream. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.inner.events.subscribe()
    }

    /// Read access to the monitor for building responses.
    pub async fn monitor(&self) -> RwLockReadGuard<'_, ZoneMonitor> {
        self.inner.monitor.read().await
    }

    /// Ingest a position fix, publish the resulting events, and return
    /// the evaluation outcome.
    pub async fn ingest_position(&self, position: Position) -> Evaluation {
        let (inside, transition) = {
            let mut monitor = self.inner.monitor.write().await;
            let transition = monitor.update_position(Some(position));
            (monitor.zone_state().unwrap_or(false), transition)
        };

        log::trace!(
            "position ({:.1}, {:.1}) evaluated: inside={}",
            position.x,
            position.y,
            inside
        );

        self.publish(Event::position(position, inside));
        if let Some(transition) = transition {
            self.log_and_publish(transition);
        }

        Evaluation {
            position,
            inside,
            transition,
        }
    }

    /// Move the circle zone to the current position (creating it with
    /// the configured radius if absent) and publish any transition.
    pub async fn recenter(&self) -> Result<Evaluation, ZoneError> {
        let (position, inside, transition) = {
            let mut monitor = self.inner.monitor.write().await;
            let transition = monitor.recenter_circle(self.inner.settings.circle_radius)?;
            let position = monitor.position().ok_or(ZoneError::NoPositionFix)?;
            (position, monitor.zone_state().unwrap_or(false), transition)
        };

        log::info!(
            "circle zone recentered at ({:.1}, {:.1})",
            position.x,
            position.y
        );
        if let Some(transition) = transition {
            self.log_and_publish(transition);
        }

        Ok(Evaluation {
            position,
            inside,
            transition,
        })
    }

    fn log_and_publish(&self, transition: ZoneTransition) {
        match transition {
            ZoneTransition::Entered { .. } => log::info!("entered zone"),
            ZoneTransition::Exited => log::info!("left zone"),
        }
        self.publish(Event::from_transition(transition));
    }

    fn publish(&self, event: Event) {
        // Err means no subscriber is listening right now; that is fine.
        let _ = self.inner.events.send(event);
    }
}
