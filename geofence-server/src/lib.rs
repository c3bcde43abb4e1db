//! Geofence alerting service.
//!
//! Wraps [`geofence_core`] in a small tokio/axum service: zone data is
//! fetched once at startup, position fixes arrive over the REST surface,
//! and containment transitions are pushed to subscribers over a
//! WebSocket event stream. Entry events carry the vibration pulse for
//! the client device.

pub mod config;
pub mod events;
pub mod fetch;
pub mod state;
pub mod web;
