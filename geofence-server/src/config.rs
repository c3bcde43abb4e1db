//! Runtime configuration and command line arguments.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Default zone dataset endpoint (Paris open-data records API).
pub const DEFAULT_DATASET_URL: &str = "https://opendata.paris.fr/api/records/1.0/search/?dataset=coronavirus-port-du-masque-obligatoire-lieux-places-et-marches&q=&rows=100&facet=nom_long&facet=ardt";

/// Default radius for a manually recentered circle zone (m)
pub const DEFAULT_CIRCLE_RADIUS: f64 = 1000.0;

/// Default zone fetch timeout (s)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "geofence-server", version, about = "Geofence alerting service")]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Zone dataset endpoint
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub dataset_url: String,

    /// Radius in meters used when a circle zone is created by recentering
    #[arg(long, default_value_t = DEFAULT_CIRCLE_RADIUS)]
    pub circle_radius: f64,

    /// Zone fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,

    /// Skip the startup zone fetch and start with no zone data
    #[arg(long)]
    pub no_fetch: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

/// Settings shared with the request handlers.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dataset_url: String,
    pub circle_radius: f64,
    pub fetch_timeout: Duration,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            dataset_url: self.dataset_url.clone(),
            circle_radius: self.circle_radius,
            fetch_timeout: Duration::from_secs(self.fetch_timeout),
        }
    }
}
