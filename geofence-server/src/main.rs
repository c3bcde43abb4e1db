use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

use geofence_core::ZoneSet;
use geofence_server::config::Args;
use geofence_server::state::AppState;
use geofence_server::{fetch, web};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let settings = args.settings();

    // One-shot zone load, awaited before we start serving. A failed
    // fetch degrades to "no zone data" instead of aborting.
    let zones = if args.no_fetch {
        log::info!("startup zone fetch disabled");
        ZoneSet::new()
    } else {
        match fetch::fetch_zones(&settings.dataset_url, settings.fetch_timeout).await {
            Ok(zones) => {
                log::info!("loaded {} zones from dataset", zones.len());
                zones
            }
            Err(e) => {
                log::warn!("zone fetch failed, starting with no zone data: {:#}", e);
                ZoneSet::new()
            }
        }
    };

    let state = AppState::new(zones, settings);
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    log::info!("listening on {}", listener.local_addr()?);

    Toplevel::new(move |s| async move {
        s.start(SubsystemBuilder::new("web", move |h| {
            web::serve(h, listener, state)
        }));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_secs(2))
    .await?;

    Ok(())
}
