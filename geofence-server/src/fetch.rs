//! Zone Data Source
//!
//! One-shot fetch of the zone dataset at startup. The dataset is a
//! records API: each record carries a lon/lat polygon ring which is
//! reprojected into the working projection here, at fetch time. No
//! retry, no caching, no incremental update.
//!
//! Records with a missing or degenerate geometry are skipped with a
//! warning; the remaining records still load.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use geofence_core::{projection, Ring, Zone, ZoneSet};

#[derive(Debug, Deserialize)]
struct DatasetResponse {
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    fields: RecordFields,
}

#[derive(Debug, Deserialize)]
struct RecordFields {
    #[serde(default)]
    geo_shape: Option<GeoShape>,

    /// Human-readable zone name
    #[serde(default)]
    nom_long: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoShape {
    /// Ring list in lon/lat; the first ring is the outer boundary
    coordinates: Vec<Vec<[f64; 2]>>,
}

/// Fetch the zone dataset and build the zone set.
///
/// Network and decode failures are returned to the caller; the server
/// degrades to an empty zone set there, it does not abort.
pub async fn fetch_zones(url: &str, timeout: Duration) -> Result<ZoneSet> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("requesting zone dataset")?
        .error_for_status()
        .context("zone dataset request rejected")?;

    let dataset: DatasetResponse = response.json().await.context("decoding zone dataset")?;
    Ok(zones_from_dataset(dataset))
}

fn zones_from_dataset(dataset: DatasetResponse) -> ZoneSet {
    let mut zones = ZoneSet::new();

    for (idx, record) in dataset.records.into_iter().enumerate() {
        let name = record
            .fields
            .nom_long
            .unwrap_or_else(|| format!("zone {}", idx + 1));

        let Some(shape) = record.fields.geo_shape else {
            log::warn!("record '{}' has no geometry, skipping", name);
            continue;
        };
        let Some(outer) = shape.coordinates.into_iter().next() else {
            log::warn!("record '{}' has no rings, skipping", name);
            continue;
        };

        // Reproject to the working projection at fetch time
        let projected = outer
            .iter()
            .map(|&[lon, lat]| projection::from_lon_lat(lon, lat))
            .collect();

        match Ring::new(projected) {
            Ok(ring) => {
                let id = zones.next_id();
                zones.add(Zone::polygon(id, name, vec![ring]));
            }
            Err(e) => log::warn!("record '{}' has an unusable ring ({}), skipping", name, e),
        }
    }

    zones
}
