#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic hotspot detection for conflict incidents.
//!
//! The pipeline runs four stages, each owning its output:
//!
//! 1. [`sanitize()`] drops incidents without coordinates.
//! 2. [`cluster()`] groups the remaining points by haversine density.
//! 3. [`centroid::representative`] picks the member nearest each
//!    cluster's centroid.
//! 4. [`assemble()`] attaches the marker size for the renderer.
//!
//! [`detect_hotspots`] chains them and summarizes the run in a
//! [`HotspotReport`].

pub mod assemble;
pub mod centroid;
pub mod cluster;
pub mod export;
pub mod sanitize;
pub mod sphere;

pub use assemble::assemble;
pub use cluster::{Partition, cluster};
pub use conflict_map_hotspot_models::{HotspotConfig, HotspotReport};
pub use sanitize::sanitize;

use conflict_map_hotspot_models::IncidentPoint;

/// Errors raised by the hotspot pipeline.
#[derive(Debug, thiserror::Error)]
pub enum HotspotError {
    /// A coordinate was present but is not a valid position on Earth.
    #[error("Invalid coordinate at incident {index}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Position of the offending incident in the input.
        index: usize,
        /// Latitude as received.
        latitude: f64,
        /// Longitude as received.
        longitude: f64,
    },

    /// Clustering parameters are unusable.
    #[error("Invalid hotspot config: {0}")]
    InvalidConfig(String),

    /// A partition was paired with coordinates it was not computed from.
    #[error("Partition has {labels} labels but {coordinates} coordinates were given")]
    PartitionMismatch {
        /// Number of labels in the partition.
        labels: usize,
        /// Number of coordinates supplied.
        coordinates: usize,
    },
}

/// Runs the full hotspot pipeline over `points`.
///
/// An empty result is a normal outcome, whether no point had coordinates
/// or every point was noise.
///
/// # Errors
///
/// Returns [`HotspotError`] if a coordinate is malformed or `config` is
/// invalid.
pub fn detect_hotspots(
    points: &[IncidentPoint],
    config: &HotspotConfig,
) -> Result<HotspotReport, HotspotError> {
    let coords = sanitize(points)?;
    log::info!(
        "Sanitized {} of {} incidents with coordinates",
        coords.len(),
        points.len()
    );

    if coords.is_empty() {
        log::info!("No incidents with coordinates; skipping clustering");
        return Ok(HotspotReport::empty(points.len()));
    }

    let partition = cluster(&coords, config)?;
    let clusters = partition.clusters(&coords)?;
    let representatives = assemble(&clusters, config);

    log::info!(
        "Found {} hotspots (epsilon {} km, min samples {})",
        representatives.len(),
        config.epsilon_km,
        config.min_samples
    );

    Ok(HotspotReport {
        representatives,
        cluster_sizes: clusters.iter().map(|c| c.len()).collect(),
        noise_count: partition.noise_indices().len(),
        input_count: points.len(),
        sanitized_count: coords.len(),
    })
}
