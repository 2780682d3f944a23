//! Hotspot result assembly.

use conflict_map_hotspot_models::{Cluster, HotspotConfig, RepresentativePoint};

use crate::centroid::representative;

/// Reduces every cluster to its representative point, in cluster order,
/// with the configured marker size attached.
#[must_use]
pub fn assemble(clusters: &[Cluster], config: &HotspotConfig) -> Vec<RepresentativePoint> {
    clusters
        .iter()
        .filter_map(representative)
        .map(|coord| RepresentativePoint {
            latitude: coord.latitude,
            longitude: coord.longitude,
            size: config.marker_size,
        })
        .collect()
}
