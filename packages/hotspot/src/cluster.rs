//! Density-based clustering over great-circle distance.
//!
//! A point is a core point when at least `min_samples` points (itself
//! included) lie within the neighborhood radius. Core points that
//! are neighbors share a cluster; non-core points within reach of a core
//! point join its cluster as border points; everything else is noise.
//!
//! Neighbor candidates come from an R-tree over unit-sphere vectors and
//! are confirmed with [`Haversine`] distance in meters, which alone
//! decides adjacency.

use conflict_map_hotspot_models::{Cluster, ClusterLabel, Coordinate, HotspotConfig};
use geo::{Distance as _, Haversine, Point};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::HotspotError;
use crate::sphere::{chord_length, to_point, unit_vector};

/// A unit-sphere vector tagged with the index of its source coordinate.
type IndexedVector = GeomWithData<[f64; 3], usize>;

/// Points exactly `epsilon` apart must stay neighbors despite rounding in
/// the degree/radian conversion.
const BOUNDARY_SLACK_M: f64 = 1e-5;

/// Relative widening of the R-tree query so the prefilter never rejects a
/// pair the distance check would accept.
const PREFILTER_SLACK: f64 = 1e-9;

/// Per-point cluster assignment produced by [`cluster`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    labels: Vec<ClusterLabel>,
    cluster_count: usize,
}

impl Partition {
    /// The partition of zero points.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            labels: Vec::new(),
            cluster_count: 0,
        }
    }

    /// Labels parallel to the clustered coordinates.
    #[must_use]
    pub fn labels(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Number of non-noise clusters.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Indices of the points labeled as noise.
    #[must_use]
    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_noise())
            .map(|(i, _)| i)
            .collect()
    }

    /// Member indices of every cluster, indexed by cluster id.
    #[must_use]
    pub fn member_indices(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.cluster_count];
        for (i, label) in self.labels.iter().enumerate() {
            if let Some(id) = label.cluster_id() {
                groups[id].push(i);
            }
        }
        groups
    }

    /// Materializes the non-noise clusters in id order from the
    /// coordinates this partition was computed from.
    ///
    /// # Errors
    ///
    /// Returns [`HotspotError::PartitionMismatch`] if `coords` does not
    /// have one entry per label.
    pub fn clusters(&self, coords: &[Coordinate]) -> Result<Vec<Cluster>, HotspotError> {
        if coords.len() != self.labels.len() {
            return Err(HotspotError::PartitionMismatch {
                labels: self.labels.len(),
                coordinates: coords.len(),
            });
        }

        Ok(self
            .member_indices()
            .into_iter()
            .enumerate()
            .map(|(id, indices)| Cluster {
                id,
                members: indices.into_iter().map(|i| coords[i]).collect(),
            })
            .collect())
    }
}

/// Partitions `coords` into density-connected clusters plus noise.
///
/// Cluster ids follow the input position of each cluster's first core
/// point, so identical input always yields identical labels.
///
/// # Errors
///
/// Returns [`HotspotError::InvalidConfig`] if `epsilon_km` is not a
/// positive finite number or `min_samples` is zero.
pub fn cluster(coords: &[Coordinate], config: &HotspotConfig) -> Result<Partition, HotspotError> {
    validate(config)?;

    if coords.is_empty() {
        return Ok(Partition::empty());
    }

    let neighborhoods = neighborhoods(coords, config);
    let is_core: Vec<bool> = neighborhoods
        .iter()
        .map(|n| n.len() >= config.min_samples)
        .collect();

    let mut assigned: Vec<Option<usize>> = vec![None; coords.len()];
    let mut cluster_count = 0;

    for seed in 0..coords.len() {
        if assigned[seed].is_some() || !is_core[seed] {
            continue;
        }

        let id = cluster_count;
        cluster_count += 1;
        assigned[seed] = Some(id);

        // Only core points are pushed, so every popped point expands.
        let mut stack = vec![seed];
        while let Some(current) = stack.pop() {
            for &neighbor in &neighborhoods[current] {
                if assigned[neighbor].is_none() {
                    assigned[neighbor] = Some(id);
                    if is_core[neighbor] {
                        stack.push(neighbor);
                    }
                }
            }
        }
    }

    let labels: Vec<ClusterLabel> = assigned
        .into_iter()
        .map(|a| a.map_or(ClusterLabel::Noise, ClusterLabel::Cluster))
        .collect();

    let partition = Partition {
        labels,
        cluster_count,
    };

    log::info!(
        "Clustered {} points into {} clusters ({} noise)",
        partition.len(),
        partition.cluster_count(),
        partition.noise_indices().len()
    );

    Ok(partition)
}

fn validate(config: &HotspotConfig) -> Result<(), HotspotError> {
    if !config.epsilon_km.is_finite() || config.epsilon_km <= 0.0 {
        return Err(HotspotError::InvalidConfig(format!(
            "epsilon_km must be a positive number, got {}",
            config.epsilon_km
        )));
    }
    if config.min_samples == 0 {
        return Err(HotspotError::InvalidConfig(
            "min_samples must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Sorted neighbor indices of every point, each point included in its own
/// neighborhood.
fn neighborhoods(coords: &[Coordinate], config: &HotspotConfig) -> Vec<Vec<usize>> {
    let points: Vec<Point<f64>> = coords.iter().copied().map(to_point).collect();

    let tree = RTree::bulk_load(
        coords
            .iter()
            .enumerate()
            .map(|(i, &coord)| IndexedVector::new(unit_vector(coord), i))
            .collect(),
    );

    let reach_m = config.epsilon_km.mul_add(1000.0, BOUNDARY_SLACK_M);
    let reach_radians = config.epsilon_radians() + BOUNDARY_SLACK_M / Haversine.radius();
    let max_squared_chord = chord_length(reach_radians).powi(2) * (1.0 + PREFILTER_SLACK);

    coords
        .iter()
        .zip(&points)
        .map(|(&coord, &point)| {
            let mut ids: Vec<usize> = tree
                .locate_within_distance(unit_vector(coord), max_squared_chord)
                .map(|entry| entry.data)
                .filter(|&j| Haversine.distance(point, points[j]) <= reach_m)
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use conflict_map_hotspot_models::KMS_PER_RADIAN;

    use super::*;

    fn config() -> HotspotConfig {
        HotspotConfig::default()
    }

    /// Xorshift stream of values in `[0, 1)`.
    fn unit_stream(mut state: u64) -> impl FnMut() -> f64 {
        move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            #[allow(clippy::cast_precision_loss)]
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            unit
        }
    }

    /// Deterministic pseudo-random coordinates around southern Peru.
    fn scattered(n: usize) -> Vec<Coordinate> {
        let mut next = unit_stream(0x2545_F491_4F6C_DD1D);
        (0..n)
            .map(|_| Coordinate::new(-16.0 + next() * 4.0, -74.0 + next() * 4.0))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_partition() {
        let partition = cluster(&[], &config()).unwrap();
        assert!(partition.is_empty());
        assert_eq!(partition.cluster_count(), 0);
        assert!(partition.clusters(&[]).unwrap().is_empty());
    }

    #[test]
    fn tight_group_and_far_outlier() {
        let coords = vec![
            Coordinate::new(-13.500, -71.900),
            Coordinate::new(-13.503, -71.905),
            Coordinate::new(-13.498, -71.897),
            Coordinate::new(-9.000, -75.000),
        ];
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 1);
        assert_eq!(partition.noise_indices(), vec![3]);
        assert_eq!(partition.member_indices(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn points_exactly_epsilon_apart_are_neighbors() {
        let epsilon_deg = (15.0 / KMS_PER_RADIAN).to_degrees();
        let coords = vec![
            Coordinate::new(0.0, 10.0),
            Coordinate::new(epsilon_deg, 10.0),
        ];
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 1);
        assert!(partition.noise_indices().is_empty());
    }

    #[test]
    fn points_just_beyond_epsilon_are_noise() {
        let beyond_deg = (15.01 / KMS_PER_RADIAN).to_degrees();
        let coords = vec![Coordinate::new(0.0, 10.0), Coordinate::new(beyond_deg, 10.0)];
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 0);
        assert_eq!(partition.noise_indices(), vec![0, 1]);
    }

    #[test]
    fn uses_great_circle_not_planar_distance() {
        // At 60°N a quarter degree of longitude is ~13.9 km on the sphere,
        // while a planar degree-based estimate would put it near 27.8 km.
        let coords = vec![Coordinate::new(60.0, 24.0), Coordinate::new(60.0, 24.25)];
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 1);
    }

    #[test]
    fn chains_through_core_points() {
        // Consecutive points 10 km apart along a meridian: every point is a
        // neighbor of the next, so the whole chain is one cluster even
        // though its ends are 40 km apart.
        let step = (10.0 / KMS_PER_RADIAN).to_degrees();
        let coords: Vec<Coordinate> = (0..5)
            .map(|i| Coordinate::new(-10.0 + f64::from(i) * step, -75.0))
            .collect();
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 1);
        assert_eq!(partition.member_indices()[0].len(), 5);
    }

    #[test]
    fn border_point_joins_cluster_without_being_core() {
        // With min_samples = 3, the middle point has three neighbors
        // (itself and both ends) but the ends only have two each.
        let step = (10.0 / KMS_PER_RADIAN).to_degrees();
        let coords = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(step, 0.0),
            Coordinate::new(2.0 * step, 0.0),
        ];
        let config = HotspotConfig {
            min_samples: 3,
            ..HotspotConfig::default()
        };
        let partition = cluster(&coords, &config).unwrap();
        assert_eq!(partition.cluster_count(), 1);
        assert_eq!(partition.member_indices(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn crosses_the_antimeridian() {
        let coords = vec![Coordinate::new(-17.0, 179.99), Coordinate::new(-17.0, -179.99)];
        let partition = cluster(&coords, &config()).unwrap();
        assert_eq!(partition.cluster_count(), 1);
    }

    #[test]
    fn every_point_lands_in_exactly_one_group() {
        let coords = scattered(300);
        let partition = cluster(&coords, &config()).unwrap();

        let mut seen = vec![0usize; coords.len()];
        for members in partition.member_indices() {
            for i in members {
                seen[i] += 1;
            }
        }
        for i in partition.noise_indices() {
            seen[i] += 1;
        }
        assert!(seen.iter().all(|&count| count == 1), "{seen:?}");
    }

    #[test]
    fn clusters_respect_min_samples() {
        let coords = scattered(300);
        for min_samples in [2, 3, 5] {
            let config = HotspotConfig {
                min_samples,
                ..HotspotConfig::default()
            };
            let partition = cluster(&coords, &config).unwrap();
            for group in partition.clusters(&coords).unwrap() {
                assert!(
                    group.len() >= min_samples,
                    "cluster {} has {} members with min_samples {min_samples}",
                    group.id,
                    group.len()
                );
            }
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let coords = scattered(200);
        let first = cluster(&coords, &config()).unwrap();
        let second = cluster(&coords, &config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_config() {
        let coords = vec![Coordinate::new(0.0, 0.0)];
        let zero_eps = HotspotConfig {
            epsilon_km: 0.0,
            ..HotspotConfig::default()
        };
        assert!(matches!(
            cluster(&coords, &zero_eps),
            Err(HotspotError::InvalidConfig(_))
        ));
        let zero_samples = HotspotConfig {
            min_samples: 0,
            ..HotspotConfig::default()
        };
        assert!(cluster(&coords, &zero_samples).is_err());
    }

    #[test]
    fn clusters_reject_foreign_coordinates() {
        let coords = vec![
            Coordinate::new(-13.500, -71.900),
            Coordinate::new(-13.503, -71.905),
        ];
        let partition = cluster(&coords, &config()).unwrap();
        assert!(matches!(
            partition.clusters(&coords[..1]),
            Err(HotspotError::PartitionMismatch {
                labels: 2,
                coordinates: 1
            })
        ));
    }

    #[test]
    fn tree_neighborhoods_match_exhaustive_search() {
        let mut next = unit_stream(0x9E37_79B9_7F4A_7C15);
        // Bands hugging both poles plus a strip straddling the antimeridian.
        let coords: Vec<Coordinate> = (0..400)
            .map(|i| match i % 3 {
                0 => Coordinate::new(89.0 + next(), next().mul_add(360.0, -180.0)),
                1 => Coordinate::new(-90.0 + next(), next().mul_add(360.0, -180.0)),
                _ => {
                    let lat = next().mul_add(2.0, -1.0);
                    let lon = next().mul_add(0.6, 179.7);
                    Coordinate::new(lat, if lon > 180.0 { lon - 360.0 } else { lon })
                }
            })
            .collect();

        let config = HotspotConfig {
            epsilon_km: 40.0,
            ..HotspotConfig::default()
        };
        let reach_m = config.epsilon_km.mul_add(1000.0, BOUNDARY_SLACK_M);
        let points: Vec<Point<f64>> = coords.iter().copied().map(to_point).collect();
        let exhaustive: Vec<Vec<usize>> = points
            .iter()
            .map(|&p| {
                (0..points.len())
                    .filter(|&j| Haversine.distance(p, points[j]) <= reach_m)
                    .collect()
            })
            .collect();

        assert_eq!(neighborhoods(&coords, &config), exhaustive);
    }
}
