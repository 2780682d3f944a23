#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate, cluster, and hotspot types for conflict hotspot detection.
//!
//! These types flow through the detection pipeline: raw [`IncidentPoint`]s
//! are sanitized into [`Coordinate`]s, grouped into [`Cluster`]s by
//! density, and each cluster is reduced to one [`RepresentativePoint`]
//! that the map renderer draws as a hotspot marker.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers. Converts angular distances in radians
/// to kilometers and back.
pub const KMS_PER_RADIAN: f64 = 6371.0088;

/// Default neighborhood radius in kilometers.
pub const DEFAULT_EPSILON_KM: f64 = 15.0;

/// Default minimum neighborhood size (including the point itself) for a
/// point to be a core point.
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// Default marker size attached to every representative point.
pub const DEFAULT_MARKER_SIZE: f64 = 6.0;

/// An incident record as handed over by ingestion.
///
/// Either coordinate may be missing; only points with both present take
/// part in clustering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPoint {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Opaque case identifier carried through for diagnostics.
    pub case_id: Option<String>,
}

impl IncidentPoint {
    /// Creates a point with both coordinates present and no case id.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            case_id: None,
        }
    }

    /// Creates a point with no coordinates.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            latitude: None,
            longitude: None,
            case_id: None,
        }
    }
}

impl From<Coordinate> for IncidentPoint {
    fn from(coord: Coordinate) -> Self {
        Self::new(coord.latitude, coord.longitude)
    }
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `(latitude, longitude)` converted to radians.
    #[must_use]
    pub fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

/// Cluster assignment for a single sanitized point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterLabel {
    /// Reachable from no core point.
    Noise,
    /// Member of the cluster with this id. Ids start at 0 and are dense.
    Cluster(usize),
}

impl ClusterLabel {
    /// Numeric value used for noise wherever labels are flattened to
    /// integers (exports, tables).
    pub const NOISE_RAW: i64 = -1;

    /// Returns the cluster id, or `None` for noise.
    #[must_use]
    pub const fn cluster_id(self) -> Option<usize> {
        match self {
            Self::Noise => None,
            Self::Cluster(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_noise(self) -> bool {
        matches!(self, Self::Noise)
    }

    /// Flattens the label to an integer, [`Self::NOISE_RAW`] for noise.
    #[must_use]
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Noise => Self::NOISE_RAW,
            Self::Cluster(id) => i64::try_from(id).unwrap_or(i64::MAX),
        }
    }
}

/// A density-connected group of sanitized points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster id as assigned by the clusterer.
    pub id: usize,
    /// Member coordinates in input order.
    pub members: Vec<Coordinate>,
}

impl Cluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The member of a cluster nearest to its centroid, as drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepresentativePoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Marker size used by the renderer. Constant across points.
    pub size: f64,
}

impl RepresentativePoint {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Tunable parameters of the hotspot pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Maximum great-circle distance, in kilometers, for two points to be
    /// neighbors.
    pub epsilon_km: f64,
    /// Minimum neighborhood size, including the point itself, for a core
    /// point.
    pub min_samples: usize,
    /// Size attribute attached to every representative point.
    pub marker_size: f64,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            epsilon_km: DEFAULT_EPSILON_KM,
            min_samples: DEFAULT_MIN_SAMPLES,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

impl HotspotConfig {
    /// Neighborhood radius as an angle on the unit sphere.
    #[must_use]
    pub fn epsilon_radians(&self) -> f64 {
        self.epsilon_km / KMS_PER_RADIAN
    }
}

/// Final output of a hotspot detection run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotReport {
    /// One point per non-noise cluster, in cluster id order.
    pub representatives: Vec<RepresentativePoint>,
    /// Member count of each cluster, parallel to `representatives`.
    pub cluster_sizes: Vec<usize>,
    /// Number of sanitized points labeled as noise.
    pub noise_count: usize,
    /// Number of incident points received.
    pub input_count: usize,
    /// Number of incident points that survived sanitization.
    pub sanitized_count: usize,
}

impl HotspotReport {
    /// A report for a run where no point had usable coordinates.
    #[must_use]
    pub const fn empty(input_count: usize) -> Self {
        Self {
            representatives: Vec::new(),
            cluster_sizes: Vec::new(),
            noise_count: 0,
            input_count,
            sanitized_count: 0,
        }
    }

    /// Number of hotspots found.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.representatives.len()
    }
}
