#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Descriptive summary and choropleth result types for the conflict
//! report.
//!
//! Everything here is plain data handed to the chart renderer, serialized
//! as camelCase JSON.

use conflict_map_conflict_models::{ACTIVE_STATUS, CaseDimension};
use serde::{Deserialize, Serialize};

/// Default number of rows in a ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// Number of cases sharing a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Department, entity, or phase name.
    pub label: String,
    /// Number of cases.
    pub count: u64,
}

/// Number of cases following one path through the categorical dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFlow {
    /// One value per requested dimension, in dimension order.
    pub path: Vec<String>,
    /// Number of cases.
    pub count: u64,
}

/// All category flows for a set of dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub dimensions: Vec<CaseDimension>,
    /// Axis labels, parallel to `dimensions`.
    pub labels: Vec<String>,
    pub flows: Vec<CategoryFlow>,
}

/// Descriptive summary of a case table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    /// Number of cases summarized.
    pub total_cases: u64,
    /// Departments with the most cases, descending.
    pub top_departments: Vec<LabelCount>,
    /// Entities involved in the most cases, descending.
    pub top_entities: Vec<LabelCount>,
    /// Active cases per conflict phase, ascending.
    pub active_by_phase: Vec<LabelCount>,
    /// Case flows across status, phase, violence, and dialogue.
    pub flows: FlowSummary,
}

/// Settings for [`CaseSummary`] generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Rows kept in each ranking.
    pub top_n: usize,
    /// Status value that marks a case as active.
    pub active_status: String,
    /// Dimensions traced by the flow summary.
    pub flow_dimensions: Vec<CaseDimension>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            active_status: ACTIVE_STATUS.to_string(),
            flow_dimensions: CaseDimension::all().to_vec(),
        }
    }
}

/// Property keys identifying regions in a boundary `GeoJSON` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Property holding the region identifier.
    pub id_property: String,
    /// Property holding the region (department) name.
    pub name_property: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            id_property: "FIRST_IDDP".to_string(),
            name_property: "NOMBDEP".to_string(),
        }
    }
}

/// An administrative region read from a boundary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRegion {
    pub id: String,
    /// Normalized department name used for joining.
    pub department: String,
}

/// A region with its case count for choropleth shading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethEntry {
    pub id: String,
    pub department: String,
    /// `None` when no case falls in this region.
    pub count: Option<u64>,
}
