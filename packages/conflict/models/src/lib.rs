#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Mining conflict case records and categorical dimensions.
//!
//! A [`ConflictCase`] mirrors one row of the monthly social-conflict
//! report. Column names follow the source dataset so records deserialize
//! straight from its exports.

use conflict_map_hotspot_models::IncidentPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Status value marking a case as currently active.
pub const ACTIVE_STATUS: &str = "Activo";

/// One reported social conflict.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictCase {
    /// Case name as published in the report.
    #[serde(rename = "caso", default)]
    pub case_name: String,
    /// Case status (e.g. "Activo", "Latente").
    #[serde(rename = "estado", default)]
    pub status: String,
    /// Conflict phase (e.g. "Diálogo", "Escalamiento").
    #[serde(rename = "fase", default)]
    pub phase: String,
    /// Company or entity involved.
    #[serde(rename = "empresa", default)]
    pub entity: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "provincia", default)]
    pub province: String,
    #[serde(rename = "distrito", default)]
    pub district: String,
    #[serde(rename = "lat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", default)]
    pub longitude: Option<f64>,
    /// Whether violence was reported.
    #[serde(rename = "vio_if", default)]
    pub violence: String,
    /// Whether a dialogue process took place.
    #[serde(rename = "dial_if", default)]
    pub dialogue: String,
}

impl ConflictCase {
    /// Converts this case into an incident point for hotspot detection,
    /// carrying the case name as its identifier.
    #[must_use]
    pub fn incident_point(&self) -> IncidentPoint {
        IncidentPoint {
            latitude: self.latitude,
            longitude: self.longitude,
            case_id: Some(self.case_name.clone()).filter(|name| !name.is_empty()),
        }
    }

    /// Returns `true` if this case's status equals `active_status`,
    /// ignoring surrounding whitespace and ASCII case.
    #[must_use]
    pub fn has_status(&self, active_status: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(active_status.trim())
    }
}

/// Categorical columns used to trace case flows between states.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseDimension {
    /// Case status
    Status,
    /// Conflict phase
    Phase,
    /// Violence reported
    Violence,
    /// Dialogue held
    Dialogue,
}

impl CaseDimension {
    /// Returns all variants in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Status, Self::Phase, Self::Violence, Self::Dialogue]
    }

    /// Human-readable axis label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "Estado del Caso",
            Self::Phase => "Fase",
            Self::Violence => "Hubo violencia",
            Self::Dialogue => "Hubo diálogo",
        }
    }

    /// Extracts this dimension's value from a case.
    #[must_use]
    pub fn value(self, case: &ConflictCase) -> &str {
        match self {
            Self::Status => &case.status,
            Self::Phase => &case.phase,
            Self::Violence => &case.violence,
            Self::Dialogue => &case.dialogue,
        }
    }
}
