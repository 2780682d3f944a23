#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Descriptive summaries and boundary joins for the conflict report.
//!
//! [`summary`] ranks departments and entities, counts active cases by
//! phase, and traces case flows across categorical columns.
//! [`boundaries`] reads department polygons and joins case counts onto
//! them for choropleth shading.

pub mod boundaries;
pub mod normalize;
pub mod summary;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The boundary file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The boundary file parsed but is not a `FeatureCollection`.
    #[error("Boundary file must be a FeatureCollection")]
    NotFeatureCollection,
}
