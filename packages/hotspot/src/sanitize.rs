//! Coordinate sanitization.
//!
//! Keeps only incidents that carry both coordinates. Missing coordinates
//! are an expected data-quality condition and are skipped; coordinates
//! that are present but impossible are reported to the caller.

use conflict_map_hotspot_models::{Coordinate, IncidentPoint};

use crate::HotspotError;

/// Filters `points` down to validated coordinates, preserving input order.
///
/// # Errors
///
/// Returns [`HotspotError::InvalidCoordinate`] for the first point whose
/// coordinates are both present but non-finite or out of range.
pub fn sanitize(points: &[IncidentPoint]) -> Result<Vec<Coordinate>, HotspotError> {
    let mut coords = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        let (Some(latitude), Some(longitude)) = (point.latitude, point.longitude) else {
            log::debug!(
                "Skipping incident {index} ({}) with missing coordinates",
                point.case_id.as_deref().unwrap_or("unnamed")
            );
            continue;
        };

        if !is_valid(latitude, longitude) {
            return Err(HotspotError::InvalidCoordinate {
                index,
                latitude,
                longitude,
            });
        }

        coords.push(Coordinate::new(latitude, longitude));
    }

    Ok(coords)
}

fn is_valid(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}
