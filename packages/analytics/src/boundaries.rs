//! Department boundaries and the choropleth join.

use std::collections::{BTreeMap, BTreeSet};

use conflict_map_analytics_models::{BoundaryConfig, BoundaryRegion, ChoroplethEntry, LabelCount};
use geojson::{Feature, GeoJson, JsonValue};

use crate::AnalyticsError;
use crate::normalize::normalize_department;

/// Reads `(id, department)` pairs from a boundary `FeatureCollection`.
///
/// Features missing either configured property are skipped with a
/// warning.
///
/// # Errors
///
/// Returns [`AnalyticsError::GeoJson`] if `geojson_str` does not parse, or
/// [`AnalyticsError::NotFeatureCollection`] if it is not a collection.
pub fn load_boundary_regions(
    geojson_str: &str,
    config: &BoundaryConfig,
) -> Result<Vec<BoundaryRegion>, AnalyticsError> {
    let GeoJson::FeatureCollection(collection) = geojson_str.parse::<GeoJson>()? else {
        return Err(AnalyticsError::NotFeatureCollection);
    };

    let regions: Vec<BoundaryRegion> = collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let region = region_from_feature(feature, config);
            if region.is_none() {
                log::warn!(
                    "Skipping boundary feature {i}: missing '{}' or '{}'",
                    config.id_property,
                    config.name_property
                );
            }
            region
        })
        .collect();

    log::info!("Loaded {} boundary regions", regions.len());

    Ok(regions)
}

fn region_from_feature(feature: &Feature, config: &BoundaryConfig) -> Option<BoundaryRegion> {
    let id = property_string(feature.property(&config.id_property)?)?;
    let name = property_string(feature.property(&config.name_property)?)?;

    Some(BoundaryRegion {
        id,
        department: normalize_department(&name),
    })
}

/// Accepts string or numeric property values.
fn property_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Left-joins department case counts onto every region.
///
/// `counts` must be keyed by normalized department name, as produced by
/// [`crate::summary::count_by_department`]. Regions without cases get a
/// `None` count; departments matching no region are logged.
#[must_use]
pub fn choropleth(regions: &[BoundaryRegion], counts: &[LabelCount]) -> Vec<ChoroplethEntry> {
    let by_department: BTreeMap<&str, u64> = counts
        .iter()
        .map(|c| (c.label.as_str(), c.count))
        .collect();

    let known: BTreeSet<&str> = regions.iter().map(|r| r.department.as_str()).collect();
    for count in counts {
        if !known.contains(count.label.as_str()) {
            log::warn!(
                "{} cases in '{}' match no boundary region",
                count.count,
                count.label
            );
        }
    }

    regions
        .iter()
        .map(|region| ChoroplethEntry {
            id: region.id.clone(),
            department: region.department.clone(),
            count: by_department.get(region.department.as_str()).copied(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "FIRST_IDDP": "03", "NOMBDEP": "APURÍMAC" },
                "geometry": { "type": "Point", "coordinates": [-72.9, -14.0] }
            },
            {
                "type": "Feature",
                "properties": { "FIRST_IDDP": 8, "NOMBDEP": "CUSCO" },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "FIRST_IDDP": "15", "NOMBDEP": "LIMA" },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "NOMBDEP": "SIN ID" },
                "geometry": null
            }
        ]
    }"#;

    fn count(label: &str, count: u64) -> LabelCount {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn loads_regions_with_normalized_names() {
        let regions = load_boundary_regions(BOUNDARIES, &BoundaryConfig::default()).unwrap();
        assert_eq!(
            regions,
            vec![
                BoundaryRegion {
                    id: "03".to_string(),
                    department: "apurimac".to_string()
                },
                BoundaryRegion {
                    id: "8".to_string(),
                    department: "cusco".to_string()
                },
                BoundaryRegion {
                    id: "15".to_string(),
                    department: "lima".to_string()
                },
            ]
        );
    }

    #[test]
    fn custom_property_keys() {
        let input = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"code":"X1","name":"Piura"},"geometry":null}
        ]}"#;
        let config = BoundaryConfig {
            id_property: "code".to_string(),
            name_property: "name".to_string(),
        };
        let regions = load_boundary_regions(input, &config).unwrap();
        assert_eq!(regions[0].id, "X1");
        assert_eq!(regions[0].department, "piura");
    }

    #[test]
    fn rejects_non_collection() {
        let input = r#"{"type":"Point","coordinates":[0.0,0.0]}"#;
        let err = load_boundary_regions(input, &BoundaryConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFeatureCollection));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = load_boundary_regions("not json", &BoundaryConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::GeoJson(_)));
    }

    #[test]
    fn choropleth_is_a_left_join() {
        let regions = load_boundary_regions(BOUNDARIES, &BoundaryConfig::default()).unwrap();
        let counts = vec![count("apurimac", 12), count("cusco", 9), count("atlantis", 1)];
        let entries = choropleth(&regions, &counts);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].count, Some(12));
        assert_eq!(entries[1].count, Some(9));
        assert_eq!(entries[2].department, "lima");
        assert_eq!(entries[2].count, None);
    }
}
