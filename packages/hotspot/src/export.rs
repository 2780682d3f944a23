//! `GeoJSON` export for the map renderer.

use conflict_map_hotspot_models::{Coordinate, RepresentativePoint};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::cluster::Partition;

/// One `Point` feature per hotspot, carrying its marker `size`.
#[must_use]
pub fn hotspots_to_geojson(points: &[RepresentativePoint]) -> FeatureCollection {
    let features = points
        .iter()
        .map(|point| {
            let mut properties = JsonObject::new();
            properties.insert("size".to_string(), JsonValue::from(point.size));
            point_feature(point.coordinate(), properties)
        })
        .collect();

    collection(features)
}

/// One `Point` feature per clustered coordinate with its numeric
/// `cluster` label (`-1` for noise).
#[must_use]
pub fn labeled_incidents_to_geojson(
    coords: &[Coordinate],
    partition: &Partition,
) -> FeatureCollection {
    let features = coords
        .iter()
        .zip(partition.labels())
        .map(|(&coord, label)| {
            let mut properties = JsonObject::new();
            properties.insert("cluster".to_string(), JsonValue::from(label.to_raw()));
            point_feature(coord, properties)
        })
        .collect();

    collection(features)
}

fn point_feature(coord: Coordinate, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            coord.longitude,
            coord.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

const fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
