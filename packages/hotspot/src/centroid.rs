//! Representative point selection.
//!
//! The centroid is a planar mean of the member coordinates. Clusters are a
//! few tens of kilometers across at most, where the flat approximation
//! stays close to the spherical mean. The representative itself is always
//! an actual member: the one with the shortest great-circle distance to
//! that centroid.

use conflict_map_hotspot_models::{Cluster, Coordinate};
use geo::{Centroid, Distance as _, Haversine, MultiPoint};

use crate::sphere::to_point;

/// Planar centroid of `members`, or `None` when there are none.
#[must_use]
pub fn planar_centroid(members: &[Coordinate]) -> Option<Coordinate> {
    let points: MultiPoint<f64> = members.iter().copied().map(to_point).collect();

    points
        .centroid()
        .map(|centroid| Coordinate::new(centroid.y(), centroid.x()))
}

/// Picks the member of `cluster` nearest to its centroid.
///
/// Ties go to the member enumerated first. Returns `None` only for an
/// empty cluster.
#[must_use]
pub fn representative(cluster: &Cluster) -> Option<Coordinate> {
    let centroid = to_point(planar_centroid(&cluster.members)?);

    let mut best: Option<(Coordinate, f64)> = None;
    for &member in &cluster.members {
        let distance = Haversine.distance(to_point(member), centroid);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((member, distance)),
        }
    }

    best.map(|(member, distance)| {
        log::debug!(
            "Cluster {} ({} members): representative ({}, {}) is {distance:.1} m from centroid",
            cluster.id,
            cluster.len(),
            member.latitude,
            member.longitude
        );
        member
    })
}
