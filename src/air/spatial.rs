//! Nearest-neighbor join over small geolocated candidate sets.
//!
//! One primitive serves both uses: attributing a route point to its nearest
//! air-quality sensor and picking the nearest destination of a given type.
//! Candidate sets are small, so a linear scan beats building an index per
//! request.

use crate::model::GeoPoint;

/// Anything with a fixed coordinate that can enter a spatial join.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

/// Returns the nearest candidate within `max_distance_km` of `point`,
/// together with its distance, or `None` when every candidate is farther.
///
/// Ties go to the first candidate in iteration order (the minimum is
/// tracked strictly).
pub fn nearest_within<'a, T: Located>(
    point: GeoPoint,
    candidates: &'a [T],
    max_distance_km: f64,
) -> Option<(&'a T, f64)> {
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;

    for candidate in candidates {
        let distance = point.distance_km(candidate.location());
        if distance < min_distance && distance <= max_distance_km {
            min_distance = distance;
            nearest = Some(candidate);
        }
    }

    nearest.map(|candidate| (candidate, min_distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker {
        id: u32,
        location: GeoPoint,
    }

    impl Located for Marker {
        fn location(&self) -> GeoPoint {
            self.location
        }
    }

    const KM_PER_DEGREE_LAT: f64 = 111.195;

    fn marker_at_km(id: u32, origin: GeoPoint, km_north: f64) -> Marker {
        Marker {
            id,
            location: GeoPoint {
                lat: origin.lat + km_north / KM_PER_DEGREE_LAT,
                lng: origin.lng,
            },
        }
    }

    #[test]
    fn picks_the_closest_candidate_within_radius() {
        let origin = GeoPoint { lat: 3.44, lng: -76.54 };
        let candidates = vec![
            marker_at_km(5, origin, 5.0),
            marker_at_km(1, origin, 1.0),
            marker_at_km(2, origin, 2.0),
        ];

        let (hit, distance) = nearest_within(origin, &candidates, 3.0).unwrap();
        assert_eq!(hit.id, 1);
        assert!((distance - 1.0).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn returns_none_when_all_candidates_exceed_the_radius() {
        let origin = GeoPoint { lat: 3.44, lng: -76.54 };
        let candidates = vec![
            marker_at_km(1, origin, 1.0),
            marker_at_km(2, origin, 2.0),
            marker_at_km(5, origin, 5.0),
        ];

        assert!(nearest_within(origin, &candidates, 0.5).is_none());
    }

    #[test]
    fn first_candidate_wins_ties() {
        let origin = GeoPoint { lat: 3.44, lng: -76.54 };
        // Symmetric north/south offsets, identical distance.
        let candidates = vec![
            marker_at_km(10, origin, 1.0),
            marker_at_km(20, origin, -1.0),
        ];

        let (hit, _) = nearest_within(origin, &candidates, 3.0).unwrap();
        assert_eq!(hit.id, 10);
    }

    #[test]
    fn empty_candidate_set_yields_none() {
        let origin = GeoPoint { lat: 3.44, lng: -76.54 };
        let candidates: Vec<Marker> = Vec::new();
        assert!(nearest_within(origin, &candidates, 10.0).is_none());
    }
}
