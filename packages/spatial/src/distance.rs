//! Great-circle distance helpers.

use pizza_rat_neighborhood_models::{GeoPoint, LatLng};

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two coordinates, in miles.
#[must_use]
pub fn haversine_miles(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Keeps the points within `radius_miles` of `center`, in input order.
#[must_use]
pub fn filter_within_radius<P: GeoPoint>(
    points: &[P],
    center: LatLng,
    radius_miles: f64,
) -> Vec<&P> {
    points
        .iter()
        .filter(|point| haversine_miles(center, point.location()) <= radius_miles)
        .collect()
}

#[cfg(test)]
mod tests {
    use pizza_rat_neighborhood_models::PlacePoint;

    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let point = LatLng::new(40.7128, -74.0060);
        assert!(haversine_miles(point, point).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_69_miles() {
        let distance = haversine_miles(LatLng::new(40.0, -74.0), LatLng::new(41.0, -74.0));
        assert!((distance - 69.09).abs() < 0.1, "got {distance}");
    }

    #[test]
    fn manhattan_to_brooklyn_distance() {
        // Times Square to Grand Army Plaza: roughly 5.5 miles.
        let times_square = LatLng::new(40.7580, -73.9855);
        let grand_army = LatLng::new(40.6745, -73.9701);
        let distance = haversine_miles(times_square, grand_army);
        assert!((5.0..6.5).contains(&distance), "got {distance}");
        assert!((haversine_miles(grand_army, times_square) - distance).abs() < 1e-9);
    }

    #[test]
    fn radius_filter_keeps_nearby_places_in_order() {
        let center = LatLng::new(40.7200, -73.9500);
        let places = vec![
            PlacePoint {
                id: "far".to_string(),
                name: String::new(),
                location: LatLng::new(40.8500, -73.9500),
            },
            PlacePoint {
                id: "near-b".to_string(),
                name: String::new(),
                location: LatLng::new(40.7250, -73.9450),
            },
            PlacePoint {
                id: "near-a".to_string(),
                name: String::new(),
                location: LatLng::new(40.7150, -73.9550),
            },
        ];

        let nearby = filter_within_radius(&places, center, 2.0);
        let ids: Vec<&str> = nearby.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["near-b", "near-a"]);
    }
}
