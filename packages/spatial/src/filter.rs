//! Filtering of places and user locations by neighborhood.

use pizza_rat_neighborhood_models::{GeoPoint, LatLng, Neighborhood};

use crate::polygon::is_point_in_polygon;

/// Returns whether `location` falls inside any of the neighborhood's
/// polygons.
///
/// Stops at the first containing polygon.
#[must_use]
pub fn is_point_in_neighborhood(location: LatLng, neighborhood: &Neighborhood) -> bool {
    let point = location.to_position();
    neighborhood
        .coordinates
        .iter()
        .any(|polygon| is_point_in_polygon(point, polygon))
}

/// Keeps the points located inside `neighborhood`.
///
/// A point counts when it lies in any one of the neighborhood's polygons.
/// Input order is preserved and each input point appears at most once.
#[must_use]
pub fn filter_places_by_neighborhood<'a, P: GeoPoint>(
    points: &'a [P],
    neighborhood: &Neighborhood,
) -> Vec<&'a P> {
    let matched: Vec<&P> = points
        .iter()
        .filter(|point| is_point_in_neighborhood(point.location(), neighborhood))
        .collect();

    log::debug!(
        "{} of {} points inside neighborhood '{}'",
        matched.len(),
        points.len(),
        neighborhood.name
    );

    matched
}

/// Finds the first neighborhood, in catalog order, containing `location`.
#[must_use]
pub fn find_containing_neighborhood(
    neighborhoods: &[Neighborhood],
    location: LatLng,
) -> Option<&Neighborhood> {
    neighborhoods
        .iter()
        .find(|neighborhood| is_point_in_neighborhood(location, neighborhood))
}
