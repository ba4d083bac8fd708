//! Map viewport computation for a neighborhood.

use pizza_rat_neighborhood_models::{MapRegion, Neighborhood};

use crate::SpatialError;

/// Factor applied to the bounding box extents so the viewport frames the
/// neighborhood with a margin.
pub const REGION_PADDING: f64 = 1.2;

/// Axis-aligned bounds across every vertex of a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Midpoint on each axis as `(lat, lng)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Computes the unpadded bounding box of every polygon in `neighborhood`.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidNeighborhoodGeometry`] if the
/// neighborhood has no polygons, a polygon with fewer than three vertices,
/// or a non-finite coordinate.
pub fn bounding_box(neighborhood: &Neighborhood) -> Result<BoundingBox, SpatialError> {
    let invalid = |reason: String| SpatialError::InvalidNeighborhoodGeometry {
        name: neighborhood.name.clone(),
        reason,
    };

    if neighborhood.coordinates.is_empty() {
        return Err(invalid("no polygons".to_string()));
    }

    if let Some((index, polygon)) = neighborhood
        .coordinates
        .iter()
        .enumerate()
        .find(|(_, polygon)| polygon.len() < 3)
    {
        return Err(invalid(format!(
            "polygon {index} has {} vertices, need at least 3",
            polygon.len()
        )));
    }

    let mut bbox = BoundingBox {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lng: f64::INFINITY,
        max_lng: f64::NEG_INFINITY,
    };

    for &[lng, lat] in neighborhood.vertices() {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(invalid(format!("non-finite vertex [{lng}, {lat}]")));
        }
        bbox.min_lat = bbox.min_lat.min(lat);
        bbox.max_lat = bbox.max_lat.max(lat);
        bbox.min_lng = bbox.min_lng.min(lng);
        bbox.max_lng = bbox.max_lng.max(lng);
    }

    Ok(bbox)
}

/// Computes the map viewport framing `neighborhood`.
///
/// The center is the midpoint of the bounding box and each span is the
/// bounding box extent times [`REGION_PADDING`].
///
/// # Errors
///
/// Returns [`SpatialError::InvalidNeighborhoodGeometry`] for degenerate
/// geometry (see [`bounding_box`]).
pub fn calculate_neighborhood_region(
    neighborhood: &Neighborhood,
) -> Result<MapRegion, SpatialError> {
    let bbox = bounding_box(neighborhood)?;
    let (center_latitude, center_longitude) = bbox.center();

    Ok(MapRegion {
        center_latitude,
        center_longitude,
        latitude_delta: (bbox.max_lat - bbox.min_lat) * REGION_PADDING,
        longitude_delta: (bbox.max_lng - bbox.min_lng) * REGION_PADDING,
    })
}
