#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood geofencing and spatial filtering.
//!
//! Provides the even-odd ray-casting point-in-polygon test, filtering of
//! places and user locations by neighborhood, map viewport computation for
//! a neighborhood, great-circle distance helpers, and an R-tree backed
//! lookup that assigns a coordinate to its neighborhood.
//!
//! Every function here is pure and synchronous. Coordinates inside
//! polygons are `[longitude, latitude]`; point records expose
//! [`LatLng`](pizza_rat_neighborhood_models::LatLng) and are converted at
//! the boundary of each call.

pub mod distance;
pub mod filter;
pub mod index;
pub mod polygon;
pub mod region;

pub use distance::{filter_within_radius, haversine_miles};
pub use filter::{
    filter_places_by_neighborhood, find_containing_neighborhood, is_point_in_neighborhood,
};
pub use index::{MatchKind, NeighborhoodIndex, NeighborhoodMatch};
pub use polygon::is_point_in_polygon;
pub use region::{BoundingBox, REGION_PADDING, bounding_box, calculate_neighborhood_region};

use thiserror::Error;

/// Errors that can occur during spatial computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// The neighborhood has no polygons, a polygon with fewer than three
    /// vertices, or non-finite coordinates.
    #[error("Invalid geometry for neighborhood '{name}': {reason}")]
    InvalidNeighborhoodGeometry {
        /// Name of the offending neighborhood.
        name: String,
        /// What is wrong with its geometry.
        reason: String,
    },
}
