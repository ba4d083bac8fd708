#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood boundary and geographic point types.
//!
//! Defines the normalized [`Neighborhood`] record produced from a boundary
//! dataset, the narrow [`GeoPoint`] capability that places and user
//! locations expose to spatial filtering, the [`MapRegion`] viewport
//! descriptor, and the TOML schema for boundary dataset sources.
//!
//! All polygon vertices are `[longitude, latitude]` pairs. Nothing in this
//! workspace ever stores them the other way around.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single polygon vertex as `[longitude, latitude]`.
pub type Position = [f64; 2];

/// A polygon ring: vertices in traversal order, implicitly closed from the
/// last vertex back to the first.
pub type Ring = Vec<Position>;

/// Stable identifier of a neighborhood within its source dataset.
///
/// Datasets use either numeric or string feature IDs, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NeighborhoodId {
    /// Numeric feature ID.
    Int(i64),
    /// String feature ID (e.g. an NTA code like `"BK76"`).
    Text(String),
}

impl fmt::Display for NeighborhoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NeighborhoodId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for NeighborhoodId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A named polygonal neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Identifier, stable per source dataset entry.
    pub id: NeighborhoodId,
    /// Human-readable name (e.g. "Greenpoint"). Primary lookup key.
    pub name: String,
    /// Enclosing borough (e.g. "Brooklyn").
    pub borough: String,
    /// Short display code.
    pub abbreviation: String,
    /// One outer ring per constituent polygon. Interior holes are not kept.
    pub coordinates: Vec<Ring>,
}

impl Neighborhood {
    /// Iterates every vertex of every polygon.
    pub fn vertices(&self) -> impl Iterator<Item = &Position> {
        self.coordinates.iter().flatten()
    }
}

/// A latitude/longitude pair as reported by places and device location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a new coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts to polygon vertex order, `[lng, lat]`.
    #[must_use]
    pub const fn to_position(self) -> Position {
        [self.lng, self.lat]
    }
}

/// Anything with an identifier and a location can be spatially filtered.
///
/// Places and user locations carry far more data than this; filtering only
/// ever looks at this projection.
pub trait GeoPoint {
    /// Identifier of the underlying record.
    fn id(&self) -> &str;

    /// Current location of the record.
    fn location(&self) -> LatLng;
}

impl<T: GeoPoint + ?Sized> GeoPoint for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn location(&self) -> LatLng {
        (**self).location()
    }
}

/// A pizza place as seen by spatial filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePoint {
    /// Place identifier from the places provider.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Place location.
    pub location: LatLng,
}

impl GeoPoint for PlacePoint {
    fn id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> LatLng {
        self.location
    }
}

/// A transient user location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    /// User identifier.
    pub user_id: String,
    /// Last reported location.
    pub location: LatLng,
}

impl GeoPoint for UserLocation {
    fn id(&self) -> &str {
        &self.user_id
    }

    fn location(&self) -> LatLng {
        self.location
    }
}

/// A map viewport: center point plus the span shown on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
    /// Latitude of the viewport center.
    pub center_latitude: f64,
    /// Longitude of the viewport center.
    pub center_longitude: f64,
    /// Span height in degrees.
    pub latitude_delta: f64,
    /// Span width in degrees.
    pub longitude_delta: f64,
}

/// A neighborhood boundary dataset source, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Unique source identifier (e.g., `"nyc_nta_sample"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// City the dataset covers.
    pub city: String,
    /// Where the `GeoJSON` document lives.
    pub location: DatasetLocation,
    /// Property names to read from each feature.
    #[serde(default)]
    pub fields: NeighborhoodFieldMapping,
}

impl DatasetSource {
    /// Returns the source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creates a source reading a `GeoJSON` file with the default NTA field
    /// names.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            name: path.display().to_string(),
            city: String::new(),
            location: DatasetLocation::File { path },
            fields: NeighborhoodFieldMapping::default(),
        }
    }
}

/// Where a boundary dataset is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetLocation {
    /// A `GeoJSON` asset compiled into the binary.
    Bundled {
        /// Asset name in the bundled dataset table.
        asset: String,
    },
    /// A `GeoJSON` file on disk.
    File {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Feature property names for the neighborhood attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodFieldMapping {
    /// Property holding the neighborhood name.
    #[serde(default = "default_name_field")]
    pub name: String,
    /// Property holding the borough name.
    #[serde(default = "default_borough_field")]
    pub borough: String,
    /// Property holding the short code.
    #[serde(default = "default_abbreviation_field")]
    pub abbreviation: String,
}

impl Default for NeighborhoodFieldMapping {
    fn default() -> Self {
        Self {
            name: default_name_field(),
            borough: default_borough_field(),
            abbreviation: default_abbreviation_field(),
        }
    }
}

fn default_name_field() -> String {
    "NTAName".to_string()
}

fn default_borough_field() -> String {
    "BoroName".to_string()
}

fn default_abbreviation_field() -> String {
    "NTAAbbrev".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lat_lng_converts_to_lng_lat_position() {
        let location = LatLng::new(40.73, -73.95);
        assert_eq!(location.to_position(), [-73.95, 40.73]);
    }

    #[test]
    fn neighborhood_id_accepts_numbers_and_strings() {
        let int: NeighborhoodId = serde_json::from_str("42").unwrap();
        assert_eq!(int, NeighborhoodId::Int(42));

        let text: NeighborhoodId = serde_json::from_str("\"BK76\"").unwrap();
        assert_eq!(text, NeighborhoodId::Text("BK76".to_string()));
        assert_eq!(text.to_string(), "BK76");
    }

    #[test]
    fn map_region_serializes_camel_case() {
        let region = MapRegion {
            center_latitude: 40.71,
            center_longitude: -73.95,
            latitude_delta: 0.024,
            longitude_delta: 0.024,
        };
        let json = serde_json::to_value(region).unwrap();
        assert!(json.get("centerLatitude").is_some());
        assert!(json.get("longitudeDelta").is_some());
    }

    #[test]
    fn field_mapping_defaults_to_nta_properties() {
        let source: DatasetSource = toml::de::from_str(
            r#"
            id = "test"
            name = "Test"
            city = "New York"

            [location]
            type = "file"
            path = "nta.geojson"
            "#,
        )
        .unwrap();

        assert_eq!(source.fields, NeighborhoodFieldMapping::default());
        assert_eq!(source.fields.name, "NTAName");
        assert!(matches!(source.location, DatasetLocation::File { .. }));
    }

    #[test]
    fn borrowed_points_are_geo_points() {
        let place = PlacePoint {
            id: "p1".to_string(),
            name: "Joe's".to_string(),
            location: LatLng::new(40.73, -73.95),
        };
        let borrowed: &PlacePoint = &place;
        assert_eq!(GeoPoint::id(&borrowed), "p1");
        assert_eq!(GeoPoint::location(&borrowed), place.location);
    }
}
