//! Normalizes raw `GeoJSON` features into [`Neighborhood`] values.
//!
//! Uses the source's [`NeighborhoodFieldMapping`] to read the name,
//! borough, and abbreviation from each feature's properties. Only the outer
//! ring of each polygon is kept.

use pizza_rat_neighborhood_models::{
    Neighborhood, NeighborhoodFieldMapping, NeighborhoodId, Position, Ring,
};
use serde_json::Value;

use crate::NeighborhoodError;

/// Parses a `GeoJSON` `FeatureCollection` into neighborhoods.
///
/// Never fails: a document without a `features` array is logged and yields
/// an empty list. Use [`try_parse_neighborhood_data`] to get the error.
#[must_use]
pub fn parse_neighborhood_data(
    raw: &Value,
    fields: &NeighborhoodFieldMapping,
) -> Vec<Neighborhood> {
    try_parse_neighborhood_data(raw, fields).unwrap_or_else(|e| {
        log::error!("Invalid GeoJSON data structure: {e}");
        Vec::new()
    })
}

/// Parses a `GeoJSON` `FeatureCollection` into neighborhoods.
///
/// Skips features with a missing name or no usable polygon.
///
/// # Errors
///
/// Returns [`NeighborhoodError::MalformedDataset`] if `raw` has no
/// `features` array.
pub fn try_parse_neighborhood_data(
    raw: &Value,
    fields: &NeighborhoodFieldMapping,
) -> Result<Vec<Neighborhood>, NeighborhoodError> {
    let features = raw
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| NeighborhoodError::MalformedDataset {
            message: "No features array in GeoJSON document".to_string(),
        })?;

    let neighborhoods: Vec<Neighborhood> = features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| normalize_feature(index, feature, fields))
        .collect();

    if neighborhoods.len() < features.len() {
        log::warn!(
            "Skipped {} of {} features without a name or usable geometry",
            features.len() - neighborhoods.len(),
            features.len()
        );
    }

    Ok(neighborhoods)
}

/// Normalizes a single `GeoJSON` feature.
fn normalize_feature(
    index: usize,
    feature: &Value,
    fields: &NeighborhoodFieldMapping,
) -> Option<Neighborhood> {
    let props = feature.get("properties")?;

    let Some(name) = property(props, &fields.name).filter(|s| !s.is_empty()) else {
        log::debug!("Feature {index} has no '{}' property", fields.name);
        return None;
    };

    let coordinates = feature.get("geometry").map(outer_rings).unwrap_or_default();
    if coordinates.is_empty() {
        log::debug!("Feature {index} ({name}) has no usable polygon");
        return None;
    }

    Some(Neighborhood {
        id: feature_id(index, feature),
        name: name.to_string(),
        borough: property(props, &fields.borough).unwrap_or_default().to_string(),
        abbreviation: property(props, &fields.abbreviation)
            .unwrap_or_default()
            .to_string(),
        coordinates,
    })
}

fn property<'a>(props: &'a Value, field: &str) -> Option<&'a str> {
    props.get(field).and_then(Value::as_str).map(str::trim)
}

/// Uses the feature's own `id`, falling back to its position in the
/// collection.
fn feature_id(index: usize, feature: &Value) -> NeighborhoodId {
    let id = feature.get("id");

    if let Some(id) = id.and_then(Value::as_i64) {
        return NeighborhoodId::Int(id);
    }
    if let Some(id) = id.and_then(Value::as_str) {
        return NeighborhoodId::Text(id.to_string());
    }

    NeighborhoodId::Int(i64::try_from(index).unwrap_or(i64::MAX))
}

/// Extracts the outer ring of every polygon in a `Polygon` or
/// `MultiPolygon` geometry. Interior rings (holes) are dropped.
///
/// When the geometry has no `type`, the nesting depth of `coordinates`
/// decides which of the two it is.
fn outer_rings(geometry: &Value) -> Vec<Ring> {
    let Some(coordinates) = geometry.get("coordinates").and_then(Value::as_array) else {
        return Vec::new();
    };

    let is_multi = match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") => false,
        Some("MultiPolygon") => true,
        Some(other) => {
            log::debug!("Unsupported geometry type: {other}");
            return Vec::new();
        }
        None => coordinates
            .first()
            .and_then(Value::as_array)
            .and_then(|first| first.first())
            .is_some_and(|v| !is_position(v)),
    };

    if is_multi {
        coordinates
            .iter()
            .filter_map(|polygon| polygon.as_array()?.first().and_then(parse_ring))
            .collect()
    } else {
        coordinates.first().and_then(parse_ring).into_iter().collect()
    }
}

fn is_position(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(Value::is_number)
}

/// Parses a ring of `[lng, lat]` positions. Extra dimensions (altitude) are
/// ignored. Rings with an invalid position or fewer than 3 vertices are
/// rejected.
fn parse_ring(value: &Value) -> Option<Ring> {
    let ring: Ring = value
        .as_array()?
        .iter()
        .map(parse_position)
        .collect::<Option<_>>()?;

    (ring.len() >= 3).then_some(ring)
}

fn parse_position(value: &Value) -> Option<Position> {
    let items = value.as_array()?;
    let lng = items.first()?.as_f64()?;
    let lat = items.get(1)?.as_f64()?;
    Some([lng, lat])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields() -> NeighborhoodFieldMapping {
        NeighborhoodFieldMapping::default()
    }

    fn square() -> Value {
        json!([[-73.96, 40.70], [-73.94, 40.70], [-73.94, 40.72], [-73.96, 40.72], [-73.96, 40.70]])
    }

    #[test]
    fn parses_polygon_features() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 7,
                "properties": {"NTAName": "Greenpoint", "BoroName": "Brooklyn", "NTAAbbrev": "Grnpt"},
                "geometry": {"type": "Polygon", "coordinates": [square()]}
            }]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods.len(), 1);

        let greenpoint = &neighborhoods[0];
        assert_eq!(greenpoint.id, NeighborhoodId::Int(7));
        assert_eq!(greenpoint.name, "Greenpoint");
        assert_eq!(greenpoint.borough, "Brooklyn");
        assert_eq!(greenpoint.abbreviation, "Grnpt");
        assert_eq!(greenpoint.coordinates.len(), 1);
        assert_eq!(greenpoint.coordinates[0].len(), 5);
        assert_eq!(greenpoint.coordinates[0][0], [-73.96, 40.70]);
    }

    #[test]
    fn drops_interior_rings() {
        let raw = json!({
            "features": [{
                "properties": {"NTAName": "Prospect Park"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        square(),
                        [[-73.955, 40.705], [-73.945, 40.705], [-73.945, 40.715], [-73.955, 40.705]]
                    ]
                }
            }]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods[0].coordinates.len(), 1);
        assert_eq!(neighborhoods[0].coordinates[0][0], [-73.96, 40.70]);
    }

    #[test]
    fn keeps_every_multipolygon_member() {
        let raw = json!({
            "features": [{
                "properties": {"NTAName": "Rockaway"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [square()],
                        [[[-73.83, 40.59], [-73.81, 40.59], [-73.81, 40.62]]]
                    ]
                }
            }]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods[0].coordinates.len(), 2);
        assert_eq!(neighborhoods[0].coordinates[1][0], [-73.83, 40.59]);
    }

    #[test]
    fn infers_geometry_kind_without_type() {
        let raw = json!({
            "features": [
                {"properties": {"NTAName": "Flat"}, "geometry": {"coordinates": [square()]}},
                {"properties": {"NTAName": "Nested"}, "geometry": {"coordinates": [[square()], [square()]]}}
            ]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods.len(), 2);
        assert_eq!(neighborhoods[0].coordinates.len(), 1);
        assert_eq!(neighborhoods[1].coordinates.len(), 2);
    }

    #[test]
    fn malformed_input_yields_empty() {
        assert!(parse_neighborhood_data(&json!({}), &fields()).is_empty());
        assert!(parse_neighborhood_data(&json!({"features": "not an array"}), &fields()).is_empty());
        assert!(parse_neighborhood_data(&json!(null), &fields()).is_empty());
        assert!(parse_neighborhood_data(&json!([1, 2, 3]), &fields()).is_empty());
    }

    #[test]
    fn strict_parse_reports_malformed_dataset() {
        let err = try_parse_neighborhood_data(&json!({}), &fields()).unwrap_err();
        assert!(matches!(err, NeighborhoodError::MalformedDataset { .. }));
    }

    #[test]
    fn skips_unusable_features() {
        let raw = json!({
            "features": [
                {"properties": {"NTAName": "No Geometry"}},
                {"properties": {"NTAName": "  "}, "geometry": {"type": "Polygon", "coordinates": [square()]}},
                {"geometry": {"type": "Polygon", "coordinates": [square()]}},
                {"properties": {"NTAName": "Too Small"}, "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}},
                {"properties": {"NTAName": "Bad Vertex"}, "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], ["x", 1.0], [1.0, 0.0]]]}},
                {"properties": {"NTAName": "Point"}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
                {"properties": {"NTAName": "Valid"}, "geometry": {"type": "Polygon", "coordinates": [square()]}}
            ]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        let names: Vec<&str> = neighborhoods.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Valid"]);
    }

    #[test]
    fn falls_back_to_feature_index_for_ids() {
        let raw = json!({
            "features": [
                {"id": "BK76", "properties": {"NTAName": "A"}, "geometry": {"type": "Polygon", "coordinates": [square()]}},
                {"properties": {"NTAName": "B"}, "geometry": {"type": "Polygon", "coordinates": [square()]}}
            ]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods[0].id, NeighborhoodId::Text("BK76".to_string()));
        assert_eq!(neighborhoods[1].id, NeighborhoodId::Int(1));
    }

    #[test]
    fn honors_custom_field_mapping() {
        let mapping = NeighborhoodFieldMapping {
            name: "ntaname".to_string(),
            borough: "boroname".to_string(),
            abbreviation: "ntaabbrev".to_string(),
        };
        let raw = json!({
            "features": [{
                "properties": {"ntaname": "Astoria", "boroname": "Queens"},
                "geometry": {"type": "Polygon", "coordinates": [square()]}
            }]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &mapping);
        assert_eq!(neighborhoods[0].name, "Astoria");
        assert_eq!(neighborhoods[0].borough, "Queens");
        assert_eq!(neighborhoods[0].abbreviation, "");
    }

    #[test]
    fn ignores_altitude() {
        let raw = json!({
            "features": [{
                "properties": {"NTAName": "Hilly"},
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0, 10.0], [1.0, 0.0, 12.0], [1.0, 1.0, 9.0]]]}
            }]
        });

        let neighborhoods = parse_neighborhood_data(&raw, &fields());
        assert_eq!(neighborhoods[0].coordinates[0][2], [1.0, 1.0]);
    }
}
