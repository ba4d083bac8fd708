//! Even-odd point-in-polygon test.

use pizza_rat_neighborhood_models::Position;

/// Returns whether `point` lies inside `polygon` using ray casting.
///
/// A ray is cast from the point towards increasing x. Each edge whose
/// endpoints sit on opposite sides of the point's y (one strictly above,
/// the other not) is intersected with that horizontal line, and the
/// `inside` flag toggles when the point lies left of the intersection.
/// The wrap-around edge from the last vertex to the first is included, so
/// callers don't need to repeat the first vertex.
///
/// Points exactly on an edge or vertex may land on either side, but the
/// answer for a given point and polygon never changes between calls.
#[must_use]
pub fn is_point_in_polygon(point: Position, polygon: &[Position]) -> bool {
    let [x, y] = point;

    let Some(&last) = polygon.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;

    for &[xi, yi] in polygon {
        let [xj, yj] = prev;

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }

        prev = [xi, yi];
    }

    inside
}
