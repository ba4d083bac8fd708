//! In-memory neighborhood locator.
//!
//! Builds an R-tree over neighborhood bounding envelopes so that assigning a
//! coordinate to a neighborhood only runs the ray-casting test against the
//! handful of neighborhoods whose envelope contains it. When no polygon
//! contains the coordinate, the neighborhood with the nearest centroid is
//! returned instead.

use geo::{Centroid, LineString, MultiPolygon, Polygon};
use pizza_rat_neighborhood_models::{LatLng, Neighborhood};
use rstar::{AABB, RTree, RTreeObject};

use crate::distance::haversine_miles;
use crate::filter::is_point_in_neighborhood;
use crate::region::bounding_box;

/// A neighborhood envelope stored in the R-tree, pointing back at its
/// position in the catalog.
struct EnvelopeEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for EnvelopeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// How a [`NeighborhoodMatch`] was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// The coordinate lies inside one of the neighborhood's polygons.
    Contained,
    /// No polygon contains the coordinate; this neighborhood's centroid is
    /// the closest.
    Nearest {
        /// Distance from the coordinate to the centroid.
        distance_miles: f64,
    },
}

/// Result of [`NeighborhoodIndex::locate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodMatch<'a> {
    pub neighborhood: &'a Neighborhood,
    pub kind: MatchKind,
}

/// Pre-built spatial index over a neighborhood catalog.
///
/// Constructed once per catalog and shared read-only.
pub struct NeighborhoodIndex {
    neighborhoods: Vec<Neighborhood>,
    tree: RTree<EnvelopeEntry>,
    /// Catalog position and centroid of each neighborhood with usable
    /// geometry.
    centroids: Vec<(usize, LatLng)>,
}

impl NeighborhoodIndex {
    /// Builds the index. Neighborhoods with degenerate geometry stay in the
    /// catalog but are never matched.
    #[must_use]
    pub fn build(neighborhoods: Vec<Neighborhood>) -> Self {
        let mut entries = Vec::with_capacity(neighborhoods.len());
        let mut centroids = Vec::with_capacity(neighborhoods.len());

        for (position, neighborhood) in neighborhoods.iter().enumerate() {
            let bbox = match bounding_box(neighborhood) {
                Ok(bbox) => bbox,
                Err(e) => {
                    log::warn!("Skipping neighborhood in spatial index: {e}");
                    continue;
                }
            };

            entries.push(EnvelopeEntry {
                position,
                envelope: AABB::from_corners(
                    [bbox.min_lng, bbox.min_lat],
                    [bbox.max_lng, bbox.max_lat],
                ),
            });

            if let Some(centroid) = centroid(neighborhood) {
                centroids.push((position, centroid));
            }
        }

        let tree = RTree::bulk_load(entries);
        log::info!(
            "Built neighborhood index with {} of {} neighborhoods",
            tree.size(),
            neighborhoods.len()
        );

        Self {
            neighborhoods,
            tree,
            centroids,
        }
    }

    /// Finds the neighborhood for `location`.
    ///
    /// Containment wins over proximity. When several neighborhoods contain
    /// the location, the one earliest in the catalog is returned, matching
    /// a linear scan. Returns `None` only for an index with no usable
    /// neighborhoods.
    #[must_use]
    pub fn locate(&self, location: LatLng) -> Option<NeighborhoodMatch<'_>> {
        self.containing(location)
            .map(|neighborhood| NeighborhoodMatch {
                neighborhood,
                kind: MatchKind::Contained,
            })
            .or_else(|| self.nearest(location))
    }

    /// Finds the earliest neighborhood in the catalog containing `location`.
    #[must_use]
    pub fn containing(&self, location: LatLng) -> Option<&Neighborhood> {
        let query = AABB::from_point(location.to_position());

        self.tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.position)
            .filter(|&position| is_point_in_neighborhood(location, &self.neighborhoods[position]))
            .min()
            .map(|position| &self.neighborhoods[position])
    }

    /// Finds the neighborhood whose centroid is closest to `location`.
    #[must_use]
    pub fn nearest(&self, location: LatLng) -> Option<NeighborhoodMatch<'_>> {
        self.centroids
            .iter()
            .map(|&(position, centroid)| (position, haversine_miles(location, centroid)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(position, distance_miles)| NeighborhoodMatch {
                neighborhood: &self.neighborhoods[position],
                kind: MatchKind::Nearest { distance_miles },
            })
    }

    /// Returns the indexed catalog.
    #[must_use]
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Number of neighborhoods with usable geometry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Area-weighted centroid across all of a neighborhood's polygons.
fn centroid(neighborhood: &Neighborhood) -> Option<LatLng> {
    let polygons: Vec<Polygon<f64>> = neighborhood
        .coordinates
        .iter()
        .map(|ring| Polygon::new(LineString::from(ring.clone()), vec![]))
        .collect();

    MultiPolygon::new(polygons)
        .centroid()
        .map(|point| LatLng::new(point.y(), point.x()))
}
