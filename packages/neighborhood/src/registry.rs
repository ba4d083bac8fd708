//! Compile-time registry of neighborhood boundary dataset sources.
//!
//! Each source is a `(name, toml_content)` pair embedded via `include_str!`.
//! Sources of type `bundled` point at a `GeoJSON` asset that is embedded the
//! same way, so the app works without any dataset on disk.

use pizza_rat_neighborhood_models::DatasetSource;

use crate::NeighborhoodError;

/// Number of registered dataset sources. Enforced by a test.
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 2;

/// Source used when the caller doesn't pick one.
pub const DEFAULT_SOURCE_ID: &str = "nyc_nta_sample";

/// Embedded TOML source definitions.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("nyc_nta_sample", include_str!("../sources/nyc_nta_sample.toml")),
    ("nyc_nta", include_str!("../sources/nyc_nta.toml")),
];

/// Embedded `GeoJSON` datasets, keyed by asset name.
const BUNDLED_DATASETS: &[(&str, &str)] = &[(
    "nyc_nta_sample",
    include_str!("../data/nyc_nta_sample.geojson"),
)];

/// Parses a dataset source definition.
///
/// # Errors
///
/// Returns [`NeighborhoodError::Toml`] if the definition is not valid.
pub fn parse_source(toml_str: &str) -> Result<DatasetSource, NeighborhoodError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Returns all registered dataset sources.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_sources() -> Vec<DatasetSource> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_source(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset source '{name}': {e}"))
        })
        .collect()
}

/// Looks up a registered source by ID.
///
/// # Errors
///
/// Returns [`NeighborhoodError::UnknownSource`] if no source has this ID.
pub fn find_source(id: &str) -> Result<DatasetSource, NeighborhoodError> {
    all_sources()
        .into_iter()
        .find(|source| source.id == id)
        .ok_or_else(|| NeighborhoodError::UnknownSource { id: id.to_string() })
}

/// Returns the default source, backed by the bundled sample dataset.
///
/// # Panics
///
/// Panics if [`DEFAULT_SOURCE_ID`] is not registered, which the tests
/// below rule out.
#[must_use]
pub fn default_source() -> DatasetSource {
    find_source(DEFAULT_SOURCE_ID)
        .unwrap_or_else(|e| panic!("Default dataset source missing: {e}"))
}

/// Returns the embedded `GeoJSON` text for a bundled asset.
#[must_use]
pub fn bundled_dataset(asset: &str) -> Option<&'static str> {
    BUNDLED_DATASETS
        .iter()
        .find(|(name, _)| *name == asset)
        .map(|(_, content)| *content)
}
