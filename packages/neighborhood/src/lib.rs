#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood boundary catalog: parsing, dataset sources, and lazy loading.
//!
//! Converts `GeoJSON` neighborhood boundary datasets (NYC Neighborhood
//! Tabulation Areas by default) into normalized [`Neighborhood`] records
//! and holds them in a [`NeighborhoodCatalog`] that loads once on first
//! use. Dataset sources are defined as TOML files embedded at compile time,
//! following the same registry pattern used for bundled datasets.
//!
//! [`Neighborhood`]: pizza_rat_neighborhood_models::Neighborhood

pub mod catalog;
pub mod normalize;
pub mod registry;

pub use catalog::{BoroughFilter, NeighborhoodCatalog, by_borough, by_name};
pub use normalize::{parse_neighborhood_data, try_parse_neighborhood_data};

use thiserror::Error;

/// Errors that can occur during neighborhood catalog operations.
#[derive(Debug, Error)]
pub enum NeighborhoodError {
    /// The dataset is not a `FeatureCollection` with a `features` array.
    #[error("Malformed dataset: {message}")]
    MalformedDataset {
        /// Description of what went wrong.
        message: String,
    },

    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A dataset source definition failed to parse.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No registered dataset source has this ID.
    #[error("Unknown dataset source: {id}")]
    UnknownSource {
        /// The requested source ID.
        id: String,
    },

    /// A bundled source refers to an asset that isn't compiled in.
    #[error("Unknown bundled dataset asset: {asset}")]
    UnknownAsset {
        /// The requested asset name.
        asset: String,
    },
}
