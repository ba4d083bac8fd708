//! Lazily loaded, immutable neighborhood catalog.
//!
//! A [`NeighborhoodCatalog`] is constructed cheaply with the source it will
//! read from and parses that source the first time [`load`] is awaited.
//! The parsed catalog is cached for the lifetime of the value and never
//! invalidated. Concurrent first callers wait on the same load rather than
//! each parsing the dataset.
//!
//! [`load`]: NeighborhoodCatalog::load

use pizza_rat_neighborhood_models::{DatasetLocation, DatasetSource, Neighborhood};
use pizza_rat_spatial::NeighborhoodIndex;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::{NeighborhoodError, normalize, registry};

/// Neighborhood catalog for one dataset source.
pub struct NeighborhoodCatalog {
    source: Option<DatasetSource>,
    neighborhoods: OnceCell<Vec<Neighborhood>>,
}

impl NeighborhoodCatalog {
    /// Creates an unloaded catalog reading from `source`.
    #[must_use]
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source: Some(source),
            neighborhoods: OnceCell::new(),
        }
    }

    /// Creates an unloaded catalog backed by the bundled default dataset.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(registry::default_source())
    }

    /// Creates an already-loaded catalog from neighborhoods parsed elsewhere.
    #[must_use]
    pub fn from_neighborhoods(neighborhoods: Vec<Neighborhood>) -> Self {
        Self {
            source: None,
            neighborhoods: OnceCell::from(neighborhoods),
        }
    }

    /// Returns the source this catalog loads from, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&DatasetSource> {
        self.source.as_ref()
    }

    /// Loads the catalog on first call and returns the cached neighborhoods
    /// on every later call.
    ///
    /// A failed load caches nothing, so a later call tries again.
    ///
    /// # Errors
    ///
    /// Returns [`NeighborhoodError`] if the dataset cannot be read, is not
    /// valid JSON, or has no `features` array.
    pub async fn load(&self) -> Result<&[Neighborhood], NeighborhoodError> {
        self.neighborhoods
            .get_or_try_init(|| async {
                match &self.source {
                    Some(source) => read_source(source).await,
                    None => Err(NeighborhoodError::MalformedDataset {
                        message: "catalog has no dataset source".to_string(),
                    }),
                }
            })
            .await
            .map(Vec::as_slice)
    }

    /// Like [`load`](Self::load), but degrades to an empty catalog when the
    /// dataset can't be loaded.
    pub async fn load_or_empty(&self) -> &[Neighborhood] {
        match self.load().await {
            Ok(neighborhoods) => neighborhoods,
            Err(e) => {
                log::error!("Neighborhood catalog unavailable: {e}");
                &[]
            }
        }
    }

    /// Returns the cached neighborhoods without triggering a load.
    #[must_use]
    pub fn get(&self) -> Option<&[Neighborhood]> {
        self.neighborhoods.get().map(Vec::as_slice)
    }

    /// Loads the catalog and builds a spatial index over it.
    ///
    /// # Errors
    ///
    /// Returns [`NeighborhoodError`] if the catalog fails to load.
    pub async fn index(&self) -> Result<NeighborhoodIndex, NeighborhoodError> {
        let neighborhoods = self.load().await?;
        Ok(NeighborhoodIndex::build(neighborhoods.to_vec()))
    }
}

/// Reads and parses the `GeoJSON` document behind `source`.
async fn read_source(source: &DatasetSource) -> Result<Vec<Neighborhood>, NeighborhoodError> {
    log::info!("Loading neighborhoods from {} ({})", source.id, source.name);

    let raw: Value = match &source.location {
        DatasetLocation::Bundled { asset } => {
            let content = registry::bundled_dataset(asset).ok_or_else(|| {
                NeighborhoodError::UnknownAsset {
                    asset: asset.clone(),
                }
            })?;
            serde_json::from_str(content)?
        }
        DatasetLocation::File { path } => {
            let content = tokio::fs::read_to_string(path).await?;
            serde_json::from_str(&content)?
        }
    };

    let neighborhoods = normalize::try_parse_neighborhood_data(&raw, &source.fields)?;
    log::info!("{}: loaded {} neighborhoods", source.id, neighborhoods.len());

    Ok(neighborhoods)
}

/// Finds a neighborhood by exact name. The first match wins.
#[must_use]
pub fn by_name<'a>(neighborhoods: &'a [Neighborhood], name: &str) -> Option<&'a Neighborhood> {
    neighborhoods.iter().find(|n| n.name == name)
}

/// Which boroughs a neighborhood listing should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoroughFilter {
    /// Every borough.
    All,
    /// A single borough, matched case-insensitively. Underscores match
    /// spaces, so `staten_island` selects "Staten Island".
    Named(String),
}

impl BoroughFilter {
    /// Key selecting every borough.
    pub const ALL_KEY: &'static str = "all_nyc";

    /// Returns whether a neighborhood in `borough` passes the filter.
    #[must_use]
    pub fn matches(&self, borough: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name.replace('_', " ").to_lowercase() == borough.to_lowercase(),
        }
    }
}

impl From<&str> for BoroughFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL_KEY {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

/// Lists the neighborhoods passing `filter`, in catalog order.
#[must_use]
pub fn by_borough<'a>(
    neighborhoods: &'a [Neighborhood],
    filter: &BoroughFilter,
) -> Vec<&'a Neighborhood> {
    neighborhoods
        .iter()
        .filter(|n| filter.matches(&n.borough))
        .collect()
}
