#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the neighborhood geofencing toolkit.
//!
//! Loads a neighborhood catalog (the bundled NYC sample by default) and
//! answers the questions the map screen asks: which neighborhood a
//! coordinate is in, what viewport frames a neighborhood, and which places
//! fall inside a neighborhood or within a radius. Results are printed as
//! JSON on stdout; logs go to stderr and follow `RUST_LOG`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pizza_rat_neighborhood::{BoroughFilter, NeighborhoodCatalog, by_borough, by_name, registry};
use pizza_rat_neighborhood_models::{DatasetSource, LatLng, PlacePoint};
use pizza_rat_spatial::{
    MatchKind, calculate_neighborhood_region, filter_places_by_neighborhood, filter_within_radius,
};

#[derive(Parser)]
#[command(name = "pizza_rat", about = "Neighborhood geofencing tool")]
struct Cli {
    /// `GeoJSON` boundary file to load instead of a registered source
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Registered dataset source ID
    #[arg(long, global = true, default_value = registry::DEFAULT_SOURCE_ID)]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered dataset sources
    Sources,
    /// List neighborhoods, optionally limited to one borough
    List {
        /// Borough name, or `all_nyc` for every borough
        #[arg(long, default_value = BoroughFilter::ALL_KEY)]
        borough: String,
    },
    /// Find the neighborhood containing (or nearest to) a coordinate
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Compute the map region framing a neighborhood
    Region {
        /// Neighborhood name
        name: String,
    },
    /// Keep the places inside a neighborhood
    Filter {
        /// Neighborhood name
        name: String,
        /// JSON file with an array of `{id, name, location: {lat, lng}}`
        #[arg(long)]
        places: PathBuf,
    },
    /// Keep the places within a radius of a coordinate
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Radius in miles
        #[arg(long, default_value_t = 2.0)]
        radius: f64,
        /// JSON file with an array of `{id, name, location: {lat, lng}}`
        #[arg(long)]
        places: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let source = match &cli.dataset {
        Some(path) => DatasetSource::from_file(path),
        None => registry::find_source(&cli.source)?,
    };
    let catalog = NeighborhoodCatalog::new(source);

    match cli.command {
        Commands::Sources => {
            print_json(&registry::all_sources())?;
        }
        Commands::List { borough } => {
            let neighborhoods = catalog.load().await?;
            let listed: Vec<serde_json::Value> =
                by_borough(neighborhoods, &BoroughFilter::from(borough.as_str()))
                    .into_iter()
                    .map(|n| {
                        serde_json::json!({
                            "id": n.id,
                            "name": n.name,
                            "borough": n.borough,
                            "abbreviation": n.abbreviation,
                            "polygons": n.coordinates.len(),
                        })
                    })
                    .collect();
            print_json(&listed)?;
        }
        Commands::Locate { lat, lng } => {
            let index = catalog.index().await?;
            let found = index.locate(LatLng::new(lat, lng)).map(|found| {
                let (kind, distance_miles) = match found.kind {
                    MatchKind::Contained => ("contained", None),
                    MatchKind::Nearest { distance_miles } => ("nearest", Some(distance_miles)),
                };
                serde_json::json!({
                    "name": found.neighborhood.name,
                    "borough": found.neighborhood.borough,
                    "match": kind,
                    "distanceMiles": distance_miles,
                })
            });
            print_json(&found)?;
        }
        Commands::Region { name } => {
            let neighborhoods = catalog.load().await?;
            let neighborhood = by_name(neighborhoods, &name)
                .ok_or_else(|| format!("No neighborhood named '{name}'"))?;
            print_json(&calculate_neighborhood_region(neighborhood)?)?;
        }
        Commands::Filter { name, places } => {
            let neighborhoods = catalog.load().await?;
            let neighborhood = by_name(neighborhoods, &name)
                .ok_or_else(|| format!("No neighborhood named '{name}'"))?;
            let places = read_places(&places).await?;
            let inside = filter_places_by_neighborhood(&places, neighborhood);
            log::info!("{} of {} places in {name}", inside.len(), places.len());
            print_json(&inside)?;
        }
        Commands::Nearby {
            lat,
            lng,
            radius,
            places,
        } => {
            let places = read_places(&places).await?;
            let nearby = filter_within_radius(&places, LatLng::new(lat, lng), radius);
            log::info!(
                "{} of {} places within {radius} miles",
                nearby.len(),
                places.len()
            );
            print_json(&nearby)?;
        }
    }

    Ok(())
}

async fn read_places(path: &Path) -> Result<Vec<PlacePoint>, Box<dyn std::error::Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
