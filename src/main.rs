use anyhow::{bail, Context, Result};
use clap::Parser;
use std::{fs::File, io::Write, path::PathBuf};
use wayfind::{
    sdk::config::ServiceConfig,
    sdk::extract::{ExtractionChain, GeminiClient, LanguageModelExtractor, TravelPreferences},
    sdk::geojson::outcome_to_geojson,
    sdk::routing::{Coord, RemoteMapboxProvider},
    sdk::search::{SearchOutcome, TripSearch},
    sdk::util::log::init_logging,
};

/// Turn a trip description like "from Paris to London" into a routed path
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Free-text trip description (e.g. "from Paris to London by bike")
    query: Option<String>,

    /// Travel mode: driving, walking or cycling (synonyms like "bike" accepted)
    #[arg(short, long)]
    profile: Option<String>,

    #[arg(long)]
    avoid_tolls: bool,

    #[arg(long)]
    avoid_highways: bool,

    #[arg(long)]
    avoid_ferries: bool,

    /// Skip the language model and split the query with the pattern extractor
    #[arg(long)]
    no_llm: bool,

    /// Route through these LON,LAT points instead of a query (repeatable)
    #[arg(short, long = "waypoint", value_parser = parse_coord, allow_hyphen_values = true)]
    waypoints: Vec<Coord>,

    /// Where to write the GeoJSON result
    #[arg(short, long, default_value = "route.geojson")]
    output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_coord(value: &str) -> Result<Coord, String> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got {:?}", value))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("bad longitude: {}", e))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("bad latitude: {}", e))?;
    Ok((lon, lat))
}

/// Only flags the user actually passed become preferences.
fn preference_overrides(cli: &Cli) -> TravelPreferences {
    TravelPreferences {
        transport_mode: cli.profile.clone(),
        avoid_tolls: cli.avoid_tolls.then_some(true),
        avoid_highways: cli.avoid_highways.then_some(true),
        avoid_ferries: cli.avoid_ferries.then_some(true),
    }
}

fn build_extractors(config: &ServiceConfig, no_llm: bool) -> Result<ExtractionChain> {
    match (&config.language_model, no_llm) {
        (Some(llm), false) => {
            let client = GeminiClient::new(
                llm.api_key.clone(),
                llm.model.clone(),
                &llm.base_url,
                config.http_timeout,
            )?;
            log::info!(
                "Using language model {} with a {:?} deadline",
                llm.model,
                config.extraction_deadline
            );
            Ok(ExtractionChain::with_fallback(
                LanguageModelExtractor::new(client),
                config.extraction_deadline,
            ))
        }
        _ => {
            log::info!("Language model disabled; using pattern extraction only");
            Ok(ExtractionChain::pattern_only())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    // --- 1. Dependency Initialization ---
    let config = ServiceConfig::from_env()?;
    let provider = RemoteMapboxProvider::new(
        config.mapbox_token.clone(),
        &config.mapbox_base_url,
        config.http_timeout,
    )?;
    let extractors = build_extractors(&config, cli.no_llm)?;
    let search = TripSearch::new(provider, extractors);
    let overrides = preference_overrides(&cli);

    // --- 2. Run the search ---
    let result = if !cli.waypoints.is_empty() {
        search.route_between(cli.waypoints.clone(), &overrides).await
    } else if let Some(query) = cli.query.as_deref() {
        search.search(query, &overrides).await
    } else {
        bail!("Provide a trip description or at least one --waypoint");
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Search failed: {}", err);
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    // --- 3. Output Results ---
    match &outcome {
        SearchOutcome::Route {
            locations, route, ..
        } => log::info!(
            "Route {} has {} points{}",
            locations.join(" -> "),
            route.geometry.len(),
            route
                .distance_km
                .map(|km| format!(", {:.1} km", km))
                .unwrap_or_default()
        ),
        SearchOutcome::Point {
            location,
            coord,
            route_requested,
        } => {
            log::info!("Single location {} at {:?}", location, coord);
            if *route_requested {
                eprintln!(
                    "Only one location was found ({}); showing it on the map without a route.",
                    location
                );
            }
        }
    }

    let json_output = serde_json::to_string_pretty(&outcome_to_geojson(&outcome))?;
    let mut file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    file.write_all(json_output.as_bytes())?;
    log::info!("GeoJSON written to {}", cli.output.display());

    Ok(())
}
