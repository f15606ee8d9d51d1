use super::extract::{ExtractionChain, ExtractionResult, TravelPreferences};
use super::routing::{
    request_route, resolve_all, Coord, Profile, RouteResult, RoutingError, RoutingProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A path through every resolved location, in order.
    Route {
        locations: Vec<String>,
        waypoints: Vec<Coord>,
        profile: Profile,
        route: RouteResult,
    },
    /// Only one location resolved; the map should be centered on it.
    /// `route_requested` is set when the text asked for a trip ("from X",
    /// "X to Y") so callers can explain why no route is shown.
    Point {
        location: String,
        coord: Coord,
        route_requested: bool,
    },
}

/// Free text in, route or single point out.
pub struct TripSearch<P> {
    provider: P,
    extractors: ExtractionChain,
}

impl<P: RoutingProvider> TripSearch<P> {
    pub fn new(provider: P, extractors: ExtractionChain) -> Self {
        Self { provider, extractors }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs one search. `overrides` replace whatever the extractor inferred.
    pub async fn search(
        &self,
        text: &str,
        overrides: &TravelPreferences,
    ) -> Result<SearchOutcome, RoutingError> {
        let outcome = self
            .extractors
            .extract(text)
            .await
            .map_err(|e| RoutingError::Input(e.to_string()))?;
        let ExtractionResult {
            locations,
            preferences,
        } = outcome.result;

        if locations.is_empty() {
            return Err(RoutingError::Input(format!(
                "no locations found in {:?}",
                text
            )));
        }
        let preferences = preferences.merged_with(overrides);
        log::info!(
            "Searching {} ({} via {}) with preferences {:?}",
            locations.join(" -> "),
            locations.len(),
            outcome.strategy,
            preferences
        );

        let coords = resolve_all(&self.provider, &locations).await?;
        self.complete(locations, coords, &preferences, outcome.is_route_request)
            .await
    }

    /// Skips extraction and geocoding for callers that already hold coordinates.
    pub async fn route_between(
        &self,
        waypoints: Vec<Coord>,
        preferences: &TravelPreferences,
    ) -> Result<SearchOutcome, RoutingError> {
        if waypoints.is_empty() {
            return Err(RoutingError::Input("no waypoints given".to_string()));
        }
        let labels = waypoints
            .iter()
            .map(|(lon, lat)| format!("{},{}", lon, lat))
            .collect();
        self.complete(labels, waypoints, preferences, false).await
    }

    async fn complete(
        &self,
        mut locations: Vec<String>,
        waypoints: Vec<Coord>,
        preferences: &TravelPreferences,
        route_requested: bool,
    ) -> Result<SearchOutcome, RoutingError> {
        if let [coord] = waypoints[..] {
            let location = locations.pop().unwrap_or_default();
            if route_requested {
                log::info!(
                    "Only one location found in a route request; showing \"{}\" on its own",
                    location
                );
            }
            log::info!("Centering on \"{}\" at {:?}", location, coord);
            return Ok(SearchOutcome::Point {
                location,
                coord,
                route_requested,
            });
        }

        let route = request_route(&self.provider, waypoints.clone(), preferences).await?;
        log::info!(
            "Route found with {} points for profile {}",
            route.geometry.len(),
            preferences.profile()
        );
        Ok(SearchOutcome::Route {
            locations,
            waypoints,
            profile: preferences.profile(),
            route,
        })
    }
}
