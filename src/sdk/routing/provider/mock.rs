use super::types::{DirectionsResponse, LineGeometry, Route};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::{Coord, RouteRequest};
use crate::sdk::routing::service::RoutingProvider;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// In-memory provider for tests.
///
/// Unknown places geocode to zero matches. Directions results are handed out
/// in the order they were queued; once the queue is empty every request gets
/// a straight line through its waypoints.
#[derive(Default)]
pub struct MockProvider {
    places: HashMap<String, Vec<Coord>>,
    unavailable: HashSet<String>,
    delays: HashMap<String, Duration>,
    directions: Mutex<VecDeque<Result<DirectionsResponse, RoutingError>>>,
    geocode_calls: Mutex<Vec<String>>,
    directions_calls: Mutex<Vec<RouteRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, name: &str, matches: Vec<Coord>) -> Self {
        self.places.insert(name.to_string(), matches);
        self
    }

    /// Geocoding `name` fails as if the service returned a 503.
    pub fn with_unavailable_place(mut self, name: &str) -> Self {
        self.unavailable.insert(name.to_string());
        self
    }

    pub fn with_geocode_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn with_directions_result(self, result: Result<DirectionsResponse, RoutingError>) -> Self {
        self.directions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
        self
    }

    pub fn geocode_calls(&self) -> Vec<String> {
        self.geocode_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn directions_calls(&self) -> Vec<RouteRequest> {
        self.directions_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A successful response holding one route along `points`.
    pub fn route_through(points: &[Coord]) -> DirectionsResponse {
        DirectionsResponse {
            routes: vec![Route {
                geometry: LineGeometry {
                    coordinates: points.iter().map(|&(lon, lat)| [lon, lat]).collect(),
                },
                distance: None,
                duration: None,
            }],
        }
    }

    /// The 422 rejection the directions API uses for malformed parameters.
    pub fn invalid_input() -> RoutingError {
        RoutingError::ApiError {
            status: 422,
            code: "InvalidInput".to_string(),
            message: "Invalid request parameters".to_string(),
        }
    }
}

#[async_trait]
impl RoutingProvider for MockProvider {
    async fn geocode(&self, name: &str) -> Result<Vec<Coord>, RoutingError> {
        log::debug!("[PROVIDER] Calling mock geocode for: \"{}\"", name);
        self.geocode_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.to_string());

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        if self.unavailable.contains(name) {
            return Err(RoutingError::RawApiError {
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(self.places.get(name).cloned().unwrap_or_default())
    }

    async fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RoutingError> {
        log::debug!(
            "[PROVIDER] Calling mock directions for {:?} ({})",
            request.waypoints,
            request.profile
        );
        self.directions_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let queued = self
            .directions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        queued.unwrap_or_else(|| Ok(Self::route_through(&request.waypoints)))
    }
}
