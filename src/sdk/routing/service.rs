use super::error::RoutingError;
use super::provider::types::DirectionsResponse;
use super::route::{Coord, RouteRequest};
use async_trait::async_trait;

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Geocodes a place name. Matches come back in the provider's rank order
    /// and may be empty.
    async fn geocode(&self, name: &str) -> Result<Vec<Coord>, RoutingError>;

    /// Requests a path through the request's waypoints, in order.
    async fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RoutingError>;
}
