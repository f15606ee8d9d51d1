use super::types::{DirectionsResponse, GeoResponse};
use crate::sdk::routing::error::{MapboxErrorPayload, RoutingError};
use crate::sdk::routing::route::{Coord, RouteRequest};
use crate::sdk::routing::service::RoutingProvider;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Geocoding and directions over the Mapbox v5 HTTP APIs.
pub struct RemoteMapboxProvider {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl RemoteMapboxProvider {
    pub fn new(
        access_token: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, RoutingError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RoutingError::Input(format!("invalid base url {}: {}", base_url, e)))?;
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            access_token,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RoutingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RoutingError::Input(format!("base url cannot hold a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn geocode_url(&self, name: &str) -> Result<Url, RoutingError> {
        let place = format!("{}.json", name);
        self.endpoint(&["geocoding", "v5", "mapbox.places", place.as_str()])
    }

    fn directions_url(&self, request: &RouteRequest) -> Result<Url, RoutingError> {
        let waypoints = request
            .waypoints
            .iter()
            .map(|(lon, lat)| format!("{},{}", lon, lat))
            .collect::<Vec<_>>()
            .join(";");
        let mut url = self.endpoint(&[
            "directions",
            "v5",
            "mapbox",
            request.profile.as_str(),
            waypoints.as_str(),
        ])?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("alternatives", "false")
                .append_pair("geometries", "geojson")
                .append_pair("steps", "false")
                .append_pair("overview", "full");
            if !request.exclusions.is_empty() {
                let exclude = request
                    .exclusions
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                query.append_pair("exclude", &exclude);
            }
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, url: Url) -> Result<T, RoutingError> {
        // The path is logged without the query so the token never reaches the logs.
        let path = url.path().to_string();
        let response = match self
            .client
            .get(url)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send GET request. Path: {}\nError: {}", path, e);
                return Err(RoutingError::RequestError(e));
            }
        };
        read_json(response, &path).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, RoutingError> {
    let status = response.status();
    let text = response.text().await?;
    decode(status, &text, path)
}

/// Maps a response status and body onto the parsed payload or a [`RoutingError`].
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    text: &str,
    path: &str,
) -> Result<T, RoutingError> {
    if !status.is_success() {
        // Try to parse the structured error first
        if let Ok(payload) = serde_json::from_str::<MapboxErrorPayload>(text) {
            return Err(RoutingError::ApiError {
                status: status.as_u16(),
                code: payload.code,
                message: payload.message,
            });
        }
        log::error!(
            "API returned non-success status: {}. Unparseable Body: {}",
            status,
            text
        );
        return Err(RoutingError::RawApiError {
            status: status.as_u16(),
            body: text.to_string(),
        });
    }

    serde_json::from_str(text).map_err(|e| {
        log::error!(
            "Failed to parse response. Path: {}\nError: {}. Body: {}",
            path,
            e,
            text
        );
        RoutingError::ParseError(e)
    })
}

#[async_trait]
impl RoutingProvider for RemoteMapboxProvider {
    async fn geocode(&self, name: &str) -> Result<Vec<Coord>, RoutingError> {
        log::debug!("[PROVIDER] Calling remote geocode for: \"{}\"", name);
        let mut url = self.geocode_url(name)?;
        url.query_pairs_mut().append_pair("limit", "1");

        let body: GeoResponse = self.send(url).await?;
        Ok(body
            .features
            .into_iter()
            .map(|f| (f.geometry.coordinates[0], f.geometry.coordinates[1]))
            .collect())
    }

    async fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RoutingError> {
        log::debug!(
            "[PROVIDER] Calling remote directions for {:?} ({})",
            request.waypoints,
            request.profile
        );
        let url = self.directions_url(request)?;
        self.send(url).await
    }
}
