use super::error::RoutingError;
use super::profile::Profile;
use super::provider::types::DirectionsResponse;
use super::service::RoutingProvider;
use crate::sdk::extract::TravelPreferences;
use serde::Serialize;

/// (longitude, latitude), in the order the upstream APIs use.
pub type Coord = (f64, f64);

/// Road classes a route may be asked to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    Toll,
    Motorway,
    Ferry,
}

impl Exclusion {
    /// Toll and motorway exclusions only exist for driving; the directions API
    /// rejects them with `InvalidInput` on other profiles.
    pub fn supported_by(self, profile: Profile) -> bool {
        match self {
            Exclusion::Ferry => true,
            Exclusion::Toll | Exclusion::Motorway => profile == Profile::Driving,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Exclusion::Toll => "toll",
            Exclusion::Motorway => "motorway",
            Exclusion::Ferry => "ferry",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub waypoints: Vec<Coord>,
    pub profile: Profile,
    pub exclusions: Vec<Exclusion>,
}

impl RouteRequest {
    /// Builds the request from waypoints and preferences. Only preferences
    /// explicitly set to `true` turn into exclusions, and only those the
    /// profile supports are kept.
    pub fn new(waypoints: Vec<Coord>, preferences: &TravelPreferences) -> Self {
        let profile = preferences.profile();
        let (exclusions, dropped): (Vec<_>, Vec<_>) = [
            (preferences.avoid_tolls, Exclusion::Toll),
            (preferences.avoid_highways, Exclusion::Motorway),
            (preferences.avoid_ferries, Exclusion::Ferry),
        ]
        .into_iter()
        .filter_map(|(flag, exclusion)| (flag == Some(true)).then_some(exclusion))
        .partition(|exclusion| exclusion.supported_by(profile));

        if !dropped.is_empty() {
            log::warn!(
                "Ignoring avoid preferences {:?}: not supported for {} routes",
                dropped,
                profile
            );
        }

        Self {
            waypoints,
            profile,
            exclusions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub geometry: Vec<Coord>,
    pub distance_km: Option<f64>,
    pub duration_hours: Option<f64>,
}

/// Requests one path through `waypoints` in the given order.
///
/// A `422 InvalidInput` rejection is retried once with the identical request;
/// if that retry fails too the search ends with [`RoutingError::NoRoute`].
/// Every other failure is returned as-is without retrying.
pub async fn request_route<P>(
    provider: &P,
    waypoints: Vec<Coord>,
    preferences: &TravelPreferences,
) -> Result<RouteResult, RoutingError>
where
    P: RoutingProvider + ?Sized,
{
    if waypoints.len() < 2 {
        return Err(RoutingError::Input(format!(
            "a route needs at least 2 waypoints, got {}",
            waypoints.len()
        )));
    }

    let request = RouteRequest::new(waypoints, preferences);
    let profile = request.profile;

    let mut attempt = 0;
    let max_attempts = 2;

    while attempt < max_attempts {
        match provider.directions(&request).await {
            Ok(response) => return first_route(response, profile),
            Err(err) if attempt == 0 && err.is_structural_invalid() => {
                log::warn!(
                    "Directions rejected the request as invalid ({}). \
                     Retrying once with {} waypoints, profile {}",
                    err,
                    request.waypoints.len(),
                    profile
                );
            }
            Err(err) if attempt > 0 => {
                log::error!("Directions retry failed for profile {}: {}", profile, err);
                return Err(RoutingError::NoRoute { profile });
            }
            Err(err) => return Err(err),
        }
        attempt += 1;
    }

    Err(RoutingError::NoRoute { profile })
}

fn first_route(
    response: DirectionsResponse,
    profile: Profile,
) -> Result<RouteResult, RoutingError> {
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute { profile })?;

    Ok(RouteResult {
        geometry: route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| (lon, lat))
            .collect(),
        distance_km: route.distance.map(|m| m / 1000.0),
        duration_hours: route.duration.map(|s| s / 3600.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::routing::provider::MockProvider;

    const PARIS: Coord = (2.3522, 48.8566);
    const LONDON: Coord = (-0.1276, 51.5072);

    fn prefs(mode: Option<&str>) -> TravelPreferences {
        TravelPreferences {
            transport_mode: mode.map(str::to_string),
            ..TravelPreferences::default()
        }
    }

    #[tokio::test]
    async fn normalizes_bike_to_cycling_before_calling_upstream() {
        let provider = MockProvider::new();
        request_route(&provider, vec![PARIS, LONDON], &prefs(Some("bike")))
            .await
            .unwrap();

        let calls = provider.directions_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].profile, Profile::Cycling);
    }

    #[tokio::test]
    async fn retries_structural_invalid_once_with_identical_request() {
        let provider = MockProvider::new()
            .with_directions_result(Err(MockProvider::invalid_input()))
            .with_directions_result(Ok(MockProvider::route_through(&[PARIS, (1.0, 50.0), LONDON])));

        let route = request_route(&provider, vec![PARIS, LONDON], &prefs(None))
            .await
            .unwrap();

        assert_eq!(route.geometry, vec![PARIS, (1.0, 50.0), LONDON]);
        let calls = provider.directions_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn zero_routes_is_no_route_without_retry() {
        let provider = MockProvider::new()
            .with_directions_result(Ok(DirectionsResponse::default()))
            .with_directions_result(Ok(DirectionsResponse::default()));

        let err = request_route(&provider, vec![PARIS, LONDON], &prefs(Some("walk")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RoutingError::NoRoute {
                profile: Profile::Walking
            }
        ));
        assert_eq!(provider.directions_calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_retry_becomes_no_route() {
        let provider = MockProvider::new()
            .with_directions_result(Err(MockProvider::invalid_input()))
            .with_directions_result(Err(MockProvider::invalid_input()))
            .with_directions_result(Ok(MockProvider::route_through(&[PARIS, LONDON])));

        let err = request_route(&provider, vec![PARIS, LONDON], &prefs(None))
            .await
            .unwrap_err();

        assert!(matches!(err, RoutingError::NoRoute { .. }));
        assert_eq!(provider.directions_calls().len(), 2);
    }

    #[tokio::test]
    async fn other_rejections_surface_immediately() {
        let provider = MockProvider::new().with_directions_result(Err(RoutingError::ApiError {
            status: 401,
            code: "NotAuthorized".to_string(),
            message: "Invalid token".to_string(),
        }));

        let err = request_route(&provider, vec![PARIS, LONDON], &prefs(None))
            .await
            .unwrap_err();

        assert!(err.is_upstream());
        assert_eq!(provider.directions_calls().len(), 1);
    }

    #[tokio::test]
    async fn takes_only_the_first_route() {
        let mut response = MockProvider::route_through(&[PARIS, LONDON]);
        response
            .routes
            .extend(MockProvider::route_through(&[PARIS, (0.0, 0.0), LONDON]).routes);
        let provider = MockProvider::new().with_directions_result(Ok(response));

        let route = request_route(&provider, vec![PARIS, LONDON], &prefs(None))
            .await
            .unwrap();
        assert_eq!(route.geometry, vec![PARIS, LONDON]);
    }

    #[tokio::test]
    async fn rejects_single_waypoint_without_calling_upstream() {
        let provider = MockProvider::new();
        let err = request_route(&provider, vec![PARIS], &prefs(None))
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::Input(_)));
        assert!(provider.directions_calls().is_empty());
    }

    #[test]
    fn only_true_preferences_become_exclusions() {
        let preferences = TravelPreferences {
            transport_mode: None,
            avoid_tolls: Some(true),
            avoid_highways: Some(false),
            avoid_ferries: Some(true),
        };
        let request = RouteRequest::new(vec![PARIS, LONDON], &preferences);
        assert_eq!(request.exclusions, vec![Exclusion::Toll, Exclusion::Ferry]);
        assert_eq!(request.profile, Profile::Driving);
    }

    #[test]
    fn walking_and_cycling_keep_only_ferry_exclusions() {
        for mode in ["walk", "bike"] {
            let preferences = TravelPreferences {
                transport_mode: Some(mode.to_string()),
                avoid_tolls: Some(true),
                avoid_highways: Some(true),
                avoid_ferries: Some(true),
            };
            let request = RouteRequest::new(vec![PARIS, LONDON], &preferences);
            assert_eq!(request.exclusions, vec![Exclusion::Ferry]);
        }

        let tolls_only = TravelPreferences {
            transport_mode: Some("walking".to_string()),
            avoid_tolls: Some(true),
            ..TravelPreferences::default()
        };
        assert!(RouteRequest::new(vec![PARIS, LONDON], &tolls_only)
            .exclusions
            .is_empty());
    }

    #[tokio::test]
    async fn walking_with_avoid_tolls_sends_no_toll_exclusion() {
        let provider = MockProvider::new();
        let preferences = TravelPreferences {
            transport_mode: Some("walk".to_string()),
            avoid_tolls: Some(true),
            ..TravelPreferences::default()
        };
        request_route(&provider, vec![PARIS, LONDON], &preferences)
            .await
            .unwrap();

        let calls = provider.directions_calls();
        assert_eq!(calls[0].profile, Profile::Walking);
        assert!(calls[0].exclusions.is_empty());
    }
}
