use super::error::RoutingError;
use super::route::Coord;
use super::service::RoutingProvider;
use futures::future::join_all;

/// Geocodes a single name, keeping only the top-ranked match.
pub async fn geocode_location<P>(provider: &P, name: &str) -> Result<Coord, RoutingError>
where
    P: RoutingProvider + ?Sized,
{
    let matches = provider.geocode(name).await?;
    matches.first().copied().ok_or_else(|| {
        log::warn!("No geocode results for location: \"{}\"", name);
        RoutingError::NotFound {
            location: name.to_string(),
        }
    })
}

/// Geocodes every location concurrently. The output keeps the input order.
///
/// All lookups are awaited before reporting; the reported failure is the first
/// one in input order, so a `NotFound` always names a location the user typed.
pub async fn resolve_all<P>(provider: &P, locations: &[String]) -> Result<Vec<Coord>, RoutingError>
where
    P: RoutingProvider + ?Sized,
{
    if locations.is_empty() {
        return Err(RoutingError::Input("no locations to resolve".to_string()));
    }

    log::debug!("Geocoding {} locations: {:?}", locations.len(), locations);
    let results = join_all(
        locations
            .iter()
            .map(|name| geocode_location(provider, name)),
    )
    .await;

    let coords = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    for (name, coord) in locations.iter().zip(&coords) {
        log::info!("Resolved \"{}\" to {:?}", name, coord);
    }
    Ok(coords)
}
