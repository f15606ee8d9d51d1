use super::routing::Coord;
use super::search::SearchOutcome;
use serde_json::{json, Value};

fn point(coord: Coord, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [coord.0, coord.1] },
        "properties": properties
    })
}

/// Renders a search outcome as a GeoJSON FeatureCollection: the route line
/// followed by one point per waypoint, or a single point.
pub fn outcome_to_geojson(outcome: &SearchOutcome) -> Value {
    let features = match outcome {
        SearchOutcome::Point {
            location,
            coord,
            route_requested,
        } => {
            let properties = json!({
                "name": location,
                "role": "center",
                "route_requested": route_requested
            });
            vec![point(*coord, properties)]
        }
        SearchOutcome::Route {
            locations,
            waypoints,
            profile,
            route,
        } => {
            let line_coords: Vec<[f64; 2]> =
                route.geometry.iter().map(|&(lon, lat)| [lon, lat]).collect();
            let line = json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": line_coords },
                "properties": {
                    "profile": profile,
                    "locations": locations,
                    "distance_km": route.distance_km,
                    "duration_hours": route.duration_hours
                }
            });

            let last = waypoints.len().saturating_sub(1);
            let stops = waypoints.iter().zip(locations).enumerate().map(|(i, (coord, name))| {
                let role = match i {
                    0 => "origin",
                    i if i == last => "destination",
                    _ => "via",
                };
                point(*coord, json!({ "name": name, "role": role, "order": i }))
            });

            std::iter::once(line).chain(stops).collect()
        }
    };

    json!({ "type": "FeatureCollection", "features": features })
}
