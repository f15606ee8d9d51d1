pub mod sdk;

pub use sdk::config::ServiceConfig;
pub use sdk::extract::{
    extract_via_pattern, ExtractionChain, ExtractionResult, Extractor, TravelPreferences,
};
pub use sdk::geojson::outcome_to_geojson;
pub use sdk::routing::{request_route, resolve_all, Coord, Profile, RouteResult, RoutingError};
pub use sdk::search::{SearchOutcome, TripSearch};
