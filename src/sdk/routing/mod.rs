pub mod error;
pub mod geocode;
pub mod profile;
pub mod provider;
pub mod route;
pub mod service;

pub use error::RoutingError;
pub use geocode::{geocode_location, resolve_all};
pub use profile::Profile;
pub use provider::{MockProvider, RemoteMapboxProvider};
pub use route::{request_route, Coord, Exclusion, RouteRequest, RouteResult};
pub use service::RoutingProvider;
