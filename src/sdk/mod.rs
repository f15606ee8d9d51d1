pub mod config;
pub mod extract;
pub mod geojson;
pub mod routing;
pub mod search;
pub mod util;
