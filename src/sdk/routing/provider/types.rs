use serde::Deserialize;

// --- Data Structures for parsing geocoding/directions responses ---

#[derive(Deserialize, Debug)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}
#[derive(Deserialize, Debug)]
pub struct Feature {
    pub geometry: Geometry,
}
#[derive(Deserialize, Debug)]
pub struct Geometry {
    pub coordinates: [f64; 2],
}

#[derive(Deserialize, Debug, Default)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}
#[derive(Deserialize, Debug)]
pub struct Route {
    pub geometry: LineGeometry,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}
#[derive(Deserialize, Debug)]
pub struct LineGeometry {
    pub coordinates: Vec<[f64; 2]>,
}
