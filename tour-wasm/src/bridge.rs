use geo_types::{LineString, Rect};
use tour_core::{MapSurface, MeshGeometry, PointRecord, Variant};
use wasm_bindgen::prelude::*;

// Host page contract: the page creates the Leaflet (or compatible) map and
// exposes a `window.tourMap` object with these members. Geometry payloads
// are JSON arrays of [lat, lng] pairs.
#[wasm_bindgen(js_namespace = tourMap)]
extern "C" {
    #[wasm_bindgen(js_name = replaceMesh)]
    fn replace_mesh_js(segments: &str);

    #[wasm_bindgen(js_name = replacePoints)]
    fn replace_points_js(points: &str);

    #[wasm_bindgen(js_name = setRoute)]
    fn set_route_js(variant: &str, path: &str, color: &str);

    #[wasm_bindgen(js_name = clearRoutes)]
    fn clear_routes_js();

    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds_js(south: f64, west: f64, north: f64, east: f64);
}

/// `MapSurface` over the host page's map object.
pub struct MapBridge;

impl MapSurface for MapBridge {
    fn replace_mesh(&mut self, mesh: &MeshGeometry) {
        let payload = serde_json::to_string(&mesh.latlng_segments()).unwrap_or_default();
        replace_mesh_js(&payload);
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        fit_bounds_js(
            bounds.min().y,
            bounds.min().x,
            bounds.max().y,
            bounds.max().x,
        );
    }

    fn replace_points(&mut self, points: &[PointRecord]) {
        let payload = serde_json::to_string(points).unwrap_or_default();
        replace_points_js(&payload);
    }

    fn set_route(&mut self, variant: Variant, path: &LineString<f64>, color: &str) {
        let latlngs: Vec<[f64; 2]> = path.0.iter().map(|c| [c.y, c.x]).collect();
        let payload = serde_json::to_string(&latlngs).unwrap_or_default();
        set_route_js(variant.wire_name(), &payload, color);
    }

    fn clear_routes(&mut self) {
        clear_routes_js();
    }
}
