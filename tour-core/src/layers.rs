use std::collections::BTreeMap;

use geo_types::{LineString, Rect};

use crate::models::{MeshGeometry, PointRecord, RouteResult, Variant};

/// The visual collaborator: a map widget able to render the three layers.
/// Implementations only draw; no network calls originate here.
pub trait MapSurface {
    fn replace_mesh(&mut self, mesh: &MeshGeometry);
    fn fit_bounds(&mut self, bounds: Rect<f64>);
    fn replace_points(&mut self, points: &[PointRecord]);
    fn set_route(&mut self, variant: Variant, path: &LineString<f64>, color: &str);
    fn clear_routes(&mut self);
}

/// Owns the current mesh, point set and per-variant route overlays, and
/// mirrors every mutation to the map surface. Each replace is wholesale;
/// a caller never sees stale and fresh data mixed.
pub struct LayerStore<S> {
    surface: S,
    mesh: MeshGeometry,
    points: Vec<PointRecord>,
    routes: BTreeMap<Variant, RouteResult>,
}

impl<S: MapSurface> LayerStore<S> {
    pub fn new(surface: S) -> Self {
        LayerStore {
            surface,
            mesh: MeshGeometry::default(),
            points: Vec::new(),
            routes: BTreeMap::new(),
        }
    }

    pub fn replace_mesh(&mut self, mesh: MeshGeometry) {
        self.mesh = mesh;
        self.surface.replace_mesh(&self.mesh);
        // refit the view to the fresh network; nothing to fit when empty
        if let Some(bounds) = self.mesh.bounding_rect() {
            self.surface.fit_bounds(bounds);
        }
    }

    pub fn replace_points(&mut self, points: Vec<PointRecord>) {
        self.points = points;
        self.surface.replace_points(&self.points);
    }

    pub fn set_route(&mut self, result: RouteResult) {
        let variant = result.variant;
        self.surface
            .set_route(variant, &result.path, variant.color());
        self.routes.insert(variant, result);
    }

    pub fn clear_routes(&mut self) {
        self.routes.clear();
        self.surface.clear_routes();
    }

    pub fn clear_mesh(&mut self) {
        self.replace_mesh(MeshGeometry::default());
    }

    pub fn clear_points(&mut self) {
        self.replace_points(Vec::new());
    }

    pub fn mesh_loaded(&self) -> bool {
        !self.mesh.is_empty()
    }

    pub fn points_loaded(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn mesh(&self) -> &MeshGeometry {
        &self.mesh
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn route(&self, variant: Variant) -> Option<&RouteResult> {
        self.routes.get(&variant)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteResult> {
        self.routes.values()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records surface calls as compact event strings.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub events: Vec<String>,
    }

    impl MapSurface for RecordingSurface {
        fn replace_mesh(&mut self, mesh: &MeshGeometry) {
            self.events.push(format!("mesh:{}", mesh.segments().0.len()));
        }

        fn fit_bounds(&mut self, bounds: Rect<f64>) {
            self.events.push(format!(
                "fit:{},{},{},{}",
                bounds.min().y,
                bounds.min().x,
                bounds.max().y,
                bounds.max().x
            ));
        }

        fn replace_points(&mut self, points: &[PointRecord]) {
            self.events.push(format!("points:{}", points.len()));
        }

        fn set_route(&mut self, variant: Variant, path: &LineString<f64>, color: &str) {
            self.events
                .push(format!("route:{}:{}:{}", variant.wire_name(), path.0.len(), color));
        }

        fn clear_routes(&mut self) {
            self.events.push("clear-routes".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSurface;
    use super::*;
    use crate::models::PointId;
    use geo_types::{Coord, LineString};

    fn mesh(json: &str) -> MeshGeometry {
        MeshGeometry::parse(json).unwrap()
    }

    const MESH_A: &str = r#"{"features":[
        {"geometry":{"type":"LineString","coordinates":[[-74.08,4.60],[-74.07,4.61]]}},
        {"geometry":{"type":"LineString","coordinates":[[-74.07,4.61],[-74.06,4.62]]}}
    ]}"#;
    const MESH_B: &str = r#"{"features":[
        {"geometry":{"type":"LineString","coordinates":[[10.0,50.0],[10.1,50.1]]}}
    ]}"#;

    fn point(id: i64, lat: f64, lng: f64) -> PointRecord {
        PointRecord {
            id: PointId::Num(id),
            lat,
            lng,
        }
    }

    fn route(variant: Variant, xs: &[f64]) -> RouteResult {
        RouteResult {
            variant,
            path: LineString::from(
                xs.iter().map(|&x| Coord { x, y: 0.0 }).collect::<Vec<_>>(),
            ),
            distance: 1.0,
            elapsed_ms: 1,
        }
    }

    #[test]
    fn replace_mesh_is_wholesale_and_refits_the_view() {
        let mut store = LayerStore::new(RecordingSurface::default());
        store.replace_mesh(mesh(MESH_A));
        store.replace_mesh(mesh(MESH_B));

        assert_eq!(*store.mesh(), mesh(MESH_B));
        assert!(store.mesh_loaded());
        assert_eq!(
            store.surface().events,
            vec![
                "mesh:2",
                "fit:4.6,-74.08,4.62,-74.06",
                "mesh:1",
                "fit:50,10,50.1,10.1",
            ]
        );
    }

    #[test]
    fn empty_mesh_does_not_refit() {
        let mut store = LayerStore::new(RecordingSurface::default());
        store.replace_mesh(MeshGeometry::default());
        assert_eq!(store.surface().events, vec!["mesh:0"]);
        assert!(!store.mesh_loaded());
    }

    #[test]
    fn set_route_leaves_other_variants_alone() {
        let mut store = LayerStore::new(RecordingSurface::default());
        store.set_route(route(Variant::Greedy, &[1.0, 2.0]));
        store.set_route(route(Variant::Brute, &[3.0, 4.0, 5.0]));
        store.set_route(route(Variant::Greedy, &[6.0]));

        assert_eq!(store.route(Variant::Greedy).unwrap().path.0.len(), 1);
        assert_eq!(store.route(Variant::Brute).unwrap().path.0.len(), 3);
        assert_eq!(
            store.surface().events,
            vec![
                "route:greedy:2:dodgerblue",
                "route:brute:3:red",
                "route:greedy:1:dodgerblue",
            ]
        );
    }

    #[test]
    fn clear_routes_keeps_mesh_and_points() {
        let mut store = LayerStore::new(RecordingSurface::default());
        store.replace_mesh(mesh(MESH_B));
        store.replace_points(vec![point(1, 4.6, -74.08)]);
        store.set_route(route(Variant::Dynamic, &[1.0]));
        store.clear_routes();

        assert!(store.route(Variant::Dynamic).is_none());
        assert_eq!(store.routes().count(), 0);
        assert!(store.mesh_loaded());
        assert!(store.points_loaded());
        assert_eq!(store.surface().events.last().unwrap(), "clear-routes");
    }

    #[test]
    fn layer_clear_resets_predicates() {
        let mut store = LayerStore::new(RecordingSurface::default());
        store.replace_mesh(mesh(MESH_B));
        store.replace_points(vec![point(1, 4.6, -74.08), point(2, 4.7, -74.09)]);
        assert!(store.mesh_loaded() && store.points_loaded());

        store.clear_mesh();
        store.clear_points();
        assert!(!store.mesh_loaded());
        assert!(!store.points_loaded());
        assert!(store.points().is_empty());
    }
}
