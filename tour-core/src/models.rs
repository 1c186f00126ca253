use std::fmt;

use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiLineString, Rect};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Solver strategies the backend can run. The wire name is the `type` query
/// parameter of the tsp endpoint; the color is fixed here and used for both
/// the route overlay and the ledger row of that variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    Brute,
    Greedy,
    Dynamic,
    Genetic,
}

impl Variant {
    pub const COUNT: usize = 4;
    pub const ALL: [Variant; Self::COUNT] = [
        Variant::Brute,
        Variant::Greedy,
        Variant::Dynamic,
        Variant::Genetic,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Variant::Brute => "brute",
            Variant::Greedy => "greedy",
            Variant::Dynamic => "dp",
            Variant::Genetic => "genetic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Brute => "Brute force",
            Variant::Greedy => "Greedy",
            Variant::Dynamic => "Dynamic programming",
            Variant::Genetic => "Genetic",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Variant::Brute => "red",
            Variant::Greedy => "dodgerblue",
            Variant::Dynamic => "green",
            Variant::Genetic => "blueviolet",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Opaque point identifier; the backend sends either numbers or strings
/// depending on the uploaded file, so both are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(i64),
    Text(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Num(n) => write!(f, "{}", n),
            PointId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One uploaded location, as returned by the points endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: PointId,
    pub lat: f64,
    pub lng: f64,
}

// Minimal GeoJSON subset for the mesh responses. Unknown members
// (properties, bbox, feature type tags) are ignored by serde.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<FeatureGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    #[serde(rename = "type")]
    type_: String,
    coordinates: serde_json::Value,
}

/// The road network as line segments. Replaced wholesale on every
/// successful upload, never merged.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGeometry(MultiLineString<f64>);

impl Default for MeshGeometry {
    fn default() -> Self {
        MeshGeometry(MultiLineString::new(Vec::new()))
    }
}

impl MeshGeometry {
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let fc: FeatureCollection =
            serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;
        Self::from_collection(fc)
    }

    // Keeps only LineString features; other geometry kinds never reach the
    // road layer. A feature that claims LineString but carries bad
    // coordinates makes the whole body malformed.
    pub(crate) fn from_collection(fc: FeatureCollection) -> Result<Self, ClientError> {
        let mut segments = Vec::new();
        for feature in fc.features {
            let Some(geom) = feature.geometry else { continue };
            if geom.type_ != "LineString" {
                continue;
            }
            // GeoJSON coordinate order is [lng, lat]
            let coords: Vec<[f64; 2]> = serde_json::from_value(geom.coordinates)
                .map_err(|e| ClientError::Malformed(e.to_string()))?;
            segments.push(LineString::from(
                coords
                    .into_iter()
                    .map(|c| Coord { x: c[0], y: c[1] })
                    .collect::<Vec<_>>(),
            ));
        }
        Ok(MeshGeometry(MultiLineString::new(segments)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    pub fn segments(&self) -> &MultiLineString<f64> {
        &self.0
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.0.bounding_rect()
    }

    /// Segments as `[lat, lng]` pair lists, the order map widgets expect.
    pub fn latlng_segments(&self) -> Vec<Vec<[f64; 2]>> {
        self.0
            .0
            .iter()
            .map(|ls| ls.0.iter().map(|c| [c.y, c.x]).collect())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointsUpload {
    pub points: Vec<PointRecord>,
    #[serde(default, rename = "updatedMesh")]
    pub updated_mesh: Option<FeatureCollection>,
}

// The solver's answer. The optional `color` member is not modeled; variant
// colors are fixed client-side.
#[derive(Debug, Deserialize)]
pub(crate) struct TspResponse {
    pub path: Vec<[f64; 2]>,
    pub distance: f64,
    pub time: u64,
}

/// One computed route, kept per variant until superseded or cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    pub variant: Variant,
    pub path: LineString<f64>,
    pub distance: f64,
    pub elapsed_ms: u64,
}

impl RouteResult {
    // The solver sends the path in [lat, lng] order; normalize to x = lng.
    pub(crate) fn from_wire(variant: Variant, wire: TspResponse) -> Self {
        let path = LineString::from(
            wire.path
                .into_iter()
                .map(|c| Coord { x: c[1], y: c[0] })
                .collect::<Vec<_>>(),
        );
        RouteResult {
            variant,
            path,
            distance: wire.distance,
            elapsed_ms: wire.time,
        }
    }

    pub fn latlng_path(&self) -> Vec<[f64; 2]> {
        self.path.0.iter().map(|c| [c.y, c.x]).collect()
    }
}
