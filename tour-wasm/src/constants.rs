pub const FILE_INPUT_OSM: &str = "file-osm";
pub const FILE_INPUT_POINTS: &str = "file-points";
pub const LEDGER_ELEMENT: &str = "ledger";
pub const RESULT_FILENAME: &str = "route-result.geojson";
