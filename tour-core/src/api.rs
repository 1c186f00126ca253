use crate::models::Variant;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Backend URLs. The host and port are configurable; the paths are fixed
/// by the backend contract.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Endpoints {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn upload_osm(&self) -> String {
        format!("{}/api/network/upload-osm", self.base)
    }

    pub fn upload_points(&self) -> String {
        format!("{}/api/points/upload-points", self.base)
    }

    pub fn tsp(&self, variant: Variant) -> String {
        format!("{}/api/network/tsp?type={}", self.base, variant.wire_name())
    }

    pub fn download(&self) -> String {
        format!("{}/api/network/result/download", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::new(DEFAULT_API_BASE)
    }
}
