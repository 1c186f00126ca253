mod api;
mod error;
mod layers;
mod ledger;
mod models;
mod session;

pub use api::{DEFAULT_API_BASE, Endpoints};
pub use error::ClientError;
pub use layers::{LayerStore, MapSurface};
pub use ledger::Ledger;
pub use models::{MeshGeometry, PointId, PointRecord, RouteResult, Variant};
pub use session::{Action, MeshTicket, Outcome, PointsTicket, RunTicket, Session};
