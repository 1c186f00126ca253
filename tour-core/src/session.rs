use crate::error::ClientError;
use crate::layers::{LayerStore, MapSurface};
use crate::ledger::Ledger;
use crate::models::{MeshGeometry, PointsUpload, RouteResult, TspResponse, Variant};

/// One user-triggered operation. The UI maps each control to an action and
/// hands it to the dispatcher; nothing else reaches the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    UploadMesh,
    UploadPoints,
    Run(Variant),
    RunAll,
    ClearRoutes,
    ClearResults,
    Download,
}

// Monotonic per-target counter. A response is applied only while its ticket
// still carries the latest issued sequence number, so a slow response can
// never clobber the state a newer request produced.
#[derive(Clone, Copy, Debug, Default)]
struct SeqCounter {
    issued: u64,
}

impl SeqCounter {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn is_current(&self, seq: u64) -> bool {
        self.issued == seq
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MeshTicket(u64);

#[derive(Clone, Copy, Debug)]
pub struct PointsTicket(u64);

#[derive(Clone, Copy, Debug)]
pub struct RunTicket {
    variant: Variant,
    seq: u64,
}

impl RunTicket {
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

/// What happened to a completed response.
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Applied(T),
    /// A newer request for the same target was issued meanwhile; the
    /// response was discarded without touching any state.
    Stale,
}

/// The session orchestrator. Owns all client state; every mutation happens
/// inside a `complete_*` call, after the response has been fully parsed, so
/// callers never observe a half-applied replacement.
///
/// Network traffic itself lives outside: a `begin_*` call validates the
/// preconditions and issues a ticket, the driver performs the request, and
/// the matching `complete_*` call applies the body.
pub struct Session<S: MapSurface> {
    layers: LayerStore<S>,
    ledger: Ledger,
    mesh_seq: SeqCounter,
    points_seq: SeqCounter,
    run_seq: [SeqCounter; Variant::COUNT],
}

impl<S: MapSurface> Session<S> {
    pub fn new(surface: S) -> Self {
        Session {
            layers: LayerStore::new(surface),
            ledger: Ledger::default(),
            mesh_seq: SeqCounter::default(),
            points_seq: SeqCounter::default(),
            run_seq: [SeqCounter::default(); Variant::COUNT],
        }
    }

    pub fn layers(&self) -> &LayerStore<S> {
        &self.layers
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn begin_mesh_upload(&mut self, file_selected: bool) -> Result<MeshTicket, ClientError> {
        if !file_selected {
            return Err(ClientError::MissingInput);
        }
        Ok(MeshTicket(self.mesh_seq.issue()))
    }

    pub fn complete_mesh_upload(
        &mut self,
        ticket: MeshTicket,
        body: &str,
    ) -> Result<Outcome<()>, ClientError> {
        if !self.mesh_seq.is_current(ticket.0) {
            return Ok(Outcome::Stale);
        }
        let mesh = MeshGeometry::parse(body)?;
        self.layers.replace_mesh(mesh);
        Ok(Outcome::Applied(()))
    }

    pub fn begin_points_upload(&mut self, file_selected: bool) -> Result<PointsTicket, ClientError> {
        if !file_selected {
            return Err(ClientError::MissingInput);
        }
        Ok(PointsTicket(self.points_seq.issue()))
    }

    /// Applies an optional re-snapped mesh first, then the point set; the
    /// uploaded points may reference the fresh mesh. The whole body is
    /// parsed before either layer is touched.
    pub fn complete_points_upload(
        &mut self,
        ticket: PointsTicket,
        body: &str,
    ) -> Result<Outcome<usize>, ClientError> {
        if !self.points_seq.is_current(ticket.0) {
            return Ok(Outcome::Stale);
        }
        let upload: PointsUpload =
            serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;
        let mesh = upload
            .updated_mesh
            .map(MeshGeometry::from_collection)
            .transpose()?;
        if let Some(mesh) = mesh {
            self.layers.replace_mesh(mesh);
        }
        let count = upload.points.len();
        self.layers.replace_points(upload.points);
        Ok(Outcome::Applied(count))
    }

    pub fn begin_run(&mut self, variant: Variant) -> Result<RunTicket, ClientError> {
        if !(self.layers.mesh_loaded() && self.layers.points_loaded()) {
            return Err(ClientError::Precondition);
        }
        Ok(RunTicket {
            variant,
            seq: self.run_seq[variant.index()].issue(),
        })
    }

    /// On success the overlay for the ticket's variant is replaced and a
    /// ledger row appended. A failed or malformed run leaves any earlier
    /// result for that variant in place; there is no rollback.
    pub fn complete_run(
        &mut self,
        ticket: RunTicket,
        body: &str,
    ) -> Result<Outcome<RouteResult>, ClientError> {
        if !self.run_seq[ticket.variant.index()].is_current(ticket.seq) {
            return Ok(Outcome::Stale);
        }
        let wire: TspResponse =
            serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;
        let result = RouteResult::from_wire(ticket.variant, wire);
        self.layers.set_route(result.clone());
        self.ledger.record(result.clone());
        Ok(Outcome::Applied(result))
    }

    pub fn clear_routes(&mut self) {
        self.layers.clear_routes();
    }

    pub fn clear_mesh(&mut self) {
        self.layers.clear_mesh();
    }

    pub fn clear_points(&mut self) {
        self.layers.clear_points();
    }

    pub fn clear_results(&mut self) {
        self.ledger.clear();
    }
}
