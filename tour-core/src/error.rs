use thiserror::Error;

/// Everything a user-triggered operation can fail with. Each action catches
/// its own error at the UI boundary; none of these abort other state.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no file selected")]
    MissingInput,
    #[error("load the road network and the points before running a solver")]
    Precondition,
    #[error("request failed with HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}
