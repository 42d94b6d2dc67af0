use thiserror::Error;


/// Hard failures of the probe. Everything else (not ready yet, timed out,
/// cancelled) is reported through `ProbeResult`.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProbeError {
    /// The spec was rejected before any check was performed
    #[error("Invalid probe spec: {0}")]
    InvalidSpec(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}
