use thiserror::Error;

/// Boxed cause carried by transport and configuration failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by [`LogFetcher`](crate::LogFetcher).
///
/// Every variant is raised before a [`LogStream`](crate::LogStream) is handed
/// out. Errors while reading an already returned stream come through as plain
/// `std::io::Error` from the read call.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was malformed; no I/O was attempted.
    #[error("invalid log request: {0}")]
    InvalidArgument(String),

    /// DNS, connect, TLS or timeout failure while executing the request.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The API server answered with a non-2xx status.
    #[error("log request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Kubeconfig or in-cluster configuration could not be loaded.
    #[error("failed to load cluster configuration: {0}")]
    Config(#[source] BoxError),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// HTTP status of a rejected request, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
