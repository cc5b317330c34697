use thiserror::Error;

/// Top-level error type for the `insights-api` crate.
///
/// Variants are grouped by where the failure happened: building the request,
/// moving bytes over the network, the service answering with an error
/// status, or the service answering with a body we cannot decode. Nothing
/// here is retried or logged by the library; every error goes straight back
/// to the caller.
#[derive(Debug, Error)]
pub enum Error {
    // ── Request construction ────────────────────────────────────────
    /// The base URL or a joined endpoint path did not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (usually the API token) is not valid in HTTP.
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    /// reqwest refused to assemble the request (bad method/URL combination).
    #[error("Failed to build request: {0}")]
    Request(#[source] reqwest::Error),

    /// The request payload could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Transport ───────────────────────────────────────────────────
    /// Network-level failure: DNS, connection refused, timeout, TLS handshake.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// The service answered with a status code >= 400.
    ///
    /// `body` is the raw response body so callers can inspect whatever
    /// detail the service attached (datapoint rejections in particular).
    #[error("Insights API error (HTTP {status}): {message}")]
    Status {
        status: u16,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Bulk sync ───────────────────────────────────────────────────
    /// Bulk sync was called with no records; nothing was sent.
    #[error("Bulk sync called with no access points")]
    NothingToSync,

    /// Every chunk was accepted, but the service accounted for a different
    /// number of records than were sent. Chunks already applied stay applied.
    #[error("Bulk sync incomplete: sent {expected} access points, service accounted for {accounted}")]
    SyncIncomplete { expected: usize, accounted: usize },
}

impl Error {
    /// Returns `true` if this is a transient network error.
    ///
    /// The client never retries on its own; this only helps callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the service answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// HTTP status code, if the service answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body attached to a status or decode failure.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}
