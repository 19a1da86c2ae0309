use thiserror::Error;

/// Client-side API error.
///
/// Callers match exhaustively; no error kind is ever signalled through
/// message strings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The refresh token is missing or the refresh exchange was rejected.
    /// Terminal: the session has already been torn down when this is
    /// returned, and the caller must send the user back to login.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// Any non-2xx response other than a refreshable 401. The message is
    /// taken from the JSON error body when one is present.
    #[error("HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Transport-level failure (host unreachable, connection reset).
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// Request issued while a logout/teardown is in progress. Not
    /// actionable — log and drop, never display.
    #[error("logging out")]
    LoggingOut,

    /// A 2xx body that does not parse into the expected shape.
    #[error("decode: {0}")]
    Decode(String),

    /// Credential store failure.
    #[error("store: {0}")]
    Store(#[from] genova_kv::StoreError),
}
