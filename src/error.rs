/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum GenZError {
    /// Network or request execution error from `reqwest`.
    #[error("network error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// A 2xx response whose body did not match the documented shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request rejected locally before any network exchange.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
