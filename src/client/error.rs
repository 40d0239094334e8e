use thiserror::Error;

/// Failures surfaced by the REPL transport.
///
/// `Api` carries the server's own error message and is shown to the user
/// verbatim; the other variants describe plumbing problems. None of these
/// are fatal to the session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
