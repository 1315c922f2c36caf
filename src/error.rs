// Error type for the library surface. The binary and the UI wrap these in
// `anyhow` like the rest of the prototype does; the library keeps them
// typed so callers can tell a rejected request from a dead network.

use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("request rejected ({code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("response carried no data")]
    EmptyData,
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
