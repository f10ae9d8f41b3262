use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            FetchError::MalformedPayload(_) => None,
        }
    }
}
