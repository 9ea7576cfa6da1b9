use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status and an `{ error, message }` body.
    #[error("{message} ({status}): {error}")]
    Status {
        status: u16,
        error: String,
        message: String,
    },

    #[error("Failed to decode response: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http { source } => source.status().map(|s| s.as_u16()),
            ClientError::Decode { .. } => None,
        }
    }
}
