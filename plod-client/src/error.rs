use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparqlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode SPARQL results: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SparqlError {
    /// True for failures where the endpoint could not be reached or answered badly,
    /// as opposed to a local configuration mistake.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            SparqlError::Http(_) | SparqlError::Status { .. } | SparqlError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SparqlError>;
