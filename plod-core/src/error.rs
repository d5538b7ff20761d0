//! Error types for plod-core

use plod_client::SparqlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlodError {
    #[error(transparent)]
    Sparql(#[from] SparqlError),

    #[error("No resource named '{0}' in the triplestore")]
    NotFound(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    #[error("Unknown method '{0}' (use --list-methods to see the available ones)")]
    UnknownMethod(String),
}

impl PlodError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlodError::NotFound(_))
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, PlodError::Sparql(e) if e.is_request_failure())
    }
}

pub type Result<T> = std::result::Result<T, PlodError>;
