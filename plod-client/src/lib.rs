pub mod client;
pub mod config;
pub mod error;
pub mod result;

pub use client::SparqlClient;
pub use config::ClientConfig;
pub use error::SparqlError;
pub use result::QueryResults;
