pub mod error;
pub mod geojson;
pub mod identifier;
pub mod method;
pub mod query;
pub mod report;
pub mod resource;

pub use error::{PlodError, Result};
pub use identifier::Identifier;
pub use method::{Method, MethodArgs, MethodOutput};
pub use query::PlodQuery;
pub use report::OutputFormat;
pub use resource::PlodResource;

// Re-export the client crate so callers need a single dependency
pub use plod_client::{ClientConfig, QueryResults, SparqlClient, SparqlError};
