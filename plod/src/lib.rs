pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    QueryRequest, exit_code_for, list_methods, parse_request, resolve_config, run_query,
};
