pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{OracleError, OracleResult};
pub use models::*;
