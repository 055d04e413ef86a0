use chainscope_api::OracleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Type system error: {0}")]
    Oracle(#[from] OracleError),
}

pub type Result<T> = std::result::Result<T, ChainscopeError>;
