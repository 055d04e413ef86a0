pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod render;
pub mod search;

pub use error::Result;
