pub mod bounds;
pub mod chain;
pub mod member;
pub mod types;

pub use bounds::*;
pub use chain::*;
pub use member::*;
pub use types::*;
