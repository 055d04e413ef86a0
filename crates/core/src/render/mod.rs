//! Turning accepted chains into insertable proposals.

mod proposal;
mod template;

pub use proposal::{ChainProposal, build_proposals};
pub use template::ChainTemplate;
