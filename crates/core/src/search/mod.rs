//! Call-chain search.
//!
//! [`ChainFinder`] is the synchronous engine; [`run_chain_search`] drives it
//! on a blocking worker under a wall-clock timeout and hands back whatever
//! was collected when the time budget runs out.

mod collector;
mod finder;
mod runner;

pub use collector::ChainCollector;
pub use finder::ChainFinder;
pub use runner::{SearchRequest, run_chain_search};

use chainscope_api::models::Chain;
use serde::Serialize;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SearchStatus {
    /// Every reachable chain within bounds was explored
    #[default]
    Exhausted,
    /// `max_chains` results were collected
    LimitReached,
    /// The time budget elapsed; results are partial
    TimedOut,
    /// The caller abandoned the search
    Cancelled,
    /// The worker died; results are partial
    Aborted,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub chains: Vec<Chain>,
    pub status: SearchStatus,
}

impl SearchOutcome {
    pub fn timed_out(&self) -> bool {
        self.status == SearchStatus::TimedOut
    }
}
