//! Chain completion for a single editor request.
//!
//! [`ChainCompletionComputer`] turns a [`CompletionContext`] into ranked
//! [`ChainProposal`]s: it collects entry points, runs the bounded chain
//! search under the configured time budget and renders the results.

mod context;
mod entrypoints;

pub use context::{CompletionContext, CompletionNode, Qualifier};
pub use entrypoints::collect_entry_points;

use crate::config::ChainSettings;
use crate::error::Result;
use crate::oracle::TypeOracle;
use crate::render::{ChainProposal, build_proposals};
use crate::search::{SearchRequest, SearchStatus, run_chain_search};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

pub const TIMEOUT_MESSAGE: &str = "Timeout during call chain computation.";
pub const ABORTED_MESSAGE: &str = "Call chain computation failed.";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompletionOutcome {
    pub proposals: Vec<ChainProposal>,
    /// Set when the search was cut short; proposals are still usable
    pub error: Option<String>,
    pub status: SearchStatus,
}

pub struct ChainCompletionComputer {
    oracle: Arc<dyn TypeOracle>,
    settings: ChainSettings,
}

impl ChainCompletionComputer {
    pub fn new(oracle: Arc<dyn TypeOracle>, settings: ChainSettings) -> Self {
        Self { oracle, settings }
    }

    pub fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    /// Compute chain proposals for `ctx`.
    ///
    /// Fails only on invalid settings. A request that cannot be served
    /// (unknown invoking type, no expected type, no entry points) yields an
    /// empty outcome.
    pub async fn compute(&self, ctx: &CompletionContext) -> Result<CompletionOutcome> {
        let bounds = self.settings.to_bounds()?;

        let Some(site) = self.oracle.resolve_invocation_site(&ctx.invoking_type) else {
            debug!("Cannot resolve invocation site {}", ctx.invoking_type);
            return Ok(CompletionOutcome::default());
        };

        let expected_types = ctx.expected_types();
        if expected_types.is_empty() {
            debug!("No expected type at completion location");
            return Ok(CompletionOutcome::default());
        }

        let entry_points = collect_entry_points(self.oracle.as_ref(), ctx, &site);
        if entry_points.is_empty() {
            debug!("No entry points for token '{}'", ctx.token);
            return Ok(CompletionOutcome::default());
        }
        debug!("Searching chains from {} entry points", entry_points.len());

        let request = SearchRequest {
            site,
            entry_points,
            expected_types,
            bounds,
        };
        let outcome = run_chain_search(self.oracle.clone(), request).await;

        let error = match outcome.status {
            SearchStatus::TimedOut => Some(TIMEOUT_MESSAGE.to_string()),
            SearchStatus::Aborted => Some(ABORTED_MESSAGE.to_string()),
            _ => None,
        };
        let status = outcome.status;
        let proposals = build_proposals(outcome.chains);
        info!("Computed {} chain proposals ({:?})", proposals.len(), status);

        Ok(CompletionOutcome {
            proposals,
            error,
            status,
        })
    }
}
