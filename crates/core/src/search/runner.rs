use super::collector::ChainCollector;
use super::finder::ChainFinder;
use super::{SearchOutcome, SearchStatus};
use crate::oracle::{InvocationSite, TypeOracle};
use chainscope_api::models::{ChainElement, SearchBounds, TypeRef};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Everything a single chain search needs besides the oracle.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub site: InvocationSite,
    pub entry_points: Vec<ChainElement>,
    pub expected_types: Vec<TypeRef>,
    pub bounds: SearchBounds,
}

/// Run a chain search on a blocking worker, bounded by `request.bounds.timeout`.
///
/// On timeout the worker is cancelled and the chains collected so far are
/// returned with [`SearchStatus::TimedOut`]. Never fails: a crashed worker
/// yields its partial results with [`SearchStatus::Aborted`].
pub async fn run_chain_search(oracle: Arc<dyn TypeOracle>, request: SearchRequest) -> SearchOutcome {
    if request.entry_points.is_empty()
        || request.expected_types.is_empty()
        || request.bounds.max_chains == 0
    {
        return SearchOutcome::default();
    }

    let collector = ChainCollector::new();
    let cancel_token = CancellationToken::new();
    let timeout = request.bounds.timeout;

    let worker = {
        let collector = collector.clone();
        let cancel_token = cancel_token.clone();
        tokio::task::spawn_blocking(move || {
            let SearchRequest {
                site,
                entry_points,
                expected_types,
                bounds,
            } = request;
            let mut finder = ChainFinder::new(oracle.as_ref(), &site, expected_types, bounds);
            finder.search_into(&entry_points, &collector, &cancel_token)
        })
    };

    let status = match tokio::time::timeout(timeout, worker).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            error!("Chain search worker failed: {}", e);
            SearchStatus::Aborted
        }
        Err(_) => {
            cancel_token.cancel();
            warn!(
                "Chain search timed out after {:?} with {} chains",
                timeout,
                collector.len()
            );
            SearchStatus::TimedOut
        }
    };

    SearchOutcome {
        chains: collector.snapshot(),
        status,
    }
}
