use chainscope_api::models::Chain;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct CollectorState {
    chains: Vec<Chain>,
    printed: HashSet<String>,
}

/// Shared accumulator of accepted chains.
///
/// The search worker pushes into it while the timeout path may read a
/// snapshot at any moment. Chains that print identically are dropped.
#[derive(Debug, Clone, Default)]
pub struct ChainCollector {
    inner: Arc<RwLock<CollectorState>>,
}

impl ChainCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if an identically printed chain was already collected.
    pub fn push(&self, chain: Chain) -> bool {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !state.printed.insert(chain.printed_key()) {
            return false;
        }
        state.chains.push(chain);
        true
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .chains
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<Chain> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .chains
            .clone()
    }
}
