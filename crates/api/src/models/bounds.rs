use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to a single chain search.
///
/// Values are taken as given; validating user input is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBounds {
    pub max_chains: usize,
    pub min_depth: usize,
    pub max_depth: usize,
    /// Signature prefixes (e.g. `Ljava/lang/Object`) of types whose members are never traversed
    pub excluded_types: Vec<String>,
    pub timeout: Duration,
}

impl SearchBounds {
    pub fn new(max_chains: usize, min_depth: usize, max_depth: usize) -> Self {
        Self {
            max_chains,
            min_depth,
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_excluded_types(mut self, excluded_types: Vec<String>) -> Self {
        self.excluded_types = excluded_types;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True if `key` (a member key or type signature) starts with an excluded prefix.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded_types
            .iter()
            .any(|prefix| !prefix.is_empty() && key.starts_with(prefix.as_str()))
    }
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_chains: 20,
            min_depth: 2,
            max_depth: 4,
            excluded_types: vec![],
            timeout: Duration::from_secs(3),
        }
    }
}
