//! Bounded breadth-first search for call chains.

use super::collector::ChainCollector;
use super::{SearchOutcome, SearchStatus};
use crate::oracle::{InvocationSite, TypeOracle};
use chainscope_api::models::{Chain, ChainElement, SearchBounds, TypeRef};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Pending chains beyond this are not extended further.
const MAX_PENDING_CHAINS: usize = 50_000;

pub struct ChainFinder<'a> {
    oracle: &'a dyn TypeOracle,
    site: &'a InvocationSite,
    expected_types: Vec<TypeRef>,
    bounds: SearchBounds,
    /// Dereferenceable members per (array-stripped) type
    expansions: HashMap<TypeRef, Rc<Vec<ChainElement>>>,
}

impl<'a> ChainFinder<'a> {
    pub fn new(
        oracle: &'a dyn TypeOracle,
        site: &'a InvocationSite,
        expected_types: Vec<TypeRef>,
        bounds: SearchBounds,
    ) -> Self {
        Self {
            oracle,
            site,
            expected_types,
            bounds,
            expansions: HashMap::new(),
        }
    }

    /// Run the search to completion (or until its own deadline) and return the chains found.
    pub fn search(&mut self, entry_points: &[ChainElement]) -> SearchOutcome {
        let collector = ChainCollector::new();
        let status = self.search_into(entry_points, &collector, &CancellationToken::new());
        SearchOutcome {
            chains: collector.snapshot(),
            status,
        }
    }

    /// Run the search, publishing every accepted chain to `collector` as soon
    /// as it is found. Stops early once `cancel` fires or the deadline passes.
    pub fn search_into(
        &mut self,
        entry_points: &[ChainElement],
        collector: &ChainCollector,
        cancel: &CancellationToken,
    ) -> SearchStatus {
        if self.bounds.max_chains == 0 || entry_points.is_empty() {
            return SearchStatus::Exhausted;
        }
        let deadline = Instant::now().checked_add(self.bounds.timeout);

        let expected_types = self.expected_types.clone();
        for expected in &expected_types {
            if collector.len() >= self.bounds.max_chains {
                return SearchStatus::LimitReached;
            }
            let expected_dimension = expected.dimensions();
            let expected_base = expected.element_type();
            if self.bounds.is_excluded(&expected_base.signature()) {
                debug!("Expected type {} is excluded, skipping", expected);
                continue;
            }

            let status = self.search_for_expected_type(
                expected_base,
                expected_dimension,
                entry_points,
                collector,
                cancel,
                deadline,
            );
            if status != SearchStatus::Exhausted {
                info!("Chain search stopped ({:?}) with {} chains", status, collector.len());
                return status;
            }
        }

        info!("Chain search exhausted with {} chains", collector.len());
        SearchStatus::Exhausted
    }

    fn search_for_expected_type(
        &mut self,
        expected: &TypeRef,
        expected_dimension: usize,
        entry_points: &[ChainElement],
        collector: &ChainCollector,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
    ) -> SearchStatus {
        let mut pending = self.prepare_queue(entry_points);

        while let Some(chain) = pending.pop_front() {
            if cancel.is_cancelled() {
                return SearchStatus::Cancelled;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return SearchStatus::TimedOut;
            }
            let Some(tail) = chain.last() else {
                continue;
            };

            if chain.len() >= self.bounds.min_depth
                && self.is_valid_end_of_chain(tail, expected, expected_dimension)
            {
                collector.push(Chain::new(chain.clone(), expected_dimension));
                if collector.len() >= self.bounds.max_chains {
                    return SearchStatus::LimitReached;
                }
            }

            if chain.len() >= self.bounds.max_depth || pending.len() >= MAX_PENDING_CHAINS {
                continue;
            }

            let next_elements = self.contributing_elements(tail.return_type());
            for element in next_elements.iter() {
                if chain.contains(element) {
                    continue;
                }
                let mut extended = Vec::with_capacity(chain.len() + 1);
                extended.extend_from_slice(&chain);
                extended.push(element.clone());
                pending.push_back(extended);
            }
        }

        SearchStatus::Exhausted
    }

    fn prepare_queue(&self, entry_points: &[ChainElement]) -> VecDeque<Vec<ChainElement>> {
        entry_points
            .iter()
            .filter(|e| !e.is_terminal_value())
            .filter(|e| !self.bounds.is_excluded(&e.unique_key()))
            .map(|e| vec![e.clone()])
            .collect()
    }

    /// The tail satisfies `expected` if enough array dimensions are left and
    /// its element type is assignable.
    fn is_valid_end_of_chain(
        &self,
        tail: &ChainElement,
        expected: &TypeRef,
        expected_dimension: usize,
    ) -> bool {
        if expected_dimension > tail.return_type_dimension() {
            return false;
        }
        let base = tail.return_type().element_type();
        if base.is_primitive() || base.is_void() {
            return false;
        }
        self.oracle.is_assignable(base, expected)
    }

    /// Members reachable from a value of type `ty`, memoized per element type.
    fn contributing_elements(&mut self, ty: &TypeRef) -> Rc<Vec<ChainElement>> {
        let key = ty.element_type().clone();
        if let Some(cached) = self.expansions.get(&key) {
            return cached.clone();
        }

        let members = match self.oracle.visible_instance_members(&key, self.site) {
            Ok(members) => members,
            Err(e) => {
                debug!("No members for {}: {}", key, e);
                Vec::new()
            }
        };

        let mut elements = Vec::with_capacity(members.len());
        for member in members {
            let member_key = member.unique_key();
            if self.bounds.is_excluded(&member_key) {
                continue;
            }
            let element = self
                .oracle
                .member_type(&member)
                .and_then(|return_type| ChainElement::new(member, return_type, false));
            match element {
                Ok(element) if !element.is_terminal_value() => elements.push(element),
                Ok(_) => {}
                Err(e) => debug!("Skipping member {}: {}", member_key, e),
            }
        }

        let elements = Rc::new(elements);
        self.expansions.insert(key, elements.clone());
        elements
    }
}
