use super::template::ChainTemplate;
use chainscope_api::models::{Chain, MemberKind};
use serde::Serialize;

/// Chains rank below the regular proposals of the host.
const CHAIN_PROPOSAL_BOOST: i32 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ChainProposal {
    pub chain: Chain,
    pub template: ChainTemplate,
}

impl ChainProposal {
    pub fn new(chain: Chain) -> Self {
        let template = ChainTemplate::create(&chain);
        Self { chain, template }
    }

    /// Shorter chains rank higher.
    pub fn relevance(&self) -> i32 {
        let len = i32::try_from(self.chain.len()).unwrap_or(i32::MAX - CHAIN_PROPOSAL_BOOST);
        -len - CHAIN_PROPOSAL_BOOST
    }

    /// Method names without parameters, variable names as written.
    pub fn element_names(&self) -> Vec<String> {
        self.chain
            .elements()
            .iter()
            .map(|e| {
                let member = e.member();
                match member.kind {
                    MemberKind::Method | MemberKind::Constructor => member.name.clone(),
                    MemberKind::Field | MemberKind::LocalVariable => member.readable_name(),
                }
            })
            .collect()
    }

    pub fn display_string(&self) -> String {
        format!("{} - {}", self.template.title, self.template.description)
    }
}

/// Wrap chains into proposals, best first. Equal relevance keeps search order.
pub fn build_proposals(chains: Vec<Chain>) -> Vec<ChainProposal> {
    let mut proposals: Vec<ChainProposal> = chains.into_iter().map(ChainProposal::new).collect();
    proposals.sort_by_key(|p| std::cmp::Reverse(p.relevance()));
    proposals
}
