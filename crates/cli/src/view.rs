use chainscope_api::models::{MemberInfo, MemberKind};
use chainscope_core::render::ChainProposal;
use tabled::Tabled;

/// A terminal view of a chain proposal
#[derive(Tabled)]
pub struct ProposalView {
    pub relevance: i32,
    pub title: String,
    pub body: String,
    pub elements: String,
}

impl ProposalView {
    pub fn from_proposal(proposal: &ChainProposal) -> Self {
        Self {
            relevance: proposal.relevance(),
            title: proposal.template.title.clone(),
            body: proposal.template.body.clone(),
            elements: proposal.template.description.clone(),
        }
    }
}

/// A terminal view of a visible member
#[derive(Tabled)]
pub struct MemberView {
    pub kind: String,
    pub name: String,
    #[tabled(rename = "type")]
    pub type_name: String,
    pub declared_in: String,
    pub modifiers: String,
}

impl MemberView {
    pub fn from_member(member: &MemberInfo) -> Self {
        let kind = match member.kind {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
            MemberKind::LocalVariable => "local",
        };
        let modifiers = if member.modifiers.is_empty() {
            "-".to_string()
        } else {
            member.modifiers.join(" ")
        };
        Self {
            kind: kind.to_string(),
            name: member.readable_name(),
            type_name: member.type_ref.to_string(),
            declared_in: member
                .declaring_type
                .as_deref()
                .map(shorten_fqn)
                .unwrap_or_else(|| "-".to_string()),
            modifiers,
        }
    }
}

/// `com.example.app.Foo` -> `c.e.app.Foo`
pub fn shorten_fqn(fqn: &str) -> String {
    let parts: Vec<&str> = fqn.split('.').collect();
    if parts.len() <= 2 {
        return fqn.to_string();
    }
    let keep_from = parts.len() - 2;
    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i < keep_from {
            if let Some(c) = part.chars().next() {
                result.push(c);
                result.push('.');
            }
        } else {
            result.push_str(part);
            if i < parts.len() - 1 {
                result.push('.');
            }
        }
    }
    result
}
