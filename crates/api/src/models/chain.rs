use super::member::{MemberInfo, MemberKind};
use super::types::TypeRef;
use crate::error::{OracleError, OracleResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ChainElementKind {
    Field,
    LocalVariable,
    Method,
}

/// One step in a call chain.
///
/// Two elements are equal when they wrap the same member (by unique key),
/// regardless of the qualification flag.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChainElement {
    member: MemberInfo,
    kind: ChainElementKind,
    return_type: TypeRef,
    dimension: usize,
    requires_this: bool,
}

impl ChainElement {
    /// Build an element for `member` whose resolved type is `return_type`.
    ///
    /// Constructors and members with an unresolved type cannot form a chain step.
    pub fn new(member: MemberInfo, return_type: TypeRef, requires_this: bool) -> OracleResult<Self> {
        let kind = match member.kind {
            MemberKind::Field => ChainElementKind::Field,
            MemberKind::LocalVariable => ChainElementKind::LocalVariable,
            MemberKind::Method => ChainElementKind::Method,
            MemberKind::Constructor => {
                return Err(OracleError::UnsupportedMember(member.unique_key()));
            }
        };
        if matches!(return_type.element_type(), TypeRef::Unknown) {
            return Err(OracleError::UnresolvedType(member.unique_key()));
        }
        Ok(Self {
            dimension: return_type.dimensions(),
            member,
            kind,
            return_type,
            requires_this,
        })
    }

    /// Build an element using the member's declared type.
    pub fn from_member(member: MemberInfo, requires_this: bool) -> OracleResult<Self> {
        let return_type = member.type_ref.clone();
        Self::new(member, return_type, requires_this)
    }

    pub fn member(&self) -> &MemberInfo {
        &self.member
    }

    pub fn kind(&self) -> ChainElementKind {
        self.kind
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn return_type_dimension(&self) -> usize {
        self.dimension
    }

    pub fn requires_this_qualification(&self) -> bool {
        self.requires_this
    }

    /// Primitive and void results can neither be dereferenced nor completed.
    pub fn is_terminal_value(&self) -> bool {
        let base = self.return_type.element_type();
        self.dimension == 0 && (base.is_primitive() || base.is_void())
    }

    pub fn unique_key(&self) -> String {
        self.member.unique_key()
    }
}

impl PartialEq for ChainElement {
    fn eq(&self, other: &Self) -> bool {
        self.member.unique_key() == other.member.unique_key()
    }
}

impl Eq for ChainElement {}

impl Hash for ChainElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.member.unique_key().hash(state);
    }
}

/// An ordered sequence of member accesses ending in a value of an expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Chain {
    elements: Vec<ChainElement>,
    expected_dimension: usize,
}

impl Chain {
    pub fn new(elements: Vec<ChainElement>, expected_dimension: usize) -> Self {
        Self {
            elements,
            expected_dimension,
        }
    }

    pub fn elements(&self) -> &[ChainElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn expected_dimension(&self) -> usize {
        self.expected_dimension
    }

    pub fn tail(&self) -> Option<&ChainElement> {
        self.elements.last()
    }

    /// Readable member names joined by `.`, e.g. `x.getBar().get(int)`.
    ///
    /// A shadowed first element keeps its `this.` prefix, so the key
    /// differs from the chain starting at the shadowing local.
    /// Chains printing identically are redundant to a user.
    pub fn printed_key(&self) -> String {
        let names = self
            .elements
            .iter()
            .map(|e| e.member().readable_name())
            .collect::<Vec<_>>()
            .join(".");
        match self.elements.first() {
            Some(head) if head.requires_this_qualification() => format!("this.{}", names),
            _ => names,
        }
    }
}
