use chainscope_api::models::{MemberInfo, TypeRef};
use serde::{Deserialize, Serialize};

/// What stands before the cursor when completion is triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CompletionNode {
    /// A bare identifier prefix: `foo|`
    SingleName,
    /// An expression receiver: `getFoo().|`
    MemberAccess { receiver: TypeRef },
    /// A dotted name: `Foo.|`, `field.|`, `local.|`
    QualifiedName { qualifier: Qualifier },
    /// Anything chain completion does not handle
    Other,
}

/// What the qualifier of a [`CompletionNode::QualifiedName`] resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Qualifier {
    /// A type name; only static members are reachable
    Type(String),
    Field(TypeRef),
    Local(TypeRef),
}

/// Snapshot of the editor state at a completion request, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionContext {
    /// FQN of the type enclosing the cursor
    pub invoking_type: String,
    /// Identifier prefix already typed
    #[serde(default)]
    pub token: String,
    pub node: CompletionNode,
    /// In declaration order
    #[serde(default)]
    pub visible_locals: Vec<MemberInfo>,
    #[serde(default)]
    pub visible_fields: Vec<MemberInfo>,
    #[serde(default)]
    pub visible_methods: Vec<MemberInfo>,
    #[serde(default)]
    pub expected_type: Option<TypeRef>,
}

impl CompletionContext {
    pub fn new(invoking_type: &str, node: CompletionNode) -> Self {
        Self {
            invoking_type: invoking_type.to_string(),
            token: String::new(),
            node,
            visible_locals: vec![],
            visible_fields: vec![],
            visible_methods: vec![],
            expected_type: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn with_expected_type(mut self, expected: TypeRef) -> Self {
        self.expected_type = Some(expected);
        self
    }

    pub fn with_local(mut self, local: MemberInfo) -> Self {
        self.visible_locals.push(local);
        self
    }

    pub fn with_field(mut self, field: MemberInfo) -> Self {
        self.visible_fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MemberInfo) -> Self {
        self.visible_methods.push(method);
        self
    }

    /// Expected types to search for. Empty when the cursor has no expected type.
    pub fn expected_types(&self) -> Vec<TypeRef> {
        self.expected_type.iter().cloned().collect()
    }
}
