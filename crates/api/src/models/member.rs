use super::types::{TypeRef, class_signature};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    LocalVariable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

/// Information about a method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ParameterInfo {
    /// Parameter name (may be synthetic like "arg0")
    pub name: String,
    /// Parameter type
    pub type_ref: TypeRef,
    /// True when this parameter is declared with `...` varargs syntax.
    #[serde(default)]
    pub is_varargs: bool,
}

/// A field, method, constructor or local variable as reported by the type system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct MemberInfo {
    /// Simple name, e.g., "get" or "size"
    pub name: String,
    pub kind: MemberKind,
    /// FQN of the declaring type; `None` for local variables
    #[serde(default)]
    pub declaring_type: Option<String>,
    /// Field type, variable type or method return type
    pub type_ref: TypeRef,
    /// Method parameters (None for fields and variables)
    #[serde(default)]
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Modifiers like public, static, final
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl MemberInfo {
    pub fn field(declaring_type: &str, name: &str, type_ref: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            kind: MemberKind::Field,
            declaring_type: Some(declaring_type.to_string()),
            type_ref,
            parameters: None,
            modifiers: vec!["public".to_string()],
        }
    }

    pub fn method(
        declaring_type: &str,
        name: &str,
        parameters: Vec<TypeRef>,
        return_type: TypeRef,
    ) -> Self {
        let parameters = parameters
            .into_iter()
            .enumerate()
            .map(|(i, type_ref)| ParameterInfo {
                name: format!("arg{}", i),
                type_ref,
                is_varargs: false,
            })
            .collect();
        Self {
            name: name.to_string(),
            kind: MemberKind::Method,
            declaring_type: Some(declaring_type.to_string()),
            type_ref: return_type,
            parameters: Some(parameters),
            modifiers: vec!["public".to_string()],
        }
    }

    pub fn local(name: &str, type_ref: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            kind: MemberKind::LocalVariable,
            declaring_type: None,
            type_ref,
            parameters: None,
            modifiers: vec![],
        }
    }

    /// Replace the modifier list.
    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }

    pub fn visibility(&self) -> Visibility {
        if self.has_modifier("public") {
            Visibility::Public
        } else if self.has_modifier("protected") {
            Visibility::Protected
        } else if self.has_modifier("private") {
            Visibility::Private
        } else {
            Visibility::Package
        }
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self.kind, MemberKind::Method | MemberKind::Constructor)
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.parameters.iter().flatten().map(|p| &p.type_ref)
    }

    /// Signature of the declaring type, if any.
    pub fn declaring_signature(&self) -> Option<String> {
        self.declaring_type.as_deref().map(class_signature)
    }

    /// Globally unique key of this member.
    ///
    /// Fields: `Lp/A;.name)Lp/B;`, methods: `Lp/A;.name(I)Lp/B;`, locals: `#name`.
    pub fn unique_key(&self) -> String {
        let owner = self.declaring_signature().unwrap_or_default();
        match self.kind {
            MemberKind::LocalVariable => format!("#{}", self.name),
            MemberKind::Field => format!("{}.{}){}", owner, self.name, self.type_ref.signature()),
            MemberKind::Method | MemberKind::Constructor => format!(
                "{}.{}({}){}",
                owner,
                self.name,
                self.parameter_signature(),
                self.type_ref.signature()
            ),
        }
    }

    /// Key under which a member hides or overrides a same-named member of a supertype.
    ///
    /// Fields: name + type signature, methods: name + parameter signatures.
    pub fn hierarchy_key(&self) -> String {
        if self.is_invocable() {
            format!("{}({}", self.name, self.parameter_signature())
        } else {
            format!("{}{}", self.name, self.type_ref.signature())
        }
    }

    /// Name as shown to a user: `getBar()`, `get(int)`, `field`.
    pub fn readable_name(&self) -> String {
        if !self.is_invocable() {
            return self.name.clone();
        }
        let params: Vec<String> = self.parameter_types().map(|t| t.short_name()).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    fn parameter_signature(&self) -> String {
        self.parameter_types().map(|t| t.signature()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_keys() {
        let field = MemberInfo::field("p.A", "count", TypeRef::raw("int"));
        assert_eq!(field.unique_key(), "Lp/A;.count)I");

        let method = MemberInfo::method(
            "p.A",
            "find",
            vec![TypeRef::id("java.lang.String"), TypeRef::raw("int")],
            TypeRef::id("p.B"),
        );
        assert_eq!(method.unique_key(), "Lp/A;.find(Ljava/lang/String;I)Lp/B;");
        assert_eq!(method.hierarchy_key(), "find(Ljava/lang/String;I");
        assert_eq!(method.readable_name(), "find(String, int)");

        let local = MemberInfo::local("x", TypeRef::id("p.A"));
        assert_eq!(local.unique_key(), "#x");
        assert_eq!(local.readable_name(), "x");
    }

    #[test]
    fn test_visibility_from_modifiers() {
        let m = MemberInfo::field("p.A", "f", TypeRef::id("p.B"));
        assert_eq!(m.visibility(), Visibility::Public);
        assert_eq!(
            m.clone().with_modifiers(&["private", "static"]).visibility(),
            Visibility::Private
        );
        assert!(m.clone().with_modifiers(&["static"]).is_static());
        assert_eq!(m.with_modifiers(&[]).visibility(), Visibility::Package);
    }
}
