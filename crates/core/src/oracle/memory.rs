//! In-memory oracle backed by a serializable type model.
//!
//! Used by the CLI (models loaded from JSON) and by tests (fluent builder).

use super::{
    InheritanceProvider, MemberProvider, TypeInfo, TypeKind, TypeOracle, TypeProvider, package_of,
};
use crate::error::Result;
use chainscope_api::models::{JAVA_LANG_OBJECT, MemberInfo, TypeRef};
use chainscope_api::{OracleError, OracleResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One declared type and its direct members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub fqn: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Defaults to the FQN's package part
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub enclosing_type: Option<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
}

impl TypeDecl {
    pub fn class(fqn: &str) -> Self {
        Self {
            fqn: fqn.to_string(),
            kind: TypeKind::Class,
            package: None,
            enclosing_type: None,
            superclass: None,
            interfaces: vec![],
            modifiers: vec!["public".to_string()],
            members: vec![],
        }
    }

    pub fn interface(fqn: &str) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(fqn)
        }
    }
}

/// A whole type universe, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeModel {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeOracle {
    types: IndexMap<String, TypeDecl>,
}

impl InMemoryTypeOracle {
    /// Create a new empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: TypeModel) -> Self {
        model
            .types
            .into_iter()
            .fold(Self::new(), |oracle, decl| oracle.add_type(decl))
    }

    /// Load a JSON [`TypeModel`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model: TypeModel = serde_json::from_str(&content)?;
        debug!("Loaded {} types from {}", model.types.len(), path.display());
        Ok(Self::from_model(model))
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Add (or replace) a type. Members without a declaring type are attributed to it.
    pub fn add_type(mut self, mut decl: TypeDecl) -> Self {
        for member in &mut decl.members {
            if member.declaring_type.is_none() {
                member.declaring_type = Some(decl.fqn.clone());
            }
        }
        self.types.insert(decl.fqn.clone(), decl);
        self
    }

    /// Add a class to the model.
    pub fn add_class(self, fqn: &str, superclass: Option<&str>) -> Self {
        self.add_type(TypeDecl {
            superclass: superclass.map(str::to_string),
            ..TypeDecl::class(fqn)
        })
    }

    /// Add an interface to the model.
    pub fn add_interface(self, fqn: &str) -> Self {
        self.add_type(TypeDecl::interface(fqn))
    }

    /// Add interface implementation to a class, creating either side if missing.
    pub fn implements(mut self, class_fqn: &str, interface_fqn: &str) -> Self {
        if !self.types.contains_key(interface_fqn) {
            self = self.add_interface(interface_fqn);
        }
        self.decl_mut(class_fqn)
            .interfaces
            .push(interface_fqn.to_string());
        self
    }

    /// Add a member to a type, creating the type as a class if missing.
    pub fn add_member(mut self, type_fqn: &str, mut member: MemberInfo) -> Self {
        member.declaring_type = Some(type_fqn.to_string());
        self.decl_mut(type_fqn).members.push(member);
        self
    }

    /// Add a public no-arg instance method.
    pub fn add_method(self, type_fqn: &str, name: &str, return_type: TypeRef) -> Self {
        let member = MemberInfo::method(type_fqn, name, vec![], return_type);
        self.add_member(type_fqn, member)
    }

    /// Add a public instance field.
    pub fn add_field(self, type_fqn: &str, name: &str, type_ref: TypeRef) -> Self {
        let member = MemberInfo::field(type_fqn, name, type_ref);
        self.add_member(type_fqn, member)
    }

    fn decl_mut(&mut self, fqn: &str) -> &mut TypeDecl {
        self.types
            .entry(fqn.to_string())
            .or_insert_with(|| TypeDecl::class(fqn))
    }
}

impl TypeProvider for InMemoryTypeOracle {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        let decl = self.types.get(fqn)?;
        Some(TypeInfo {
            fqn: decl.fqn.clone(),
            kind: decl.kind,
            package: decl
                .package
                .clone()
                .unwrap_or_else(|| package_of(&decl.fqn).to_string()),
            enclosing_type: decl.enclosing_type.clone(),
            modifiers: decl.modifiers.clone(),
        })
    }
}

impl InheritanceProvider for InMemoryTypeOracle {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        let decl = self.types.get(fqn)?;
        if let Some(superclass) = &decl.superclass {
            return Some(superclass.clone());
        }
        // Classes implicitly extend Object when the model declares it
        let implicit_object = decl.kind != TypeKind::Interface
            && fqn != JAVA_LANG_OBJECT
            && self.types.contains_key(JAVA_LANG_OBJECT);
        implicit_object.then(|| JAVA_LANG_OBJECT.to_string())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.types
            .get(fqn)
            .map(|decl| decl.interfaces.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for InMemoryTypeOracle {
    fn get_declared_members(&self, type_fqn: &str) -> OracleResult<Vec<MemberInfo>> {
        self.types
            .get(type_fqn)
            .map(|decl| decl.members.clone())
            .ok_or_else(|| OracleError::UnresolvedType(type_fqn.to_string()))
    }
}

impl TypeOracle for InMemoryTypeOracle {}
