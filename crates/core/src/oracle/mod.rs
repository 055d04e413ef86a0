//! Type-system oracle abstraction.
//!
//! The chain search never looks at compiler internals. Everything it needs
//! about types comes through these traits.
//!
//! ```text
//! TypeProvider + InheritanceProvider + MemberProvider   (host data)
//!       │
//!       ▼
//! TypeOracle   →  supertype closure, visible members, assignability
//! ```
//!
//! Implementors supply the three data traits and opt into [`TypeOracle`]
//! with an empty `impl`; every analysis method has a default that may be
//! overridden when the host can answer more precisely.

pub mod memory;
pub mod subtyping;
pub mod visibility;

pub use memory::{InMemoryTypeOracle, TypeDecl, TypeModel};

use chainscope_api::models::{MemberInfo, MemberKind, TypeRef};
use chainscope_api::{OracleError, OracleResult};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Information about a type (class, interface, enum, etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "java.util.List"
    pub fqn: String,
    pub kind: TypeKind,
    /// Package name, empty for the default package
    pub package: String,
    /// Enclosing type for nested types
    pub enclosing_type: Option<String>,
    /// Modifiers like public, abstract, final
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// The type from which completion was invoked. Drives visibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationSite {
    pub type_fqn: String,
    pub package: String,
    /// Outermost enclosing type; equals `type_fqn` for top-level types
    pub top_level_type: String,
}

impl InvocationSite {
    pub fn new(type_fqn: &str) -> Self {
        Self {
            type_fqn: type_fqn.to_string(),
            package: package_of(type_fqn).to_string(),
            top_level_type: type_fqn.to_string(),
        }
    }
}

/// Package part of an FQN: everything before the last `.` ahead of any `$`.
///
/// Nested types are expected in binary form (`p.Outer$Inner`); a dotted
/// nested name such as `p.Outer.Inner` yields `p.Outer`.
pub fn package_of(fqn: &str) -> &str {
    let head = fqn.split('$').next().unwrap_or(fqn);
    match head.rfind('.') {
        Some(idx) => &head[..idx],
        None => "",
    }
}

/// Provides type information by FQN.
pub trait TypeProvider: Send + Sync {
    /// Returns `None` if the type is not found.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;
}

/// Provides inheritance relationship information.
pub trait InheritanceProvider: Send + Sync {
    /// Get the direct superclass of a type.
    ///
    /// Returns `None` for `java.lang.Object` and interfaces.
    fn get_superclass(&self, fqn: &str) -> Option<String>;

    /// Get the interfaces directly implemented (or extended) by a type.
    fn get_interfaces(&self, fqn: &str) -> Vec<String>;
}

/// Provides the members declared directly in a type.
pub trait MemberProvider: Send + Sync {
    /// Does NOT search the inheritance hierarchy.
    fn get_declared_members(&self, type_fqn: &str) -> OracleResult<Vec<MemberInfo>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberFilter {
    Instance,
    Static,
}

impl MemberFilter {
    /// Fields pass on staticness alone; methods additionally need a
    /// dereferenceable (non-void, non-primitive) result.
    fn accepts(self, member: &MemberInfo) -> bool {
        let wants_static = self == MemberFilter::Static;
        if member.is_static() != wants_static {
            return false;
        }
        match member.kind {
            MemberKind::Field => true,
            MemberKind::Method => !member.type_ref.is_void() && !member.type_ref.is_primitive(),
            MemberKind::Constructor | MemberKind::LocalVariable => false,
        }
    }
}

/// The read-only type-system oracle consumed by the chain search.
pub trait TypeOracle: TypeProvider + InheritanceProvider + MemberProvider {
    /// The type itself followed by all of its supertypes in BFS order
    /// (superclass before interfaces). Array wrappers are removed first;
    /// primitives, `void` and unresolved names have no closure.
    fn supertype_closure(&self, ty: &TypeRef) -> Vec<String> {
        let Some(base) = ty.element_type().erasure_fqn() else {
            return vec![];
        };

        let mut seen = IndexSet::new();
        let mut queue = VecDeque::from([base.to_string()]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(superclass) = self.get_superclass(&current) {
                queue.push_back(superclass);
            }
            queue.extend(self.get_interfaces(&current));
        }
        seen.into_iter().collect()
    }

    /// Non-static fields and non-static methods with a non-void,
    /// non-primitive return type, visible from `site`.
    fn visible_instance_members(
        &self,
        ty: &TypeRef,
        site: &InvocationSite,
    ) -> OracleResult<Vec<MemberInfo>> {
        collect_visible_members(self, ty, site, MemberFilter::Instance)
    }

    /// Static fields and static methods with a non-void, non-primitive
    /// return type, visible from `site`.
    fn visible_static_members(
        &self,
        ty: &TypeRef,
        site: &InvocationSite,
    ) -> OracleResult<Vec<MemberInfo>> {
        collect_visible_members(self, ty, site, MemberFilter::Static)
    }

    /// Whether a value of type `from` can be assigned to `to`.
    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        subtyping::is_assignable(from, to, self)
    }

    /// Resolve the type a member evaluates to.
    fn member_type(&self, member: &MemberInfo) -> OracleResult<TypeRef> {
        match member.type_ref.element_type() {
            TypeRef::Unknown => Err(OracleError::UnresolvedType(member.unique_key())),
            _ => Ok(member.type_ref.clone()),
        }
    }

    /// Build the invocation site for completion inside `type_fqn`.
    fn resolve_invocation_site(&self, type_fqn: &str) -> Option<InvocationSite> {
        let info = self.get_type_info(type_fqn)?;
        let top_level_type = visibility::top_level_type(self, type_fqn);
        Some(InvocationSite {
            type_fqn: info.fqn,
            package: info.package,
            top_level_type,
        })
    }
}

fn collect_visible_members<T: TypeOracle + ?Sized>(
    ts: &T,
    ty: &TypeRef,
    site: &InvocationSite,
    filter: MemberFilter,
) -> OracleResult<Vec<MemberInfo>> {
    let closure = ts.supertype_closure(ty);
    let Some((root, ancestors)) = closure.split_first() else {
        return Err(OracleError::UnresolvedType(ty.to_string()));
    };

    // First declaration along the closure wins: overriding methods and
    // hiding fields shadow their supertype counterparts.
    let mut visible: IndexMap<String, MemberInfo> = IndexMap::new();
    let mut add_members = |members: Vec<MemberInfo>| {
        for member in members {
            if !filter.accepts(&member) || !visibility::is_visible(ts, &member, site) {
                continue;
            }
            visible.entry(member.hierarchy_key()).or_insert(member);
        }
    };

    add_members(ts.get_declared_members(root)?);
    for ancestor in ancestors {
        match ts.get_declared_members(ancestor) {
            Ok(members) => add_members(members),
            Err(e) => debug!("Skipping members of supertype {}: {}", ancestor, e),
        }
    }

    Ok(visible.into_values().collect())
}
