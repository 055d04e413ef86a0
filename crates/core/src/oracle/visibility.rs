//! Java access rules for members seen from an invocation site.

use super::{InvocationSite, TypeKind, TypeOracle, package_of};
use chainscope_api::models::{MemberInfo, TypeRef, Visibility};

/// Whether `member` may be accessed from code inside `site`.
///
/// Local variables are always visible. Interface members are implicitly public.
pub fn is_visible<T: TypeOracle + ?Sized>(ts: &T, member: &MemberInfo, site: &InvocationSite) -> bool {
    let Some(declaring) = member.declaring_type.as_deref() else {
        return true;
    };
    if declaring == site.type_fqn {
        return true;
    }

    let declaring_info = ts.get_type_info(declaring);
    if declaring_info
        .as_ref()
        .is_some_and(|info| info.kind == TypeKind::Interface)
    {
        return true;
    }

    let declaring_package = declaring_info
        .map(|info| info.package)
        .unwrap_or_else(|| package_of(declaring).to_string());
    let same_package = declaring_package == site.package;

    match member.visibility() {
        Visibility::Public => true,
        Visibility::Package => same_package,
        Visibility::Protected => {
            same_package
                || ts
                    .supertype_closure(&TypeRef::id(&site.type_fqn))
                    .iter()
                    .any(|t| t == declaring)
        }
        Visibility::Private => top_level_type(ts, declaring) == site.top_level_type,
    }
}

/// Outermost enclosing type of `fqn`.
///
/// Follows `enclosing_type` links; falls back to the binary name before `$`.
pub fn top_level_type<T: TypeOracle + ?Sized>(ts: &T, fqn: &str) -> String {
    let mut current = fqn.to_string();
    // Bounded walk; malformed models may contain enclosing cycles.
    for _ in 0..32 {
        match ts.get_type_info(&current).and_then(|info| info.enclosing_type) {
            Some(outer) => current = outer,
            None => break,
        }
    }
    match current.split_once('$') {
        Some((outer, _)) => outer.to_string(),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{InMemoryTypeOracle, TypeDecl};

    fn member(modifiers: &[&str]) -> MemberInfo {
        MemberInfo::field("a.Owner", "value", TypeRef::id("a.Value")).with_modifiers(modifiers)
    }

    fn model() -> InMemoryTypeOracle {
        InMemoryTypeOracle::new()
            .add_class("a.Owner", None)
            .add_class("a.Neighbour", None)
            .add_class("b.Sub", Some("a.Owner"))
            .add_class("b.Stranger", None)
            .add_type(TypeDecl {
                enclosing_type: Some("a.Owner".to_string()),
                ..TypeDecl::class("a.Owner$Inner")
            })
    }

    #[test]
    fn test_public_and_package_private() {
        let ts = model();
        let stranger = InvocationSite::new("b.Stranger");
        let neighbour = InvocationSite::new("a.Neighbour");

        assert!(is_visible(&ts, &member(&["public"]), &stranger));
        assert!(!is_visible(&ts, &member(&[]), &stranger));
        assert!(is_visible(&ts, &member(&[]), &neighbour));
    }

    #[test]
    fn test_protected_requires_package_or_subclass() {
        let ts = model();
        let protected = member(&["protected"]);
        assert!(is_visible(&ts, &protected, &InvocationSite::new("a.Neighbour")));
        assert!(is_visible(&ts, &protected, &InvocationSite::new("b.Sub")));
        assert!(!is_visible(&ts, &protected, &InvocationSite::new("b.Stranger")));
    }

    #[test]
    fn test_private_shares_top_level_type() {
        let ts = model();
        let private = member(&["private"]);
        let inner = ts.resolve_invocation_site("a.Owner$Inner").unwrap();
        assert_eq!(inner.top_level_type, "a.Owner");
        assert!(is_visible(&ts, &private, &inner));
        assert!(!is_visible(&ts, &private, &InvocationSite::new("a.Neighbour")));
    }

    #[test]
    fn test_locals_always_visible() {
        let ts = model();
        let local = MemberInfo::local("x", TypeRef::id("a.Value"));
        assert!(is_visible(&ts, &local, &InvocationSite::new("b.Stranger")));
    }
}
