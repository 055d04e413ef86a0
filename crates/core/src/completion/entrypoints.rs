//! Entry points: the first elements of every chain.

use super::context::{CompletionContext, CompletionNode, Qualifier};
use crate::oracle::{InvocationSite, TypeOracle};
use chainscope_api::models::{ChainElement, JAVA_LANG_OBJECT, MemberInfo, MemberKind, TypeRef, class_signature};
use std::collections::HashSet;
use tracing::debug;

/// Collect the entry points for `ctx`, in the order the search should try them.
pub fn collect_entry_points(
    oracle: &dyn TypeOracle,
    ctx: &CompletionContext,
    site: &InvocationSite,
) -> Vec<ChainElement> {
    match &ctx.node {
        CompletionNode::SingleName => single_name_entry_points(oracle, ctx),
        CompletionNode::MemberAccess { receiver } => {
            instance_member_entry_points(oracle, ctx, site, receiver)
        }
        CompletionNode::QualifiedName { qualifier } => match qualifier {
            Qualifier::Type(fqn) => static_member_entry_points(oracle, ctx, site, fqn),
            Qualifier::Field(ty) | Qualifier::Local(ty) => {
                instance_member_entry_points(oracle, ctx, site, ty)
            }
        },
        CompletionNode::Other => vec![],
    }
}

/// Locals, then fields, then methods; each group most recently declared first.
fn single_name_entry_points(oracle: &dyn TypeOracle, ctx: &CompletionContext) -> Vec<ChainElement> {
    let local_names: HashSet<&str> = ctx.visible_locals.iter().map(|l| l.name.as_str()).collect();
    let object_prefix = class_signature(JAVA_LANG_OBJECT);

    let candidates = ctx
        .visible_locals
        .iter()
        .rev()
        .chain(ctx.visible_fields.iter().rev())
        .chain(ctx.visible_methods.iter().rev());

    let mut entry_points = Vec::new();
    for member in candidates {
        if !matches_prefix(member, &ctx.token) {
            continue;
        }
        let key = member.unique_key();
        if key.starts_with(&object_prefix) {
            continue;
        }
        // A field shadowed by a local must be reached through `this.`
        let requires_this =
            member.kind == MemberKind::Field && local_names.contains(member.name.as_str());
        if let Some(element) = to_element(oracle, member.clone(), requires_this) {
            entry_points.push(element);
        }
    }
    entry_points
}

fn instance_member_entry_points(
    oracle: &dyn TypeOracle,
    ctx: &CompletionContext,
    site: &InvocationSite,
    receiver: &TypeRef,
) -> Vec<ChainElement> {
    match oracle.visible_instance_members(receiver, site) {
        Ok(members) => prefixed_elements(oracle, ctx, members),
        Err(e) => {
            debug!("Cannot list members of receiver {}: {}", receiver, e);
            vec![]
        }
    }
}

fn static_member_entry_points(
    oracle: &dyn TypeOracle,
    ctx: &CompletionContext,
    site: &InvocationSite,
    type_fqn: &str,
) -> Vec<ChainElement> {
    match oracle.visible_static_members(&TypeRef::id(type_fqn), site) {
        Ok(members) => prefixed_elements(oracle, ctx, members),
        Err(e) => {
            debug!("Cannot list static members of {}: {}", type_fqn, e);
            vec![]
        }
    }
}

fn prefixed_elements(
    oracle: &dyn TypeOracle,
    ctx: &CompletionContext,
    members: Vec<MemberInfo>,
) -> Vec<ChainElement> {
    members
        .into_iter()
        .filter(|m| matches_prefix(m, &ctx.token))
        .filter_map(|m| to_element(oracle, m, false))
        .collect()
}

fn matches_prefix(member: &MemberInfo, token: &str) -> bool {
    member.readable_name().starts_with(token)
}

fn to_element(oracle: &dyn TypeOracle, member: MemberInfo, requires_this: bool) -> Option<ChainElement> {
    let key = member.unique_key();
    match oracle
        .member_type(&member)
        .and_then(|ty| ChainElement::new(member, ty, requires_this))
    {
        Ok(element) => Some(element),
        Err(e) => {
            debug!("Dropping entry point {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::InMemoryTypeOracle;

    fn oracle() -> InMemoryTypeOracle {
        InMemoryTypeOracle::new()
            .add_class("p.Foo", None)
            .add_method("p.Foo", "getBar", TypeRef::id("p.Bar"))
            .add_field("p.Foo", "baz", TypeRef::id("p.Baz"))
            .add_member(
                "p.Foo",
                MemberInfo::field("p.Foo", "INSTANCE", TypeRef::id("p.Foo"))
                    .with_modifiers(&["public", "static"]),
            )
    }

    fn names(elements: &[ChainElement]) -> Vec<String> {
        elements.iter().map(|e| e.member().name.clone()).collect()
    }

    #[test]
    fn test_single_name_order_and_shadowing() {
        let ts = oracle();
        let site = InvocationSite::new("p.Caller");
        let ctx = CompletionContext::new("p.Caller", CompletionNode::SingleName)
            .with_local(MemberInfo::local("first", TypeRef::id("p.Foo")))
            .with_local(MemberInfo::local("foo", TypeRef::id("p.Foo")))
            .with_field(MemberInfo::field("p.Caller", "foo", TypeRef::id("p.Foo")))
            .with_field(MemberInfo::field("p.Caller", "other", TypeRef::id("p.Foo")))
            .with_method(MemberInfo::method("p.Caller", "make", vec![], TypeRef::id("p.Foo")));

        let entries = collect_entry_points(&ts, &ctx, &site);
        assert_eq!(names(&entries), vec!["foo", "first", "other", "foo", "make"]);

        let shadowed = &entries[3];
        assert_eq!(shadowed.member().kind, MemberKind::Field);
        assert!(shadowed.requires_this_qualification());
        assert!(!entries[2].requires_this_qualification());
        assert!(!entries[0].requires_this_qualification());
    }

    #[test]
    fn test_single_name_prefix_and_object_members() {
        let ts = oracle();
        let site = InvocationSite::new("p.Caller");
        let ctx = CompletionContext::new("p.Caller", CompletionNode::SingleName)
            .with_token("ge")
            .with_method(MemberInfo::method(JAVA_LANG_OBJECT, "getClass", vec![], TypeRef::id("java.lang.Class")))
            .with_method(MemberInfo::method("p.Caller", "getFoo", vec![], TypeRef::id("p.Foo")))
            .with_local(MemberInfo::local("foo", TypeRef::id("p.Foo")))
            .with_local(MemberInfo::local("broken", TypeRef::Unknown));

        let entries = collect_entry_points(&ts, &ctx, &site);
        assert_eq!(names(&entries), vec!["getFoo"]);
    }

    #[test]
    fn test_member_access_uses_receiver_instance_members() {
        let ts = oracle();
        let site = InvocationSite::new("p.Caller");
        let ctx = CompletionContext::new(
            "p.Caller",
            CompletionNode::MemberAccess {
                receiver: TypeRef::id("p.Foo"),
            },
        )
        .with_token("get");

        let entries = collect_entry_points(&ts, &ctx, &site);
        assert_eq!(names(&entries), vec!["getBar"]);
    }

    #[test]
    fn test_qualified_type_uses_static_members() {
        let ts = oracle();
        let site = InvocationSite::new("p.Caller");
        let ctx = CompletionContext::new(
            "p.Caller",
            CompletionNode::QualifiedName {
                qualifier: Qualifier::Type("p.Foo".to_string()),
            },
        );
        assert_eq!(names(&collect_entry_points(&ts, &ctx, &site)), vec!["INSTANCE"]);

        let ctx = CompletionContext::new(
            "p.Caller",
            CompletionNode::QualifiedName {
                qualifier: Qualifier::Local(TypeRef::id("p.Foo")),
            },
        );
        assert_eq!(
            names(&collect_entry_points(&ts, &ctx, &site)),
            vec!["getBar", "baz"]
        );
    }

    #[test]
    fn test_unresolvable_receiver_yields_nothing() {
        let ts = oracle();
        let site = InvocationSite::new("p.Caller");
        let ctx = CompletionContext::new(
            "p.Caller",
            CompletionNode::MemberAccess {
                receiver: TypeRef::id("p.Missing"),
            },
        );
        assert!(collect_entry_points(&ts, &ctx, &site).is_empty());
        let other = CompletionContext::new("p.Caller", CompletionNode::Other);
        assert!(collect_entry_points(&ts, &other, &site).is_empty());
    }
}
