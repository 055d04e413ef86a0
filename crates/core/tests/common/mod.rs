use chainscope_api::models::{
    Chain, ChainElement, JAVA_LANG_OBJECT, MemberInfo, SearchBounds, TypeRef,
};
use chainscope_api::{OracleError, OracleResult};
use chainscope_core::oracle::{
    InMemoryTypeOracle, InheritanceProvider, InvocationSite, MemberProvider, TypeInfo,
    TypeOracle, TypeProvider,
};
use std::time::Duration;

#[allow(dead_code)]
pub const EXCLUDED: [&str; 2] = ["Ljava/lang/Object", "Ljava/lang/String"];

/// `Foo.getBar(): Bar`, `Bar.getBaz(): Baz`, nothing else.
#[allow(dead_code)]
pub fn foo_bar_baz() -> InMemoryTypeOracle {
    InMemoryTypeOracle::new()
        .add_class("p.Foo", None)
        .add_class("p.Bar", None)
        .add_class("p.Baz", None)
        .add_class("p.Caller", None)
        .add_method("p.Foo", "getBar", TypeRef::id("p.Bar"))
        .add_method("p.Bar", "getBaz", TypeRef::id("p.Baz"))
}

/// A small universe with cycles, arrays, statics, an interface and
/// `java.lang.Object` / `java.lang.String` members to be excluded.
#[allow(dead_code)]
pub fn rich_model() -> InMemoryTypeOracle {
    InMemoryTypeOracle::new()
        .add_class(JAVA_LANG_OBJECT, None)
        .add_method(JAVA_LANG_OBJECT, "toString", TypeRef::id("java.lang.String"))
        .add_class("java.lang.String", None)
        .add_method("java.lang.String", "trim", TypeRef::id("java.lang.String"))
        .add_class("p.Caller", None)
        .add_class("p.Base", None)
        .add_class("p.Foo", None)
        .add_method("p.Foo", "getBar", TypeRef::id("p.Bar"))
        .add_method("p.Foo", "self", TypeRef::id("p.Foo"))
        .add_method("p.Foo", "size", TypeRef::raw("int"))
        .add_field("p.Foo", "name", TypeRef::id("java.lang.String"))
        .add_field("p.Foo", "items", TypeRef::array(TypeRef::id("p.Bar"), 1))
        .add_class("p.Bar", None)
        .add_method("p.Bar", "getBaz", TypeRef::id("p.Baz"))
        .add_method("p.Bar", "getFoo", TypeRef::id("p.Foo"))
        .add_member(
            "p.Bar",
            MemberInfo::field("p.Bar", "INSTANCE", TypeRef::id("p.Bar"))
                .with_modifiers(&["public", "static"]),
        )
        .add_class("p.Baz", Some("p.Base"))
        .implements("p.Baz", "p.Marker")
        .add_method("p.Baz", "owner", TypeRef::id("p.Foo"))
        .add_member(
            "p.Baz",
            MemberInfo::method("p.Baz", "secret", vec![], TypeRef::id("p.Marker"))
                .with_modifiers(&["private"]),
        )
}

#[allow(dead_code)]
pub fn local(name: &str, fqn: &str) -> ChainElement {
    ChainElement::from_member(MemberInfo::local(name, TypeRef::id(fqn)), false)
        .expect("resolvable local")
}

#[allow(dead_code)]
pub fn bounds(max_chains: usize, min_depth: usize, max_depth: usize) -> SearchBounds {
    SearchBounds::new(max_chains, min_depth, max_depth)
        .with_excluded_types(EXCLUDED.iter().map(|s| s.to_string()).collect())
        .with_timeout(Duration::from_secs(10))
}

#[allow(dead_code)]
pub fn site() -> InvocationSite {
    InvocationSite::new("p.Caller")
}

/// Readable member names per chain, e.g. `["x", "getBar()"]`.
#[allow(dead_code)]
pub fn printed(chains: &[Chain]) -> Vec<String> {
    chains.iter().map(|c| c.printed_key()).collect()
}

/// Delegates to an [`InMemoryTypeOracle`] but fails to resolve the type
/// of every member with the given name.
#[allow(dead_code)]
pub struct FailingOracle {
    pub inner: InMemoryTypeOracle,
    pub failing_member: String,
}

impl TypeProvider for FailingOracle {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.inner.get_type_info(fqn)
    }
}

impl InheritanceProvider for FailingOracle {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        self.inner.get_superclass(fqn)
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.inner.get_interfaces(fqn)
    }
}

impl MemberProvider for FailingOracle {
    fn get_declared_members(&self, type_fqn: &str) -> OracleResult<Vec<MemberInfo>> {
        self.inner.get_declared_members(type_fqn)
    }
}

impl TypeOracle for FailingOracle {
    fn member_type(&self, member: &MemberInfo) -> OracleResult<TypeRef> {
        if member.name == self.failing_member {
            return Err(OracleError::Internal(format!(
                "cannot resolve {}",
                member.unique_key()
            )));
        }
        self.inner.member_type(member)
    }
}

/// Delegates to an [`InMemoryTypeOracle`], sleeping before every member lookup.
#[allow(dead_code)]
pub struct SlowOracle {
    pub inner: InMemoryTypeOracle,
    pub delay: Duration,
}

impl TypeProvider for SlowOracle {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.inner.get_type_info(fqn)
    }
}

impl InheritanceProvider for SlowOracle {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        self.inner.get_superclass(fqn)
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.inner.get_interfaces(fqn)
    }
}

impl MemberProvider for SlowOracle {
    fn get_declared_members(&self, type_fqn: &str) -> OracleResult<Vec<MemberInfo>> {
        std::thread::sleep(self.delay);
        self.inner.get_declared_members(type_fqn)
    }
}

impl TypeOracle for SlowOracle {}

/// Delegates to an [`InMemoryTypeOracle`] but panics when asked for the
/// members of `panicking_type`.
#[allow(dead_code)]
pub struct PanickingOracle {
    pub inner: InMemoryTypeOracle,
    pub panicking_type: String,
}

impl TypeProvider for PanickingOracle {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.inner.get_type_info(fqn)
    }
}

impl InheritanceProvider for PanickingOracle {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        self.inner.get_superclass(fqn)
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.inner.get_interfaces(fqn)
    }
}

impl MemberProvider for PanickingOracle {
    fn get_declared_members(&self, type_fqn: &str) -> OracleResult<Vec<MemberInfo>> {
        if type_fqn == self.panicking_type {
            panic!("member lookup crashed for {}", type_fqn);
        }
        self.inner.get_declared_members(type_fqn)
    }
}

impl TypeOracle for PanickingOracle {}
