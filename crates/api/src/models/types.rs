use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

const PRIMITIVES: [(&str, char); 8] = [
    ("boolean", 'Z'),
    ("byte", 'B'),
    ("char", 'C'),
    ("short", 'S'),
    ("int", 'I'),
    ("long", 'J'),
    ("float", 'F'),
    ("double", 'D'),
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive, `void`, or an unresolved name such as a type variable
    Raw(String),

    /// Resolved reference type (FQN)
    Id(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[][])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    #[default]
    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn generic(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(base),
            args,
        }
    }

    /// Wraps `element` in `dimensions` array levels, flattening nested arrays.
    pub fn array(element: TypeRef, dimensions: usize) -> Self {
        if dimensions == 0 {
            return element;
        }
        match element {
            TypeRef::Array {
                element,
                dimensions: inner,
            } => TypeRef::Array {
                element,
                dimensions: inner + dimensions,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions,
            },
        }
    }

    pub fn void() -> Self {
        TypeRef::Raw("void".to_string())
    }

    /// Number of array dimensions (0 for non-array types).
    pub fn dimensions(&self) -> usize {
        match self {
            TypeRef::Array {
                element,
                dimensions,
            } => dimensions + element.dimensions(),
            _ => 0,
        }
    }

    /// The type with every array wrapper removed.
    pub fn element_type(&self) -> &TypeRef {
        match self {
            TypeRef::Array { element, .. } => element.element_type(),
            other => other,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if primitive_descriptor(name).is_some())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if name == "void")
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    /// Erased FQN of a reference type. Arrays, primitives and unresolved
    /// names have none.
    pub fn erasure_fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn),
            TypeRef::Generic { base, .. } => base.erasure_fqn(),
            _ => None,
        }
    }

    /// JVM-style signature of the erased type, e.g. `Ljava/lang/String;`,
    /// `I` or `[[Ljava/lang/Object;`.
    pub fn signature(&self) -> String {
        match self {
            TypeRef::Raw(name) if name == "void" => "V".to_string(),
            TypeRef::Raw(name) => match primitive_descriptor(name) {
                Some(c) => c.to_string(),
                None => format!("T{};", name),
            },
            TypeRef::Id(fqn) => class_signature(fqn),
            TypeRef::Generic { base, .. } => base.signature(),
            TypeRef::Array {
                element,
                dimensions,
            } => format!("{}{}", "[".repeat(*dimensions), element.signature()),
            TypeRef::Unknown => "?".to_string(),
        }
    }

    /// Source-level name without package qualification, e.g. `List<String>`.
    pub fn short_name(&self) -> String {
        match self {
            TypeRef::Raw(name) => name.clone(),
            TypeRef::Id(fqn) => simple_name(fqn).to_string(),
            TypeRef::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(|a| a.short_name()).collect();
                format!("{}<{}>", base.short_name(), args.join(", "))
            }
            TypeRef::Array {
                element,
                dimensions,
            } => format!("{}{}", element.short_name(), "[]".repeat(*dimensions)),
            TypeRef::Unknown => "?".to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) | TypeRef::Id(name) => write!(f, "{}", name),
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => write!(f, "{}{}", element, "[]".repeat(*dimensions)),
            TypeRef::Unknown => write!(f, "?"),
        }
    }
}

/// `java.util.Map$Entry` -> `Ljava/util/Map$Entry;`
pub fn class_signature(fqn: &str) -> String {
    format!("L{};", fqn.replace('.', "/"))
}

/// Signature prefix used to match a type name against member keys.
///
/// `java.lang.Object` -> `Ljava/lang/Object`
pub fn signature_prefix(fqn: &str) -> String {
    format!("L{}", fqn.trim().replace('.', "/"))
}

pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit(['.', '$']).next().unwrap_or(fqn)
}

fn primitive_descriptor(name: &str) -> Option<char> {
    PRIMITIVES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}
