//! Assignability rules.
//!
//! Supports:
//! - Identity
//! - Primitives (widening)
//! - Classes and interfaces (erased, via the supertype closure)
//! - Arrays (covariant for references, `Object` accepts any array)

use super::TypeOracle;
use chainscope_api::models::{JAVA_LANG_OBJECT, TypeRef};

/// Check if a value of type `from` can be assigned to `to`.
pub fn is_assignable<T: TypeOracle + ?Sized>(from: &TypeRef, to: &TypeRef, ts: &T) -> bool {
    // 1. Reflexivity
    if from == to {
        return true;
    }

    match (from, to) {
        (TypeRef::Raw(sub), TypeRef::Raw(sup)) => is_primitive_widening(sub, sup),
        (TypeRef::Array { .. }, _) | (_, TypeRef::Array { .. }) => {
            is_array_assignable(from, to, ts)
        }
        _ => {
            let (Some(sub), Some(sup)) = (from.erasure_fqn(), to.erasure_fqn()) else {
                return false;
            };
            // java.lang.Object is a supertype of every reference type
            if sub == sup || sup == JAVA_LANG_OBJECT {
                return true;
            }
            ts.supertype_closure(from).iter().any(|ancestor| ancestor == sup)
        }
    }
}

fn is_array_assignable<T: TypeOracle + ?Sized>(from: &TypeRef, to: &TypeRef, ts: &T) -> bool {
    let (from_dims, to_dims) = (from.dimensions(), to.dimensions());
    if to_dims == 0 {
        return from_dims > 0 && to.erasure_fqn() == Some(JAVA_LANG_OBJECT);
    }
    if from_dims != to_dims {
        return false;
    }
    let (from_elem, to_elem) = (from.element_type(), to.element_type());
    if from_elem.is_primitive() || to_elem.is_primitive() {
        return from_elem == to_elem;
    }
    is_assignable(from_elem, to_elem, ts)
}

fn is_primitive_widening(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::InMemoryTypeOracle;

    fn model() -> InMemoryTypeOracle {
        InMemoryTypeOracle::new()
            .add_class("p.Animal", None)
            .add_class("p.Dog", Some("p.Animal"))
            .implements("p.Dog", "p.Pet")
    }

    #[test]
    fn test_class_and_interface_subtyping() {
        let ts = model();
        assert!(ts.is_assignable(&TypeRef::id("p.Dog"), &TypeRef::id("p.Animal")));
        assert!(ts.is_assignable(&TypeRef::id("p.Dog"), &TypeRef::id("p.Pet")));
        assert!(!ts.is_assignable(&TypeRef::id("p.Animal"), &TypeRef::id("p.Dog")));
        assert!(ts.is_assignable(&TypeRef::id("p.Animal"), &TypeRef::id(JAVA_LANG_OBJECT)));
    }

    #[test]
    fn test_generics_compare_erasure() {
        let ts = model();
        let list_of_dog = TypeRef::generic(TypeRef::id("p.Dog"), vec![TypeRef::id("p.X")]);
        assert!(ts.is_assignable(&list_of_dog, &TypeRef::id("p.Animal")));
    }

    #[test]
    fn test_arrays() {
        let ts = model();
        let dogs = TypeRef::array(TypeRef::id("p.Dog"), 1);
        let animals = TypeRef::array(TypeRef::id("p.Animal"), 1);
        assert!(ts.is_assignable(&dogs, &animals));
        assert!(!ts.is_assignable(&animals, &dogs));
        assert!(ts.is_assignable(&dogs, &TypeRef::id(JAVA_LANG_OBJECT)));
        assert!(!ts.is_assignable(&dogs, &TypeRef::id("p.Animal")));
        assert!(!ts.is_assignable(
            &TypeRef::array(TypeRef::raw("int"), 1),
            &TypeRef::array(TypeRef::raw("long"), 1)
        ));
    }

    #[test]
    fn test_primitive_widening() {
        let ts = model();
        assert!(ts.is_assignable(&TypeRef::raw("int"), &TypeRef::raw("long")));
        assert!(!ts.is_assignable(&TypeRef::raw("long"), &TypeRef::raw("int")));
        assert!(!ts.is_assignable(&TypeRef::raw("int"), &TypeRef::id(JAVA_LANG_OBJECT)));
    }
}
