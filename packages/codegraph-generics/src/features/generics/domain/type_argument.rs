//! Type-argument model
//!
//! A type argument is either already concrete, an unbound placeholder owned
//! by some enclosing declaration, or a nested instantiation that still
//! carries a placeholder somewhere in its argument tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::declaration::{Declaration, TypeParameterRef};
use super::instantiation::Instantiation;
use crate::errors::Result;

/// A fully resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteType {
    /// Non-generic type: `int`, `System.String`, `MyApp.Order`
    Named(String),
    /// Closed generic instantiation: `List<int>`
    Constructed(Instantiation),
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Named(name) => write!(f, "{}", name),
            ConcreteType::Constructed(inst) => write!(f, "{}", inst),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeArgument {
    Concrete(ConcreteType),
    /// Unbound placeholder of an enclosing declaration
    Parameter(TypeParameterRef),
    /// Nested instantiation that is not fully closed: `List<T>` inside `Dictionary<string, List<T>>`
    Open(Instantiation),
}

impl TypeArgument {
    pub fn named(name: impl Into<String>) -> Self {
        TypeArgument::Concrete(ConcreteType::Named(name.into()))
    }

    pub fn parameter(owner: &Declaration, ordinal: usize) -> Result<Self> {
        Ok(TypeArgument::Parameter(owner.parameter(ordinal)?))
    }

    /// Tags a nested instantiation as `Concrete` or `Open` by its closedness
    pub fn from_instantiation(inst: Instantiation) -> Self {
        if inst.is_closed() {
            TypeArgument::Concrete(ConcreteType::Constructed(inst))
        } else {
            TypeArgument::Open(inst)
        }
    }

    /// Re-tag a nested instantiation by its actual closedness
    ///
    /// `Open(List<int>)` becomes `Concrete` and `Concrete(List<T>)` becomes
    /// `Open`, so equal argument trees always carry equal tags.
    pub fn normalized(self) -> Self {
        match self {
            TypeArgument::Concrete(ConcreteType::Constructed(inst)) | TypeArgument::Open(inst) => {
                Self::from_instantiation(inst)
            }
            other => other,
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            TypeArgument::Concrete(ConcreteType::Named(_)) => false,
            TypeArgument::Concrete(ConcreteType::Constructed(inst)) | TypeArgument::Open(inst) => {
                inst.is_open()
            }
            TypeArgument::Parameter(_) => true,
        }
    }

    pub fn is_concrete(&self) -> bool {
        !self.is_open()
    }
}

impl From<ConcreteType> for TypeArgument {
    fn from(ty: ConcreteType) -> Self {
        TypeArgument::Concrete(ty)
    }
}

impl From<TypeParameterRef> for TypeArgument {
    fn from(param: TypeParameterRef) -> Self {
        TypeArgument::Parameter(param)
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Concrete(ty) => write!(f, "{}", ty),
            TypeArgument::Parameter(param) => write!(f, "{}", param),
            TypeArgument::Open(inst) => write!(f, "{}", inst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Declaration {
        Declaration::generic_type("List", 1).unwrap()
    }

    #[test]
    fn test_named_is_closed() {
        assert!(!TypeArgument::named("int").is_open());
    }

    #[test]
    fn test_parameter_is_open() {
        let arg = TypeArgument::parameter(&list(), 0).unwrap();
        assert!(arg.is_open());
    }

    #[test]
    fn test_from_instantiation_tags_by_closedness() {
        let closed = list().construct(vec![TypeArgument::named("int")]).unwrap();
        assert!(matches!(
            TypeArgument::from_instantiation(closed),
            TypeArgument::Concrete(ConcreteType::Constructed(_))
        ));

        let wrapper = Declaration::generic_type("Wrapper", 1).unwrap();
        let open = Instantiation::new(
            list(),
            vec![TypeArgument::parameter(&wrapper, 0).unwrap()],
        )
        .unwrap();
        assert!(matches!(
            TypeArgument::from_instantiation(open),
            TypeArgument::Open(_)
        ));
    }

    #[test]
    fn test_concrete_tag_does_not_hide_nested_parameter() {
        let wrapper = Declaration::generic_type("Wrapper", 1).unwrap();
        let open = Instantiation::new(
            list(),
            vec![TypeArgument::parameter(&wrapper, 0).unwrap()],
        )
        .unwrap();
        let mislabeled = TypeArgument::Concrete(ConcreteType::Constructed(open.clone()));
        assert!(mislabeled.is_open());
        assert_eq!(mislabeled.normalized(), TypeArgument::Open(open));
    }

    #[test]
    fn test_open_tag_on_closed_instantiation_normalizes_to_concrete() {
        let closed = list().construct(vec![TypeArgument::named("int")]).unwrap();
        let mislabeled = TypeArgument::Open(closed.clone());
        assert!(mislabeled.is_concrete());
        assert_eq!(
            mislabeled.normalized(),
            TypeArgument::Concrete(ConcreteType::Constructed(closed))
        );
    }
}
