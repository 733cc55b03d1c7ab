//! Instantiation: a declaration plus an ordered argument list
//!
//! The argument list always has exactly `declaration.arity()` entries.
//! The definition form of a declaration (`List<T>` as written at
//! `class List<T>`) is the instantiation whose arguments are the
//! declaration's own parameters, in order.
//!
//! Nested instantiation arguments are tagged by their actual closedness on
//! the way in, so derived equality and hashing are structural.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::declaration::Declaration;
use super::type_argument::TypeArgument;
use crate::errors::{GenericsError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "InstantiationRecord")]
pub struct Instantiation {
    declaration: Declaration,
    type_arguments: Vec<TypeArgument>,
}

/// Serialized shape; checked through `Instantiation::new` on the way in
#[derive(Deserialize)]
struct InstantiationRecord {
    declaration: Declaration,
    type_arguments: Vec<TypeArgument>,
}

impl TryFrom<InstantiationRecord> for Instantiation {
    type Error = GenericsError;

    fn try_from(record: InstantiationRecord) -> Result<Self> {
        Instantiation::new(record.declaration, record.type_arguments)
    }
}

impl Instantiation {
    /// Any mix of concrete, parameter and open arguments; only arity is checked
    pub fn new(declaration: Declaration, type_arguments: Vec<TypeArgument>) -> Result<Self> {
        if type_arguments.len() != declaration.arity() {
            return Err(GenericsError::arity_mismatch(
                &declaration,
                declaration.arity(),
                type_arguments.len(),
            ));
        }
        Ok(Self {
            declaration,
            type_arguments: type_arguments
                .into_iter()
                .map(TypeArgument::normalized)
                .collect(),
        })
    }

    /// Original/unsubstituted form of `declaration`
    pub fn definition(declaration: &Declaration) -> Self {
        Self {
            declaration: declaration.clone(),
            type_arguments: declaration.parameters().map(TypeArgument::Parameter).collect(),
        }
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn type_arguments(&self) -> &[TypeArgument] {
        &self.type_arguments
    }

    pub fn arity(&self) -> usize {
        self.type_arguments.len()
    }

    /// True when any argument, at any depth, is a parameter or open instantiation
    pub fn is_open(&self) -> bool {
        self.type_arguments.iter().any(TypeArgument::is_open)
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// True for the declaration's own unsubstituted form
    pub fn is_definition(&self) -> bool {
        self.type_arguments
            .iter()
            .enumerate()
            .all(|(i, arg)| match arg {
                TypeArgument::Parameter(param) => {
                    param.ordinal() == i && param.owner() == &self.declaration
                }
                _ => false,
            })
    }

    pub fn original_definition(&self) -> Instantiation {
        Instantiation::definition(&self.declaration)
    }
}

impl Declaration {
    /// Build the closed instantiation for a complete concrete argument list
    ///
    /// Arity mismatches and non-concrete arguments are caller errors.
    pub fn construct(&self, concrete_args: Vec<TypeArgument>) -> Result<Instantiation> {
        if concrete_args.len() != self.arity() {
            return Err(GenericsError::arity_mismatch(
                self,
                self.arity(),
                concrete_args.len(),
            ));
        }
        if let Some(position) = concrete_args.iter().position(TypeArgument::is_open) {
            return Err(GenericsError::open_argument(self, position));
        }
        Ok(Instantiation {
            declaration: self.clone(),
            type_arguments: concrete_args
                .into_iter()
                .map(TypeArgument::normalized)
                .collect(),
        })
    }
}

impl fmt::Display for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<", self.declaration.qualified_name())?;
        for (i, arg) in self.type_arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Declaration {
        Declaration::generic_type("Pair", 2).unwrap()
    }

    #[test]
    fn test_arity_checked() {
        let err = Instantiation::new(pair(), vec![TypeArgument::named("int")]).unwrap_err();
        assert!(matches!(
            err,
            GenericsError::ArityMismatch { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_construct_closed() {
        let inst = pair()
            .construct(vec![TypeArgument::named("int"), TypeArgument::named("string")])
            .unwrap();
        assert!(inst.is_closed());
        assert!(!inst.is_definition());
        assert_eq!(inst.to_string(), "Pair<int, string>");
    }

    #[test]
    fn test_construct_rejects_open_argument() {
        let wrapper = Declaration::generic_type("Wrapper", 1).unwrap();
        let err = pair()
            .construct(vec![
                TypeArgument::named("int"),
                TypeArgument::parameter(&wrapper, 0).unwrap(),
            ])
            .unwrap_err();
        assert!(matches!(err, GenericsError::OpenArgument { position: 1, .. }));
    }

    #[test]
    fn test_definition_form() {
        let def = Instantiation::definition(&pair());
        assert!(def.is_definition());
        assert!(def.is_open());
        assert_eq!(def.arity(), 2);
        assert_eq!(def.to_string(), "Pair<Pair.T0, Pair.T1>");
    }

    #[test]
    fn test_foreign_parameters_are_not_definition() {
        // Pair<U, T> inside some Outer<T, U> is open but not Pair's own definition
        let outer = Declaration::generic_type("Outer", 2).unwrap();
        let swapped = Instantiation::new(
            pair(),
            vec![
                TypeArgument::parameter(&outer, 1).unwrap(),
                TypeArgument::parameter(&outer, 0).unwrap(),
            ],
        )
        .unwrap();
        assert!(swapped.is_open());
        assert!(!swapped.is_definition());
        assert_eq!(swapped.original_definition(), Instantiation::definition(&pair()));

        let reordered = Instantiation::new(
            pair(),
            vec![
                TypeArgument::parameter(&pair(), 1).unwrap(),
                TypeArgument::parameter(&pair(), 0).unwrap(),
            ],
        )
        .unwrap();
        assert!(!reordered.is_definition());
    }

    #[test]
    fn test_nested_open_detected() {
        let list = Declaration::generic_type("List", 1).unwrap();
        let wrapper = Declaration::generic_type("Wrapper", 1).unwrap();
        let inner = Instantiation::new(list, vec![TypeArgument::parameter(&wrapper, 0).unwrap()])
            .unwrap();
        let outer = Instantiation::new(
            pair(),
            vec![TypeArgument::named("int"), TypeArgument::from_instantiation(inner)],
        )
        .unwrap();
        assert!(outer.is_open());
        assert_eq!(outer.to_string(), "Pair<int, List<Wrapper.T0>>");
    }

    #[test]
    fn test_nested_argument_tag_does_not_affect_identity() {
        use crate::features::generics::domain::ConcreteType;
        use std::collections::HashSet;

        let dictionary = Declaration::generic_type("Dictionary", 2).unwrap();
        let list = Declaration::generic_type("List", 1).unwrap();
        let outer = Declaration::generic_type("Outer", 1).unwrap();
        let list_of_t =
            Instantiation::new(list, vec![TypeArgument::parameter(&outer, 0).unwrap()]).unwrap();

        let tagged_open = Instantiation::new(
            dictionary.clone(),
            vec![TypeArgument::named("string"), TypeArgument::Open(list_of_t.clone())],
        )
        .unwrap();
        let tagged_concrete = Instantiation::new(
            dictionary,
            vec![
                TypeArgument::named("string"),
                TypeArgument::Concrete(ConcreteType::Constructed(list_of_t)),
            ],
        )
        .unwrap();

        assert!(tagged_open.is_open());
        assert!(tagged_concrete.is_open());
        assert_eq!(tagged_open, tagged_concrete);

        let set: HashSet<_> = [tagged_open, tagged_concrete].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_deserialize_checks_arity() {
        let inst = pair()
            .construct(vec![TypeArgument::named("int"), TypeArgument::named("string")])
            .unwrap();
        let json = serde_json::to_value(&inst).unwrap();

        let mut short = json.clone();
        short["type_arguments"].as_array_mut().unwrap().pop();

        let restored: Instantiation = serde_json::from_value(json).unwrap();
        assert_eq!(restored.to_string(), "Pair<int, string>");

        let err = serde_json::from_value::<Instantiation>(short).unwrap_err();
        assert!(err.to_string().contains("Arity mismatch"));
    }
}
