//! Generic declarations and their type parameters

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{GenericsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Generic class, struct, interface, delegate
    Type,
    /// Generic method or local function
    Method,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Method => "method",
        }
    }
}

/// A generic type or callable, independent of any instantiation
///
/// Identity is logical: kind, fully qualified name and arity. Two values
/// produced by separate analysis passes for the same entity compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DeclarationRecord")]
pub struct Declaration {
    kind: DeclarationKind,
    qualified_name: String,
    arity: usize,
}

#[derive(Deserialize)]
struct DeclarationRecord {
    kind: DeclarationKind,
    qualified_name: String,
    arity: usize,
}

impl TryFrom<DeclarationRecord> for Declaration {
    type Error = GenericsError;

    fn try_from(record: DeclarationRecord) -> Result<Self> {
        Declaration::new(record.kind, record.qualified_name, record.arity)
    }
}

impl Declaration {
    pub fn new(kind: DeclarationKind, qualified_name: impl Into<String>, arity: usize) -> Result<Self> {
        let qualified_name = qualified_name.into();
        if qualified_name.is_empty() {
            return Err(GenericsError::EmptyName);
        }
        if arity == 0 {
            return Err(GenericsError::not_generic(qualified_name));
        }
        Ok(Self {
            kind,
            qualified_name,
            arity,
        })
    }

    pub fn generic_type(qualified_name: impl Into<String>, arity: usize) -> Result<Self> {
        Self::new(DeclarationKind::Type, qualified_name, arity)
    }

    pub fn generic_method(qualified_name: impl Into<String>, arity: usize) -> Result<Self> {
        Self::new(DeclarationKind::Method, qualified_name, arity)
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The i-th type parameter of this declaration
    pub fn parameter(&self, ordinal: usize) -> Result<TypeParameterRef> {
        TypeParameterRef::new(self.clone(), ordinal)
    }

    /// All type parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = TypeParameterRef> + '_ {
        (0..self.arity).map(move |ordinal| TypeParameterRef {
            owner: self.clone(),
            ordinal,
        })
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}`{}", self.qualified_name, self.arity)
    }
}

/// "The i-th type parameter of D"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeParameterRecord")]
pub struct TypeParameterRef {
    owner: Declaration,
    ordinal: usize,
}

#[derive(Deserialize)]
struct TypeParameterRecord {
    owner: Declaration,
    ordinal: usize,
}

impl TryFrom<TypeParameterRecord> for TypeParameterRef {
    type Error = GenericsError;

    fn try_from(record: TypeParameterRecord) -> Result<Self> {
        TypeParameterRef::new(record.owner, record.ordinal)
    }
}

impl TypeParameterRef {
    pub fn new(owner: Declaration, ordinal: usize) -> Result<Self> {
        if ordinal >= owner.arity {
            return Err(GenericsError::OrdinalOutOfRange {
                owner: owner.qualified_name.clone(),
                ordinal,
                arity: owner.arity,
            });
        }
        Ok(Self { owner, ordinal })
    }

    pub fn owner(&self) -> &Declaration {
        &self.owner
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl fmt::Display for TypeParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.T{}", self.owner.qualified_name, self.ordinal)
    }
}
