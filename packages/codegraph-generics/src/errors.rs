//! Error types for codegraph-generics
//!
//! Precondition violations at public constructors and cooperative
//! cancellation. An unresolvable reference is not an error: the graph
//! answers it with an empty branch.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for generic instantiation discovery
#[derive(Debug, Error)]
pub enum GenericsError {
    /// A declaration without type parameters was used where a generic one is required
    #[error("Declaration '{name}' is not generic (arity 0)")]
    NotGeneric { name: String },

    /// Declaration name was empty
    #[error("Declaration name must not be empty")]
    EmptyName,

    /// Argument list length differs from the declaration's arity
    #[error("Arity mismatch for '{declaration}': expected {expected} type argument(s), found {found}")]
    ArityMismatch {
        declaration: String,
        expected: usize,
        found: usize,
    },

    /// Type parameter ordinal is outside the owner's parameter list
    #[error("Type parameter ordinal {ordinal} out of range for '{owner}' (arity {arity})")]
    OrdinalOutOfRange {
        owner: String,
        ordinal: usize,
        arity: usize,
    },

    /// `construct` received an argument that still carries a parameter
    #[error("Type argument {position} of '{declaration}' is not closed")]
    OpenArgument { declaration: String, position: usize },

    /// Declaration kind did not match the constructor used
    #[error("Expected a generic {expected}, found a generic {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Recorded closedness of a stored reference disagrees with its arguments
    #[error("Reference {reference} recorded as is_closed={recorded}, which its type arguments contradict")]
    ClosednessMismatch { reference: String, recorded: bool },

    /// Cooperative cancellation was requested
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GenericsError {
    pub fn not_generic(name: impl Into<String>) -> Self {
        GenericsError::NotGeneric { name: name.into() }
    }

    pub fn arity_mismatch(declaration: impl ToString, expected: usize, found: usize) -> Self {
        GenericsError::ArityMismatch {
            declaration: declaration.to_string(),
            expected,
            found,
        }
    }

    pub fn open_argument(declaration: impl ToString, position: usize) -> Self {
        GenericsError::OpenArgument {
            declaration: declaration.to_string(),
            position,
        }
    }

    /// True for the cancellation outcome (callers usually retry or drop the result)
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenericsError::Cancelled)
    }
}

/// Result type alias for codegraph-generics operations
pub type Result<T> = std::result::Result<T, GenericsError>;
