/*
 * Codegraph Generics - Closed Generic Instantiation Discovery
 *
 * Given the generic use sites found in a program, computes every closed
 * instantiation (`List<int>`, `Convert<string>`) reachable from open ones
 * (`List<T>` inside `class Wrapper<T>`) by propagating the concrete type
 * arguments observed elsewhere in the same analysis.
 *
 * Feature-First Hexagonal Architecture:
 * - shared/   : Location, Span, cancellation
 * - features/ : generics (domain → infrastructure → application)
 * - config/   : Ingestion configuration
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::IngestionConfig;
pub use errors::{GenericsError, Result};
pub use features::generics::{
    build_graph, build_graph_sequential, Branch, CandidateSite, ConcreteType, Declaration,
    DeclarationKind, GenericReference, GraphStats, Instantiation, ResolutionGraph, SemanticModel,
    SiteClassifier, SiteKind, TypeArgument, TypeParameterRef,
};
pub use shared::models::{Location, Span};
pub use shared::CancellationToken;
