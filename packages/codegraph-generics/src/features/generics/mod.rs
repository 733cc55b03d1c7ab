//! Generic instantiation discovery
//!
//! - domain/         : declarations, type arguments, instantiations, references
//! - infrastructure/ : resolution graph and the Cartesian-product helper
//! - ports/          : semantic resolver capability supplied by the front end
//! - application/    : site classification and graph construction

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    build_graph, build_graph_sequential, CandidateSite, SiteClassifier, SiteKind,
};
pub use domain::{
    ConcreteType, Declaration, DeclarationKind, GenericReference, Instantiation, TypeArgument,
    TypeParameterRef,
};
pub use infrastructure::{Branch, GraphStats, ResolutionGraph};
pub use ports::SemanticModel;
