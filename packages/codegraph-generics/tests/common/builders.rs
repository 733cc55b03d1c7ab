//! Test data builders

use codegraph_generics::{
    CancellationToken, GenericReference, Instantiation, Location, ResolutionGraph, SemanticModel,
};
use std::collections::HashMap;

/// Builder for ResolutionGraph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    references: Vec<Option<GenericReference>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: GenericReference) -> Self {
        self.references.push(Some(reference));
        self
    }

    /// A scanned location that was not a generic site
    pub fn with_irrelevant_site(mut self) -> Self {
        self.references.push(None);
        self
    }

    pub fn build(self) -> ResolutionGraph {
        ResolutionGraph::from_references(self.references, &CancellationToken::new()).unwrap()
    }
}

/// In-memory semantic model: location → denoted symbol
#[derive(Debug, Default)]
pub struct FixtureModel {
    symbols: HashMap<Location, Instantiation>,
}

impl FixtureModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: Location, symbol: Instantiation) -> Self {
        self.symbols.insert(location, symbol);
        self
    }
}

impl SemanticModel for FixtureModel {
    fn symbol_at(&self, location: &Location, _cancel: &CancellationToken) -> Option<Instantiation> {
        self.symbols.get(location).cloned()
    }
}
