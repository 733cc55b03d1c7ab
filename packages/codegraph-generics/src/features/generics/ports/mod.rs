mod semantic_model;

pub use semantic_model::SemanticModel;
