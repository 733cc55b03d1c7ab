mod classify;
mod ingest;

pub use classify::{CandidateSite, SiteClassifier, SiteKind};
pub use ingest::{build_graph, build_graph_sequential};
