//! Graph construction from scanned program sites

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::classify::{CandidateSite, SiteClassifier};
use crate::config::IngestionConfig;
use crate::errors::Result;
use crate::features::generics::domain::GenericReference;
use crate::features::generics::infrastructure::ResolutionGraph;
use crate::features::generics::ports::SemanticModel;
use crate::shared::CancellationToken;

/// Classify every site with `model` and build the resolution graph
///
/// The semantic model is only consulted here; the returned graph holds no
/// reference to it. Classification runs on the rayon pool when
/// `config.parallel` is set.
pub fn build_graph<M: SemanticModel + Sync>(
    sites: &[CandidateSite],
    model: &M,
    config: &IngestionConfig,
    cancel: &CancellationToken,
) -> Result<ResolutionGraph> {
    config.validate()?;

    let classifier = SiteClassifier::new(model, config);
    let references = if config.parallel {
        classify_parallel(&classifier, sites, cancel)?
    } else {
        classify_sequential(&classifier, sites, cancel)?
    };
    into_graph(sites, references, cancel)
}

/// `build_graph` on the calling thread, for models that are not `Sync`
///
/// `config.parallel` is ignored.
pub fn build_graph_sequential<M: SemanticModel>(
    sites: &[CandidateSite],
    model: &M,
    config: &IngestionConfig,
    cancel: &CancellationToken,
) -> Result<ResolutionGraph> {
    config.validate()?;

    let classifier = SiteClassifier::new(model, config);
    let references = classify_sequential(&classifier, sites, cancel)?;
    into_graph(sites, references, cancel)
}

fn into_graph(
    sites: &[CandidateSite],
    references: Vec<Option<GenericReference>>,
    cancel: &CancellationToken,
) -> Result<ResolutionGraph> {
    debug!(
        "Classified {} site(s): {} generic reference(s)",
        sites.len(),
        references.iter().filter(|r| r.is_some()).count()
    );

    ResolutionGraph::from_references(references, cancel)
}

fn classify_sequential<M: SemanticModel>(
    classifier: &SiteClassifier<'_, M>,
    sites: &[CandidateSite],
    cancel: &CancellationToken,
) -> Result<Vec<Option<GenericReference>>> {
    sites
        .iter()
        .map(|site| classifier.classify(site, cancel))
        .collect()
}

#[cfg(feature = "parallel")]
fn classify_parallel<M: SemanticModel + Sync>(
    classifier: &SiteClassifier<'_, M>,
    sites: &[CandidateSite],
    cancel: &CancellationToken,
) -> Result<Vec<Option<GenericReference>>> {
    sites
        .par_iter()
        .map(|site| classifier.classify(site, cancel))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn classify_parallel<M: SemanticModel + Sync>(
    classifier: &SiteClassifier<'_, M>,
    sites: &[CandidateSite],
    cancel: &CancellationToken,
) -> Result<Vec<Option<GenericReference>>> {
    classify_sequential(classifier, sites, cancel)
}
