use crate::features::generics::domain::Instantiation;
use crate::shared::models::Location;
use crate::shared::CancellationToken;

/// Semantic resolver supplied by the analysis front end
///
/// Answers "which generic declaration, with which arguments, does this
/// location denote". Invocation locations resolve to the invoked method.
/// Locations that do not denote a generic type or method resolve to `None`.
///
/// Parallel ingestion additionally needs the model to be `Sync`.
pub trait SemanticModel {
    fn symbol_at(&self, location: &Location, cancel: &CancellationToken) -> Option<Instantiation>;
}
