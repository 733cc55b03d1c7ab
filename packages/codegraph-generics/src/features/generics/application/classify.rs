//! Site classification
//!
//! Turns scanned program locations into generic references. Only uses of
//! generic declarations are kept: declaration sites, unresolved names and
//! non-generic symbols produce nothing. A generic method called with an
//! explicit argument list shows up twice (the invocation and the generic
//! name inside it); the invocation is kept and the name is dropped.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::IngestionConfig;
use crate::errors::Result;
use crate::features::generics::domain::GenericReference;
use crate::features::generics::ports::SemanticModel;
use crate::shared::models::Location;
use crate::shared::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteKind {
    /// `List<int>`, `Convert<T>`
    GenericName {
        /// Enclosing invocation when the name is its callee (`Convert<T>(x)`, `a.Convert<T>(x)`)
        callee_of: Option<Location>,
    },
    Identifier,
    Invocation,
}

/// A location the front end thinks may denote a generic use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSite {
    pub location: Location,
    pub kind: SiteKind,
}

impl CandidateSite {
    pub fn new(location: Location, kind: SiteKind) -> Self {
        Self { location, kind }
    }

    pub fn generic_name(location: Location) -> Self {
        Self::new(location, SiteKind::GenericName { callee_of: None })
    }

    pub fn callee_name(location: Location, invocation: Location) -> Self {
        Self::new(
            location,
            SiteKind::GenericName {
                callee_of: Some(invocation),
            },
        )
    }

    pub fn invocation(location: Location) -> Self {
        Self::new(location, SiteKind::Invocation)
    }

    pub fn identifier(location: Location) -> Self {
        Self::new(location, SiteKind::Identifier)
    }
}

pub struct SiteClassifier<'a, M: SemanticModel> {
    model: &'a M,
    config: &'a IngestionConfig,
}

impl<'a, M: SemanticModel> SiteClassifier<'a, M> {
    pub fn new(model: &'a M, config: &'a IngestionConfig) -> Self {
        Self { model, config }
    }

    /// `Ok(None)` when the site is not a generic use
    pub fn classify(
        &self,
        site: &CandidateSite,
        cancel: &CancellationToken,
    ) -> Result<Option<GenericReference>> {
        cancel.check()?;

        if self.config.is_excluded(site.location.file_path()) {
            return Ok(None);
        }

        let symbol = match &site.kind {
            SiteKind::GenericName {
                callee_of: Some(invocation),
            } => {
                let symbol = self.model.symbol_at(&site.location, cancel);
                if symbol.is_some() && symbol == self.model.symbol_at(invocation, cancel) {
                    trace!("Callee name {} covered by invocation {}", site.location, invocation);
                    return Ok(None);
                }
                symbol
            }
            SiteKind::GenericName { callee_of: None } | SiteKind::Identifier | SiteKind::Invocation => {
                self.model.symbol_at(&site.location, cancel)
            }
        };

        Ok(symbol
            .filter(|s| !s.is_definition())
            .map(|s| GenericReference::new(s, site.location.clone())))
    }
}
