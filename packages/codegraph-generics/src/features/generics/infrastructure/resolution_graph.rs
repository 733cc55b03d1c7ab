//! Resolution graph for generic instantiations
//!
//! Given every generic reference the site classifier found in a program,
//! answers two questions lazily:
//! - which closed instantiations does this (possibly open) reference stand for
//! - which closed instantiations of this declaration occur anywhere
//!
//! Algorithm (per open reference):
//! 1. Memo hit in `closed` → return the stored branch
//! 2. Remove the reference from `open` (absent → unknown to the graph →
//!    empty branch, memoized)
//! 3. Per argument position, collect candidates:
//!    - concrete argument → itself
//!    - parameter `(owner, i)` → i-th argument of every closed instantiation of `owner`
//!    - open nested instantiation → every closed instantiation matching it exactly
//! 4. Cartesian product of the candidate lists, each combination constructed
//!    on the reference's declaration and tied to the reference's location
//!
//! Removing the reference before recursing is what makes mutually dependent
//! open references terminate: a reference being resolved further up the
//! stack is no longer in `open`, so declaration lookups below do not see it. The price is that such cycles may resolve to
//! fewer instantiations than actually exist; callers get a partial answer, not
//! an error.
//!
//! All resolution methods take `&mut self`: the graph is single-writer, and
//! callers sharing it across threads wrap it in a lock.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::cartesian::{cartesian_product, product_len};
use crate::errors::Result;
use crate::features::generics::domain::{
    ConcreteType, Declaration, GenericReference, Instantiation, TypeArgument,
};
use crate::shared::CancellationToken;

/// Closed references derived from one reference; immutable once memoized
pub type Branch = Arc<[GenericReference]>;

/// Graph statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Memoized branches (ingested closed references included)
    pub closed: usize,
    /// Open references not resolved yet
    pub open: usize,
}

#[derive(Debug, Default)]
pub struct ResolutionGraph {
    /// Reference → closed references it resolves to
    closed: FxHashMap<GenericReference, Branch>,

    /// Open references awaiting resolution
    open: FxHashSet<GenericReference>,
}

impl ResolutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from classifier output, one entry per scanned location
    ///
    /// `None` entries are locations that are not generic use sites.
    pub fn from_references<I>(references: I, cancel: &CancellationToken) -> Result<Self>
    where
        I: IntoIterator<Item = Option<GenericReference>>,
    {
        let mut graph = Self::new();
        graph.extend_from(references, cancel)?;
        Ok(graph)
    }

    /// Add classifier output to the graph, returning how many references were taken
    ///
    /// On cancellation the references added so far stay in the graph.
    pub fn extend_from<I>(&mut self, references: I, cancel: &CancellationToken) -> Result<usize>
    where
        I: IntoIterator<Item = Option<GenericReference>>,
    {
        let mut added = 0;
        let mut skipped = 0;
        for reference in references {
            cancel.check()?;
            match reference {
                Some(reference) => {
                    self.add(reference);
                    added += 1;
                }
                None => skipped += 1,
            }
        }

        debug!(
            "Generic references ingested: {} added, {} skipped, {} closed, {} open",
            added,
            skipped,
            self.closed.len(),
            self.open.len()
        );
        Ok(added)
    }

    fn add(&mut self, reference: GenericReference) {
        if reference.is_closed_type_or_method() {
            let branch: Branch = Arc::from(vec![reference.clone()]);
            self.closed.insert(reference, branch);
        } else {
            self.open.insert(reference);
        }
    }

    /// Every closed reference derivable from `reference`
    ///
    /// Memoized: repeated calls return the stored branch. Unknown references
    /// yield an empty branch. A cancelled call leaves the reference pending,
    /// along with any reference it was resolving on the way.
    pub fn resolve_branch(
        &mut self,
        reference: &GenericReference,
        cancel: &CancellationToken,
    ) -> Result<Branch> {
        if let Some(branch) = self.closed.get(reference) {
            trace!("Branch cache hit: {}", reference);
            return Ok(Arc::clone(branch));
        }

        if !self.open.remove(reference) {
            trace!("Unknown reference, empty branch: {}", reference);
            let branch: Branch = Arc::from(Vec::new());
            self.closed.insert(reference.clone(), Arc::clone(&branch));
            return Ok(branch);
        }

        match self.expand(reference, cancel) {
            Ok(branch) => {
                let branch: Branch = Arc::from(branch);
                self.closed.insert(reference.clone(), Arc::clone(&branch));
                Ok(branch)
            }
            Err(err) => {
                self.open.insert(reference.clone());
                warn!("Branch resolution aborted for {}: {}", reference, err);
                Err(err)
            }
        }
    }

    /// Every closed reference to any instantiation of `declaration`
    pub fn resolve_by_declaration(
        &mut self,
        declaration: &Declaration,
        cancel: &CancellationToken,
    ) -> Result<Vec<GenericReference>> {
        self.resolve_by_symbol(&Instantiation::definition(declaration), cancel)
    }

    /// Closed references matching `symbol`
    ///
    /// A definition-form symbol matches every reference to its declaration;
    /// any other symbol matches only references with an equal instantiation.
    pub fn resolve_by_symbol(
        &mut self,
        symbol: &Instantiation,
        cancel: &CancellationToken,
    ) -> Result<Vec<GenericReference>> {
        let by_declaration = symbol.is_definition();
        let matches = |reference: &GenericReference| {
            let inst = reference.instantiation();
            if by_declaration {
                inst.declaration() == symbol.declaration()
            } else {
                inst == symbol
            }
        };

        let mut found = BranchBuilder::default();

        // Resolution below mutates both collections; iterate over snapshots
        let closed_matches: Vec<GenericReference> =
            self.closed.keys().filter(|r| matches(*r)).cloned().collect();
        for key in &closed_matches {
            cancel.check()?;
            if let Some(branch) = self.closed.get(key) {
                found.extend(branch.iter().cloned());
            }
        }

        let open_matches: Vec<GenericReference> =
            self.open.iter().filter(|r| matches(*r)).cloned().collect();
        for reference in &open_matches {
            cancel.check()?;
            let branch = self.resolve_branch(reference, cancel)?;
            found.extend(branch.iter().cloned());
        }

        trace!(
            "Resolved {} ({} closed, {} open matches): {} instantiation(s)",
            symbol,
            closed_matches.len(),
            open_matches.len(),
            found.len()
        );
        Ok(found.finish())
    }

    /// Resolve every pending reference; returns all closed references in the program
    pub fn resolve_all(&mut self, cancel: &CancellationToken) -> Result<Vec<GenericReference>> {
        let pending: Vec<GenericReference> = self.open.iter().cloned().collect();
        for reference in &pending {
            cancel.check()?;
            self.resolve_branch(reference, cancel)?;
        }

        let mut all = BranchBuilder::default();
        for branch in self.closed.values() {
            all.extend(branch.iter().cloned());
        }
        debug!(
            "Resolved {} pending reference(s) into {} closed reference(s)",
            pending.len(),
            all.len()
        );
        Ok(all.finish())
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            closed: self.closed.len(),
            open: self.open.len(),
        }
    }

    /// True while `reference` is an open reference nobody has resolved yet
    pub fn is_pending(&self, reference: &GenericReference) -> bool {
        self.open.contains(reference)
    }

    pub fn is_memoized(&self, reference: &GenericReference) -> bool {
        self.closed.contains_key(reference)
    }

    /// Steps 3-4 for a reference already removed from `open`
    fn expand(
        &mut self,
        reference: &GenericReference,
        cancel: &CancellationToken,
    ) -> Result<Vec<GenericReference>> {
        let inst = reference.instantiation();

        let mut candidates: Vec<Vec<TypeArgument>> = Vec::with_capacity(inst.arity());
        for arg in inst.type_arguments() {
            cancel.check()?;
            let position = match arg {
                TypeArgument::Parameter(param) => {
                    let owners = self.resolve_by_declaration(param.owner(), cancel)?;
                    owners
                        .iter()
                        .filter_map(|r| r.instantiation().type_arguments().get(param.ordinal()))
                        .cloned()
                        .collect()
                }
                TypeArgument::Open(nested) => self.nested_candidates(nested, cancel)?,
                TypeArgument::Concrete(_) => vec![arg.clone()],
            };
            candidates.push(dedup(position));
        }

        trace!(
            "Expanding {}: {} combination(s)",
            reference,
            product_len(&candidates)
        );

        let declaration = inst.declaration();
        let mut branch = BranchBuilder::default();
        for combination in cartesian_product(&candidates) {
            cancel.check()?;
            let constructed = declaration.construct(combination)?;
            branch.push(GenericReference::synthesized(
                constructed,
                reference.location().clone(),
            ));
        }

        debug!("Branch {} → {} closed reference(s)", reference, branch.len());
        Ok(branch.finish())
    }

    /// Whole-type candidates for an open nested instantiation argument
    fn nested_candidates(
        &mut self,
        nested: &Instantiation,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeArgument>> {
        let resolved = self.resolve_by_symbol(nested, cancel)?;
        Ok(resolved
            .into_iter()
            .map(|r| TypeArgument::Concrete(ConcreteType::Constructed(r.instantiation().clone())))
            .collect())
    }
}

/// Order-preserving duplicate removal
fn dedup(args: Vec<TypeArgument>) -> Vec<TypeArgument> {
    let mut seen = FxHashSet::default();
    args.into_iter().filter(|a| seen.insert(a.clone())).collect()
}

/// Insertion-ordered set of references
#[derive(Default)]
struct BranchBuilder {
    seen: FxHashSet<GenericReference>,
    items: Vec<GenericReference>,
}

impl BranchBuilder {
    fn push(&mut self, reference: GenericReference) {
        if self.seen.insert(reference.clone()) {
            self.items.push(reference);
        }
    }

    fn extend(&mut self, references: impl IntoIterator<Item = GenericReference>) {
        for reference in references {
            self.push(reference);
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn finish(self) -> Vec<GenericReference> {
        self.items
    }
}
