//! Cooperative cancellation
//!
//! Long traversals poll a shared flag at each unit of work and unwind with
//! `GenericsError::Cancelled`.

#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{GenericsError, Result};

/// Cloneable cancellation handle; all clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,

    /// Checks left before the token cancels itself
    #[cfg(test)]
    remaining_checks: Option<Arc<AtomicUsize>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of ongoing work
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Token that passes `checks` checks, then cancels
    #[cfg(test)]
    pub(crate) fn cancel_after(checks: usize) -> Self {
        Self {
            remaining_checks: Some(Arc::new(AtomicUsize::new(checks))),
            ..Self::default()
        }
    }

    pub fn check(&self) -> Result<()> {
        #[cfg(test)]
        self.spend_check();

        if self.is_cancelled() {
            Err(GenericsError::Cancelled)
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    fn spend_check(&self) {
        if let Some(remaining) = &self.remaining_checks {
            let spent = remaining.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                n.checked_sub(1)
            });
            if spent.is_err() {
                self.cancel();
            }
        }
    }
}
