//! Program-location models

mod location;
mod span;

pub(crate) use location::normalize_path;
pub use location::Location;
pub use span::Span;
