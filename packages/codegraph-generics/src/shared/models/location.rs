//! Program-location identity
//!
//! A `Location` names a piece of program text by file path and span. Two
//! locations observed through different analysis passes are equal when they
//! denote the same text; there is no object identity involved.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::Span;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "LocationRecord")]
pub struct Location {
    file_path: String,
    span: Span,
}

#[derive(Deserialize)]
struct LocationRecord {
    file_path: String,
    span: Span,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Location::new(record.file_path, record.span)
    }
}

impl Location {
    pub fn new(file_path: impl Into<String>, span: Span) -> Self {
        let file_path = file_path.into();
        Self {
            file_path: normalize_path(&file_path).into_owned(),
            span,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn contains(&self, other: &Location) -> bool {
        self.file_path == other.file_path && self.span.contains(&other.span)
    }
}

/// Hosts on Windows report `\` separators; path comparisons must not depend on that
pub(crate) fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.span)
    }
}
