//! Generic reference: an instantiation observed at a program location

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::declaration::DeclarationKind;
use super::instantiation::Instantiation;
use crate::errors::{GenericsError, Result};
use crate::shared::models::Location;

/// Unit of storage and lookup in the resolution graph
///
/// Equality and hashing cover the instantiation and the location only.
/// Whether the reference was seen in source or synthesized by resolution
/// does not affect identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ReferenceRecord")]
pub struct GenericReference {
    instantiation: Instantiation,
    location: Location,
    is_closed: bool,
    observed_at_site: bool,
}

/// Serialized shape; `is_closed` is recomputed and must agree when present
#[derive(Deserialize)]
struct ReferenceRecord {
    instantiation: Instantiation,
    location: Location,
    #[serde(default)]
    is_closed: Option<bool>,
    #[serde(default = "observed_by_default")]
    observed_at_site: bool,
}

fn observed_by_default() -> bool {
    true
}

impl TryFrom<ReferenceRecord> for GenericReference {
    type Error = GenericsError;

    fn try_from(record: ReferenceRecord) -> Result<Self> {
        let reference = Self::build(
            record.instantiation,
            record.location,
            record.observed_at_site,
        );
        match record.is_closed {
            Some(recorded) if recorded != reference.is_closed => {
                Err(GenericsError::ClosednessMismatch {
                    reference: reference.to_string(),
                    recorded,
                })
            }
            _ => Ok(reference),
        }
    }
}

impl GenericReference {
    /// Reference observed directly at a use site
    pub fn new(instantiation: Instantiation, location: Location) -> Self {
        Self::build(instantiation, location, true)
    }

    /// Use site of a generic type; rejects method declarations
    pub fn for_type(instantiation: Instantiation, location: Location) -> Result<Self> {
        Self::expect_kind(&instantiation, DeclarationKind::Type)?;
        Ok(Self::new(instantiation, location))
    }

    /// Use site of a generic method; rejects type declarations
    pub fn for_method(instantiation: Instantiation, location: Location) -> Result<Self> {
        Self::expect_kind(&instantiation, DeclarationKind::Method)?;
        Ok(Self::new(instantiation, location))
    }

    /// Closed reference derived by substitution, tied to the open reference's location
    pub(crate) fn synthesized(instantiation: Instantiation, location: Location) -> Self {
        Self::build(instantiation, location, false)
    }

    fn build(instantiation: Instantiation, location: Location, observed_at_site: bool) -> Self {
        let is_closed = instantiation.is_closed();
        Self {
            instantiation,
            location,
            is_closed,
            observed_at_site,
        }
    }

    fn expect_kind(instantiation: &Instantiation, expected: DeclarationKind) -> Result<()> {
        let found = instantiation.declaration().kind();
        if found != expected {
            return Err(GenericsError::KindMismatch {
                expected: expected.as_str(),
                found: found.as_str(),
            });
        }
        Ok(())
    }

    pub fn instantiation(&self) -> &Instantiation {
        &self.instantiation
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_closed_type_or_method(&self) -> bool {
        self.is_closed
    }

    /// Closed, and found that way in source rather than derived by resolution
    pub fn is_site_closed(&self) -> bool {
        self.is_closed && self.observed_at_site
    }
}

impl PartialEq for GenericReference {
    fn eq(&self, other: &Self) -> bool {
        self.instantiation == other.instantiation && self.location == other.location
    }
}

impl Eq for GenericReference {}

impl Hash for GenericReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instantiation.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Display for GenericReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.instantiation, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generics::domain::{Declaration, TypeArgument};
    use crate::shared::models::Span;

    fn box_int() -> Instantiation {
        Declaration::generic_type("Box", 1)
            .unwrap()
            .construct(vec![TypeArgument::named("int")])
            .unwrap()
    }

    fn loc(line: u32) -> Location {
        Location::new("Program.cs", Span::line(line, 4, 12))
    }

    #[test]
    fn test_site_closed_flags() {
        let observed = GenericReference::new(box_int(), loc(1));
        assert!(observed.is_closed_type_or_method());
        assert!(observed.is_site_closed());

        let derived = GenericReference::synthesized(box_int(), loc(1));
        assert!(derived.is_closed_type_or_method());
        assert!(!derived.is_site_closed());
    }

    #[test]
    fn test_equality_ignores_origin() {
        let observed = GenericReference::new(box_int(), loc(1));
        let derived = GenericReference::synthesized(box_int(), loc(1));
        assert_eq!(observed, derived);
        assert_ne!(observed, GenericReference::new(box_int(), loc(2)));
    }

    #[test]
    fn test_open_reference_is_not_site_closed() {
        let wrapper = Declaration::generic_type("Wrapper", 1).unwrap();
        let open = Instantiation::new(
            Declaration::generic_type("Box", 1).unwrap(),
            vec![TypeArgument::parameter(&wrapper, 0).unwrap()],
        )
        .unwrap();
        let reference = GenericReference::new(open, loc(3));
        assert!(!reference.is_closed_type_or_method());
        assert!(!reference.is_site_closed());
    }

    #[test]
    fn test_kind_checked_constructors() {
        assert!(GenericReference::for_type(box_int(), loc(1)).is_ok());
        let err = GenericReference::for_method(box_int(), loc(1)).unwrap_err();
        assert!(matches!(
            err,
            GenericsError::KindMismatch { expected: "method", found: "type" }
        ));
    }

    #[test]
    fn test_display() {
        let reference = GenericReference::new(box_int(), loc(7));
        assert_eq!(reference.to_string(), "Box<int> @ Program.cs:7:4-7:12");
    }

    #[test]
    fn test_deserialize_recomputes_state() {
        let derived = GenericReference::synthesized(box_int(), loc(5));
        let json = serde_json::to_value(&derived).unwrap();

        let restored: GenericReference = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, derived);
        assert!(restored.is_closed_type_or_method());
        assert!(!restored.is_site_closed());

        let mut stale = json.clone();
        stale["is_closed"] = serde_json::Value::Bool(false);
        let err = serde_json::from_value::<GenericReference>(stale).unwrap_err();
        assert!(err.to_string().contains("closed"));

        let mut bare = json;
        bare.as_object_mut().unwrap().remove("is_closed");
        bare["location"]["file_path"] = serde_json::Value::from("src\\Program.cs");
        let restored: GenericReference = serde_json::from_value(bare).unwrap();
        assert!(restored.is_closed_type_or_method());
        assert_eq!(restored.location().file_path(), "src/Program.cs");
    }
}
