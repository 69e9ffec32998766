//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type IdentityId = Id<markers::Identity>;
/// ```
pub struct Id<T> {
    value: uuid::Uuid,
    _marker: PhantomData<T>,
}

// Clone/Copy/Eq/Hash are written out by hand (like Debug/Display below)
// so that marker types need no trait impls of their own; a derive would
// bound `T` even though only the UUID is ever cloned or compared.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse from the canonical string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Identity IDs (user directory records)
    pub struct Identity;
}

/// Type aliases for common IDs
pub type IdentityId = Id<markers::Identity>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: IdentityId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id: IdentityId = Id::new();
        let parsed = IdentityId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_parse_invalid() {
        assert!(IdentityId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_clone_compare_hash_without_marker_impls() {
        // markers::Identity carries no derives of its own; the Id wrapper
        // must still clone, compare, and hash.
        let id: IdentityId = Id::new();
        let copy = id;
        assert_eq!(copy.clone(), id);

        let mut set = std::collections::HashSet::new();
        set.insert(id);
        set.insert(copy);
        assert_eq!(set.len(), 1);
    }
}
