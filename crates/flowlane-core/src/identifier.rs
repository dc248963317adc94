//! String-interned identifiers.
//!
//! Every named process entity (node, socket, parameter, link, variable) is
//! addressed through an [`Id`]: a copyable symbol backed by a process-wide
//! string interner. Interning keeps identity comparisons and hash lookups
//! cheap while the original names stay available for diagnostics.

use std::fmt;
use std::sync::{LazyLock, Mutex};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: LazyLock<Mutex<StringInterner<DefaultBackend>>> =
    LazyLock::new(|| Mutex::new(StringInterner::new()));

/// A copyable, interned identifier.
///
/// Two `Id`s created from the same string are equal and hash identically.
///
/// # Examples
///
/// ```
/// use flowlane_core::identifier::Id;
///
/// let a = Id::new("activity");
/// let b = Id::new("activity");
/// assert_eq!(a, b);
/// assert_eq!(a.resolve(), "activity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER.lock().expect("identifier interner lock");
        Self(interner.get_or_intern(name))
    }

    /// Returns the original string for this identifier.
    pub fn resolve(&self) -> String {
        let interner = INTERNER.lock().expect("identifier interner lock");
        interner.resolve(self.0).unwrap_or("").to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.resolve())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        let a = Id::new("node1");
        let b = Id::new("node1");
        let c = Id::new("node2");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_resolve() {
        let id = Id::new("socket.out");
        assert_eq!(id.resolve(), "socket.out");
        assert_eq!(id.to_string(), "socket.out");
    }

    #[test]
    fn test_id_from_str() {
        let id: Id = "variable".into();
        assert_eq!(id, Id::new("variable"));
    }

    #[test]
    fn test_id_is_copy() {
        let id = Id::new("copied");
        let other = id;
        assert_eq!(id, other);
    }
}
