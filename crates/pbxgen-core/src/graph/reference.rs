//! Stable object identifiers.

use std::fmt;

use serde::Serialize;

use crate::graph::ObjectKind;

/// Number of hex characters kept from the content hash.
const HASH_LEN: usize = 24;

/// An opaque, stable identifier for one object in the graph.
///
/// Derived from the object kind and a context string, so regenerating the
/// same spec yields the same identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the identifier for `(kind, context)`. `attempt` disambiguates
    /// contexts that were already taken within the same graph.
    pub(crate) fn derive(kind: ObjectKind, context: &str, attempt: u32) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(kind.isa().as_bytes());
        hasher.update(&[0]);
        hasher.update(context.as_bytes());
        if attempt > 0 {
            hasher.update(&attempt.to_le_bytes());
        }
        let hex = hasher.finalize().to_hex();
        Self(format!(
            "{}_{}",
            kind.acronym(),
            hex.as_str()[..HASH_LEN].to_ascii_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
