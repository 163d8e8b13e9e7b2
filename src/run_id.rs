//! Per-invocation run identity.
//!
//! Every pipeline run mints one [`RunId`] that is shared by all artifacts
//! produced in that run and recorded in the manifest next to each photo's
//! fingerprint. Artifacts are never overwritten in place: a changed photo gets
//! a fresh run-id directory, so the previous derivatives survive until swept.

use std::fmt;
use uuid::Uuid;

/// Opaque identifier for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Mint a new identity. Called exactly once, at pipeline start.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Rehydrate an identity recorded in a manifest document.
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
