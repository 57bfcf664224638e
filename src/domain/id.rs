//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage-assigned snapshot row identifier.
///
/// Assigned exactly once by the storage engine at insertion time and
/// immutable thereafter. Monotonically increasing for a given store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(i32);

impl SnapshotId {
    /// Create a `SnapshotId` from a raw row id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SnapshotId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Issuing company identifier - newtype for type safety.
///
/// Not unique on its own within the store: a company accumulates one
/// snapshot per capture event over time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CompanyCode(i32);

impl CompanyCode {
    /// Create a `CompanyCode` from a raw issuer code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the raw issuer code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CompanyCode {
    fn from(code: i32) -> Self {
        Self::new(code)
    }
}

impl std::str::FromStr for CompanyCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_id_roundtrip() {
        let id = SnapshotId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(SnapshotId::from(42), id);
    }

    #[test]
    fn company_code_parses_from_str() {
        let code: CompanyCode = "30125".parse().unwrap();
        assert_eq!(code, CompanyCode::new(30125));
    }

    #[test]
    fn company_code_rejects_garbage() {
        assert!("not-a-code".parse::<CompanyCode>().is_err());
    }
}
