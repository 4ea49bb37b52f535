//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a line item within one invoice draft.
///
/// Ids are positive and assigned monotonically by the draft; they carry no
/// meaning outside the draft that issued them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LineItemId(u32);

impl LineItemId {
    /// The id given to the first item of a fresh draft.
    pub const FIRST: LineItemId = LineItemId(1);

    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid_id("LineItemId: must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// The id immediately following this one.
    pub fn next(&self) -> Result<Self, DomainError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::invariant("line item id space exhausted"))
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for LineItemId {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LineItemId> for u32 {
    fn from(value: LineItemId) -> Self {
        value.0
    }
}

impl FromStr for LineItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = u32::from_str(s.trim())
            .map_err(|e| DomainError::invalid_id(format!("LineItemId: {e}")))?;
        Self::new(raw)
    }
}
