//! Ownership policy for mutating operations.
//!
//! Edit, approve and remove are gated by [`OwnershipPolicy::authorize`].
//! `Enforced` requires the requester to own the resource (for comments, the
//! owner is the author of the post they belong to). `Permissive` keeps the
//! legacy behavior where any caller reaching the route may act.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::Requester;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    #[default]
    Enforced,
    Permissive,
}

impl OwnershipPolicy {
    /// Check that `requester` may mutate a resource owned by `owner`.
    pub fn authorize(self, requester: &Requester, owner: Uuid) -> Result<(), DomainError> {
        match self {
            OwnershipPolicy::Enforced => require_owner(requester, owner),
            OwnershipPolicy::Permissive => Ok(()),
        }
    }

    pub fn is_enforced(self) -> bool {
        self == OwnershipPolicy::Enforced
    }
}

impl fmt::Display for OwnershipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipPolicy::Enforced => f.write_str("enforced"),
            OwnershipPolicy::Permissive => f.write_str("permissive"),
        }
    }
}

impl FromStr for OwnershipPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforced" => Ok(OwnershipPolicy::Enforced),
            "permissive" => Ok(OwnershipPolicy::Permissive),
            other => Err(DomainError::Validation(format!(
                "unknown ownership policy '{other}'"
            ))),
        }
    }
}

/// Fails with `Unauthorized` for anonymous requesters and `Forbidden` for
/// authenticated requesters other than `owner`.
pub fn require_owner(requester: &Requester, owner: Uuid) -> Result<(), DomainError> {
    let user_id = requester.require_authenticated()?;
    if user_id != owner {
        tracing::warn!(%user_id, %owner, "Ownership check failed");
        return Err(DomainError::Forbidden);
    }
    Ok(())
}
