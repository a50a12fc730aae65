use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A permission that can be granted on a piece of content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Permission {
    Read,
    Write,
    CommentDocument,
    AttachFiles,
}

impl Permission {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::CommentDocument => "COMMENT_DOCUMENT",
            Self::AttachFiles => "ATTACH_FILES",
        }
    }

    /// Parse a permission from its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "READ" => Some(Self::Read),
            "WRITE" => Some(Self::Write),
            "COMMENT_DOCUMENT" => Some(Self::CommentDocument),
            "ATTACH_FILES" => Some(Self::AttachFiles),
            _ => None,
        }
    }

    /// Returns `true` for permissions that the `access_all` flag implies for
    /// every user.
    #[must_use]
    pub const fn is_read_class(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-user permission grant owned by a piece of content.
///
/// Grants are keyed by grantee in an [`AccessMap`], so a document holds at
/// most one grant per user by construction; re-granting merges into the
/// existing permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub permissions: BTreeSet<Permission>,
    pub granted_by: uuid::Uuid,
    pub granted_at: DateTime<Utc>,
}

impl Grant {
    #[must_use]
    pub fn new(granted_by: uuid::Uuid) -> Self {
        Self {
            permissions: BTreeSet::new(),
            granted_by,
            granted_at: Utc::now(),
        }
    }

    /// Returns `true` if this grant carries at least one of the requested
    /// permissions.
    #[must_use]
    pub fn allows_any(&self, requested: &[Permission]) -> bool {
        requested.iter().any(|p| self.permissions.contains(p))
    }
}

/// Grantee user id to grant. The map form replaces the legacy
/// equality-by-user list dedup with unique keys.
pub type AccessMap = BTreeMap<uuid::Uuid, Grant>;
