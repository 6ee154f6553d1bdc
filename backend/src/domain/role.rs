//! Role enumeration shared by every person-bearing entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Position a person holds within the gym hierarchy.
///
/// Serialized by variant name (`"Owner"`, `"Manager"`, …) and stored the
/// same way in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Owner,
    Manager,
    Trainer,
    Staff,
    Member,
    Guest,
    Vendor,
}

impl Role {
    /// Canonical string form, matching the serialized representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Manager => "Manager",
            Self::Trainer => "Trainer",
            Self::Staff => "Staff",
            Self::Member => "Member",
            Self::Guest => "Guest",
            Self::Vendor => "Vendor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role value is not part of the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Owner" => Ok(Self::Owner),
            "Manager" => Ok(Self::Manager),
            "Trainer" => Ok(Self::Trainer),
            "Staff" => Ok(Self::Staff),
            "Member" => Ok(Self::Member),
            "Guest" => Ok(Self::Guest),
            "Vendor" => Ok(Self::Vendor),
            other => Err(UnknownRoleError(other.to_owned())),
        }
    }
}
