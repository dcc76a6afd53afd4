//! Party identities and roles
//!
//! Every participant in the custody chain is addressed by an opaque
//! [`PartyId`]. Participation in transfers additionally requires an
//! assigned [`Role`], granted by the authority through the role
//! registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CustodyError;

/// Party ID - opaque identifier for any custody chain participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role assigned to a party in the custody chain
///
/// A party holds at most one role. Roles are set or overwritten only by
/// the authority; there is no revocation primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Produces waste batches and originates custody chains
    Generator,
    /// Moves batches between custodians
    Transporter,
    /// Performs terminal disposal
    Disposer,
    /// Oversees the chain without holding items
    Regulator,
}

impl Role {
    /// Canonical wire name for the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Generator => "generator",
            Role::Transporter => "transporter",
            Role::Disposer => "disposer",
            Role::Regulator => "regulator",
        }
    }

    /// All recognized roles
    pub fn all() -> [Role; 4] {
        [
            Role::Generator,
            Role::Transporter,
            Role::Disposer,
            Role::Regulator,
        ]
    }
}

impl FromStr for Role {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generator" => Ok(Role::Generator),
            "transporter" => Ok(Role::Transporter),
            "disposer" => Ok(Role::Disposer),
            "regulator" => Ok(Role::Regulator),
            other => Err(CustodyError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
