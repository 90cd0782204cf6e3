//! Type-safe ledger account identity.
//!
//! [`Identity`] is a newtype wrapper around [`uuid::Uuid`] (v4) providing
//! type safety so that account identities cannot be confused with other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque identity of a ledger account.
///
/// Wraps a UUID v4. The execution environment assigns one to every
/// caller; the gateway never inspects the contents. Used as the caller
/// identity on every invocation, as the entrant list element, and as
/// the pool's own account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Identity(uuid::Uuid);

impl Identity {
    /// Creates a new random `Identity` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `Identity` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for Identity {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Identity> for uuid::Uuid {
    fn from(id: Identity) -> Self {
        id.0
    }
}
