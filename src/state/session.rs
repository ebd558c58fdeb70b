//! Session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard and the request pipeline both read from this store on
//! every invocation. Login replaces the identity wholesale and logout clears
//! it; nothing else writes here.
//!
//! DESIGN
//! ======
//! `SessionStore` is a cheap cloneable handle passed explicitly to its
//! readers instead of a process-wide singleton. Every read takes the lock
//! once, so a reader observes either the old identity or the new one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Account type of an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Organizer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Participant, Role::Organizer];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Organizer => "organizer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role string is neither `participant` nor `organizer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "participant" => Ok(Self::Participant),
            "organizer" => Ok(Self::Organizer),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Authenticated identity as returned by a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Bearer credential for backend requests.
    pub token: String,
    /// Account type; serialized as `user_type` on the wire.
    #[serde(rename = "user_type")]
    pub role: Role,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// SESSION
// =============================================================================

/// Point-in-time session state. All projections derive from `identity`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    #[must_use]
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.token.as_str())
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|i| i.email.as_deref())
    }

    #[must_use]
    pub fn is_organizer(&self) -> bool {
        self.role() == Some(Role::Organizer)
    }

    #[must_use]
    pub fn is_participant(&self) -> bool {
        self.role() == Some(Role::Participant)
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the process's session. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Create an empty (unauthenticated) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current identity wholesale. Contents are not validated.
    pub fn set_identity(&self, identity: Identity) {
        tracing::info!(username = %identity.username, role = %identity.role, "session established");
        self.inner.write().identity = Some(identity);
    }

    /// Drop the current identity. Clearing an empty store is a no-op.
    pub fn clear(&self) {
        let previous = self.inner.write().identity.take();
        if let Some(identity) = previous {
            tracing::info!(username = %identity.username, "session cleared");
        }
    }

    /// Copy of the current session for multi-field reads.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.inner.read().role()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.read().token().map(str::to_owned)
    }

    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.inner.read().username().map(str::to_owned)
    }
}
