//! Typed route descriptors and the well-known redirect targets.

use std::collections::BTreeSet;

use crate::state::session::Role;

/// Route the guard sends unauthenticated users to.
pub const LOGIN: &str = "Login";
/// Landing route for participants.
pub const PARTICIPANT_HOME: &str = "ParticipantHome";
/// Landing route for organizers.
pub const ORGANIZER_HOME: &str = "OrganizerHome";

/// Name of the landing route for `role`.
#[must_use]
pub fn home_route(role: Role) -> &'static str {
    match role {
        Role::Participant => PARTICIPANT_HOME,
        Role::Organizer => ORGANIZER_HOME,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("more than one catch-all route registered")]
    MultipleCatchAll,
    #[error("route path must start with '/': {0}")]
    InvalidPath(String),
    #[error("required route {0} is not registered")]
    MissingRoute(String),
    #[error("route {name} is misconfigured: {reason}")]
    Misconfigured { name: String, reason: &'static str },
    #[error("no route matches path {0}")]
    NotFound(String),
}

/// How a descriptor matches incoming paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one normalized path exactly.
    Exact(String),
    /// Matches anything no exact route claims.
    CatchAll,
}

/// Static access requirements for one navigable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    name: String,
    pattern: RoutePattern,
    requires_auth: bool,
    allowed_roles: BTreeSet<Role>,
}

impl RouteDescriptor {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        pattern: RoutePattern,
        requires_auth: bool,
        allowed_roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self { name: name.into(), pattern, requires_auth, allowed_roles: allowed_roles.into_iter().collect() }
    }

    /// Page open to unauthenticated users only.
    #[must_use]
    pub fn guest(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, RoutePattern::Exact(path.into()), false, [])
    }

    /// Page that requires a session whose role is in `roles`.
    #[must_use]
    pub fn protected(
        name: impl Into<String>,
        path: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self::new(name, RoutePattern::Exact(path.into()), true, roles)
    }

    /// Fallback page for unmatched paths. Carries no access metadata, so it
    /// is treated as a guest page.
    #[must_use]
    pub fn catch_all(name: impl Into<String>) -> Self {
        Self::new(name, RoutePattern::CatchAll, false, [])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    #[must_use]
    pub fn allowed_roles(&self) -> &BTreeSet<Role> {
        &self.allowed_roles
    }

    /// Whether a session with `role` may enter. Only meaningful when the
    /// route requires auth.
    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}
