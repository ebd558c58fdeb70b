//! Navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before every route transition. Reads the session and the target's
//! descriptor and returns exactly one decision; it never performs I/O and
//! never mutates the session.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::route::{LOGIN, RouteDescriptor, home_route};
use crate::state::session::{Session, SessionStore};

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    /// Go to the named route instead.
    Redirect(&'static str),
}

/// Decide whether `session` may enter `target`.
///
/// Guest pages admit only unauthenticated sessions; signed-in users are sent
/// to their home. Protected pages send anonymous users to login and users of
/// the wrong role to their own home.
#[must_use]
pub fn decide(session: &Session, target: &RouteDescriptor) -> Navigation {
    match (target.requires_auth(), session.role()) {
        (false, None) => Navigation::Proceed,
        (false, Some(role)) => Navigation::Redirect(home_route(role)),
        (true, None) => Navigation::Redirect(LOGIN),
        (true, Some(role)) if target.permits(role) => Navigation::Proceed,
        (true, Some(role)) => Navigation::Redirect(home_route(role)),
    }
}

/// Guard bound to a session store.
#[derive(Debug, Clone)]
pub struct Guard {
    session: SessionStore,
}

impl Guard {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Check `target` against the store's current session.
    #[must_use]
    pub fn check(&self, target: &RouteDescriptor) -> Navigation {
        let session = self.session.snapshot();
        let decision = decide(&session, target);
        tracing::debug!(
            route = target.name(),
            requires_auth = target.requires_auth(),
            role = ?session.role(),
            ?decision,
            "guard decision"
        );
        decision
    }
}
