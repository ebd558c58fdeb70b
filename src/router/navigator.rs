//! Route-level navigation driven by the guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stands in for the browser router: resolves a requested path, asks the
//! guard, and follows at most one redirect. Table validation guarantees the
//! redirect target admits the session.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use super::guard::{Guard, Navigation};
use super::route::RouteError;
use super::table::RouteTable;
use crate::state::session::SessionStore;

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Route active before the navigation, if any.
    pub from: Option<String>,
    /// Route the navigation settled on.
    pub to: String,
    /// Route originally requested when the guard redirected.
    pub redirected_from: Option<String>,
}

impl Transition {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Tracks the active route and routes every navigation through the guard.
pub struct Navigator {
    table: RouteTable,
    guard: Guard,
    current: Option<String>,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable, session: SessionStore) -> Self {
        Self { table, guard: Guard::new(session), current: None }
    }

    /// Name of the active route.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, applying the guard's decision.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::NotFound` if no route serves `path`, or
    /// `RouteError::MissingRoute` if a redirect names an unregistered route.
    /// The current route is unchanged on error.
    pub fn navigate(&mut self, path: &str) -> Result<Transition, RouteError> {
        let target = self.table.resolve(path)?;
        let (to, redirected_from) = match self.guard.check(target) {
            Navigation::Proceed => (target.name().to_owned(), None),
            Navigation::Redirect(name) => {
                let redirect = self
                    .table
                    .by_name(name)
                    .ok_or_else(|| RouteError::MissingRoute(name.to_owned()))?;
                tracing::info!(requested = target.name(), redirect = redirect.name(), "navigation redirected");
                (redirect.name().to_owned(), Some(target.name().to_owned()))
            }
        };

        let from = self.current.replace(to.clone());
        Ok(Transition { from, to, redirected_from })
    }
}
