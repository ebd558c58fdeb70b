//! Route registration and path resolution.
//!
//! DESIGN
//! ======
//! All descriptor validation happens once in `RouteTable::new`. The checks
//! guarantee that every redirect the guard can emit names a registered route
//! that the redirected session is allowed to enter, so a navigation settles
//! after at most one redirect.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::HashMap;

use super::route::{LOGIN, RouteDescriptor, RouteError, RoutePattern, home_route};
use crate::state::session::Role;

/// Validated set of navigable routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    by_name: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
    catch_all: Option<usize>,
}

impl RouteTable {
    /// Register `routes`, rejecting inconsistent access metadata.
    ///
    /// # Errors
    ///
    /// Returns a `RouteError` for duplicate names or paths, a second
    /// catch-all, malformed paths, auth routes with no allowed role, guest
    /// routes listing roles, or a missing/misconfigured login or home route.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteError> {
        let mut by_name = HashMap::new();
        let mut by_path = HashMap::new();
        let mut catch_all = None;

        for (idx, route) in routes.iter().enumerate() {
            if route.requires_auth() && route.allowed_roles().is_empty() {
                return Err(misconfigured(route.name(), "requires auth but allows no role"));
            }
            if !route.requires_auth() && !route.allowed_roles().is_empty() {
                return Err(misconfigured(route.name(), "guest route lists allowed roles"));
            }
            if by_name.insert(route.name().to_owned(), idx).is_some() {
                return Err(RouteError::DuplicateName(route.name().to_owned()));
            }
            match route.pattern() {
                RoutePattern::Exact(path) => {
                    if !path.starts_with('/') {
                        return Err(RouteError::InvalidPath(path.clone()));
                    }
                    let key = normalize_path(path).to_owned();
                    if by_path.contains_key(&key) {
                        return Err(RouteError::DuplicatePath(key));
                    }
                    by_path.insert(key, idx);
                }
                RoutePattern::CatchAll => {
                    if catch_all.replace(idx).is_some() {
                        return Err(RouteError::MultipleCatchAll);
                    }
                }
            }
        }

        let table = Self { routes, by_name, by_path, catch_all };
        table.check_redirect_targets()?;
        Ok(table)
    }

    /// Routes of the reservation client.
    ///
    /// # Errors
    ///
    /// Returns a `RouteError` if the built-in routes stop satisfying the
    /// checks in [`RouteTable::new`], e.g. a home route dropped or renamed.
    pub fn application() -> Result<Self, RouteError> {
        Self::new(vec![
            RouteDescriptor::guest("Home", "/"),
            RouteDescriptor::guest(LOGIN, "/login"),
            RouteDescriptor::guest("Register", "/register"),
            RouteDescriptor::protected(home_route(Role::Participant), "/participant/home", [Role::Participant]),
            RouteDescriptor::protected(home_route(Role::Organizer), "/organizer/home", [Role::Organizer]),
            RouteDescriptor::protected("CreateActivity", "/organizer/create-activity", [Role::Organizer]),
            RouteDescriptor::catch_all("NotFound"),
        ])
    }

    /// Find the route serving `path`, falling back to the catch-all.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::NotFound` when nothing matches and no catch-all
    /// is registered.
    pub fn resolve(&self, path: &str) -> Result<&RouteDescriptor, RouteError> {
        let key = normalize_path(path);
        self.by_path
            .get(key)
            .or(self.catch_all.as_ref())
            .map(|&idx| &self.routes[idx])
            .ok_or_else(|| RouteError::NotFound(key.to_owned()))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    fn check_redirect_targets(&self) -> Result<(), RouteError> {
        let login = self
            .by_name(LOGIN)
            .ok_or_else(|| RouteError::MissingRoute(LOGIN.to_owned()))?;
        if login.requires_auth() {
            return Err(misconfigured(LOGIN, "login route must not require auth"));
        }

        for role in Role::ALL {
            let name = home_route(role);
            let home = self
                .by_name(name)
                .ok_or_else(|| RouteError::MissingRoute(name.to_owned()))?;
            if !home.requires_auth() || !home.permits(role) {
                return Err(misconfigured(name, "home route must require auth and admit its role"));
            }
        }
        Ok(())
    }
}

fn misconfigured(name: &str, reason: &'static str) -> RouteError {
    RouteError::Misconfigured { name: name.to_owned(), reason }
}

/// Strip query and fragment, then trailing slashes (the root stays `/`).
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
