use super::*;
use crate::router::route::{ORGANIZER_HOME, PARTICIPANT_HOME};
use crate::router::table::RouteTable;
use crate::state::session::{Identity, Role};

fn signed_in(role: Role) -> Session {
    Session::new(Some(Identity {
        token: "abc".to_owned(),
        role,
        username: "sam".to_owned(),
        email: None,
    }))
}

fn reservations() -> RouteDescriptor {
    RouteDescriptor::protected("Reservations", "/reservations", [Role::Participant])
}

fn login() -> RouteDescriptor {
    RouteDescriptor::guest(LOGIN, "/login")
}

// =============================================================
// Properties over the application table
// =============================================================

#[test]
fn anonymous_session_proceeds_on_every_guest_route() {
    let table = RouteTable::application().unwrap();
    for route in table.routes().iter().filter(|r| !r.requires_auth()) {
        assert_eq!(decide(&Session::default(), route), Navigation::Proceed, "route {}", route.name());
    }
}

#[test]
fn signed_in_session_is_sent_home_from_every_guest_route() {
    let table = RouteTable::application().unwrap();
    for role in Role::ALL {
        for route in table.routes().iter().filter(|r| !r.requires_auth()) {
            assert_eq!(
                decide(&signed_in(role), route),
                Navigation::Redirect(home_route(role)),
                "route {} role {role}",
                route.name()
            );
        }
    }
}

#[test]
fn anonymous_session_is_sent_to_login_from_every_protected_route() {
    let table = RouteTable::application().unwrap();
    for route in table.routes().iter().filter(|r| r.requires_auth()) {
        assert_eq!(decide(&Session::default(), route), Navigation::Redirect(LOGIN), "route {}", route.name());
    }
}

#[test]
fn protected_routes_admit_allowed_roles_and_redirect_others_home() {
    let table = RouteTable::application().unwrap();
    for role in Role::ALL {
        for route in table.routes().iter().filter(|r| r.requires_auth()) {
            let expected = if route.permits(role) { Navigation::Proceed } else { Navigation::Redirect(home_route(role)) };
            assert_eq!(decide(&signed_in(role), route), expected, "route {} role {role}", route.name());
        }
    }
}

#[test]
fn every_redirect_target_admits_the_redirected_session() {
    let table = RouteTable::application().unwrap();
    let sessions = [Session::default(), signed_in(Role::Participant), signed_in(Role::Organizer)];
    for session in &sessions {
        for route in table.routes() {
            if let Navigation::Redirect(name) = decide(session, route) {
                let target = table.by_name(name).unwrap();
                assert_eq!(decide(session, target), Navigation::Proceed, "{} -> {name}", route.name());
            }
        }
    }
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn anonymous_user_may_open_login() {
    assert_eq!(decide(&Session::default(), &login()), Navigation::Proceed);
}

#[test]
fn organizer_opening_login_goes_to_organizer_home() {
    assert_eq!(decide(&signed_in(Role::Organizer), &login()), Navigation::Redirect(ORGANIZER_HOME));
}

#[test]
fn anonymous_user_opening_reservations_goes_to_login() {
    assert_eq!(decide(&Session::default(), &reservations()), Navigation::Redirect(LOGIN));
}

#[test]
fn participant_may_open_reservations() {
    assert_eq!(decide(&signed_in(Role::Participant), &reservations()), Navigation::Proceed);
}

#[test]
fn organizer_opening_reservations_goes_to_organizer_home() {
    assert_eq!(decide(&signed_in(Role::Organizer), &reservations()), Navigation::Redirect(ORGANIZER_HOME));
}

#[test]
fn route_shared_by_both_roles_admits_both() {
    let shared = RouteDescriptor::protected("Activities", "/activities", Role::ALL);
    assert_eq!(decide(&signed_in(Role::Participant), &shared), Navigation::Proceed);
    assert_eq!(decide(&signed_in(Role::Organizer), &shared), Navigation::Proceed);
}

// =============================================================
// Store-backed guard
// =============================================================

#[test]
fn guard_reads_the_store_on_each_check() {
    let store = SessionStore::new();
    let guard = Guard::new(store.clone());
    assert_eq!(guard.check(&reservations()), Navigation::Redirect(LOGIN));

    store.set_identity(Identity {
        token: "abc".to_owned(),
        role: Role::Participant,
        username: "pat".to_owned(),
        email: None,
    });
    assert_eq!(guard.check(&reservations()), Navigation::Proceed);
    assert_eq!(guard.check(&login()), Navigation::Redirect(PARTICIPANT_HOME));

    store.clear();
    assert_eq!(guard.check(&login()), Navigation::Proceed);
}
