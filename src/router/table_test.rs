use super::*;
use crate::router::route::{ORGANIZER_HOME, PARTICIPANT_HOME};

fn base_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::guest(LOGIN, "/login"),
        RouteDescriptor::protected(PARTICIPANT_HOME, "/participant/home", [Role::Participant]),
        RouteDescriptor::protected(ORGANIZER_HOME, "/organizer/home", [Role::Organizer]),
    ]
}

fn with(extra: RouteDescriptor) -> Vec<RouteDescriptor> {
    let mut routes = base_routes();
    routes.push(extra);
    routes
}

// =============================================================
// normalize_path
// =============================================================

#[test]
fn normalize_path_strips_query_fragment_and_trailing_slash() {
    assert_eq!(normalize_path("/login/"), "/login");
    assert_eq!(normalize_path("/login?next=/x"), "/login");
    assert_eq!(normalize_path("/organizer/home#top"), "/organizer/home");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/?q=1"), "/");
}

// =============================================================
// Registration
// =============================================================

#[test]
fn application_table_is_valid() {
    let table = RouteTable::application().unwrap();
    assert_eq!(table.routes().len(), 7);
    assert!(table.by_name("CreateActivity").unwrap().permits(Role::Organizer));
}

#[test]
fn rejects_duplicate_names() {
    let err = RouteTable::new(with(RouteDescriptor::guest(LOGIN, "/signin"))).unwrap_err();
    assert_eq!(err, RouteError::DuplicateName(LOGIN.to_owned()));
}

#[test]
fn rejects_duplicate_paths_after_normalizing() {
    let err = RouteTable::new(with(RouteDescriptor::guest("SignIn", "/login/"))).unwrap_err();
    assert_eq!(err, RouteError::DuplicatePath("/login".to_owned()));
}

#[test]
fn rejects_second_catch_all() {
    let mut routes = with(RouteDescriptor::catch_all("NotFound"));
    routes.push(RouteDescriptor::catch_all("Missing"));
    assert_eq!(RouteTable::new(routes).unwrap_err(), RouteError::MultipleCatchAll);
}

#[test]
fn rejects_relative_paths() {
    let err = RouteTable::new(with(RouteDescriptor::guest("About", "about"))).unwrap_err();
    assert_eq!(err, RouteError::InvalidPath("about".to_owned()));
}

#[test]
fn rejects_auth_route_without_roles() {
    let route = RouteDescriptor::protected("Admin", "/admin", []);
    let err = RouteTable::new(with(route)).unwrap_err();
    assert!(matches!(err, RouteError::Misconfigured { ref name, .. } if name == "Admin"));
}

#[test]
fn rejects_guest_route_with_roles() {
    let route = RouteDescriptor::new("Odd", RoutePattern::Exact("/odd".to_owned()), false, [Role::Organizer]);
    let err = RouteTable::new(with(route)).unwrap_err();
    assert!(matches!(err, RouteError::Misconfigured { ref name, .. } if name == "Odd"));
}

#[test]
fn rejects_missing_login() {
    let routes = base_routes().into_iter().filter(|r| r.name() != LOGIN).collect();
    assert_eq!(RouteTable::new(routes).unwrap_err(), RouteError::MissingRoute(LOGIN.to_owned()));
}

#[test]
fn rejects_protected_login() {
    let mut routes = base_routes();
    routes[0] = RouteDescriptor::protected(LOGIN, "/login", Role::ALL);
    assert!(matches!(RouteTable::new(routes).unwrap_err(), RouteError::Misconfigured { .. }));
}

#[test]
fn rejects_missing_home_route() {
    let routes = base_routes().into_iter().filter(|r| r.name() != ORGANIZER_HOME).collect();
    assert_eq!(RouteTable::new(routes).unwrap_err(), RouteError::MissingRoute(ORGANIZER_HOME.to_owned()));
}

#[test]
fn rejects_home_route_that_excludes_its_role() {
    let mut routes = base_routes();
    routes[1] = RouteDescriptor::protected(PARTICIPANT_HOME, "/participant/home", [Role::Organizer]);
    let err = RouteTable::new(routes).unwrap_err();
    assert!(matches!(err, RouteError::Misconfigured { ref name, .. } if name == PARTICIPANT_HOME));
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn resolves_exact_paths() {
    let table = RouteTable::application().unwrap();
    assert_eq!(table.resolve("/").unwrap().name(), "Home");
    assert_eq!(table.resolve("/organizer/create-activity/").unwrap().name(), "CreateActivity");
    assert_eq!(table.resolve("/register?ref=mail").unwrap().name(), "Register");
}

#[test]
fn unknown_paths_fall_back_to_catch_all() {
    let table = RouteTable::application().unwrap();
    let route = table.resolve("/no/such/page").unwrap();
    assert_eq!(route.name(), "NotFound");
    assert!(!route.requires_auth());
}

#[test]
fn unknown_path_without_catch_all_is_not_found() {
    let table = RouteTable::new(base_routes()).unwrap();
    assert_eq!(table.resolve("/nowhere/").unwrap_err(), RouteError::NotFound("/nowhere".to_owned()));
}
