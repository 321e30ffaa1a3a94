use super::*;
use crate::session::credentials::UserData;
use crate::session::testing::{Nav, RecordingNavigator, session_for};

const ORIGIN: &str = "https://billettigue.fr";

fn at(path: &str) -> Location {
    Location::parse(&format!("{ORIGIN}{path}"))
}

// =============================================================
// Location
// =============================================================

#[test]
fn parse_splits_absolute_href() {
    let loc = Location::parse("https://billettigue.fr:8443/pages/login.html?role=user#top");
    assert_eq!(loc.origin, "https://billettigue.fr:8443");
    assert_eq!(loc.pathname, "/pages/login.html");
    assert_eq!(loc.search, "?role=user");
    assert_eq!(loc.hash, "#top");
}

#[test]
fn parse_bare_origin_has_root_path() {
    let loc = Location::parse("https://billettigue.fr");
    assert_eq!(loc.pathname, "/");
    assert!(loc.search.is_empty());
}

#[test]
fn parse_relative_href_has_no_origin() {
    let loc = Location::parse("/pages/user-dashboard.html?x=1");
    assert!(loc.origin.is_empty());
    assert_eq!(loc.pathname, "/pages/user-dashboard.html");
    assert_eq!(loc.search, "?x=1");
}

#[test]
fn query_param_decodes_value_and_plus() {
    let loc = at("/pages/login.html?role=transporter&returnUrl=%2Fpages%2Fa.html%3Fq%3D1&name=Jean+Luc");
    assert_eq!(loc.query_param("role").as_deref(), Some("transporter"));
    assert_eq!(loc.query_param("returnUrl").as_deref(), Some("/pages/a.html?q=1"));
    assert_eq!(loc.query_param("name").as_deref(), Some("Jean Luc"));
    assert_eq!(loc.query_param("missing"), None);
}

#[test]
fn query_param_ignores_hash() {
    let loc = at("/pages/login.html?role=admin#returnUrl=x");
    assert_eq!(loc.query_param("returnUrl"), None);
}

#[test]
fn login_page_detection_uses_file_name() {
    assert!(at("/pages/login.html").is_login_page());
    assert!(!at("/pages/user-dashboard.html").is_login_page());
    assert!(!at("/login-help/faq.html").is_login_page());
}

// =============================================================
// URL builders
// =============================================================

#[test]
fn login_url_from_pages_dir_is_sibling_with_return_url() {
    let loc = at("/pages/user-dashboard.html");
    assert_eq!(
        login_url(&loc, Role::User),
        "login.html?role=user&returnUrl=https%3A%2F%2Fbillettigue.fr%2Fpages%2Fuser-dashboard.html"
    );
}

#[test]
fn login_url_from_root_descends_into_pages() {
    let loc = at("/index.html");
    assert!(login_url(&loc, Role::Transporter).starts_with("pages/login.html?role=transporter&returnUrl="));
}

#[test]
fn login_url_on_login_page_omits_return_url() {
    let loc = at("/pages/login.html?role=admin");
    assert_eq!(login_url(&loc, Role::Admin), "login.html?role=admin");
}

#[test]
fn login_url_is_idempotent() {
    let loc = at("/pages/admin-dashboard.html?tab=accounts");
    assert_eq!(login_url(&loc, Role::Admin), login_url(&loc, Role::Admin));
}

#[test]
fn dashboard_url_maps_each_role() {
    let loc = at("/pages/login.html");
    assert_eq!(dashboard_url(&loc, "user"), "./user-dashboard.html");
    assert_eq!(dashboard_url(&loc, "transporteur"), "./transporter-dashboard.html");
    assert_eq!(dashboard_url(&loc, "admin"), "./admin-dashboard.html");
}

#[test]
fn dashboard_url_unknown_role_falls_back_to_user() {
    assert_eq!(dashboard_url(&at("/pages/login.html"), "pilot"), "./user-dashboard.html");
}

#[test]
fn dashboard_url_outside_pages_dir() {
    assert_eq!(dashboard_url_for(&at("/"), Role::Admin), "./pages/admin-dashboard.html");
}

#[test]
fn home_url_strips_pages_suffix() {
    assert_eq!(home_url(&at("/pages/user-dashboard.html")), "/");
    assert_eq!(home_url(&at("/billettigue/pages/login.html")), "/billettigue/");
    assert_eq!(home_url(&at("/index.html")), "/");
}

// =============================================================
// return_target
// =============================================================

#[test]
fn return_target_accepts_relative_and_same_origin() {
    let loc = at("/pages/login.html?returnUrl=%2Fpages%2Ftrips.html%3Fat%3D10%3A30");
    assert_eq!(return_target(&loc).as_deref(), Some("/pages/trips.html?at=10:30"));

    let loc = at("/pages/login.html?returnUrl=https%3A%2F%2Fbillettigue.fr%2Fpages%2Fx.html");
    assert_eq!(return_target(&loc).as_deref(), Some("https://billettigue.fr/pages/x.html"));
}

#[test]
fn return_target_rejects_foreign_origins_and_schemes() {
    for raw in [
        "https%3A%2F%2Fevil.example%2F",
        "https%3A%2F%2Fbillettigue.fr.evil.example%2F",
        "%2F%2Fevil.example%2F",
        "javascript%3Aalert(1)",
        "%2F%5Cevil.example%2Fphish",
        "%2F%09%2Fevil.example",
        "%2F%0A%2Fevil.example",
        "%5C%5Cevil.example",
        "https%3A%2F%2Fbillettigue.fr%40evil.example%2F",
        "http%3A%2F%2Fbillettigue.fr%2F",
    ] {
        let loc = at(&format!("/pages/login.html?returnUrl={raw}"));
        assert_eq!(return_target(&loc), None, "{raw}");
    }
}

// =============================================================
// RedirectRouter
// =============================================================

#[test]
fn to_login_assigns_and_returns_url() {
    let nav = RecordingNavigator::at("https://billettigue.fr/pages/transporter-dashboard.html");
    let url = RedirectRouter::new(&nav).to_login(Role::Transporter).unwrap();
    assert_eq!(nav.visits(), vec![Nav::Assign(url)]);
}

#[test]
fn consume_return_url_requires_login_page() {
    let nav = RecordingNavigator::at("https://billettigue.fr/pages/user-dashboard.html?returnUrl=%2Fa");
    let session = session_for("user");
    assert_eq!(RedirectRouter::new(&nav).consume_return_url(Some(&session)).unwrap(), None);
    assert!(nav.visits().is_empty());
}

#[test]
fn consume_return_url_requires_session() {
    let nav = RecordingNavigator::at("https://billettigue.fr/pages/login.html?returnUrl=%2Fa");
    assert_eq!(RedirectRouter::new(&nav).consume_return_url(None).unwrap(), None);
    assert!(nav.visits().is_empty());
}

#[test]
fn login_round_trip_restores_original_url_exactly() {
    let original = "https://billettigue.fr/pages/user-dashboard.html?trip=42&seats=2&from=Lyon%20Part-Dieu#pay";
    let protected = RecordingNavigator::at(original);
    let login = RedirectRouter::new(&protected).to_login(Role::User).unwrap();

    let login_page = RecordingNavigator::at(&format!("https://billettigue.fr/pages/{login}"));
    let session = session_for("user");
    let restored = RedirectRouter::new(&login_page).consume_return_url(Some(&session)).unwrap();

    assert_eq!(restored.as_deref(), Some(original));
    assert_eq!(login_page.last(), Some(Nav::Assign(original.to_owned())));
}

#[test]
fn land_after_login_without_return_url_goes_to_dashboard() {
    let nav = RecordingNavigator::at("https://billettigue.fr/pages/login.html?role=transporter");
    let session = Session::new("t1", UserData::with_role("transporter"));
    let url = RedirectRouter::new(&nav).land_after_login(&session).unwrap();
    assert_eq!(url, "./transporter-dashboard.html");
}

#[test]
fn navigation_failure_propagates() {
    let nav = RecordingNavigator::failing("https://billettigue.fr/pages/login.html", 1);
    assert!(RedirectRouter::new(&nav).to_home().is_err());
}
