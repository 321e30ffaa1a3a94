use super::*;

// =============================================================
// Role::parse
// =============================================================

#[test]
fn parse_known_roles() {
    assert_eq!(Role::parse("user"), Some(Role::User));
    assert_eq!(Role::parse("transporter"), Some(Role::Transporter));
    assert_eq!(Role::parse("admin"), Some(Role::Admin));
}

#[test]
fn parse_accepts_french_transporter_spelling() {
    assert_eq!(Role::parse("transporteur"), Some(Role::Transporter));
}

#[test]
fn parse_rejects_unknown_and_case_variants() {
    assert_eq!(Role::parse("guest"), None);
    assert_eq!(Role::parse("Admin"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn as_str_round_trips_through_parse() {
    for role in Role::ALL {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
}

// =============================================================
// PageIdentity::classify
// =============================================================

#[test]
fn classify_dashboard_paths() {
    assert_eq!(PageIdentity::classify("/pages/transporter-dashboard.html"), PageIdentity::TransporterPage);
    assert_eq!(PageIdentity::classify("/pages/admin-dashboard.html"), PageIdentity::AdminPage);
    assert_eq!(PageIdentity::classify("/pages/user-dashboard.html"), PageIdentity::UserPage);
}

#[test]
fn classify_other_paths_as_generic() {
    assert_eq!(PageIdentity::classify("/"), PageIdentity::GenericPage);
    assert_eq!(PageIdentity::classify("/index.html"), PageIdentity::GenericPage);
    assert_eq!(PageIdentity::classify("/pages/login.html"), PageIdentity::GenericPage);
    assert_eq!(PageIdentity::classify("/pages/search-results.html"), PageIdentity::GenericPage);
}

#[test]
fn classify_prefers_transporter_over_admin_and_user() {
    assert_eq!(PageIdentity::classify("/admin-tools/transporter-trips.html"), PageIdentity::TransporterPage);
    assert_eq!(PageIdentity::classify("/user-area/admin-accounts.html"), PageIdentity::AdminPage);
}

// =============================================================
// Authorization matrix
// =============================================================

#[test]
fn matrix_matches_every_role_and_page() {
    use PageIdentity::*;
    let expected = [
        (TransporterPage, Role::User, false),
        (TransporterPage, Role::Transporter, true),
        (TransporterPage, Role::Admin, true),
        (AdminPage, Role::User, false),
        (AdminPage, Role::Transporter, false),
        (AdminPage, Role::Admin, true),
        (UserPage, Role::User, true),
        (UserPage, Role::Transporter, false),
        (UserPage, Role::Admin, true),
        (GenericPage, Role::User, true),
        (GenericPage, Role::Transporter, true),
        (GenericPage, Role::Admin, true),
    ];
    assert_eq!(expected.len(), PageIdentity::ALL.len() * Role::ALL.len());
    for (page, role, allowed) in expected {
        assert_eq!(page.permits(role), allowed, "{page:?} / {role:?}");
    }
}

#[test]
fn unrecognized_role_only_permitted_on_generic_pages() {
    for page in PageIdentity::ALL {
        assert_eq!(page.permits_unrecognized(), page == PageIdentity::GenericPage);
    }
}

#[test]
fn login_role_follows_page_kind() {
    assert_eq!(PageIdentity::TransporterPage.login_role(), Role::Transporter);
    assert_eq!(PageIdentity::AdminPage.login_role(), Role::Admin);
    assert_eq!(PageIdentity::UserPage.login_role(), Role::User);
    assert_eq!(PageIdentity::GenericPage.login_role(), Role::User);
}
