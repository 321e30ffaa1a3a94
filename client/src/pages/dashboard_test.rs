use super::*;
use crate::session::PageIdentity;

#[test]
fn every_role_has_a_dashboard_title_and_sections() {
    for role in Role::ALL {
        assert!(!dashboard_title(role).is_empty());
        assert_eq!(dashboard_sections(role).len(), 3);
    }
}

#[test]
fn each_dashboard_page_admits_its_own_role() {
    for role in Role::ALL {
        let page = PageIdentity::classify(&format!("/pages/{}", role.dashboard_page()));
        assert!(page.permits(role), "{role:?} refused on its own dashboard");
    }
}
