//! Profile menu display model derived from the stored session.
//!
//! Pure projection: callers re-render after any session mutation. Link
//! visibility follows the authorization matrix so the menu never offers a
//! page the guard would refuse.

#[cfg(test)]
#[path = "profile_menu_test.rs"]
mod profile_menu_test;

use super::credentials::Session;
use super::role::{PageIdentity, Role};

pub const PLACEHOLDER_LABEL: &str = "Utilisateur";

const COMPANY_TYPE_LABELS: &[(&str, &str)] = &[
    ("bus", "Compagnie de bus"),
    ("autocar", "Compagnie d'autocars"),
    ("train", "Compagnie ferroviaire"),
    ("avion", "Compagnie aérienne"),
    ("airline", "Compagnie aérienne"),
    ("bateau", "Compagnie maritime"),
    ("ferry", "Compagnie maritime"),
    ("taxi", "Service de taxi"),
    ("covoiturage", "Covoiturage"),
];

#[must_use]
pub const fn role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Transporter) => "Transporteur",
        Some(Role::Admin) => "Administrateur",
        Some(Role::User) | None => PLACEHOLDER_LABEL,
    }
}

#[must_use]
pub fn company_type_label(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_lowercase();
    COMPANY_TYPE_LABELS.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}

/// Which menu sections to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuVisibility {
    pub user_links: bool,
    pub transporter_links: bool,
    pub admin_links: bool,
    pub logout: bool,
    pub login: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub primary: String,
    pub secondary: String,
    pub initials: String,
    pub menu: MenuVisibility,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn initials(label: &str) -> String {
    label
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Project the session into menu text and visibility.
#[must_use]
pub fn render(session: Option<&Session>) -> DisplayModel {
    let Some(session) = session else {
        return DisplayModel {
            primary: PLACEHOLDER_LABEL.to_owned(),
            secondary: PLACEHOLDER_LABEL.to_owned(),
            initials: initials(PLACEHOLDER_LABEL),
            menu: MenuVisibility { login: true, ..MenuVisibility::default() },
        };
    };

    let user = &session.user;
    let role = user.role();

    let full_name = [non_blank(user.first_name.as_ref()), non_blank(user.last_name.as_ref())]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let primary = if full_name.is_empty() {
        non_blank(user.company_name.as_ref())
            .or_else(|| non_blank(user.email.as_ref()))
            .unwrap_or(PLACEHOLDER_LABEL)
            .to_owned()
    } else {
        full_name
    };

    let secondary = match role {
        Some(Role::Transporter) => non_blank(user.company_type.as_ref())
            .and_then(company_type_label)
            .unwrap_or_else(|| role_label(role)),
        _ => role_label(role),
    };

    let can_view = |page: PageIdentity| role.is_some_and(|r| page.permits(r));
    let menu = MenuVisibility {
        user_links: can_view(PageIdentity::UserPage),
        transporter_links: can_view(PageIdentity::TransporterPage),
        admin_links: can_view(PageIdentity::AdminPage),
        logout: true,
        login: false,
    };

    DisplayModel { initials: initials(&primary), primary, secondary: secondary.to_owned(), menu }
}
