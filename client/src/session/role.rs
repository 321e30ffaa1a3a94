//! Roles, page identities and the static authorization matrix.
//!
//! DESIGN
//! ======
//! Stored role strings are parsed into a closed `Role` enum at the edge; the
//! matrix below is an exhaustive match so adding a role or page kind is a
//! compile error until every combination is decided.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;

/// Account role carried in `userData.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Transporter,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::User, Self::Transporter, Self::Admin];

    /// Parse a stored role string. Accepts the French `transporteur` spelling
    /// used by older accounts. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "user" => Some(Self::User),
            "transporter" | "transporteur" => Some(Self::Transporter),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Canonical query-parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Transporter => "transporter",
            Self::Admin => "admin",
        }
    }

    /// Dashboard page file name for this role.
    #[must_use]
    pub const fn dashboard_page(self) -> &'static str {
        match self {
            Self::User => "user-dashboard.html",
            Self::Transporter => "transporter-dashboard.html",
            Self::Admin => "admin-dashboard.html",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access-control category of a page, derived from its URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageIdentity {
    TransporterPage,
    AdminPage,
    UserPage,
    GenericPage,
}

impl PageIdentity {
    pub const ALL: [Self; 4] = [Self::TransporterPage, Self::AdminPage, Self::UserPage, Self::GenericPage];

    /// Classify a URL path by substring. `transporter-` wins over `admin-`,
    /// which wins over `user-`.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path.contains("transporter-") {
            Self::TransporterPage
        } else if path.contains("admin-") {
            Self::AdminPage
        } else if path.contains("user-") {
            Self::UserPage
        } else {
            Self::GenericPage
        }
    }

    /// Whether `role` may view this page.
    #[must_use]
    pub const fn permits(self, role: Role) -> bool {
        match (self, role) {
            (Self::GenericPage, _)
            | (Self::TransporterPage, Role::Transporter | Role::Admin)
            | (Self::AdminPage, Role::Admin)
            | (Self::UserPage, Role::User | Role::Admin) => true,
            (Self::TransporterPage, Role::User)
            | (Self::AdminPage, Role::User | Role::Transporter)
            | (Self::UserPage, Role::Transporter) => false,
        }
    }

    /// Whether a session whose role string did not parse may view this page.
    #[must_use]
    pub const fn permits_unrecognized(self) -> bool {
        matches!(self, Self::GenericPage)
    }

    /// Role to announce on the login page when redirecting away from here.
    #[must_use]
    pub const fn login_role(self) -> Role {
        match self {
            Self::TransporterPage => Role::Transporter,
            Self::AdminPage => Role::Admin,
            Self::UserPage | Self::GenericPage => Role::User,
        }
    }
}
