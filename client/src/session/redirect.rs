//! Redirect targets for login, dashboards and the landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages live under `/pages/` (`login.html`, `user-dashboard.html`, ...) and the
//! landing page sits at the site root. Every URL built here is relative to the
//! current location so the same build works behind any path prefix.
//!
//! The login URL carries `role=` and `returnUrl=`. The return URL is read from
//! the login page's own query string, so it is naturally consumed once: the
//! next navigation drops it.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::borrow::Cow;

use url::Url;

use super::credentials::Session;
use super::role::Role;

pub const ROLE_PARAM: &str = "role";
pub const RETURN_URL_PARAM: &str = "returnUrl";

const PAGES_SEGMENT: &str = "/pages/";
const LOGIN_PAGE: &str = "login.html";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation failed: {0}")]
pub struct NavigationError(pub String);

// =============================================================================
// LOCATION
// =============================================================================

/// Snapshot of `window.location`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub href: String,
    /// `scheme://host[:port]`, empty for relative hrefs.
    pub origin: String,
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    pub hash: String,
}

impl Location {
    /// Split an href into its parts. Relative hrefs get an empty origin.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let (origin, rest) = match href.find("://") {
            Some(scheme_end) => {
                let authority = &href[scheme_end + 3..];
                let end = authority.find(['/', '?', '#']).map_or(href.len(), |i| scheme_end + 3 + i);
                (&href[..end], &href[end..])
            }
            None => ("", href),
        };
        let (before_hash, hash) = rest.find('#').map_or((rest, ""), |i| rest.split_at(i));
        let (path, search) = before_hash.find('?').map_or((before_hash, ""), |i| before_hash.split_at(i));

        Self {
            href: href.to_owned(),
            origin: origin.to_owned(),
            pathname: if path.is_empty() { "/".to_owned() } else { path.to_owned() },
            search: search.to_owned(),
            hash: hash.to_owned(),
        }
    }

    /// First value of query parameter `name`, percent-decoded.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.search.trim_start_matches('?').split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == name).then(|| decode_component(value).into_owned())
        })
    }

    #[must_use]
    pub fn in_pages_dir(&self) -> bool {
        self.pathname.contains(PAGES_SEGMENT)
    }

    #[must_use]
    pub fn is_login_page(&self) -> bool {
        self.pathname.rsplit('/').next().is_some_and(|file| file.starts_with("login"))
    }
}

/// Decode like `URLSearchParams`: `+` is a space, invalid escapes stay as-is.
fn decode_component(raw: &str) -> Cow<'_, str> {
    let spaced: Cow<'_, str> = if raw.contains('+') { Cow::Owned(raw.replace('+', " ")) } else { Cow::Borrowed(raw) };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => spaced,
    }
}

/// Browser navigation seam.
pub trait Navigator {
    fn location(&self) -> Location;

    /// Navigate, pushing a history entry.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    fn assign(&self, url: &str) -> Result<(), NavigationError>;

    /// Navigate, replacing the current history entry.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    fn replace(&self, url: &str) -> Result<(), NavigationError>;
}

/// `window.location` of the running page.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "hydrate")]
impl BrowserNavigator {
    fn window_location() -> Result<web_sys::Location, NavigationError> {
        web_sys::window()
            .map(|w| w.location())
            .ok_or_else(|| NavigationError("no window".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
fn js_error(value: &wasm_bindgen::JsValue) -> NavigationError {
    NavigationError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[cfg(feature = "hydrate")]
impl Navigator for BrowserNavigator {
    fn location(&self) -> Location {
        Self::window_location()
            .ok()
            .and_then(|loc| loc.href().ok())
            .map(|href| Location::parse(&href))
            .unwrap_or_default()
    }

    fn assign(&self, url: &str) -> Result<(), NavigationError> {
        Self::window_location()?.assign(url).map_err(|e| js_error(&e))
    }

    fn replace(&self, url: &str) -> Result<(), NavigationError> {
        Self::window_location()?.replace(url).map_err(|e| js_error(&e))
    }
}

// =============================================================================
// URL BUILDERS
// =============================================================================

fn pages_prefix(location: &Location) -> &'static str {
    if location.in_pages_dir() { "" } else { "pages/" }
}

/// Login URL announcing `role`, with the current URL as `returnUrl` unless we
/// are already on the login page.
#[must_use]
pub fn login_url(location: &Location, role: Role) -> String {
    let mut url = format!("{}{LOGIN_PAGE}?{ROLE_PARAM}={}", pages_prefix(location), role.as_str());
    if !location.href.is_empty() && !location.is_login_page() {
        url.push('&');
        url.push_str(RETURN_URL_PARAM);
        url.push('=');
        url.push_str(&urlencoding::encode(&location.href));
    }
    url
}

#[must_use]
pub fn dashboard_url_for(location: &Location, role: Role) -> String {
    format!("./{}{}", pages_prefix(location), role.dashboard_page())
}

/// Dashboard URL for a stored role string. Unrecognized roles land on the
/// user dashboard.
#[must_use]
pub fn dashboard_url(location: &Location, raw_role: &str) -> String {
    let role = Role::parse(raw_role).unwrap_or_else(|| {
        log::warn!("unrecognized role '{raw_role}', using the user dashboard");
        Role::User
    });
    dashboard_url_for(location, role)
}

/// Site root, with any `/pages/...` suffix stripped from the path.
#[must_use]
pub fn home_url(location: &Location) -> String {
    match location.pathname.find(PAGES_SEGMENT) {
        Some(idx) => format!("{}/", &location.pathname[..idx]),
        None => "/".to_owned(),
    }
}

/// Whether `target`, resolved against the current page the way a browser
/// would (backslashes as slashes, tabs and newlines stripped), stays on the
/// current http(s) origin.
fn is_same_origin(location: &Location, target: &str) -> bool {
    let Ok(base) = Url::parse(&location.href) else {
        return false;
    };
    match base.join(target) {
        Ok(resolved) => matches!(resolved.scheme(), "http" | "https") && resolved.origin() == base.origin(),
        Err(_) => false,
    }
}

/// The decoded `returnUrl` of `location`, if present and same-origin.
#[must_use]
pub fn return_target(location: &Location) -> Option<String> {
    let target = location.query_param(RETURN_URL_PARAM).filter(|t| !t.is_empty())?;
    if is_same_origin(location, &target) {
        Some(target)
    } else {
        log::warn!("ignoring cross-origin {RETURN_URL_PARAM}: {target}");
        None
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Performs the navigations; every method returns the URL it went to.
#[derive(Debug, Clone, Copy)]
pub struct RedirectRouter<'n, N> {
    navigator: &'n N,
}

impl<'n, N: Navigator> RedirectRouter<'n, N> {
    #[must_use]
    pub fn new(navigator: &'n N) -> Self {
        Self { navigator }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.navigator.location()
    }

    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    pub fn to_login(&self, role: Role) -> Result<String, NavigationError> {
        let url = login_url(&self.location(), role);
        self.navigator.assign(&url)?;
        Ok(url)
    }

    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    pub fn to_dashboard(&self, raw_role: &str) -> Result<String, NavigationError> {
        let url = dashboard_url(&self.location(), raw_role);
        self.navigator.assign(&url)?;
        Ok(url)
    }

    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    pub fn to_home(&self) -> Result<String, NavigationError> {
        let url = home_url(&self.location());
        self.navigator.assign(&url)?;
        Ok(url)
    }

    /// On the login page, follow `returnUrl` once a valid session exists.
    ///
    /// Returns `Ok(None)` when there is nothing to consume: not the login
    /// page, no session, no parameter, or a cross-origin target.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    pub fn consume_return_url(&self, session: Option<&Session>) -> Result<Option<String>, NavigationError> {
        let location = self.location();
        if !location.is_login_page() || session.is_none() {
            return Ok(None);
        }
        let Some(target) = return_target(&location) else {
            return Ok(None);
        };
        self.navigator.assign(&target)?;
        Ok(Some(target))
    }

    /// Where a freshly authenticated visitor goes: the pending return URL,
    /// otherwise the dashboard of their role.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the browser refuses the navigation.
    pub fn land_after_login(&self, session: &Session) -> Result<String, NavigationError> {
        match self.consume_return_url(Some(session))? {
            Some(target) => Ok(target),
            None => self.to_dashboard(&session.user.role),
        }
    }
}
