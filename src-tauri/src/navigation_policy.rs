//! Decides what happens to every navigation the portal page attempts.
//!
//! The rules are hard-coded to the portal's URL topology: identity-provider
//! round trips stay in the window, the marketing site bounces back to the
//! portal home and everything else escapes to the system browser.

use url::Url;

const IDENTITY_PROVIDER_PREFIX: &str = "https://account.post.ch/idp/";
const LOGOUT_PREFIX: &str = "https://account.post.ch/logout/";
const POST_AUTH_REDIRECT_PREFIX: &str = "https://account.post.ch/redirect/";
const ADVANCED_SEARCH_PREFIX: &str = "https://service.post.ch/epostoffice/#/AdvancedSearchForm";
const SELF_ADMIN_PREFIX: &str = "https://account.post.ch/selfadmin/";
const MARKETING_HOST: &str = "www.post.ch";

pub(crate) const IN_APP_PREFIXES: [&str; 4] = [
    IDENTITY_PROVIDER_PREFIX,
    LOGOUT_PREFIX,
    POST_AUTH_REDIRECT_PREFIX,
    ADVANCED_SEARCH_PREFIX,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NavigationRequest<'a> {
    pub(crate) url: &'a str,
    pub(crate) is_new_window: bool,
}

impl<'a> NavigationRequest<'a> {
    pub(crate) fn in_place(url: &'a str) -> Self {
        Self {
            url,
            is_new_window: false,
        }
    }

    pub(crate) fn new_window(url: &'a str) -> Self {
        Self {
            url,
            is_new_window: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Disposition {
    Allow,
    RedirectHome,
    OpenExternal(String),
    OpenExternalStripped(String),
}

impl Disposition {
    pub(crate) fn allows_navigation(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub(crate) fn external_url(&self) -> Option<&str> {
        match self {
            Self::OpenExternal(url) | Self::OpenExternalStripped(url) => Some(url),
            Self::Allow | Self::RedirectHome => None,
        }
    }
}

type Rule = fn(&NavigationRequest<'_>) -> Option<Disposition>;

// First match wins; `evaluate` falls back to opening the untouched URL externally.
const RULES: [Rule; 4] = [
    new_window_rule,
    in_app_rule,
    marketing_site_rule,
    self_admin_rule,
];

pub(crate) fn evaluate(request: &NavigationRequest<'_>) -> Disposition {
    RULES
        .iter()
        .find_map(|rule| rule(request))
        .unwrap_or_else(|| Disposition::OpenExternal(request.url.to_string()))
}

fn new_window_rule(request: &NavigationRequest<'_>) -> Option<Disposition> {
    request
        .is_new_window
        .then(|| Disposition::OpenExternal(request.url.to_string()))
}

fn in_app_rule(request: &NavigationRequest<'_>) -> Option<Disposition> {
    IN_APP_PREFIXES
        .iter()
        .any(|prefix| request.url.starts_with(prefix))
        .then_some(Disposition::Allow)
}

fn marketing_site_rule(request: &NavigationRequest<'_>) -> Option<Disposition> {
    (hostname(request.url).as_deref() == Some(MARKETING_HOST)).then_some(Disposition::RedirectHome)
}

fn self_admin_rule(request: &NavigationRequest<'_>) -> Option<Disposition> {
    request
        .url
        .starts_with(SELF_ADMIN_PREFIX)
        .then(|| Disposition::OpenExternalStripped(strip_query_and_fragment(request.url)))
}

fn hostname(raw_url: &str) -> Option<String> {
    Url::parse(raw_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

// The self-admin prefix pins scheme and host, so cutting at the first `?` or `#`
// leaves exactly `scheme://host/path` with the path untouched.
fn strip_query_and_fragment(raw_url: &str) -> String {
    raw_url
        .split(['?', '#'])
        .next()
        .unwrap_or(raw_url)
        .to_string()
}
