//! Predicates evaluated before a navigation is allowed to complete.

use shared::domain::CurrentUser;

use super::{location::Location, Route, LOGIN_PATH, ROOT_PATH};

pub const REDIRECT_QUERY_KEY: &str = "redirect";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

pub trait NavigationGuard: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, to: &Route, user: &CurrentUser) -> GuardDecision;
}

fn login_redirect(to: &Route) -> GuardDecision {
    GuardDecision::Redirect(
        Location::with_query(LOGIN_PATH, REDIRECT_QUERY_KEY, &to.full_path).full_path(),
    )
}

fn requested_redirect(to: &Route) -> Option<&str> {
    to.query_value(REDIRECT_QUERY_KEY)
        .map(str::trim)
        .filter(|redirect| !redirect.is_empty())
}

/// Sends anonymous users to the login page, remembering where they were going.
pub struct RequiresAuthenticated;

impl NavigationGuard for RequiresAuthenticated {
    fn name(&self) -> &'static str {
        "requires_authenticated"
    }

    fn check(&self, to: &Route, user: &CurrentUser) -> GuardDecision {
        if user.is_authenticated {
            GuardDecision::Proceed
        } else {
            login_redirect(to)
        }
    }
}

pub struct RequiresAdmin {
    pub denied_path: String,
}

impl NavigationGuard for RequiresAdmin {
    fn name(&self) -> &'static str {
        "requires_admin"
    }

    fn check(&self, to: &Route, user: &CurrentUser) -> GuardDecision {
        if !user.is_authenticated {
            login_redirect(to)
        } else if !user.is_admin {
            GuardDecision::Redirect(self.denied_path.clone())
        } else {
            GuardDecision::Proceed
        }
    }
}

/// Keeps signed-in users off the login page.
pub struct RedirectIfAuthenticated;

impl NavigationGuard for RedirectIfAuthenticated {
    fn name(&self) -> &'static str {
        "redirect_if_authenticated"
    }

    fn check(&self, to: &Route, user: &CurrentUser) -> GuardDecision {
        if !user.is_authenticated {
            return GuardDecision::Proceed;
        }
        // A pending post-login redirect outranks the root fallback.
        let target = requested_redirect(to).unwrap_or(ROOT_PATH);
        GuardDecision::Redirect(target.to_string())
    }
}

/// Global pre-hook: once signed in, a `redirect` query replaces the
/// requested location.
pub struct PostLoginRedirect;

impl NavigationGuard for PostLoginRedirect {
    fn name(&self) -> &'static str {
        "post_login_redirect"
    }

    fn check(&self, to: &Route, user: &CurrentUser) -> GuardDecision {
        match requested_redirect(to) {
            Some(redirect) if user.is_authenticated => {
                GuardDecision::Redirect(redirect.to_string())
            }
            _ => GuardDecision::Proceed,
        }
    }
}
