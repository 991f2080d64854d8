//! Route table and the guard chain every navigation runs through.
//!
//! Per transition: record-level redirects, then the destination's own
//! guards, then the global pre-hooks, then commit and the title post-hook.
//! Any redirect abandons the transition and starts a fresh one for the new
//! target, so later stages of the abandoned transition never run.

use std::{collections::BTreeMap, sync::Arc};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    context::{document_title, AppContext},
    page::PageHost,
    settings::Settings,
};

pub mod guards;
pub mod location;

use guards::{
    GuardDecision, NavigationGuard, PostLoginRedirect, RedirectIfAuthenticated, RequiresAdmin,
    RequiresAuthenticated,
};
use location::{match_pattern, Location};

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const NOT_FOUND_PATH: &str = "/404";
pub const FALLBACK_ROUTE_TITLE: &str = "Welcome";
const MAX_REDIRECTS: usize = 16;

/// A resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub full_path: String,
    pub name: Option<String>,
    pub title: Option<String>,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl Route {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Declared title, else the capitalized route name, else "Welcome".
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.name
                    .as_deref()
                    .map(capitalize)
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_else(|| FALLBACK_ROUTE_TITLE.to_string())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first
        .to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

#[derive(Clone)]
pub struct RouteRecord {
    pattern: String,
    name: Option<String>,
    title: Option<String>,
    redirect: Option<String>,
    guards: Vec<Arc<dyn NavigationGuard>>,
}

impl RouteRecord {
    pub fn view(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            title: None,
            redirect: None,
            guards: Vec::new(),
        }
    }

    pub fn redirect(pattern: impl Into<String>, to: impl Into<String>) -> Self {
        let mut record = Self::view(pattern);
        record.redirect = Some(to.into());
        record
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn guarded(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
        self.guards.push(guard);
        self
    }
}

/// The course evaluations route surface.
pub fn course_evaluation_routes(admin_denied_path: &str) -> Vec<RouteRecord> {
    let authenticated: Arc<dyn NavigationGuard> = Arc::new(RequiresAuthenticated);
    let admin: Arc<dyn NavigationGuard> = Arc::new(RequiresAdmin {
        denied_path: admin_denied_path.to_string(),
    });

    vec![
        RouteRecord::redirect(ROOT_PATH, "/home"),
        RouteRecord::view(LOGIN_PATH)
            .titled("Welcome")
            .guarded(Arc::new(RedirectIfAuthenticated)),
        RouteRecord::view("/department/:departmentId")
            .titled("Department")
            .guarded(authenticated.clone()),
        RouteRecord::view("/departments")
            .titled("Group Management")
            .guarded(authenticated.clone()),
        RouteRecord::view("/home")
            .named("home")
            .guarded(authenticated.clone()),
        RouteRecord::view("/lists")
            .titled("List Management")
            .guarded(authenticated.clone()),
        RouteRecord::view("/status")
            .titled("Status Board")
            .guarded(authenticated)
            .guarded(admin),
        RouteRecord::view(NOT_FOUND_PATH).titled("Page not found"),
        RouteRecord::view("/error").titled("Error"),
        RouteRecord::view("/errors").titled("Course Errors Board"),
        RouteRecord::redirect("*", NOT_FOUND_PATH),
    ]
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NoMatch(String),
    #[error("navigation to '{location}' exceeded {hops} redirects")]
    RedirectLoop { location: String, hops: usize },
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// Every location abandoned on the way, in order.
    pub redirected_from: Vec<String>,
}

pub struct Router {
    routes: Vec<RouteRecord>,
    before_each: Vec<Arc<dyn NavigationGuard>>,
}

impl Router {
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self {
            routes,
            before_each: Vec::new(),
        }
    }

    pub fn course_evaluations(settings: &Settings) -> Self {
        Self::new(course_evaluation_routes(&settings.admin_denied_path))
            .before_each(Arc::new(PostLoginRedirect))
    }

    pub fn before_each(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
        self.before_each.push(guard);
        self
    }

    /// First record whose pattern matches wins.
    pub fn resolve(&self, raw: &str) -> Option<(&RouteRecord, Route)> {
        let location = Location::parse(raw);
        self.routes.iter().find_map(|record| {
            let params = match_pattern(&record.pattern, &location.path)?;
            let route = Route {
                full_path: location.full_path(),
                path: location.path.clone(),
                name: record.name.clone(),
                title: record.title.clone(),
                params,
                query: location.query.clone(),
            };
            Some((record, route))
        })
    }

    pub fn navigate<P: PageHost>(
        &self,
        ctx: &mut AppContext<P>,
        location: &str,
    ) -> Result<Navigation, NavigationError> {
        let mut target = location.to_string();
        let mut redirected_from = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let (record, route) = self
                .resolve(&target)
                .ok_or_else(|| NavigationError::NoMatch(target.clone()))?;

            let next = match &record.redirect {
                Some(to) => Some(to.clone()),
                None => run_guards(&record.guards, &route, ctx)
                    .or_else(|| run_guards(&self.before_each, &route, ctx)),
            };

            if let Some(next) = next {
                debug!(from = %route.full_path, to = %next, "navigation redirected");
                redirected_from.push(route.full_path);
                target = next;
                continue;
            }

            ctx.set_document_title(document_title(&route.display_title()));
            info!(path = %route.full_path, redirects = redirected_from.len(), "navigated");
            ctx.set_current_route(route.clone());
            return Ok(Navigation {
                route,
                redirected_from,
            });
        }

        Err(NavigationError::RedirectLoop {
            location: location.to_string(),
            hops: MAX_REDIRECTS,
        })
    }
}

fn run_guards<P: PageHost>(
    guards: &[Arc<dyn NavigationGuard>],
    to: &Route,
    ctx: &AppContext<P>,
) -> Option<String> {
    let user = ctx.session().current_user();
    guards.iter().find_map(|guard| match guard.check(to, user) {
        GuardDecision::Proceed => None,
        GuardDecision::Redirect(next) => {
            debug!(guard = guard.name(), "guard redirected");
            Some(next)
        }
    })
}

#[cfg(test)]
#[path = "../tests/router_tests.rs"]
mod tests;
