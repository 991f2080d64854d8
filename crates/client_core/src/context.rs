//! The one application context per running client.
//!
//! Created once with [`AppContext::init`] and handed by `&mut` to whatever
//! needs to mutate it: the router, bootstrap, views. There is no teardown.

use std::time::Duration;

use shared::domain::{Term, TermId};
use tracing::debug;

use crate::{
    notifications::Notifications,
    page::{DeferredTask, HeadlessPage, NextTick, PageHost, PAGE_TITLE_ELEMENT},
    router::Route,
    session::SessionState,
    settings::Settings,
    term::{SelectedTerm, TermUnavailable},
};

pub const TITLE_SUFFIX: &str = "Course Evaluations";
pub const DEFAULT_PAGE_TITLE: &str = "UC Berkeley";

pub fn document_title(title: &str) -> String {
    format!("{title} | {TITLE_SUFFIX}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub struct AppContext<P: PageHost = HeadlessPage> {
    session: SessionState,
    selected_term: SelectedTerm,
    notifications: Notifications,
    loading: bool,
    current_route: Option<Route>,
    document_title: String,
    page: P,
    next_tick: NextTick,
}

impl<P: PageHost> AppContext<P> {
    pub fn init(settings: &Settings, page: P) -> Self {
        Self {
            session: SessionState::default(),
            selected_term: SelectedTerm::default(),
            notifications: Notifications::new(Duration::from_millis(settings.snackbar_timeout_ms)),
            loading: false,
            current_route: None,
            document_title: String::new(),
            page,
            next_tick: NextTick::default(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn selected_term(&self) -> &SelectedTerm {
        &self.selected_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current_route.as_ref()
    }

    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn pending_ticks(&self) -> usize {
        self.next_tick.len()
    }

    /// The only place the active term changes. On failure nothing is touched.
    pub fn select_term(&mut self, requested: Option<&TermId>) -> Result<Term, TermUnavailable> {
        self.selected_term.select(self.session.config(), requested)
    }

    pub fn set_is_selected_term_locked(&mut self, is_locked: bool) {
        self.selected_term.set_locked(is_locked);
    }

    pub fn loading_start(&mut self, alert: Option<&str>) {
        self.loading = true;
        let message = match non_empty(alert) {
            Some(alert) => alert.to_string(),
            None => {
                let route_name = self
                    .current_route
                    .as_ref()
                    .and_then(|route| route.name.as_deref())
                    .unwrap_or_default();
                format!("Loading {route_name}.")
            }
        };
        self.notifications.alert_screen_reader(message);
    }

    pub fn loading_complete(&mut self, page_title: Option<&str>, alert: Option<&str>) {
        let page_title = non_empty(page_title);
        self.set_document_title(document_title(page_title.unwrap_or(DEFAULT_PAGE_TITLE)));
        self.loading = false;

        if let Some(alert) = non_empty(alert) {
            self.notifications.alert_screen_reader(alert);
        } else if let Some(title) = page_title {
            self.notifications
                .alert_screen_reader(format!("{title} loaded"));
        }

        self.next_tick
            .schedule(DeferredTask::Focus(PAGE_TITLE_ELEMENT.to_string()));
    }

    pub fn set_document_title(&mut self, title: String) {
        self.page.set_title(&title);
        self.document_title = title;
    }

    pub(crate) fn set_current_route(&mut self, route: Route) {
        self.current_route = Some(route);
    }

    /// Runs deferred work. Call once the render pass for the latest update
    /// has finished. Returns the number of tasks run.
    pub fn flush_next_tick(&mut self) -> usize {
        let tasks = self.next_tick.take();
        let count = tasks.len();
        for task in tasks {
            match task {
                DeferredTask::Focus(element_id) => {
                    if !self.page.focus(&element_id) {
                        debug!(element_id = %element_id, "focus target not rendered");
                    }
                }
            }
        }
        count
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
