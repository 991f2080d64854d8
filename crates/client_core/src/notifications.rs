//! Transient UI feedback: screen-reader alerts, the snackbar and the
//! service announcement banner. Every channel overwrites, nothing queues.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SNACKBAR_COLOR: &str = "info";
pub const ERROR_SNACKBAR_COLOR: &str = "error";
pub const MESSAGE_CLOSED_ALERT: &str = "Message closed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenReaderAlert {
    pub message: String,
    pub politeness: Politeness,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub text: Option<String>,
    pub color: String,
    pub timeout: Duration,
    opened_at: Option<Instant>,
}

impl Snackbar {
    fn new(timeout: Duration) -> Self {
        Self {
            text: None,
            color: DEFAULT_SNACKBAR_COLOR.to_string(),
            timeout,
            opened_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceAnnouncement {
    pub text: String,
    pub is_live: bool,
}

#[derive(Debug, Clone)]
pub struct Notifications {
    screen_reader_alert: ScreenReaderAlert,
    snackbar: Snackbar,
    snackbar_visible: bool,
    service_announcement: ServiceAnnouncement,
}

impl Notifications {
    pub fn new(snackbar_timeout: Duration) -> Self {
        Self {
            screen_reader_alert: ScreenReaderAlert::default(),
            snackbar: Snackbar::new(snackbar_timeout),
            snackbar_visible: false,
            service_announcement: ServiceAnnouncement::default(),
        }
    }

    pub fn screen_reader_alert(&self) -> &ScreenReaderAlert {
        &self.screen_reader_alert
    }

    pub fn snackbar(&self) -> &Snackbar {
        &self.snackbar
    }

    pub fn is_snackbar_visible(&self) -> bool {
        self.snackbar_visible
    }

    pub fn service_announcement(&self) -> &ServiceAnnouncement {
        &self.service_announcement
    }

    pub fn set_screen_reader_alert(
        &mut self,
        message: impl Into<String>,
        politeness: Option<Politeness>,
    ) {
        let message = message.into();
        debug!(%message, "screen reader alert");
        self.screen_reader_alert = ScreenReaderAlert {
            message,
            politeness: politeness.unwrap_or_default(),
        };
    }

    pub fn alert_screen_reader(&mut self, message: impl Into<String>) {
        self.set_screen_reader_alert(message, None);
    }

    pub fn snackbar_open(&mut self, text: impl Into<String>, color: Option<&str>) {
        self.show_snackbar(text.into(), color.unwrap_or(DEFAULT_SNACKBAR_COLOR));
    }

    pub fn snackbar_report_error(&mut self, text: impl Into<String>) {
        self.show_snackbar(text.into(), ERROR_SNACKBAR_COLOR);
    }

    /// Passive dismissal. Nothing is announced.
    pub fn snackbar_hide(&mut self) {
        self.snackbar_visible = false;
        self.snackbar.text = None;
        self.snackbar.opened_at = None;
    }

    /// Dismissal requested by the user; announced to assistive technology.
    pub fn snackbar_close(&mut self) {
        self.snackbar_hide();
        self.alert_screen_reader(MESSAGE_CLOSED_ALERT);
    }

    /// Hides the snackbar once it has been up for its timeout. Returns whether
    /// it was hidden by this call.
    pub fn snackbar_expire(&mut self, now: Instant) -> bool {
        let expired = match self.snackbar.opened_at {
            Some(opened) if self.snackbar_visible => {
                now.saturating_duration_since(opened) >= self.snackbar.timeout
            }
            _ => false,
        };
        if expired {
            self.snackbar_hide();
        }
        expired
    }

    pub fn set_service_announcement(&mut self, announcement: ServiceAnnouncement) {
        self.service_announcement = announcement;
    }

    fn show_snackbar(&mut self, text: String, color: &str) {
        debug!(%text, color, "snackbar open");
        self.snackbar.text = Some(text);
        self.snackbar.color = color.to_string();
        self.snackbar.opened_at = Some(Instant::now());
        self.snackbar_visible = true;
    }
}
