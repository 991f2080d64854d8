//! The rendering surface the context drives, and the queue of work that must
//! wait until the current update pass has been rendered.

use std::collections::VecDeque;

pub const PAGE_TITLE_ELEMENT: &str = "page-title";

pub trait PageHost {
    fn set_title(&mut self, title: &str);
    /// Moves keyboard focus. Returns false when the element is not rendered.
    fn focus(&mut self, element_id: &str) -> bool;
}

/// Page host without a DOM. Keeps what would have been shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessPage {
    pub title: String,
    pub focus_history: Vec<String>,
}

impl HeadlessPage {
    pub fn focused(&self) -> Option<&str> {
        self.focus_history.last().map(String::as_str)
    }
}

impl PageHost for HeadlessPage {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn focus(&mut self, element_id: &str) -> bool {
        self.focus_history.push(element_id.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    Focus(String),
}

#[derive(Debug, Default)]
pub struct NextTick {
    queue: VecDeque<DeferredTask>,
}

impl NextTick {
    pub fn schedule(&mut self, task: DeferredTask) {
        self.queue.push_back(task);
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn take(&mut self) -> VecDeque<DeferredTask> {
        std::mem::take(&mut self.queue)
    }
}
