//! Page counters and previous/next controls.

use std::collections::HashMap;

use crate::document::{NEXT_PAGE, PREV_PAGE};
use crate::records::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Current page per endpoint, shared by every control on the page.
/// Endpoints that were never paged report page 1.
#[derive(Debug, Clone, Default)]
pub struct PageCounters {
    pages: HashMap<Endpoint, u32>,
}

impl PageCounters {
    pub fn get(&self, endpoint: Endpoint) -> u32 {
        self.pages.get(&endpoint).copied().unwrap_or(1)
    }

    pub fn set(&mut self, endpoint: Endpoint, page: u32) {
        self.pages.insert(endpoint, page.max(1));
    }

    pub fn reset(&mut self) {
        self.pages.clear();
    }
}

/// State of the previous/next controls for the last page fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub endpoint: Endpoint,
    pub page: u32,
    pub total_pages: u32,
}

impl PaginationControls {
    pub fn new(endpoint: Endpoint, page: u32, total_pages: u32) -> Self {
        Self {
            endpoint,
            page,
            total_pages,
        }
    }

    pub fn prev_disabled(&self) -> bool {
        self.page <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Page a click in `direction` should load, or `None` if that control is disabled.
    pub fn target(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::Previous if !self.prev_disabled() => Some(self.page - 1),
            Direction::Next if !self.next_disabled() => Some(self.page + 1),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        let disabled = |off: bool| if off { " disabled" } else { "" };
        format!(
            "<div class=\"pagination\" data-endpoint=\"{endpoint}\">\
             <button id=\"{PREV_PAGE}\"{}>Previous</button>\
             <span class=\"page-info\">Page {} of {}</span>\
             <button id=\"{NEXT_PAGE}\"{}>Next</button></div>",
            disabled(self.prev_disabled()),
            self.page,
            self.total_pages,
            disabled(self.next_disabled()),
            endpoint = self.endpoint,
        )
    }
}
