//! In-memory model of the dashboard page.
//!
//! A [`Document`] is a flat map of element IDs to [`Element`]s. The IDs are the
//! binding contract between the page markup and the dashboard logic; the
//! renderer and the dashboard only ever touch elements by ID.
//! [`Document::to_html`] serializes the whole page for the server and CLI.

use std::collections::HashMap;

use crate::records::Endpoint;
use crate::render::escape_html;

pub const DATA_DISPLAY: &str = "data-display";
pub const DB_STATS_DISPLAY: &str = "db-stats-display";
pub const PAGINATION_CONTROLS: &str = "pagination-controls";
pub const REFRESH_BUTTON: &str = "refresh-button";
pub const RUN_BUTTON: &str = "run-button";
pub const CLEAR_BUTTON: &str = "clear-button";
pub const OUTPUT: &str = "output";
pub const ERROR: &str = "error";
pub const API_RESPONSE: &str = "api-response";
pub const PREV_PAGE: &str = "prev-page";
pub const NEXT_PAGE: &str = "next-page";

/// One addressable element: its inner markup plus the two bits of state the
/// dashboard toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub inner_html: String,
    pub visible: bool,
}

impl Element {
    fn new(visible: bool) -> Self {
        Self {
            inner_html: String::new(),
            visible,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
}

impl Document {
    /// An empty document with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard dashboard page: one hidden section per endpoint plus the
    /// stats, pagination and code runner regions.
    pub fn dashboard() -> Self {
        let mut doc = Self::empty();
        for id in [
            DATA_DISPLAY,
            DB_STATS_DISPLAY,
            PAGINATION_CONTROLS,
            REFRESH_BUTTON,
            RUN_BUTTON,
            CLEAR_BUTTON,
            OUTPUT,
            ERROR,
            API_RESPONSE,
        ] {
            doc.insert(id, Element::new(true));
        }
        doc.restore_sections();
        doc
    }

    /// Re-create any missing endpoint sections and clear a replaced
    /// `data-display` so the sections render again.
    pub fn restore_sections(&mut self) {
        if let Some(display) = self.elements.get_mut(DATA_DISPLAY) {
            display.inner_html.clear();
        }
        for endpoint in Endpoint::ALL {
            self.elements
                .entry(endpoint.section_id())
                .or_insert_with(|| Element::new(false));
            self.elements
                .entry(endpoint.cards_id())
                .or_insert_with(|| Element::new(true));
        }
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Inner markup of `id`, or `""` when the element does not exist.
    pub fn html(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .map(|e| e.inner_html.as_str())
            .unwrap_or("")
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.visible)
    }

    /// Replace the inner markup. Returns `false` if the element does not exist.
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.inner_html = html.into();
                true
            }
            None => false,
        }
    }

    /// Append markup to the element. Returns `false` if the element does not exist.
    pub fn append_html(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.inner_html.push_str(html);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, id: &str) -> bool {
        self.set_html(id, String::new())
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Serialize the full dashboard page. `editor_text` pre-fills the code editor.
    pub fn to_html(&self, editor_text: &str) -> String {
        let mut page = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Life Journal</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n\
             </head>\n<body>\n",
        );

        page.push_str("<header>\n<h1>Life Journal</h1>\n");
        page.push_str(&format!(
            "<button id=\"{REFRESH_BUTTON}\">Refresh</button>\n</header>\n"
        ));
        page.push_str(&self.element_html("div", DB_STATS_DISPLAY, ""));

        page.push_str(&format!("<main id=\"{DATA_DISPLAY}\">\n"));
        let replaced = self.html(DATA_DISPLAY);
        if replaced.is_empty() {
            for endpoint in Endpoint::ALL {
                page.push_str(&self.section_html(endpoint));
            }
        } else {
            page.push_str(replaced);
        }
        page.push_str("</main>\n");
        page.push_str(&self.element_html("div", PAGINATION_CONTROLS, ""));

        page.push_str("<section id=\"code-runner\">\n<h2>Code Runner</h2>\n");
        page.push_str(&format!(
            "<textarea id=\"code-editor\">{}</textarea>\n",
            escape_html(editor_text)
        ));
        page.push_str(&format!(
            "<button id=\"{RUN_BUTTON}\">Run (Ctrl+Enter)</button>\n\
             <button id=\"{CLEAR_BUTTON}\">Clear</button>\n"
        ));
        page.push_str(&self.element_html("pre", OUTPUT, "output"));
        page.push_str(&self.element_html("pre", ERROR, "error"));
        page.push_str(&self.element_html("pre", API_RESPONSE, "api-response"));
        page.push_str("</section>\n</body>\n</html>\n");
        page
    }

    fn section_html(&self, endpoint: Endpoint) -> String {
        let section_id = endpoint.section_id();
        if !self.contains(&section_id) {
            return String::new();
        }
        let style = display_style(self.is_visible(&section_id));
        format!(
            "<section id=\"{section_id}\"{style}>\n<h3>{}</h3>\n\
             <button id=\"{}\" data-endpoint=\"{endpoint}\">Load {}</button>\n{}</section>\n",
            endpoint.title(),
            endpoint.load_button_id(),
            endpoint.as_str(),
            self.element_html("div", &endpoint.cards_id(), "cards"),
        )
    }

    fn element_html(&self, tag: &str, id: &str, class: &str) -> String {
        let Some(element) = self.get(id) else {
            return String::new();
        };
        let class_attr = if class.is_empty() {
            String::new()
        } else {
            format!(" class=\"{class}\"")
        };
        format!(
            "<{tag} id=\"{id}\"{class_attr}{}>{}</{tag}>\n",
            display_style(element.visible),
            element.inner_html
        )
    }
}

fn display_style(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " style=\"display: none\""
    }
}
