//! Record-to-markup rendering.
//!
//! [`Renderer`] turns records into card fragments and mounts them into the
//! named containers of a [`Document`]. Rendering itself is pure: every
//! `render_*` method maps data to a `String`; only the `display_*` methods
//! touch the document.

mod cards;
pub mod dates;
mod stats;

pub use dates::{format_date, DEFAULT_DATE_FORMAT, UNKNOWN_DATE};

use serde_json::Value;

use crate::config::DisplayConfig;
use crate::document::{Document, DATA_DISPLAY, DB_STATS_DISPLAY};
use crate::records::{Endpoint, Record, StatsSummary};

/// Escape text for interpolation into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Renderer {
    date_format: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Renderer {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
        }
    }

    pub fn format_date(&self, raw: Option<&str>) -> String {
        format_date(raw, &self.date_format)
    }

    /// Card fragment for one record.
    pub fn render_card(&self, record: &Record) -> String {
        cards::render_record(record, &self.date_format)
    }

    /// Card fragment for a raw item and a type tag. Unknown tags and items
    /// that cannot be read as a record produce an empty fragment.
    pub fn render_card_for_tag(&self, item: &Value, tag: &str) -> String {
        let Ok(endpoint) = tag.parse::<Endpoint>() else {
            return String::new();
        };
        match Record::decode(endpoint, item.clone()) {
            Ok(record) => self.render_card(&record),
            Err(_) => String::new(),
        }
    }

    /// Empty-state fragment for a category with no records.
    pub fn render_empty_state(&self, endpoint: Endpoint) -> String {
        format!("<div class=\"empty-state\">No {endpoint} found</div>")
    }

    pub fn render_stats(&self, stats: &StatsSummary) -> String {
        stats::render_stats(stats)
    }

    /// Replace the contents of `{type}-cards` with one card per record.
    ///
    /// An empty or absent list shows the empty-state message and hides
    /// `{type}-section`; otherwise the section is shown.
    pub fn display_cards(&self, doc: &mut Document, items: Option<&[Record]>, endpoint: Endpoint) {
        let cards_id = endpoint.cards_id();
        if !doc.clear(&cards_id) {
            tracing::error!(endpoint = %endpoint, "container for {endpoint} not found");
            return;
        }

        let items = items.unwrap_or_default();
        if items.is_empty() {
            doc.set_html(&cards_id, self.render_empty_state(endpoint));
            doc.set_visible(&endpoint.section_id(), false);
            return;
        }

        for record in items {
            doc.append_html(&cards_id, &self.render_card(record));
        }
        doc.set_visible(&endpoint.section_id(), true);
    }

    /// Replace the whole data area with a single error card. The endpoint
    /// sections are gone until [`Document::restore_sections`] is called.
    pub fn display_error(&self, doc: &mut Document, message: &str) {
        for endpoint in Endpoint::ALL {
            doc.remove(&endpoint.section_id());
            doc.remove(&endpoint.cards_id());
        }
        doc.set_html(
            DATA_DISPLAY,
            format!(
                "<div class=\"error-card\">Error: {}</div>",
                escape_html(message)
            ),
        );
    }

    /// Inline error card inside one endpoint's container.
    pub fn display_fetch_error(&self, doc: &mut Document, endpoint: Endpoint, message: &str) {
        let html = format!(
            "<div class=\"error-card\">Error loading {endpoint}: {}</div>",
            escape_html(message)
        );
        if !doc.set_html(&endpoint.cards_id(), html) {
            tracing::error!(endpoint = %endpoint, "container for {endpoint} not found");
            return;
        }
        doc.set_visible(&endpoint.section_id(), true);
    }

    pub fn display_stats(&self, doc: &mut Document, stats: &StatsSummary) {
        doc.set_html(DB_STATS_DISPLAY, self.render_stats(stats));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Fact, Todo};
    use serde_json::json;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn unknown_tag_renders_nothing() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render_card_for_tag(&json!({"Title": "x"}), "notes"), "");
        assert!(renderer
            .render_card_for_tag(&json!({"Task": "x"}), "todos")
            .contains("<h4>x</h4>"));
    }

    #[test]
    fn display_cards_fills_and_shows_section() {
        let renderer = Renderer::default();
        let mut doc = Document::dashboard();
        let records = vec![
            Record::Fact(Fact {
                text: Some("one".into()),
                ..Default::default()
            }),
            Record::Fact(Fact {
                text: Some("two".into()),
                ..Default::default()
            }),
        ];
        renderer.display_cards(&mut doc, Some(records.as_slice()), Endpoint::Facts);
        assert_eq!(doc.html("facts-cards").matches("class=\"card\"").count(), 2);
        assert!(doc.is_visible("facts-section"));
    }

    #[test]
    fn display_cards_empty_state_hides_section() {
        let renderer = Renderer::default();
        let mut doc = Document::dashboard();
        doc.set_visible("todos-section", true);
        doc.set_html("todos-cards", "stale");

        renderer.display_cards(&mut doc, Some(&[][..]), Endpoint::Todos);
        assert_eq!(
            doc.html("todos-cards"),
            "<div class=\"empty-state\">No todos found</div>"
        );
        assert!(!doc.is_visible("todos-section"));

        renderer.display_cards(&mut doc, None, Endpoint::Todos);
        assert!(doc.html("todos-cards").contains("No todos found"));
    }

    #[test]
    fn display_cards_without_container_is_a_no_op() {
        let renderer = Renderer::default();
        let mut doc = Document::empty();
        let records = vec![Record::Todo(Todo::default())];
        renderer.display_cards(&mut doc, Some(records.as_slice()), Endpoint::Todos);
        assert!(!doc.contains("todos-cards"));
    }

    #[test]
    fn display_error_replaces_data_area() {
        let renderer = Renderer::default();
        let mut doc = Document::dashboard();
        renderer.display_error(&mut doc, "database offline");
        assert!(doc.html(DATA_DISPLAY).contains("Error: database offline"));
        assert!(!doc.contains("facts-cards"));
    }

    #[test]
    fn display_fetch_error_names_endpoint() {
        let renderer = Renderer::default();
        let mut doc = Document::dashboard();
        renderer.display_fetch_error(&mut doc, Endpoint::Lifelogs, "HTTP 502");
        assert!(doc
            .html("lifelogs-cards")
            .contains("Error loading lifelogs: HTTP 502"));
        assert!(doc.is_visible("lifelogs-section"));
    }
}
