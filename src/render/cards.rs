//! Card templates, one per record category.

use super::dates::format_date;
use super::escape_html;
use crate::records::{Conversation, Fact, Lifelog, Record, Todo};

/// Text or the given placeholder, HTML-escaped.
fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => escape_html(placeholder),
    }
}

fn timestamp(label: &str, created_at: Option<&str>, date_format: &str) -> String {
    format!(
        "<div class=\"timestamp\">{label}: {}</div>",
        escape_html(&format_date(created_at, date_format))
    )
}

pub(crate) fn render_record(record: &Record, date_format: &str) -> String {
    let body = match record {
        Record::Conversation(c) => conversation(c, date_format),
        Record::Fact(f) => fact(f, date_format),
        Record::Todo(t) => todo(t, date_format),
        Record::Lifelog(l) => lifelog(l, date_format),
    };
    format!("<div class=\"card\">{body}</div>")
}

fn conversation(c: &Conversation, date_format: &str) -> String {
    format!(
        "<h4>{}</h4><p>{}</p>{}",
        text_or(c.title.as_deref(), "Conversation"),
        text_or(c.summary.as_deref(), "No summary available"),
        timestamp("Created", c.created_at.as_deref(), date_format),
    )
}

fn fact(f: &Fact, date_format: &str) -> String {
    let (class, label) = if f.is_confirmed() {
        ("confirmed", "Confirmed")
    } else {
        ("unconfirmed", "Unconfirmed")
    };
    format!(
        "<h4>Fact</h4><p>{}</p><div class=\"status {class}\">{label}</div>{}",
        text_or(f.text.as_deref(), "No text available"),
        timestamp("Added", f.created_at.as_deref(), date_format),
    )
}

fn todo(t: &Todo, date_format: &str) -> String {
    let (class, label) = if t.is_completed() {
        ("completed", "Completed")
    } else {
        ("pending", "Pending")
    };
    format!(
        "<h4>{}</h4><div class=\"status {class}\">{label}</div>{}",
        text_or(t.task.as_deref(), "Untitled task"),
        timestamp("Created", t.created_at.as_deref(), date_format),
    )
}

fn lifelog(l: &Lifelog, date_format: &str) -> String {
    let tags = l.tags.as_ref().and_then(|t| t.display());
    format!(
        "<h4>{}</h4><p>{}</p><div class=\"tags\">Tags: {}</div>{}",
        text_or(l.title.as_deref(), "Lifelog"),
        text_or(l.description.as_deref(), "No description available"),
        text_or(tags.as_deref(), "None"),
        timestamp("Created", l.created_at.as_deref(), date_format),
    )
}
