//! HTML pretty-printing of entities.
//!
//! Entities render as recursive `<table>`s: scalars as text, lists as
//! single-column tables, mappings as two-column key/value tables. Only an
//! explicit, static allow-list of top-level fields per entity kind is
//! rendered; nested values render in full.

use serde::Serialize;
use serde_json::Value;

use crate::model::{Collection, FileReference, Image, ImageRepresentation, Study};

/// HTML rendition through a per-kind field allow-list.
pub trait RenderHtml: Serialize {
    /// The top-level fields this entity kind exposes in HTML.
    fn renderable_fields() -> &'static [&'static str];

    /// Whether a top-level field is rendered.
    fn is_renderable(field: &str) -> bool {
        Self::renderable_fields().contains(&field)
    }

    /// Render this entity as a nested HTML table.
    fn to_html(&self) -> String {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        let body = match value {
            Value::Object(fields) => {
                let filtered: serde_json::Map<String, Value> = fields
                    .into_iter()
                    .filter(|(name, _)| Self::is_renderable(name))
                    .collect();
                object_to_html(&filtered)
            }
            other => value_to_html(&other),
        };
        format!("<table>{body}</table>")
    }
}

fn value_to_html(value: &Value) -> String {
    match value {
        Value::Array(items) => list_to_html(items),
        Value::Object(fields) => object_to_html(fields),
        Value::Null => String::new(),
        Value::String(s) => escape(s),
        other => other.to_string(),
    }
}

fn list_to_html(items: &[Value]) -> String {
    let mut html = String::from("<table>");
    for item in items {
        html.push_str("<tr><td>");
        html.push_str(&value_to_html(item));
        html.push_str("</td></tr>");
    }
    html.push_str("</table>");
    html
}

fn object_to_html(fields: &serde_json::Map<String, Value>) -> String {
    let mut html = String::from("<table>");
    for (name, value) in fields {
        html.push_str("<tr><td>");
        html.push_str(&escape(name));
        html.push_str("</td><td>");
        html.push_str(&value_to_html(value));
        html.push_str("</td></tr>");
    }
    html.push_str("</table>");
    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl RenderHtml for Study {
    fn renderable_fields() -> &'static [&'static str] {
        &[
            "accession_id",
            "title",
            "description",
            "authors",
            "organism",
            "release_date",
            "imaging_type",
            "attributes",
            "example_image_uri",
            "images_count",
            "file_references_count",
        ]
    }
}

impl RenderHtml for Image {
    fn renderable_fields() -> &'static [&'static str] {
        &[
            "uuid",
            "study_uuid",
            "name",
            "original_relpath",
            "dimensions",
            "representations",
            "attributes",
            "alias",
        ]
    }
}

impl RenderHtml for ImageRepresentation {
    fn renderable_fields() -> &'static [&'static str] {
        &["uri", "type", "size", "dimensions"]
    }
}

impl RenderHtml for FileReference {
    fn renderable_fields() -> &'static [&'static str] {
        &[
            "uuid",
            "study_uuid",
            "name",
            "original_relpath",
            "size",
            "attributes",
        ]
    }
}

impl RenderHtml for Collection {
    fn renderable_fields() -> &'static [&'static str] {
        &["uuid", "name", "title", "subtitle", "study_uuids"]
    }
}

// =============================================================================
// Tests
// =============================================================================
