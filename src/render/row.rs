//! Row rendering for export and replay playback.

use std::fmt::Write as _;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{RowPayload, RowProperties};

const CELL_PADDING_PX: u32 = 3;

/// Rendering context for a table line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// Static document conversion; rendering returns markup.
    Export,
    /// Historical-snapshot playback; rendering updates a target element.
    Replay,
    /// Live editing; handled by the host, a no-op here.
    Live,
}

/// Target element abstraction for replay playback.
///
/// Replay frames re-render the same lines over and over; the contract is
/// idempotent: markup is only written when it differs from what the target
/// already shows.
pub trait ReplayTarget {
    /// Current markup of the target element.
    fn html(&self) -> &str;

    /// Replace the target element's markup.
    fn set_html(&mut self, markup: String);
}

/// Owned [`ReplayTarget`] for hosts and tests without a live element.
#[derive(Debug, Clone, Default)]
pub struct ReplayBuffer {
    html: String,
}

impl ReplayBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayTarget for ReplayBuffer {
    fn html(&self) -> &str {
        &self.html
    }

    fn set_html(&mut self, markup: String) {
        self.html = markup;
    }
}

/// Render a line's table payload in the given context.
///
/// For [`RenderContext::Export`] the markup is returned; for
/// [`RenderContext::Replay`] it is written to `target` (which must be
/// present) and `None` is returned. Any other context is a no-op.
///
/// A payload that fails to parse is terminal for this call only: the error
/// is returned and the caller leaves default content in place.
pub fn render(
    context: RenderContext,
    source: &str,
    attribs: &str,
    target: Option<&mut dyn ReplayTarget>,
) -> Result<Option<String>> {
    match context {
        RenderContext::Export => export_row(source, attribs).map(Some),
        RenderContext::Replay => match target {
            Some(target) => {
                replay_row(target, source, attribs)?;
                Ok(None)
            }
            None => {
                log::debug!("replay render without a target, nothing to update");
                Ok(None)
            }
        },
        RenderContext::Live => Ok(None),
    }
}

/// Render one row for export.
///
/// `text` is the line's raw text, parsed as a [`RowPayload`]; `attribs` is
/// the resolved attribute value, parsed as a JSON object of per-call
/// property overrides (empty when blank or not an object).
pub fn export_row(text: &str, attribs: &str) -> Result<String> {
    let payload = parse_payload(text)?;
    let overrides = parse_attribs(attribs);
    let props = RowProperties::merged(payload.tbl_properties.as_ref(), Some(&overrides));
    Ok(row_markup(&payload, &props))
}

/// Render one row for replay playback, updating `target` only when the
/// markup differs from its current content.
///
/// Replay sources still carry line markup (the marker span around the
/// payload); tags are stripped before parsing. Returns whether the target
/// was updated.
pub fn replay_row(target: &mut dyn ReplayTarget, source: &str, attribs: &str) -> Result<bool> {
    let text = strip_markup(source);
    let payload = parse_payload(text.trim())?;
    let overrides = parse_attribs(attribs);
    let props = RowProperties::merged(payload.tbl_properties.as_ref(), Some(&overrides));
    let markup = row_markup(&payload, &props);

    if target.html() == markup {
        return Ok(false);
    }
    target.set_html(markup);
    Ok(true)
}

fn parse_payload(text: &str) -> Result<RowPayload> {
    serde_json::from_str(text)
        .map_err(|e| Error::Render(format!("row payload is not valid JSON: {}", e)))
}

fn parse_attribs(attribs: &str) -> Map<String, Value> {
    if attribs.trim().is_empty() {
        return Map::new();
    }
    match serde_json::from_str::<Value>(attribs) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            log::debug!("render attribs are not a JSON object, ignoring");
            Map::new()
        }
    }
}

/// One `<table>` with exactly one `<tr>`: this renders a single row per
/// invocation, and multi-row tables are rebuilt one line at a time.
fn row_markup(payload: &RowPayload, props: &RowProperties) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<table style="border-collapse:collapse;width:{}%"><tr>"#,
        format_number(props.width())
    );

    let border = match props.border_color() {
        Some(color) => format!("{}px solid {}", format_number(props.border_width()), color),
        None => format!("{}px solid", format_number(props.border_width())),
    };
    for cell in payload.cells() {
        let _ = write!(
            out,
            r#"<td style="border:{};padding:{}px;word-wrap:break-word">{}</td>"#,
            border, CELL_PADDING_PX, cell
        );
    }

    out.push_str("</tr></table>");
    out
}

/// Drop tags and unescape the entities a serialized text node carries.
fn strip_markup(source: &str) -> String {
    let text = Regex::new(r"<[^>]*>").unwrap().replace_all(source, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_default_properties() {
        let markup = export_row(r#"{"payload":[["A","B"]]}"#, "").unwrap();

        assert_eq!(markup.matches("<td").count(), 2);
        assert!(markup.contains("width:100%"));
        assert!(markup.contains("border:1px solid"));
        assert!(markup.contains(">A</td>"));
        assert!(markup.contains(">B</td>"));
        assert!(markup.starts_with("<table"));
        assert!(markup.ends_with("</tr></table>"));
        assert_eq!(markup.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_export_attribs_override_width() {
        let markup = export_row(r#"{"payload":[["A","B"]]}"#, r#"{"width":50}"#).unwrap();
        assert!(markup.contains("width:50%"));
        assert!(!markup.contains("width:100%"));
    }

    #[test]
    fn test_export_table_properties_then_attribs() {
        let text = r#"{"payload":[["A"]],"tblProperties":{"width":80,"borderWidth":2}}"#;

        let markup = export_row(text, "").unwrap();
        assert!(markup.contains("width:80%"));
        assert!(markup.contains("border:2px solid"));

        // Call-site attribs win over table-wide properties
        let markup = export_row(text, r#"{"width":50}"#).unwrap();
        assert!(markup.contains("width:50%"));
        assert!(markup.contains("border:2px solid"));
    }

    #[test]
    fn test_export_border_color() {
        let markup = export_row(
            r##"{"payload":[["A"]],"tblProperties":{"borderColor":"#f00"}}"##,
            "",
        )
        .unwrap();
        assert!(markup.contains("border:1px solid #f00"));
    }

    #[test]
    fn test_export_bad_payload_is_render_error() {
        let err = export_row("A,B,C", "").unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_export_descriptor_attribs_are_harmless() {
        // The resolved attribute value is descriptor-shaped; its keys merge
        // into the property map but do not affect the style output.
        let markup = export_row(
            r#"{"payload":[["x"]]}"#,
            r#"{"tblId":"t1","row":0,"cols":1}"#,
        )
        .unwrap();
        assert!(markup.contains("width:100%"));
        assert_eq!(markup.matches("<td").count(), 1);
    }

    #[test]
    fn test_replay_updates_then_stays_idle() {
        let mut target = ReplayBuffer::new();
        let source = r#"<span class="tbljson-abc">{"payload":[["A","B"]]}</span>"#;

        let updated = replay_row(&mut target, source, "").unwrap();
        assert!(updated);
        assert!(target.html().contains(">A</td>"));

        // Same frame again: no churn
        let updated = replay_row(&mut target, source, "").unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_replay_unescapes_entities() {
        let mut target = ReplayBuffer::new();
        let source = r#"<span>{"payload":[["a &amp; b"]]}</span>"#;

        replay_row(&mut target, source, "").unwrap();
        assert!(target.html().contains("a & b"));
    }

    #[test]
    fn test_replay_bad_payload_leaves_target_alone() {
        let mut target = ReplayBuffer::new();
        target.set_html("<em>default</em>".to_string());

        let err = replay_row(&mut target, "<span>not json</span>", "");
        assert!(err.is_err());
        assert_eq!(target.html(), "<em>default</em>");
    }

    #[test]
    fn test_render_context_dispatch() {
        let text = r#"{"payload":[["A"]]}"#;

        let markup = render(RenderContext::Export, text, "", None).unwrap();
        assert!(markup.unwrap().contains(">A</td>"));

        let mut target = ReplayBuffer::new();
        let out = render(RenderContext::Replay, text, "", Some(&mut target)).unwrap();
        assert!(out.is_none());
        assert!(target.html().contains(">A</td>"));

        // Live editing is out of scope: no output, no error
        let out = render(RenderContext::Live, text, "", None).unwrap();
        assert!(out.is_none());
    }
}
