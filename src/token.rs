//! Structural marker extraction.
//!
//! A table line announces itself through one token in its class list:
//! `tbljson-<encoded metadata>`. Class sources arrive in several shapes
//! (a raw class string, a split token list, anything iterable as strings);
//! everything is normalized to an ordered token sequence before scanning.

use regex::Regex;

/// Class-name prefix that marks a line as a table row.
pub const MARKER_PREFIX: &str = "tbljson";

/// Build the class-list marker for an encoded token.
pub fn marker_class(token: &str) -> String {
    format!("{}-{}", MARKER_PREFIX, token)
}

/// Scan an ordered token sequence for the first structural marker and return
/// its encoded payload.
///
/// Tokens are inspected in order; the first match wins. The capture class is
/// `[A-Za-z0-9_-]`, which excludes `=`: base64 padding on a legacy token is
/// not captured, and [`crate::codec::decode`] compensates by accepting
/// unpadded input.
pub fn extract<I, S>(tokens: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pattern = marker_pattern();
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }
        if let Some(caps) = pattern.captures(token) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Extract the marker payload from a whitespace-delimited class string.
///
/// # Example
///
/// ```
/// use padtab::token;
///
/// let payload = token::extract_from_classes("ace-line tbljson-eyJ0YmxJZCI6ImEifQ");
/// assert_eq!(payload.as_deref(), Some("eyJ0YmxJZCI6ImEifQ"));
/// ```
pub fn extract_from_classes(classes: &str) -> Option<String> {
    extract(classes.split_whitespace())
}

fn marker_pattern() -> Regex {
    Regex::new(&format!("{}-([A-Za-z0-9_-]+)", MARKER_PREFIX)).unwrap()
}
