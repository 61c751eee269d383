//! Line attribute collection during content scanning.
//!
//! When the host scans document content it hands each line's class tokens to
//! [`collect_line`]. A line carrying a structural marker gets the normalized
//! table attribute applied through the host's attribute primitive; everything
//! else is left untouched. Failures stay local to the one line; the scan of
//! the rest of the document is never affected.

use crate::codec;
use crate::error::Result;
use crate::model::TABLE_ATTRIBUTE;
use crate::token;

/// Host-provided primitive that applies an attribute to the line being
/// scanned.
pub trait AttributeSink {
    /// Apply a named attribute to the current line.
    fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()>;
}

impl<F> AttributeSink for F
where
    F: FnMut(&str, &str) -> Result<()>,
{
    fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self(name, value)
    }
}

/// Outcome of scanning one line's class tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// No structural marker (or an undecodable one); the line is untouched.
    NotTable,

    /// The table attribute was applied. `well_formed` is false when the
    /// metadata failed shape validation but was applied anyway.
    Applied {
        /// Whether the decoded metadata passed shape validation.
        well_formed: bool,
    },

    /// The sink rejected the attribute; the line is left unattributed.
    SinkRejected,
}

/// Scan one line's class tokens and apply the table attribute if a marker is
/// found.
///
/// The attribute value is the *original decoded JSON string*, not a
/// re-serialization, so unknown fields and formatting survive exactly.
/// Malformed-but-present metadata is logged and still applied: a marker on a
/// line always means "this is a table line", with best-effort data.
pub fn collect_line<I, S, A>(classes: I, sink: &mut A) -> CollectOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    A: AttributeSink + ?Sized,
{
    let Some(encoded) = token::extract(classes) else {
        return CollectOutcome::NotTable;
    };

    let Some(decoded) = codec::decode(&encoded) else {
        // Token present but not decodable at all; same as no token.
        log::debug!("table marker with undecodable token, treating line as plain");
        return CollectOutcome::NotTable;
    };

    if !decoded.well_formed {
        log::warn!(
            "table line metadata is malformed, applying anyway: {}",
            decoded.json
        );
    }

    match sink.apply_attribute(TABLE_ATTRIBUTE, &decoded.json) {
        Ok(()) => CollectOutcome::Applied {
            well_formed: decoded.well_formed,
        },
        Err(err) => {
            log::warn!("failed to apply table attribute: {}", err);
            CollectOutcome::SinkRejected
        }
    }
}

/// [`collect_line`] over a whitespace-delimited class string.
pub fn collect_line_classes<A>(classes: &str, sink: &mut A) -> CollectOutcome
where
    A: AttributeSink + ?Sized,
{
    collect_line(classes.split_whitespace(), sink)
}
