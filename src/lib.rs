//! # padtab
//!
//! Table structure for line-oriented collaborative documents.
//!
//! A table lives in the document as ordinary lines: each row is one line
//! whose class list carries a compact, URL-safe token encoding the row's
//! identity (table id, row index, column count). This crate is the codec
//! and the pipeline around that token:
//!
//! - **encode/decode** row metadata to and from the marker token
//! - **collect** the token into a first-class line attribute during
//!   content scanning
//! - **render** a line's table payload to markup for export and for
//!   history playback
//! - **import** arbitrary HTML tables into the line+token representation
//!
//! The collaborative engine itself (attribute pools, operational
//! transforms, live editing) is the host's business and is consumed, not
//! reimplemented.
//!
//! ## Quick Start
//!
//! ```
//! use padtab::{encode_row, extract_from_classes, RowDescriptor};
//!
//! // Mint a token for the first row of a 2-column table
//! let token = encode_row(&RowDescriptor::new("t1", 0, 2))?;
//!
//! // The token travels inside the line's class list
//! let classes = format!("ace-line tbljson-{}", token);
//! assert_eq!(extract_from_classes(&classes), Some(token));
//! # Ok::<(), padtab::Error>(())
//! ```
//!
//! ## Export
//!
//! ```
//! use padtab::{export_line, AttributePool};
//!
//! let mut pool = AttributePool::new();
//! pool.insert(5, "tbljson", r#"{"tblId":"t1","row":0,"cols":2}"#);
//!
//! let markup = export_line(r#"{"payload":[["A","B"]]}"#, "*5", &pool);
//! assert!(markup.unwrap().contains("<table"));
//! ```

pub mod codec;
pub mod collect;
pub mod error;
pub mod import;
pub mod model;
pub mod pool;
pub mod render;
pub mod token;

// Re-export commonly used types
pub use codec::{decode, encode, DecodedMetadata};
pub use collect::{collect_line, collect_line_classes, AttributeSink, CollectOutcome};
pub use error::{Error, Result};
pub use import::{
    transform_html, DocumentImporter, HtmlImporter, ImportOptions, ImportOutcome, ImporterRegistry,
};
pub use model::{
    RowDescriptor, RowPayload, RowProperties, LEGACY_TABLE_ATTRIBUTE, TABLE_ATTRIBUTE,
};
pub use pool::AttributePool;
pub use render::{
    export_row, line_to_export_html, render, replay_row, RenderContext, ReplayBuffer, ReplayTarget,
};
pub use token::{extract, extract_from_classes, marker_class, MARKER_PREFIX};

use std::path::Path;

/// Encode a row descriptor into its marker token.
///
/// Shorthand for [`codec::encode`] with a [`RowDescriptor`].
pub fn encode_row(descriptor: &RowDescriptor) -> Result<String> {
    codec::encode(descriptor)
}

/// Decode a marker token back into row metadata.
///
/// Returns `None` when the token is not decodable at all; see
/// [`codec::decode`].
pub fn decode_token(token: &str) -> Option<DecodedMetadata> {
    codec::decode(token)
}

/// Import a file through the default importer registry.
///
/// Unhandled extensions are declined with no side effects.
///
/// # Example
///
/// ```no_run
/// use padtab::import_file;
///
/// let outcome = import_file("upload.html", "html", "import.html")?;
/// println!("modified: {}", outcome.is_modified());
/// # Ok::<(), padtab::Error>(())
/// ```
pub fn import_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    extension: &str,
    destination: Q,
) -> Result<ImportOutcome> {
    ImporterRegistry::with_defaults().import(
        source.as_ref(),
        extension,
        destination.as_ref(),
        &ImportOptions::default(),
    )
}

/// Render one line for export against the document's attribute pool.
///
/// Returns `None` as the pass-through signal so the host applies its
/// default line handling.
pub fn export_line(text: &str, attribute_run: &str, pool: &AttributePool) -> Option<String> {
    render::line_to_export_html(text, attribute_run, pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_row_extracts_back() {
        let token = encode_row(&RowDescriptor::new("t1", 0, 2)).unwrap();
        let classes = marker_class(&token);

        let extracted = extract_from_classes(&classes).unwrap();
        assert_eq!(extracted, token);

        let decoded = decode_token(&extracted).unwrap();
        assert!(decoded.well_formed);
    }

    #[test]
    fn test_export_line_pass_through() {
        let pool = AttributePool::new();
        assert!(export_line("plain text", "*0", &pool).is_none());
    }
}
