//! Error types for the padtab library.

use std::io;
use thiserror::Error;

/// Result type alias for padtab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while encoding, rendering, or importing tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Row metadata could not be serialized into a token.
    #[error("Metadata encoding error: {0}")]
    Encode(String),

    /// A line's payload could not be rendered.
    ///
    /// Callers fall back to default line handling; this error never aborts
    /// the surrounding export or replay pass.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The host rejected an attribute application.
    #[error("Attribute application error: {0}")]
    Attribute(String),

    /// Table conversion failed while importing an HTML document.
    ///
    /// By the time this surfaces, a best-effort copy of the original source
    /// has already been placed at the destination.
    #[error("HTML import error: {0}")]
    Import(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
