//! Data model for table lines.
//!
//! These types bridge the three consumption contexts: a [`RowDescriptor`] is
//! minted at import time and travels inside the marker token, a
//! [`RowPayload`] is what the renderer parses out of a line's text, and
//! [`RowProperties`] carries the merged style layers applied while rendering.

mod properties;
mod row;

pub use properties::RowProperties;
pub use row::{RowDescriptor, RowPayload};

/// Name of the line attribute carrying row metadata.
pub const TABLE_ATTRIBUTE: &str = "tbljson";

/// Historical attribute name, still accepted when resolving pool entries.
pub const LEGACY_TABLE_ATTRIBUTE: &str = "table";
