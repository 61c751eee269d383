//! Export-context dispatch against the document attribute pool.

use super::row;
use crate::model::{LEGACY_TABLE_ATTRIBUTE, TABLE_ATTRIBUTE};
use crate::pool::{first_attribute_index, AttributePool};

/// Resolve the table attribute applied to a line, if any.
///
/// Decodes the first attribute-application marker in the run string, looks
/// the index up in the pool, and accepts the entry only under the current or
/// the legacy attribute name.
pub fn resolve_table_attribute<'a>(
    run: &str,
    pool: &'a AttributePool,
) -> Option<(&'a str, &'a str)> {
    let index = first_attribute_index(run)?;
    let (name, value) = pool.get(index)?;
    if name != TABLE_ATTRIBUTE && name != LEGACY_TABLE_ATTRIBUTE {
        return None;
    }
    Some((name, value))
}

/// Render a line for export if it carries a table attribute.
///
/// Returns `None` as the pass-through signal: no table attribute, an empty
/// value, or a failed render all leave the host's default line handling
/// undisturbed. A render error on one line never aborts the export of the
/// rest of the document.
pub fn line_to_export_html(text: &str, run: &str, pool: &AttributePool) -> Option<String> {
    let (_, value) = resolve_table_attribute(run, pool)?;
    if value.is_empty() {
        return None;
    }
    match row::export_row(text, value) {
        Ok(markup) => Some(markup),
        Err(err) => {
            log::debug!("table line left to default export handling: {}", err);
            None
        }
    }
}
