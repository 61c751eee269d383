//! HTML table transduction into token-bearing line elements.
//!
//! Each `<table>` in an imported document becomes a run of line containers,
//! one per row, whose class list carries the encoded row descriptor and
//! whose content is the row's cell markup joined by [`CELL_DELIMITER`].
//! Tables are processed independently and in document order; one broken
//! table never takes its siblings down with it.

use std::fs;
use std::path::Path;

use markup5ever_rcdom::Handle;
use rand::distr::Alphanumeric;
use rand::Rng;

use super::dom;
use super::{DocumentImporter, ImportOptions, ImportOutcome};
use crate::codec;
use crate::error::{Error, Result};
use crate::model::RowDescriptor;
use crate::token;

/// Delimiter separating cell markup within a line's text payload.
pub const CELL_DELIMITER: char = ',';

/// Importer converting `<table>` elements in HTML files into table lines.
#[derive(Debug, Clone, Default)]
pub struct HtmlImporter {
    _private: (),
}

impl HtmlImporter {
    /// Create a new HTML importer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Async variant of the import hook. File reads and writes are the only
    /// suspension points, awaited sequentially.
    #[cfg(feature = "async")]
    pub async fn import_async(
        &self,
        source: &Path,
        destination: &Path,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let original = tokio::fs::read_to_string(source).await?;
        match transform_html(&original, options) {
            Ok(Some(mutated)) => {
                if options.write_back {
                    tokio::fs::write(source, &mutated).await?;
                }
                if destination != source {
                    tokio::fs::write(destination, &mutated).await?;
                }
                Ok(ImportOutcome::Handled { modified: true })
            }
            Ok(None) => {
                if destination != source {
                    tokio::fs::write(destination, &original).await?;
                }
                Ok(ImportOutcome::Handled { modified: false })
            }
            Err(err) => {
                if destination != source {
                    if let Err(copy_err) = tokio::fs::write(destination, &original).await {
                        log::warn!(
                            "copy-through to {} failed: {}",
                            destination.display(),
                            copy_err
                        );
                    }
                }
                Err(Error::Import(format!("table conversion failed: {}", err)))
            }
        }
    }
}

impl DocumentImporter for HtmlImporter {
    fn supported_extensions(&self) -> &[&str] {
        &["htm", "html"]
    }

    fn name(&self) -> &str {
        "html"
    }

    fn import(
        &self,
        source: &Path,
        destination: &Path,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let original = fs::read_to_string(source)?;
        match transform_html(&original, options) {
            Ok(Some(mutated)) => {
                if options.write_back {
                    fs::write(source, &mutated)?;
                }
                if destination != source {
                    fs::write(destination, &mutated)?;
                }
                Ok(ImportOutcome::Handled { modified: true })
            }
            Ok(None) => {
                if destination != source {
                    fs::write(destination, &original)?;
                }
                Ok(ImportOutcome::Handled { modified: false })
            }
            Err(err) => {
                // Downstream default handling still needs a usable file.
                if destination != source {
                    if let Err(copy_err) = fs::write(destination, &original) {
                        log::warn!(
                            "copy-through to {} failed: {}",
                            destination.display(),
                            copy_err
                        );
                    }
                }
                Err(Error::Import(format!("table conversion failed: {}", err)))
            }
        }
    }
}

/// Convert every `<table>` in `source` into table lines.
///
/// Returns the mutated document, or `None` when no replacement occurred
/// (no tables, or only parentless ones).
pub fn transform_html(source: &str, options: &ImportOptions) -> Result<Option<String>> {
    let dom = dom::parse_html(source);
    let tables = dom::descendants_named(&dom.document, "table");

    let mut replaced = false;
    for table in &tables {
        if transform_table(table, options)? {
            replaced = true;
        }
    }

    if !replaced {
        return Ok(None);
    }
    dom::serialize_document(&dom).map(Some)
}

fn transform_table(table: &Handle, options: &ImportOptions) -> Result<bool> {
    let Some(parent) = dom::parent_of(table) else {
        log::debug!("table has no parent node, leaving it in place");
        return Ok(false);
    };

    let table_id = generate_table_id(options.id_length);
    let rows = dom::rows_of(table);

    let mut lines = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let cells = dom::cells_of(row);
        if cells.is_empty() && dom::text_content(row).trim().is_empty() {
            log::debug!("skipping empty row {} of table {}", index, table_id);
            continue;
        }

        let descriptor = RowDescriptor::new(table_id.as_str(), index as u32, cells.len() as u32);
        let encoded = codec::encode(&descriptor)?;

        let mut parts = Vec::with_capacity(cells.len());
        for cell in &cells {
            parts.push(escape_delimiter(&dom::inner_html(cell)?));
        }
        let joined = parts.join(&CELL_DELIMITER.to_string());

        lines.push(line_element(&encoded, &joined));
    }

    let replacements = if lines.is_empty() {
        let reason = if rows.is_empty() { "no rows" } else { "empty rows" };
        vec![placeholder(&table_id, reason)]
    } else {
        lines
    };

    Ok(dom::replace_with(&parent, table, replacements))
}

/// One line container: cell markup joined by the delimiter, the encoded
/// descriptor riding in the class list.
fn line_element(encoded: &str, joined_markup: &str) -> Handle {
    let class = token::marker_class(encoded);
    let line = dom::element("div", vec![("class", &class)]);
    for node in dom::parse_inline(joined_markup) {
        dom::append(&line, node);
    }
    line
}

fn placeholder(table_id: &str, reason: &str) -> Handle {
    let p = dom::element("p", Vec::new());
    dom::append(&p, dom::text(&format!("[table {}: {}]", table_id, reason)));
    p
}

fn generate_table_id(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Escape literal delimiter characters inside cell markup so they cannot be
/// misparsed as a cell boundary. Backslash is the escape character and is
/// escaped itself.
pub fn escape_delimiter(markup: &str) -> String {
    markup
        .replace('\\', "\\\\")
        .replace(CELL_DELIMITER, &format!("\\{}", CELL_DELIMITER))
}

/// Split a line's text payload into cell markup, undoing
/// [`escape_delimiter`].
pub fn split_cells(payload: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = payload.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => current.push(next),
                None => current.push('\\'),
            },
            c if c == CELL_DELIMITER => cells.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    cells.push(current);
    cells
}
