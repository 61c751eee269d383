//! HTML import hooks and extension dispatch.
//!
//! The host hands every uploaded file to the import hook as
//! `(source, extension, destination)`. The registry dispatches on the
//! extension: handled files are transformed and land at the destination,
//! everything else is declined with no side effects so the host's default
//! pipeline takes over.
//!
//! # Example
//!
//! ```no_run
//! use padtab::import::{ImporterRegistry, ImportOptions, ImportOutcome};
//! use std::path::Path;
//!
//! fn main() -> padtab::Result<()> {
//!     let registry = ImporterRegistry::with_defaults();
//!     let outcome = registry.import(
//!         Path::new("upload.html"),
//!         "html",
//!         Path::new("import.html"),
//!         &ImportOptions::default(),
//!     )?;
//!     if outcome == ImportOutcome::Declined {
//!         // fall back to the host's own handling
//!     }
//!     Ok(())
//! }
//! ```

mod dom;
mod html;

pub use html::{escape_delimiter, split_cells, transform_html, HtmlImporter, CELL_DELIMITER};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

/// Options for document import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Length of generated table ids.
    pub id_length: usize,

    /// Persist the transformed document back to the source path.
    pub write_back: bool,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated table id length.
    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length;
        self
    }

    /// Enable or disable writing the transformed document back to the
    /// source path.
    pub fn with_write_back(mut self, write_back: bool) -> Self {
        self.write_back = write_back;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            id_length: 8,
            write_back: true,
        }
    }
}

/// Outcome of an import hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The file was handled. `modified` reports whether the destination
    /// differs from a trivial copy of the source.
    Handled {
        /// Whether any table was converted.
        modified: bool,
    },

    /// The extension is not handled; the host's default pipeline applies.
    Declined,
}

impl ImportOutcome {
    /// Whether the destination differs from a trivial copy.
    pub fn is_modified(&self) -> bool {
        matches!(self, ImportOutcome::Handled { modified: true })
    }
}

/// Trait for file importers.
///
/// Implement this trait to hook a new file format into the import dispatch.
pub trait DocumentImporter: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this importer.
    fn name(&self) -> &str;

    /// Import a file, leaving the result at `destination`.
    fn import(
        &self,
        source: &Path,
        destination: &Path,
        options: &ImportOptions,
    ) -> Result<ImportOutcome>;

    /// Check if this importer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for importers, keyed by file extension.
pub struct ImporterRegistry {
    importers: HashMap<String, Arc<dyn DocumentImporter>>,
    by_name: HashMap<String, Arc<dyn DocumentImporter>>,
}

impl ImporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            importers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default importers (HTML).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlImporter::new()));
        registry
    }

    /// Register an importer for all its supported extensions.
    pub fn register(&mut self, importer: Arc<dyn DocumentImporter>) {
        for ext in importer.supported_extensions() {
            self.importers.insert(ext.to_lowercase(), importer.clone());
        }
        self.by_name.insert(importer.name().to_lowercase(), importer);
    }

    /// Get an importer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentImporter>> {
        self.importers.get(&ext.to_lowercase()).cloned()
    }

    /// Get an importer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentImporter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is handled.
    pub fn supports(&self, ext: &str) -> bool {
        self.importers.contains_key(&ext.to_lowercase())
    }

    /// All handled extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.importers.keys().map(|s| s.as_str()).collect()
    }

    /// Dispatch an import by extension.
    ///
    /// An unhandled extension is declined, not an error: the host falls
    /// back to its default pipeline and no file is touched.
    pub fn import(
        &self,
        source: &Path,
        extension: &str,
        destination: &Path,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        match self.get_by_extension(extension) {
            Some(importer) => importer.import(source, destination, options),
            None => Ok(ImportOutcome::Declined),
        }
    }
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
