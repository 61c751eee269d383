//! Attribute pool lookup and attribute-run parsing.
//!
//! The collaborative engine stores line attributes out of band: a per-line
//! run string references numbered entries in a document-wide pool. This
//! module holds a read-only view of that pool and the little bit of run
//! parsing the export dispatcher needs. Pool allocation itself belongs to
//! the host.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Host-provided mapping from attribute numbers to `[name, value]` pairs.
///
/// Deserializes directly from the host's pool dump shape:
///
/// ```json
/// {"numToAttrib": {"0": ["author", "a.x7"], "5": ["tbljson", "{...}"]}}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributePool {
    #[serde(rename = "numToAttrib", default)]
    num_to_attrib: HashMap<u32, (String, String)>,
}

impl AttributePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pool from its JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Other(format!("invalid attribute pool: {}", e)))
    }

    /// Register an attribute under a number.
    pub fn insert(&mut self, num: u32, name: impl Into<String>, value: impl Into<String>) {
        self.num_to_attrib.insert(num, (name.into(), value.into()));
    }

    /// Look up the `[name, value]` pair for an attribute number.
    pub fn get(&self, num: u32) -> Option<(&str, &str)> {
        self.num_to_attrib
            .get(&num)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of pooled attributes.
    pub fn len(&self) -> usize {
        self.num_to_attrib.len()
    }

    /// Whether the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.num_to_attrib.is_empty()
    }
}

/// Decode the first attribute-application marker in an attribute run.
///
/// Runs encode applications as `*<index>` segments with the index in
/// base 36; only the first one matters for table resolution.
pub fn first_attribute_index(run: &str) -> Option<u32> {
    let pattern = Regex::new(r"\*([0-9a-z]+)").unwrap();
    let caps = pattern.captures(run)?;
    u32::from_str_radix(&caps[1], 36).ok()
}
