//! Row identity and payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity and shape of one table row.
///
/// Minted once per source row at import time and carried verbatim inside the
/// line's marker token from then on; the descriptor is never mutated.
/// Changing a table's shape means re-importing or a higher-level edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDescriptor {
    /// Logical table this row belongs to. Shared by all rows of one source
    /// table; unique only within one import pass.
    #[serde(rename = "tblId")]
    pub table_id: String,

    /// Row position within the table.
    pub row: u32,

    /// Number of cells the row carries.
    pub cols: u32,

    /// Table-wide style properties, when present.
    #[serde(
        rename = "tblProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<Map<String, Value>>,

    /// Fields this version does not recognize. Preserved so that a
    /// decode/re-encode round trip never drops data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RowDescriptor {
    /// Create a descriptor for a row with the given shape.
    pub fn new(table_id: impl Into<String>, row: u32, cols: u32) -> Self {
        Self {
            table_id: table_id.into(),
            row,
            cols,
            properties: None,
            extra: Map::new(),
        }
    }

    /// Attach table-wide style properties.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Renderer payload: the cell text of one row plus optional table-wide
/// style properties.
///
/// The renderer only consumes the first entry of `payload`: one invocation
/// renders one row; multi-row tables are reconstructed line by line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPayload {
    /// Cell text, one inner vector per row.
    pub payload: Vec<Vec<String>>,

    /// Table-wide style properties, merged over the renderer defaults.
    #[serde(
        rename = "tblProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tbl_properties: Option<Map<String, Value>>,
}

impl RowPayload {
    /// Create a payload from one row of cell text.
    pub fn from_cells<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            payload: vec![cells.into_iter().map(Into::into).collect()],
            tbl_properties: None,
        }
    }

    /// The cell text of the row this payload renders.
    pub fn cells(&self) -> &[String] {
        self.payload.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_json_shape() {
        let descriptor = RowDescriptor::new("t1", 2, 3);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json, json!({"tblId": "t1", "row": 2, "cols": 3}));
    }

    #[test]
    fn test_descriptor_preserves_extra_fields() {
        let source = json!({"tblId": "t1", "row": 0, "cols": 1, "vNext": true});
        let descriptor: RowDescriptor = serde_json::from_value(source.clone()).unwrap();

        assert_eq!(descriptor.extra.get("vNext"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&descriptor).unwrap(), source);
    }

    #[test]
    fn test_payload_cells() {
        let payload = RowPayload::from_cells(["A", "B"]);
        assert_eq!(payload.cells(), ["A", "B"]);

        let empty = RowPayload {
            payload: Vec::new(),
            tbl_properties: None,
        };
        assert!(empty.cells().is_empty());
    }

    #[test]
    fn test_payload_parses_wire_shape() {
        let payload: RowPayload =
            serde_json::from_str(r#"{"payload":[["x","y"]],"tblProperties":{"width":50}}"#)
                .unwrap();
        assert_eq!(payload.cells(), ["x", "y"]);
        assert_eq!(
            payload.tbl_properties.unwrap().get("width"),
            Some(&json!(50))
        );
    }
}
