//! Row style properties with layered precedence.

use serde_json::{Map, Value};

const DEFAULT_BORDER_WIDTH: f64 = 1.0;
const DEFAULT_WIDTH: f64 = 100.0;

/// Merged style properties for rendering one row.
///
/// Precedence is strictly ordered and applied key by key: built-in defaults,
/// then the payload's table-wide `tblProperties`, then per-call overrides.
/// Unrecognized keys are carried along; the style builder reads only the
/// keys it understands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowProperties {
    values: Map<String, Value>,
}

impl RowProperties {
    /// The built-in defaults: `borderWidth: 1`, `width: 100`.
    pub fn defaults() -> Self {
        let mut values = Map::new();
        values.insert("borderWidth".to_string(), Value::from(1));
        values.insert("width".to_string(), Value::from(100));
        Self { values }
    }

    /// Build the merged properties for one render call.
    pub fn merged(
        table_properties: Option<&Map<String, Value>>,
        overrides: Option<&Map<String, Value>>,
    ) -> Self {
        let mut props = Self::defaults();
        if let Some(layer) = table_properties {
            props.layer(layer);
        }
        if let Some(layer) = overrides {
            props.layer(layer);
        }
        props
    }

    /// Apply one layer of overrides; later layers win key by key.
    pub fn layer(&mut self, overrides: &Map<String, Value>) {
        for (key, value) in overrides {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Look up a raw property value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Cell border width in pixels.
    pub fn border_width(&self) -> f64 {
        self.number("borderWidth").unwrap_or(DEFAULT_BORDER_WIDTH)
    }

    /// Cell border color, when one was set.
    pub fn border_color(&self) -> Option<&str> {
        self.values.get("borderColor").and_then(Value::as_str)
    }

    /// Overall table width as a percentage.
    pub fn width(&self) -> f64 {
        self.number("width").unwrap_or(DEFAULT_WIDTH)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }
}
