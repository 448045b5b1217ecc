//! Decoder implementations

use super::fields::{extract_path, value_as_u64};
use super::types::{DecodedPage, RecordDecoder};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Page Decoder
// ============================================================================

/// JSON decoder with configurable item and total-pages paths
#[derive(Debug, Clone, Default)]
pub struct JsonPageDecoder {
    /// Path to the item list; `None` means the body itself is the list
    items_path: Option<String>,
    /// Path to the declared total page count
    total_pages_path: Option<String>,
}

impl JsonPageDecoder {
    /// Create a decoder that treats the whole body as the item list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that reads items from a path
    pub fn with_items_path(path: impl Into<String>) -> Self {
        Self {
            items_path: Some(path.into()).filter(|p: &String| !p.trim().is_empty()),
            total_pages_path: None,
        }
    }

    /// Read the total page count from a path
    #[must_use]
    pub fn total_pages_path(mut self, path: impl Into<String>) -> Self {
        self.total_pages_path = Some(path.into()).filter(|p: &String| !p.trim().is_empty());
        self
    }

    /// Extract the item list from a parsed body
    fn extract_items(&self, value: Value) -> Result<Vec<Value>> {
        let items = match &self.items_path {
            Some(path) => extract_path(&value, path).cloned().ok_or_else(|| {
                Error::unexpected_format(format!("missing items field '{path}'"))
            })?,
            None => value,
        };

        match items {
            Value::Array(arr) => Ok(arr),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::unexpected_format(format!(
                "items at '{}' should be an array, found {}",
                self.items_path.as_deref().unwrap_or("$"),
                json_kind(&other)
            ))),
        }
    }

    /// Read the declared total page count, defaulting to 1
    fn extract_total_pages(&self, value: &Value) -> u32 {
        self.total_pages_path
            .as_deref()
            .and_then(|path| extract_path(value, path))
            .and_then(value_as_u64)
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX).max(1))
    }
}

impl RecordDecoder for JsonPageDecoder {
    fn decode(&self, body: &str) -> Result<DecodedPage> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::unexpected_format(format!("Failed to parse JSON: {e}")))?;
        let total_pages = self.extract_total_pages(&value);
        let items = self.extract_items(value)?;
        Ok(DecodedPage::new(items, total_pages))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
