//! Decoder types and traits

use crate::error::Result;
use serde_json::Value;

/// Items and paging metadata pulled out of one response body
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPage {
    /// Item records in upstream order
    pub items: Vec<Value>,
    /// Declared total page count (1 when absent or unparsable)
    pub total_pages: u32,
}

impl DecodedPage {
    /// Create a decoded page
    pub fn new(items: Vec<Value>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }
}

/// Decodes a response body into a page
pub trait RecordDecoder: Send + Sync {
    /// Decode a raw body; malformed bodies are an `UnexpectedFormat` error
    fn decode(&self, body: &str) -> Result<DecodedPage>;
}
