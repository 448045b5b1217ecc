//! Response decoder module
//!
//! # Overview
//!
//! The decode module turns a raw page body into its item list and declared
//! total page count, and offers the path/value helpers used to map items into
//! typed records. Field names differ between API versions, so every path is
//! configuration.

mod decoders;
mod fields;
mod types;

pub use decoders::JsonPageDecoder;
pub use fields::{extract_path, value_as_f64, value_as_string, value_as_u64};
pub use types::{DecodedPage, RecordDecoder};
