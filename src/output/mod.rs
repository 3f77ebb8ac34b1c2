//! Report types and JSON formatting for matches and substitutions

pub mod json;
pub mod types;

pub use json::{format_json, format_json_compact};
pub use types::*;
