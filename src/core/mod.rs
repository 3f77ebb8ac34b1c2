//! Pattern compilation, match results, templates and the substitution driver

pub mod cache;
pub mod engine;
pub mod flags;
pub mod match_data;
pub mod quote;
pub mod regexp;
pub mod replace;
pub mod scan;
pub mod template;

// Re-export commonly used types
pub use cache::TemplateCache;
pub use engine::EngineType;
pub use flags::Flags;
pub use match_data::MatchResult;
pub use quote::{escape, quote, quote_pattern};
pub use regexp::PosixRegexp;
pub use replace::{gsub, gsub_in_place, gsub_report, sub, sub_in_place, Replacement};
pub use scan::{scan, scan_with, Matches, ScanItem};
pub use template::{ReplacementTemplate, Token};
