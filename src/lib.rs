//! posix-regexp - POSIX extended regular expressions with `match`, `sub`,
//! `gsub` and `scan`
//!
//! Patterns are compiled with POSIX flag conventions (`i` for
//! case-insensitive, `m` to let `.` cross newlines) and matched by the
//! `regex` crate, or by `fancy-regex` when the pattern uses backreferences.
//!
//! ```
//! use posix_regexp::PosixRegexp;
//!
//! let re = PosixRegexp::new("a(.?b)").unwrap();
//! assert_eq!(
//!     re.gsub("acbabackbacbab", r"@-\0\1").unwrap(),
//!     "@-acbcb@-abbackb@-acbcb@-abb"
//! );
//!
//! let m = re.match_str("xxacb").unwrap().unwrap();
//! assert_eq!(m.pre_match(), "xx");
//! assert_eq!(m.captures(), vec![Some("cb")]);
//! ```

pub mod core;
pub mod error;
pub mod output;

pub use crate::core::{
    escape, gsub, gsub_in_place, gsub_report, quote, quote_pattern, scan, scan_with, sub,
    sub_in_place, EngineType, Flags, Matches, MatchResult, PosixRegexp, Replacement,
    ReplacementTemplate, ScanItem, TemplateCache, Token,
};
pub use error::{CompileTemplateError, Error, Result};
