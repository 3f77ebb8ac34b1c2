//! POSIX compile flags
//!
//! Bit values follow glibc's `<regex.h>` so they read the same in logs and
//! reports as they would next to a C `regcomp` call.

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// Extended syntax. Always set.
        const EXTENDED = 0b0001;
        /// Case-insensitive matching.
        const ICASE = 0b0010;
        /// `.` does not match a newline and `^`/`$` match at line boundaries.
        const NEWLINE = 0b0100;
        /// Set for an empty source, which has no groups to report.
        const NOSUB = 0b1000;
    }
}

impl Flags {
    /// Parse an option string such as `"i"` or `"im"`.
    ///
    /// `NEWLINE` is on unless `m` is given. Repeated letters are accepted.
    pub fn from_options(options: &str) -> Result<Self> {
        let mut flags = Flags::NEWLINE;
        for c in options.chars() {
            match c {
                'i' => flags |= Flags::ICASE,
                'm' => flags.remove(Flags::NEWLINE),
                other => return Err(Error::UnsupportedFlag(other)),
            }
        }
        Ok(flags)
    }

    /// Flags for a pattern source compiled with `options`.
    pub fn for_source(source: &str, options: &str) -> Result<Self> {
        let mut flags = Self::from_options(options)? | Flags::EXTENDED;
        if source.is_empty() {
            flags |= Flags::NOSUB;
        }
        Ok(flags)
    }

    /// The option string that reproduces these flags.
    pub fn to_options(self) -> String {
        let mut options = String::new();
        if self.contains(Flags::ICASE) {
            options.push('i');
        }
        if !self.contains(Flags::NEWLINE) {
            options.push('m');
        }
        options
    }

    /// Inline flag group understood by both engines.
    ///
    /// Never empty: a pattern always carries either `m` or `s`.
    pub(crate) fn inline_prefix(self) -> &'static str {
        match (
            self.contains(Flags::ICASE),
            self.contains(Flags::NEWLINE),
        ) {
            (true, true) => "(?im)",
            (true, false) => "(?is)",
            (false, true) => "(?m)",
            (false, false) => "(?s)",
        }
    }
}
