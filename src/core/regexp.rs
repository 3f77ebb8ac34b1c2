//! The compiled pattern type
//!
//! A `PosixRegexp` is identified by its source and flags; the engine handle
//! it carries is an implementation detail shared between clones.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::engine::{CompiledRegex, EngineType};
use super::flags::Flags;
use super::match_data::MatchResult;
use super::replace::{self, Replacement};
use super::scan::{self, Matches, ScanItem};
use crate::error::{Error, Result};

struct Inner {
    source: String,
    flags: Flags,
    compiled: CompiledRegex,
    names: Vec<Option<String>>,
}

/// A pattern compiled with POSIX flag conventions.
#[derive(Clone)]
pub struct PosixRegexp {
    inner: Arc<Inner>,
}

impl PosixRegexp {
    /// Compile `source` with no options.
    pub fn new(source: &str) -> Result<Self> {
        Self::compile(source, "")
    }

    /// Compile `source` with an option string (`i`, `m`).
    pub fn compile(source: &str, options: &str) -> Result<Self> {
        Self::build(source, options, None)
    }

    /// Compile with a specific engine instead of the automatic choice.
    pub fn with_engine(source: &str, options: &str, engine: EngineType) -> Result<Self> {
        Self::build(source, options, Some(engine))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(source = %source, options = %options))]
    fn build(source: &str, options: &str, engine: Option<EngineType>) -> Result<Self> {
        let flags = Flags::for_source(source, options)?;
        let compiled = CompiledRegex::build(source, flags, engine)?;
        let names = compiled.capture_names();

        tracing::event!(
            tracing::Level::TRACE,
            operation = "compile",
            engine = %compiled.engine_type(),
            groups = names.len() as u64
        );

        Ok(Self {
            inner: Arc::new(Inner {
                source: source.to_string(),
                flags,
                compiled,
                names,
            }),
        })
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub fn flags(&self) -> Flags {
        self.inner.flags
    }

    /// Option string equivalent of the flags.
    pub fn options(&self) -> String {
        self.inner.flags.to_options()
    }

    pub fn casefold(&self) -> bool {
        self.inner.flags.contains(Flags::ICASE)
    }

    pub fn engine_type(&self) -> EngineType {
        self.inner.compiled.engine_type()
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.inner.compiled.captures_len().saturating_sub(1)
    }

    /// Declared group names in group order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.names.iter().filter_map(|name| name.as_deref())
    }

    /// Index of the group called `name`.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.inner
            .names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))
    }

    pub(crate) fn group_name(&self, index: usize) -> Option<&str> {
        self.inner.names.get(index).and_then(|name| name.as_deref())
    }

    /// Match from the beginning of `subject`.
    pub fn match_str(&self, subject: &str) -> Result<Option<MatchResult>> {
        self.match_at(subject, 0)
    }

    /// Match from byte offset `pos`.
    ///
    /// A negative `pos` counts back from the end of `subject`; one that
    /// reaches before the start yields no match. A `pos` beyond the end is an
    /// error. The search sees only the text from `pos` on, so `^` matches
    /// at `pos`.
    pub fn match_at(&self, subject: &str, pos: isize) -> Result<Option<MatchResult>> {
        let len = subject.len();
        let start = if pos < 0 {
            match len.checked_sub(pos.unsigned_abs()) {
                Some(start) => start,
                None => return Ok(None),
            }
        } else {
            pos as usize
        };

        if start > len {
            return Err(Error::OffsetOutOfRange { pos: start, len });
        }

        self.execute(&Arc::from(subject), start)
    }

    /// Run the engine at `start` against a shared subject.
    pub(crate) fn execute(&self, subject: &Arc<str>, start: usize) -> Result<Option<MatchResult>> {
        if !subject.is_char_boundary(start) {
            return Err(Error::NotCharBoundary { pos: start });
        }

        let groups = self.inner.compiled.captures_at(subject, start)?;
        Ok(groups.map(|groups| MatchResult::new(self.clone(), Arc::clone(subject), groups)))
    }

    /// `===`: whether the pattern matches anywhere in `subject`.
    pub fn is_match(&self, subject: &str) -> Result<bool> {
        Ok(self.match_str(subject)?.is_some())
    }

    /// `=~`: byte offset of the first match.
    pub fn match_position(&self, subject: &str) -> Result<Option<usize>> {
        Ok(self.match_str(subject)?.map(|m| m.span().0))
    }

    /// Iterate over successive matches.
    pub fn matches<'r>(&'r self, subject: &str) -> Matches<'r> {
        Matches::new(self, subject)
    }

    /// Replace the first match using a template such as `"<\1>"`.
    pub fn sub(&self, subject: &str, template: &str) -> Result<String> {
        replace::sub(self, subject, Replacement::template(template)?)
    }

    /// Replace every match using a template.
    pub fn gsub(&self, subject: &str, template: &str) -> Result<String> {
        replace::gsub(self, subject, Replacement::template(template)?)
    }

    /// Replace the first match with the output of `f`.
    pub fn sub_with<F>(&self, subject: &str, f: F) -> Result<String>
    where
        F: FnMut(&MatchResult) -> String,
    {
        replace::sub(self, subject, Replacement::callback(f))
    }

    /// Replace every match with the output of `f`.
    pub fn gsub_with<F>(&self, subject: &str, f: F) -> Result<String>
    where
        F: FnMut(&MatchResult) -> String,
    {
        replace::gsub(self, subject, Replacement::callback(f))
    }

    /// Collect every match.
    pub fn scan<'t>(&self, subject: &'t str) -> Result<Vec<ScanItem<'t>>> {
        scan::scan(self, subject)
    }

    /// Hand every match to `consumer` and return `subject`.
    pub fn scan_with<'t, F>(&self, subject: &'t str, consumer: F) -> Result<&'t str>
    where
        F: FnMut(ScanItem<'t>),
    {
        scan::scan_with(self, subject, consumer)
    }
}

impl PartialEq for PosixRegexp {
    fn eq(&self, other: &Self) -> bool {
        self.inner.source == other.inner.source && self.inner.flags == other.inner.flags
    }
}

impl Eq for PosixRegexp {}

impl Hash for PosixRegexp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.source.hash(state);
        self.inner.flags.hash(state);
    }
}

impl fmt::Debug for PosixRegexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosixRegexp")
            .field("source", &self.inner.source)
            .field("flags", &self.inner.flags)
            .field("engine", &self.engine_type())
            .finish()
    }
}

/// `/source/`, with `/` escaped.
impl fmt::Display for PosixRegexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.inner.source.replace('/', "\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert!(!PosixRegexp::new("((a)?(z)?x)").unwrap().is_match("ZX").unwrap());
        assert!(PosixRegexp::compile("((a)?(z)?x)", "i").unwrap().is_match("ZX").unwrap());
    }

    #[test]
    fn test_dot_and_newline() {
        assert!(!PosixRegexp::compile("z.z", "i").unwrap().is_match("z\nz").unwrap());
        assert!(PosixRegexp::compile("z.z", "im").unwrap().is_match("z\nz").unwrap());
    }

    #[test]
    fn test_match_at_offsets() {
        let re = PosixRegexp::new("5").unwrap();
        assert!(re.match_at("123456789", 4).unwrap().is_some());
        assert!(re.match_at("123456789", 5).unwrap().is_none());
        assert!(re.match_at("123456789", -4).unwrap().is_none());
        assert!(re.match_at("123456789", -5).unwrap().is_some());
        assert!(re.match_at("123456789", -0x0100_0000).unwrap().is_none());
        assert!(PosixRegexp::new("z.z").unwrap().match_at("zzz", 1).unwrap().is_none());
    }

    #[test]
    fn test_match_at_anchors_caret_at_offset() {
        let re = PosixRegexp::new("^a").unwrap();
        let m = re.match_at("xab", 1).unwrap().unwrap();
        assert_eq!(m.span(), (1, 2));
        assert_eq!(m.pre_match(), "x");
        assert!(re.match_at("xab", 0).unwrap().is_none());
    }

    #[test]
    fn test_match_at_past_end() {
        let re = PosixRegexp::new("5").unwrap();
        assert_eq!(
            re.match_at("123", 4).unwrap_err(),
            Error::OffsetOutOfRange { pos: 4, len: 3 }
        );
    }

    #[test]
    fn test_match_at_inside_character() {
        let re = PosixRegexp::new("x").unwrap();
        assert_eq!(re.match_at("éx", 1).unwrap_err(), Error::NotCharBoundary { pos: 1 });
    }

    #[test]
    fn test_equality_is_source_and_flags() {
        let a = PosixRegexp::new("z.z").unwrap();
        let b = PosixRegexp::compile("z.z", "").unwrap();
        let c = PosixRegexp::compile("z.z", "mi").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_match_position() {
        let re = PosixRegexp::new("z.z").unwrap();
        assert_eq!(re.match_position("azz").unwrap(), None);
        assert_eq!(re.match_position("azzz").unwrap(), Some(1));
        assert_eq!(re.match_position("zzz").unwrap(), Some(0));
        assert_eq!(PosixRegexp::new("y?").unwrap().match_position("zzz").unwrap(), Some(0));
    }

    #[test]
    fn test_accessors() {
        let re = PosixRegexp::compile("((a)?(z)?x)", "i").unwrap();
        assert_eq!(re.source(), "((a)?(z)?x)");
        assert!(re.casefold());
        assert_eq!(re.options(), "i");
        assert_eq!(re.group_count(), 3);
    }

    #[test]
    fn test_display_escapes_slash() {
        assert_eq!(PosixRegexp::new("a/b").unwrap().to_string(), "/a\\/b/");
    }

    #[test]
    fn test_anchors() {
        assert!(PosixRegexp::new("^$").unwrap().is_match("").unwrap());
        assert!(PosixRegexp::new("c?").unwrap().is_match("").unwrap());
        assert!(!PosixRegexp::new("((a)?(z)?x)").unwrap().is_match("z").unwrap());
    }

    #[test]
    fn test_unsupported_flag() {
        assert_eq!(
            PosixRegexp::compile("a", "e").unwrap_err(),
            Error::UnsupportedFlag('e')
        );
    }
}
