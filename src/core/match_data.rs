//! Match results
//!
//! A `MatchResult` records one successful match: the pattern, the subject
//! and a byte span per group. Group text is always derived from the spans on
//! demand. A group that did not take part in the match is `None`, which is
//! distinct from a group that matched the empty string.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use super::engine::GroupSpan;
use super::regexp::PosixRegexp;
use crate::error::{Error, Result};
use crate::output::{CaptureReport, MatchReport};

/// One successful match of a pattern against a subject.
#[derive(Clone)]
pub struct MatchResult {
    pattern: PosixRegexp,
    subject: Arc<str>,
    groups: Vec<GroupSpan>,
}

impl MatchResult {
    /// Only the engine bridge builds these. Group 0 is always present.
    pub(crate) fn new(pattern: PosixRegexp, subject: Arc<str>, groups: Vec<GroupSpan>) -> Self {
        debug_assert!(matches!(groups.first(), Some(Some(_))));
        debug_assert!(groups
            .iter()
            .flatten()
            .all(|&(start, end)| start <= end && end <= subject.len()));

        Self {
            pattern,
            subject,
            groups,
        }
    }

    pub fn pattern(&self) -> &PosixRegexp {
        &self.pattern
    }

    /// The full text that was searched.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Number of groups, including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false: a match has at least the whole-match group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Byte span of the whole match.
    pub fn span(&self) -> (usize, usize) {
        self.groups[0].unwrap_or((0, 0))
    }

    pub(crate) fn spans(&self) -> &[GroupSpan] {
        &self.groups
    }

    fn check_index(&self, index: usize) -> Result<GroupSpan> {
        self.groups
            .get(index)
            .copied()
            .ok_or(Error::GroupIndexRange {
                index,
                len: self.groups.len(),
            })
    }

    fn text_of(&self, span: GroupSpan) -> Option<&str> {
        span.map(|(start, end)| &self.subject[start..end])
    }

    /// Text of group `index`, `None` when the group did not participate.
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        Ok(self.text_of(self.check_index(index)?))
    }

    /// Start offset of group `index`.
    pub fn begin(&self, index: usize) -> Result<Option<usize>> {
        Ok(self.check_index(index)?.map(|(start, _)| start))
    }

    /// End offset of group `index`.
    pub fn end(&self, index: usize) -> Result<Option<usize>> {
        Ok(self.check_index(index)?.map(|(_, end)| end))
    }

    /// `(begin, end)` of group `index`.
    pub fn offset(&self, index: usize) -> Result<(Option<usize>, Option<usize>)> {
        let span = self.check_index(index)?;
        Ok((span.map(|(s, _)| s), span.map(|(_, e)| e)))
    }

    /// Like [`offset`](Self::offset) but counted in characters, for display.
    pub fn char_offset(&self, index: usize) -> Result<(Option<usize>, Option<usize>)> {
        let span = self.check_index(index)?;
        let chars = |at: usize| self.subject[..at].chars().count();
        Ok((span.map(|(s, _)| chars(s)), span.map(|(_, e)| chars(e))))
    }

    /// Text of the whole match.
    pub fn as_str(&self) -> &str {
        let (start, end) = self.span();
        &self.subject[start..end]
    }

    /// Text before the whole match.
    pub fn pre_match(&self) -> &str {
        &self.subject[..self.span().0]
    }

    /// Text after the whole match.
    pub fn post_match(&self) -> &str {
        &self.subject[self.span().1..]
    }

    /// Text of every group except the whole match.
    pub fn captures(&self) -> Vec<Option<&str>> {
        self.groups[1..].iter().map(|&span| self.text_of(span)).collect()
    }

    /// Text of every group, the whole match first.
    pub fn to_array(&self) -> Vec<Option<&str>> {
        self.groups.iter().map(|&span| self.text_of(span)).collect()
    }

    /// Text of the highest-numbered capture group that participated.
    pub fn last_capture(&self) -> Option<&str> {
        self.groups[1..]
            .iter()
            .rev()
            .find_map(|&span| self.text_of(span))
    }

    /// Text of the group called `name`.
    pub fn named(&self, name: &str) -> Result<Option<&str>> {
        let index = self
            .pattern
            .group_index(name)
            .ok_or_else(|| Error::UndefinedGroupName {
                name: name.to_string(),
            })?;
        self.get(index)
    }

    /// Group names declared by the pattern.
    pub fn names(&self) -> Vec<&str> {
        self.pattern.names().collect()
    }

    pub fn values_at(&self, indices: &[usize]) -> Result<Vec<Option<&str>>> {
        indices.iter().map(|&index| self.get(index)).collect()
    }

    /// Groups within `range`, clamped to the groups that exist.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Vec<Option<&str>> {
        let len = self.groups.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .clamp(start, len);

        self.groups[start..end]
            .iter()
            .map(|&span| self.text_of(span))
            .collect()
    }

    /// Serializable snapshot of this match.
    pub fn to_report(&self) -> MatchReport {
        let (start, end) = self.span();
        MatchReport {
            text: self.as_str().to_string(),
            start,
            end,
            captures: self
                .groups
                .iter()
                .enumerate()
                .skip(1)
                .map(|(group, &span)| CaptureReport {
                    group,
                    name: self.pattern.group_name(group).map(str::to_string),
                    text: self.text_of(span).map(str::to_string),
                    start: span.map(|(s, _)| s),
                    end: span.map(|(_, e)| e),
                })
                .collect(),
        }
    }
}

/// Matches compare by pattern, subject and group text, not by offsets.
impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.subject == other.subject
            && self.to_array() == other.to_array()
    }
}

impl Eq for MatchResult {}

impl Hash for MatchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
        self.subject.hash(state);
        self.to_array().hash(state);
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("pattern", &self.pattern.source())
            .field("groups", &self.groups)
            .finish()
    }
}

/// `#<MatchData "zx" 1:"zx" 2:nil 3:"z">`
impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<MatchData {:?}", self.as_str())?;
        for (index, text) in self.to_array().into_iter().enumerate().skip(1) {
            match self.pattern.group_name(index) {
                Some(name) => write!(f, " {name}:")?,
                None => write!(f, " {index}:")?,
            }
            match text {
                Some(text) => write!(f, "{text:?}")?,
                None => write!(f, "nil")?,
            }
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zx() -> MatchResult {
        PosixRegexp::new("((a)?(z)?x)?")
            .unwrap()
            .match_str("zx")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_group_text() {
        let m = zx();
        assert_eq!(m.get(0).unwrap(), Some("zx"));
        assert_eq!(m.get(1).unwrap(), Some("zx"));
        assert_eq!(m.get(2).unwrap(), None);
        assert_eq!(m.get(3).unwrap(), Some("z"));
        assert_eq!(m.get(4), Err(Error::GroupIndexRange { index: 4, len: 4 }));
    }

    #[test]
    fn test_begin_end_offset() {
        let m = zx();
        assert_eq!(m.begin(0).unwrap(), Some(0));
        assert_eq!(m.begin(2).unwrap(), None);
        assert_eq!(m.end(3).unwrap(), Some(1));
        assert_eq!(m.offset(1).unwrap(), (Some(0), Some(2)));
        assert_eq!(m.offset(2).unwrap(), (None, None));
        assert!(m.begin(4).is_err());
        assert!(m.end(4).is_err());
    }

    #[test]
    fn test_captures_and_to_array() {
        let m = zx();
        assert_eq!(m.captures(), vec![Some("zx"), None, Some("z")]);
        assert_eq!(m.to_array(), vec![Some("zx"), Some("zx"), None, Some("z")]);
        assert_eq!(m.len(), 4);
        assert_eq!(m.as_str(), "zx");
        assert_eq!(m.values_at(&[0, 2, 3]).unwrap(), vec![Some("zx"), None, Some("z")]);
        assert_eq!(m.slice(1..=2), vec![Some("zx"), None]);
        assert_eq!(m.slice(3..10), vec![Some("z")]);
        assert!(m.slice(7..).is_empty());
    }

    #[test]
    fn test_pre_and_post_match() {
        let re = PosixRegexp::new("c..").unwrap();
        let m = re.match_str("abcdefg").unwrap().unwrap();
        assert_eq!(m.pre_match(), "ab");
        assert_eq!(m.post_match(), "fg");

        let empty = PosixRegexp::new("c?").unwrap().match_str("").unwrap().unwrap();
        assert_eq!(empty.pre_match(), "");
        assert_eq!(empty.post_match(), "");
        assert_eq!(empty.to_array(), vec![Some("")]);
    }

    #[test]
    fn test_last_capture_skips_absent_groups() {
        let re = PosixRegexp::new("(a)(b)?").unwrap();
        let m = re.match_str("a").unwrap().unwrap();
        assert_eq!(m.last_capture(), Some("a"));

        let none = PosixRegexp::new("x").unwrap().match_str("x").unwrap().unwrap();
        assert_eq!(none.last_capture(), None);
    }

    #[test]
    fn test_named_groups() {
        let re = PosixRegexp::new("(?P<key>[a-z]+)=(?P<value>[0-9]+)?").unwrap();
        let m = re.match_str("width=").unwrap().unwrap();
        assert_eq!(m.named("key").unwrap(), Some("width"));
        assert_eq!(m.named("value").unwrap(), None);
        assert_eq!(m.names(), vec!["key", "value"]);
        assert_eq!(
            m.named("missing"),
            Err(Error::UndefinedGroupName {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_equality_ignores_how_match_was_found() {
        let re = PosixRegexp::new("b").unwrap();
        let first = re.match_str("abab").unwrap().unwrap();
        let second = re.match_at("abab", 2).unwrap().unwrap();
        assert_ne!(first.span(), second.span());
        assert_eq!(first, second);
        assert_eq!(zx(), zx());
    }

    #[test]
    fn test_char_offset() {
        let re = PosixRegexp::new("((ａ)?(ｚ)?ｘ)?").unwrap();
        let m = re.match_str("ｚｘ").unwrap().unwrap();
        assert_eq!(m.offset(3).unwrap(), (Some(0), Some(3)));
        assert_eq!(m.char_offset(3).unwrap(), (Some(0), Some(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(zx().to_string(), r#"#<MatchData "zx" 1:"zx" 2:nil 3:"z">"#);
    }

    #[test]
    fn test_report() {
        let report = zx().to_report();
        assert_eq!(report.text, "zx");
        assert_eq!(report.captures.len(), 3);
        assert_eq!(report.captures[1].text, None);
        assert_eq!(report.captures[2].start, Some(0));
    }
}
