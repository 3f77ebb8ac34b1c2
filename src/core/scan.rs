//! `scan` and the match iterator
//!
//! Walks the subject with the same cursor rule as `gsub`: continue from the
//! end of each match, and step over one character after an empty match.

use std::sync::Arc;

use super::match_data::MatchResult;
use super::regexp::PosixRegexp;
use super::replace::advance;
use crate::error::Result;

/// What `scan` yields per match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem<'t> {
    /// The whole match, for patterns without groups.
    Whole(&'t str),
    /// Every capture group, for patterns with at least one.
    Captures(Vec<Option<&'t str>>),
}

impl<'t> ScanItem<'t> {
    fn from_match(m: &MatchResult, subject: &'t str) -> Self {
        match m.spans() {
            [_, groups @ ..] if !groups.is_empty() => ScanItem::Captures(
                groups
                    .iter()
                    .map(|span| span.map(|(s, e)| &subject[s..e]))
                    .collect(),
            ),
            _ => {
                let (start, end) = m.span();
                ScanItem::Whole(&subject[start..end])
            }
        }
    }
}

/// Successive matches of a pattern over one subject
pub struct Matches<'r> {
    pattern: &'r PosixRegexp,
    text: Arc<str>,
    cursor: usize,
    done: bool,
}

impl<'r> Matches<'r> {
    pub(crate) fn new(pattern: &'r PosixRegexp, subject: &str) -> Self {
        Self {
            pattern,
            text: Arc::from(subject),
            cursor: 0,
            done: false,
        }
    }

    fn step(&mut self) -> Result<Option<MatchResult>> {
        if self.cursor > self.text.len() {
            return Ok(None);
        }
        let Some(m) = self.pattern.execute(&self.text, self.cursor)? else {
            return Ok(None);
        };
        let (start, end) = m.span();
        if start < self.cursor {
            return Ok(None);
        }

        tracing::event!(
            tracing::Level::TRACE,
            operation = "scan",
            cursor = self.cursor as u64,
            start = start as u64,
            end = end as u64
        );

        self.cursor = advance(&self.text, start, end).0;
        Ok(Some(m))
    }
}

impl Iterator for Matches<'_> {
    type Item = Result<MatchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.step().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl std::iter::FusedIterator for Matches<'_> {}

/// Collect one item per match.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, subject_len = subject.len() as u64))]
pub fn scan<'t>(pattern: &PosixRegexp, subject: &'t str) -> Result<Vec<ScanItem<'t>>> {
    pattern
        .matches(subject)
        .map(|m| m.map(|m| ScanItem::from_match(&m, subject)))
        .collect()
}

/// Deliver one item per match to `consumer`, in order, and return `subject`.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, subject_len = subject.len() as u64))]
pub fn scan_with<'t, F>(pattern: &PosixRegexp, subject: &'t str, mut consumer: F) -> Result<&'t str>
where
    F: FnMut(ScanItem<'t>),
{
    for m in pattern.matches(subject) {
        consumer(ScanItem::from_match(&m?, subject));
    }
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(source: &str) -> PosixRegexp {
        PosixRegexp::new(source).unwrap()
    }

    #[test]
    fn test_scan_whole_matches() {
        assert_eq!(
            scan(&re("...."), "abcdefghijklmn").unwrap(),
            vec![
                ScanItem::Whole("abcd"),
                ScanItem::Whole("efgh"),
                ScanItem::Whole("ijkl")
            ]
        );
    }

    #[test]
    fn test_scan_captures() {
        assert_eq!(
            scan(&re(".(.)(..)"), "abcdefghijklmn").unwrap(),
            vec![
                ScanItem::Captures(vec![Some("b"), Some("cd")]),
                ScanItem::Captures(vec![Some("f"), Some("gh")]),
                ScanItem::Captures(vec![Some("j"), Some("kl")]),
            ]
        );
    }

    #[test]
    fn test_scan_keeps_absent_groups() {
        assert_eq!(
            scan(&re("(a)|(b)"), "ab").unwrap(),
            vec![
                ScanItem::Captures(vec![Some("a"), None]),
                ScanItem::Captures(vec![None, Some("b")]),
            ]
        );
    }

    #[test]
    fn test_scan_with_consumer() {
        let mut seen = Vec::new();
        let subject = "abcde";
        let returned = scan_with(&re(".(.)(..)"), subject, |item| seen.push(item)).unwrap();
        assert_eq!(returned, subject);
        assert_eq!(seen, vec![ScanItem::Captures(vec![Some("b"), Some("cd")])]);
    }

    #[test]
    fn test_scan_with_delivers_in_match_order() {
        let mut calls = Vec::new();
        let subject = "a1b22c333";
        scan_with(&re("([a-z])([0-9]+)"), subject, |item| {
            calls.push((calls.len(), item));
        })
        .unwrap();

        assert_eq!(
            calls,
            vec![
                (0, ScanItem::Captures(vec![Some("a"), Some("1")])),
                (1, ScanItem::Captures(vec![Some("b"), Some("22")])),
                (2, ScanItem::Captures(vec![Some("c"), Some("333")])),
            ]
        );
    }

    #[test]
    fn test_scan_with_matches_collected_scan() {
        let pattern = re("[0-9]+|()");
        let subject = "x12y3";
        let mut streamed = Vec::new();
        scan_with(&pattern, subject, |item| streamed.push(item)).unwrap();
        assert_eq!(streamed, scan(&pattern, subject).unwrap());
        assert_eq!(streamed.len(), 5);
    }

    #[test]
    fn test_scan_empty_matches_terminate() {
        let subject = "abc";
        let items = scan(&re("x*"), subject).unwrap();
        assert_eq!(items.len(), subject.len() + 1);
        assert!(items.iter().all(|item| *item == ScanItem::Whole("")));
    }

    #[test]
    fn test_matches_iterator_is_lazy_and_fused() {
        let pattern = re("[0-9]+");
        let mut matches = pattern.matches("a1b22");
        assert_eq!(matches.next().unwrap().unwrap().as_str(), "1");
        assert_eq!(matches.next().unwrap().unwrap().as_str(), "22");
        assert!(matches.next().is_none());
        assert!(matches.next().is_none());
    }
}
