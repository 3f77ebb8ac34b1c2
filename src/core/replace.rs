//! `sub` and `gsub`
//!
//! The replacement is resolved into a [`Replacement`] once, before any
//! matching, and the driver walks the subject with a byte cursor. After an
//! empty match the character under the cursor is copied through unchanged
//! and the cursor moves past it, so patterns that can match nothing (`()`,
//! `x*`) still make progress and never replace the same position twice.

use std::fmt;
use std::sync::Arc;

use super::match_data::MatchResult;
use super::regexp::PosixRegexp;
use super::template::ReplacementTemplate;
use crate::error::{Error, Result};
use crate::output::ReplaceReport;

/// What each match is replaced with
pub enum Replacement<'a> {
    Template(Arc<ReplacementTemplate>),
    Callback(Box<dyn FnMut(&MatchResult) -> String + 'a>),
}

impl<'a> Replacement<'a> {
    /// Compile a template string.
    pub fn template(spec: &str) -> Result<Self> {
        Ok(Replacement::Template(Arc::new(ReplacementTemplate::compile(
            spec,
        )?)))
    }

    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&MatchResult) -> String + 'a,
    {
        Replacement::Callback(Box::new(f))
    }

    /// Resolve loosely supplied arguments: exactly one of a template or a
    /// callback must be present.
    pub fn from_args<F>(template: Option<&str>, callback: Option<F>) -> Result<Self>
    where
        F: FnMut(&MatchResult) -> String + 'a,
    {
        match (template, callback) {
            (Some(spec), None) => Self::template(spec),
            (None, Some(f)) => Ok(Self::callback(f)),
            (None, None) => Err(Error::Usage(
                "expected a replacement template or a callback".to_string(),
            )),
            (Some(_), Some(_)) => Err(Error::Usage(
                "expected a replacement template or a callback, not both".to_string(),
            )),
        }
    }

    fn append(&mut self, m: &MatchResult, out: &mut String) -> Result<()> {
        match self {
            Replacement::Template(template) => template.render_into(m, out),
            Replacement::Callback(f) => {
                out.push_str(&f(m));
                Ok(())
            }
        }
    }
}

impl From<ReplacementTemplate> for Replacement<'_> {
    fn from(template: ReplacementTemplate) -> Self {
        Replacement::Template(Arc::new(template))
    }
}

impl From<Arc<ReplacementTemplate>> for Replacement<'_> {
    fn from(template: Arc<ReplacementTemplate>) -> Self {
        Replacement::Template(template)
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replacement::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Where the cursor goes after a match spanning `start..end`.
///
/// Returns the new cursor and, for an empty match, the character that was
/// stepped over (none at the end of the text).
pub(crate) fn advance(text: &str, start: usize, end: usize) -> (usize, Option<char>) {
    if start < end {
        return (end, None);
    }
    match text[end..].chars().next() {
        Some(c) => (end + c.len_utf8(), Some(c)),
        None => (end + 1, None),
    }
}

/// Replace the first match. Without a match the subject comes back as is.
pub fn sub(pattern: &PosixRegexp, subject: &str, replacement: Replacement<'_>) -> Result<String> {
    Ok(replace_first(pattern, subject, replacement)?.unwrap_or_else(|| subject.to_string()))
}

/// Replace every match.
pub fn gsub(pattern: &PosixRegexp, subject: &str, replacement: Replacement<'_>) -> Result<String> {
    replace_all(pattern, subject, replacement).map(|(out, _)| out)
}

/// `sub!`: replace the first match in place. Returns whether a match was
/// replaced.
pub fn sub_in_place(
    pattern: &PosixRegexp,
    subject: &mut String,
    replacement: Replacement<'_>,
) -> Result<bool> {
    match replace_first(pattern, subject, replacement)? {
        Some(out) => {
            *subject = out;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// `gsub!`: replace every match in place. Returns whether anything was
/// replaced.
pub fn gsub_in_place(
    pattern: &PosixRegexp,
    subject: &mut String,
    replacement: Replacement<'_>,
) -> Result<bool> {
    let (out, count) = replace_all(pattern, subject, replacement)?;
    if count > 0 {
        *subject = out;
    }
    Ok(count > 0)
}

/// Run `gsub` with a template and describe the outcome.
pub fn gsub_report(pattern: &PosixRegexp, subject: &str, template: &str) -> Result<ReplaceReport> {
    let (result, replacements_made) =
        replace_all(pattern, subject, Replacement::template(template)?)?;

    Ok(ReplaceReport {
        pattern: pattern.to_string(),
        replacement: template.to_string(),
        original: subject.to_string(),
        result,
        replacements_made,
    })
}

#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, subject_len = subject.len() as u64))]
fn replace_first(
    pattern: &PosixRegexp,
    subject: &str,
    mut replacement: Replacement<'_>,
) -> Result<Option<String>> {
    let Some(m) = pattern.match_str(subject)? else {
        return Ok(None);
    };

    let mut out = String::with_capacity(subject.len());
    out.push_str(m.pre_match());
    replacement.append(&m, &mut out)?;
    out.push_str(m.post_match());
    Ok(Some(out))
}

/// Replace all occurrences, returning (new_content, count).
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, subject_len = subject.len() as u64))]
fn replace_all(
    pattern: &PosixRegexp,
    subject: &str,
    mut replacement: Replacement<'_>,
) -> Result<(String, usize)> {
    let text: Arc<str> = Arc::from(subject);
    let mut out = String::with_capacity(subject.len());
    let mut cursor = 0usize;
    let mut count = 0usize;

    while cursor <= text.len() {
        let Some(m) = pattern.execute(&text, cursor)? else {
            break;
        };
        let (start, end) = m.span();
        if start < cursor {
            tracing::event!(
                tracing::Level::DEBUG,
                operation = "gsub",
                cursor = cursor as u64,
                start = start as u64,
                "engine returned a match behind the cursor"
            );
            break;
        }

        tracing::event!(
            tracing::Level::TRACE,
            operation = "gsub",
            cursor = cursor as u64,
            start = start as u64,
            end = end as u64
        );

        out.push_str(&text[cursor..start]);
        replacement.append(&m, &mut out)?;
        count += 1;

        let (next, skipped) = advance(&text, start, end);
        if let Some(c) = skipped {
            out.push(c);
        }
        cursor = next;
    }

    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }

    Ok((out, count))
}
