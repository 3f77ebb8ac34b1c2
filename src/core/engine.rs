//! Match engine bridge
//!
//! Chooses between `regex` (linear time) and `fancy-regex` (backtracking,
//! needed for in-pattern backreferences such as `(a)\1`) and exposes the
//! three primitives the rest of the crate relies on: compile, execute at an
//! offset, and the group name table. POSIX bracket expressions are rewritten
//! into the engines' class syntax on the way in.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

use regex_syntax::ast;
use regex_syntax::ast::parse::Parser as AstParser;

use super::flags::Flags;
use crate::error::{Error, Result};

/// `\1`..`\9` preceded by an even run of backslashes.
static BACKREFERENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?:^|[^\\])(?:\\\\)*\\[1-9]")
        .expect("BUG: backreference detection pattern is invalid")
});

/// Byte span of one group, `None` when the group did not participate.
pub type GroupSpan = Option<(usize, usize)>;

/// Engine types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineType {
    /// Standard regex crate (linear time guaranteed)
    Regex,
    /// Fancy-regex (supports backreferences inside the pattern)
    FancyRegex,
}

impl std::fmt::Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineType::Regex => write!(f, "regex"),
            EngineType::FancyRegex => write!(f, "fancy-regex"),
        }
    }
}

/// Pick an engine for a POSIX source.
pub fn select_engine(source: &str) -> EngineType {
    engine_for(&translate(source))
}

fn engine_for(translated: &str) -> EngineType {
    if BACKREFERENCE_RE.is_match(translated) {
        EngineType::FancyRegex
    } else {
        EngineType::Regex
    }
}

/// Rewrite a POSIX ERE source into the dialect the engines parse.
///
/// Only bracket expressions differ. Inside one, a backslash is an ordinary
/// member and `[` is a member unless it opens `[:class:]`, `[=c=]` or
/// `[.c.]`; a `]` straight after `[` or `[^` is a member too. Everything
/// outside brackets is passed through, escapes included.
pub fn translate(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 4);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => translate_bracket(&mut chars, &mut out),
            _ => out.push(c),
        }
    }
    out
}

fn translate_bracket(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push('[');
    if chars.next_if_eq(&'^').is_some() {
        out.push('^');
    }
    if chars.next_if_eq(&']').is_some() {
        out.push_str("\\]");
    }

    while let Some(c) = chars.next() {
        match c {
            ']' => {
                out.push(']');
                return;
            }
            '[' => match chars.next_if(|&next| matches!(next, ':' | '=' | '.')) {
                Some(delim) => translate_element(chars, out, delim),
                None => out.push_str("\\["),
            },
            _ => push_class_member(out, c),
        }
    }
}

/// `[:name:]` is kept as is. `[=c=]` and `[.c.]` naming a single character
/// become that character.
fn translate_element(chars: &mut Peekable<Chars<'_>>, out: &mut String, delim: char) {
    let mut body = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        if c == delim && chars.next_if_eq(&']').is_some() {
            closed = true;
            break;
        }
        body.push(c);
    }

    let mut members = body.chars();
    match (closed, delim, members.next(), members.next()) {
        (true, '=' | '.', Some('-'), None) => out.push_str("\\-"),
        (true, '=' | '.', Some(c), None) => push_class_member(out, c),
        _ => {
            out.push('[');
            out.push(delim);
            out.push_str(&body);
            if closed {
                out.push(delim);
                out.push(']');
            }
        }
    }
}

fn push_class_member(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

/// A compiled regex that can use either engine
#[derive(Debug)]
pub enum CompiledRegex {
    Regex(regex::Regex),
    FancyRegex(fancy_regex::Regex),
}

impl CompiledRegex {
    /// Compile `source` under `flags`.
    ///
    /// With no explicit engine the standard crate is tried first and
    /// fancy-regex is the fallback, as is done for patterns it rejects.
    pub fn build(source: &str, flags: Flags, engine: Option<EngineType>) -> Result<Self> {
        let translated = translate(source);
        let effective = format!("{}{}", flags.inline_prefix(), translated);
        let engine = engine.unwrap_or_else(|| engine_for(&translated));

        match engine {
            EngineType::Regex => match regex::Regex::new(&effective) {
                Ok(re) => Ok(CompiledRegex::Regex(re)),
                Err(regex_err) => {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        operation = "compile",
                        source = %source,
                        error = %regex_err,
                        "falling back to fancy-regex"
                    );
                    fancy_regex::Regex::new(&effective)
                        .map(CompiledRegex::FancyRegex)
                        .map_err(|_| compile_error(source, &translated, &regex_err.to_string()))
                }
            },
            EngineType::FancyRegex => fancy_regex::Regex::new(&effective)
                .map(CompiledRegex::FancyRegex)
                .map_err(|e| compile_error(source, &translated, &e.to_string())),
        }
    }

    /// Run the engine on `text[start..]`, with spans reported against `text`.
    ///
    /// The tail is searched on its own, so `^` matches at `start` and the
    /// text before it is invisible to anchors and word boundaries.
    pub fn captures_at(&self, text: &str, start: usize) -> Result<Option<Vec<GroupSpan>>> {
        let tail = &text[start..];
        match self {
            CompiledRegex::Regex(re) => Ok(re.captures(tail).map(|caps| {
                caps.iter()
                    .map(|group| group.map(|m| (start + m.start(), start + m.end())))
                    .collect()
            })),
            CompiledRegex::FancyRegex(re) => {
                let caps = re
                    .captures(tail)
                    .map_err(|e| Error::Engine(e.to_string()))?;
                Ok(caps.map(|caps| {
                    (0..caps.len())
                        .map(|i| caps.get(i).map(|m| (start + m.start(), start + m.end())))
                        .collect()
                }))
            }
        }
    }

    /// Number of groups including group 0.
    pub fn captures_len(&self) -> usize {
        match self {
            CompiledRegex::Regex(re) => re.captures_len(),
            CompiledRegex::FancyRegex(re) => re.captures_len(),
        }
    }

    /// Group name table, indexed by group number.
    pub fn capture_names(&self) -> Vec<Option<String>> {
        match self {
            CompiledRegex::Regex(re) => re
                .capture_names()
                .map(|name| name.map(str::to_string))
                .collect(),
            CompiledRegex::FancyRegex(re) => re
                .capture_names()
                .map(|name| name.map(str::to_string))
                .collect(),
        }
    }

    /// Get the engine type
    pub fn engine_type(&self) -> EngineType {
        match self {
            CompiledRegex::Regex(_) => EngineType::Regex,
            CompiledRegex::FancyRegex(_) => EngineType::FancyRegex,
        }
    }
}

/// Build a compile error, using the AST parser for a kind and position when
/// it can pin the problem down. Positions refer to the translated text.
fn compile_error(source: &str, translated: &str, fallback: &str) -> Error {
    match AstParser::new().parse(translated) {
        Err(err) => Error::Compile {
            pattern: source.to_string(),
            kind: syntax_error_kind(err.kind()),
            position: Some(err.span().start.offset),
            message: err.kind().to_string(),
        },
        Ok(_) => Error::Compile {
            pattern: source.to_string(),
            kind: "syntax_error",
            position: None,
            message: fallback.to_string(),
        },
    }
}

fn syntax_error_kind(kind: &ast::ErrorKind) -> &'static str {
    match kind {
        ast::ErrorKind::GroupUnclosed => "unclosed_group",
        ast::ErrorKind::GroupUnopened => "unopened_group",
        ast::ErrorKind::EscapeUnexpectedEof => "incomplete_escape",
        ast::ErrorKind::ClassUnclosed => "unclosed_class",
        ast::ErrorKind::RepetitionMissing => "missing_repetition_target",
        ast::ErrorKind::RepetitionCountUnclosed => "unclosed_repetition",
        _ => "syntax_error",
    }
}
