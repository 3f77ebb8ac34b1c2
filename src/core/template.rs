//! Replacement templates
//!
//! A replacement string such as `"@-\0\1"` is compiled once into a token
//! list and then rendered against each match. Recognised escapes:
//!
//! | escape      | renders as                                   |
//! |-------------|----------------------------------------------|
//! | `\0`..`\9`  | group text, empty when absent                 |
//! | `\k<name>`  | named group text                              |
//! | `` \` ``    | text before the match                         |
//! | `\'`        | text after the match                          |
//! | `\+`        | last participating capture group             |
//! | `\&`        | whole match                                   |
//! | `\\`        | a literal backslash                           |
//!
//! Any other escaped character stands for itself and the backslash is
//! dropped. A trailing lone backslash renders as nothing.

use std::str::FromStr;

use super::match_data::MatchResult;
use crate::error::{CompileTemplateError, Result};

/// One piece of a compiled template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(String),
    GroupRef(usize),
    NamedGroupRef(String),
    PreMatch,
    PostMatch,
    LastCapture,
    WholeMatch,
}

/// A compiled replacement template
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReplacementTemplate {
    tokens: Vec<Token>,
}

impl ReplacementTemplate {
    /// Compile a replacement string.
    ///
    /// Only a `\k<` without a closing `>` is rejected. Named references are
    /// checked when rendered, against whichever match they are applied to.
    pub fn compile(spec: &str) -> Result<Self, CompileTemplateError> {
        let mut tokens = Vec::new();
        let mut escape_at: Option<usize> = None;
        let mut chars = spec.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let Some(backslash) = escape_at.take() else {
                if c == '\\' {
                    escape_at = Some(i);
                } else {
                    push_literal(&mut tokens, c);
                }
                continue;
            };

            match c {
                '\\' => push_literal(&mut tokens, '\\'),
                'k' => {
                    if chars.next_if(|&(_, next)| next == '<').is_some() {
                        let name_start = i + 2;
                        let Some(len) = spec[name_start..].find('>') else {
                            return Err(CompileTemplateError::UnterminatedGroupName {
                                pos: backslash,
                            });
                        };
                        let name_end = name_start + len;
                        tokens.push(Token::NamedGroupRef(spec[name_start..name_end].to_string()));
                        while chars.next_if(|&(j, _)| j <= name_end).is_some() {}
                    } else {
                        push_literal(&mut tokens, '\\');
                        push_literal(&mut tokens, 'k');
                    }
                }
                '0'..='9' => tokens.push(Token::GroupRef(c as usize - '0' as usize)),
                '`' => tokens.push(Token::PreMatch),
                '\'' => tokens.push(Token::PostMatch),
                '+' => tokens.push(Token::LastCapture),
                '&' => tokens.push(Token::WholeMatch),
                other => push_literal(&mut tokens, other),
            }
        }

        Ok(Self { tokens })
    }

    /// Compile a replacement that arrived as raw bytes.
    pub fn compile_bytes(spec: &[u8]) -> Result<Self, CompileTemplateError> {
        let spec = std::str::from_utf8(spec).map_err(|_| CompileTemplateError::NotText)?;
        Self::compile(spec)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The fixed output, when the template has no references at all.
    pub fn as_literal(&self) -> Option<&str> {
        match self.tokens.as_slice() {
            [] => Some(""),
            [Token::Literal(text)] => Some(text),
            _ => None,
        }
    }

    /// Render against one match.
    pub fn render(&self, m: &MatchResult) -> Result<String> {
        let mut out = String::new();
        self.render_into(m, &mut out)?;
        Ok(out)
    }

    /// Render against one match, appending to `out`.
    ///
    /// On error `out` may hold part of the rendering; callers discard it.
    pub fn render_into(&self, m: &MatchResult, out: &mut String) -> Result<()> {
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::GroupRef(index) => {
                    out.push_str(m.get(*index).ok().flatten().unwrap_or_default())
                }
                Token::NamedGroupRef(name) => out.push_str(m.named(name)?.unwrap_or_default()),
                Token::PreMatch => out.push_str(m.pre_match()),
                Token::PostMatch => out.push_str(m.post_match()),
                Token::LastCapture => out.push_str(m.last_capture().unwrap_or_default()),
                Token::WholeMatch => out.push_str(m.as_str()),
            }
        }
        Ok(())
    }
}

impl FromStr for ReplacementTemplate {
    type Err = CompileTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}
