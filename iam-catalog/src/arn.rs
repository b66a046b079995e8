//! ARN template rendering
//!
//! A resource ARN template is a string such as
//! `arn:${partition}:frauddetector:${region}:${account}:detector/${resourcePath}`
//! made of literal text and `${name}` placeholders. Rendering replaces each
//! placeholder with the caller's value, or with the wildcard `*` when the value
//! is absent or empty. Values are embedded verbatim and rendering never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placeholders::{normalize_placeholder, PlaceholderValues};

/// Value rendered in place of any placeholder the caller did not supply
pub const WILDCARD: &str = "*";

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Errors found while strictly parsing template text.
///
/// These describe problems with the template itself, never with the values
/// substituted into it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `${` with no closing `}`.
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    /// A `${}` with nothing inside.
    #[error("empty placeholder name at byte {offset}")]
    EmptyPlaceholder { offset: usize },

    /// A placeholder name containing characters other than ASCII letters, digits, `_` or `-`.
    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidPlaceholderName { name: String, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
    /// Trailing `${...` with no closing brace
    Unterminated(&'a str),
}

/// Single pass tokenizer over template text, yielding each token with its byte offset
struct Tokens<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let start = self.pos;
        match rest.find(OPEN) {
            Some(0) => {
                let inner = &rest[OPEN.len()..];
                match inner.find(CLOSE) {
                    Some(end) => {
                        self.pos += OPEN.len() + end + CLOSE.len_utf8();
                        Some((start, Token::Placeholder(&inner[..end])))
                    }
                    None => {
                        self.pos = self.source.len();
                        Some((start, Token::Unterminated(rest)))
                    }
                }
            }
            Some(next) => {
                self.pos += next;
                Some((start, Token::Literal(&rest[..next])))
            }
            None => {
                self.pos = self.source.len();
                Some((start, Token::Literal(rest)))
            }
        }
    }
}

fn is_valid_placeholder_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn substitute<'v, V>(values: &'v V, placeholder: &str) -> &'v str
where
    V: PlaceholderValues + ?Sized,
{
    match values.value(placeholder) {
        Some(value) if !value.is_empty() => value,
        _ => WILDCARD,
    }
}

/// Render raw template text against a set of placeholder values.
///
/// This is the lenient form used by the generated per-service builders: a
/// `${` without a closing brace is copied literally and `${}` renders as `*`.
/// Use [`ArnTemplate::parse`] when template text should be checked first.
pub fn render<V>(template: &str, values: &V) -> String
where
    V: PlaceholderValues + ?Sized,
{
    let mut rendered = String::with_capacity(template.len());
    for (_, token) in Tokens::new(template) {
        match token {
            Token::Literal(text) | Token::Unterminated(text) => rendered.push_str(text),
            Token::Placeholder(name) => rendered.push_str(substitute(values, name)),
        }
    }
    rendered
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text copied to the output as-is
    Literal(String),
    /// A named placeholder, as written in the template
    Placeholder(String),
}

/// A validated resource ARN template
///
/// Parsing checks the template text once; rendering the parsed template is
/// infallible and pure, so a single template can be shared across threads and
/// rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArnTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl ArnTemplate {
    /// Parse template text, rejecting unterminated, empty or malformed placeholders
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        for (offset, token) in Tokens::new(source) {
            match token {
                Token::Literal(text) => segments.push(Segment::Literal(text.to_string())),
                Token::Placeholder("") => return Err(TemplateError::EmptyPlaceholder { offset }),
                Token::Placeholder(name) if !is_valid_placeholder_name(name) => {
                    return Err(TemplateError::InvalidPlaceholderName {
                        name: name.to_string(),
                        offset,
                    })
                }
                Token::Placeholder(name) => segments.push(Segment::Placeholder(name.to_string())),
                Token::Unterminated(_) => return Err(TemplateError::Unterminated { offset }),
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Literal and placeholder segments in template order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in template order, as written in the template
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template has a placeholder that normalizes to the same name as `placeholder`
    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        let wanted = normalize_placeholder(placeholder);
        self.placeholders()
            .any(|name| normalize_placeholder(name) == wanted)
    }

    /// Render the template, substituting `*` for every absent or empty value
    pub fn render<V>(&self, values: &V) -> String
    where
        V: PlaceholderValues + ?Sized,
    {
        let mut rendered = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder(name) => rendered.push_str(substitute(values, name)),
            }
        }
        rendered
    }

    /// Render with every placeholder as `*`
    pub fn render_wildcard(&self) -> String {
        self.render(&())
    }
}

impl fmt::Display for ArnTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for ArnTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArnTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArnTemplate> for String {
    fn from(template: ArnTemplate) -> Self {
        template.source
    }
}

impl Serialize for ArnTemplate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for ArnTemplate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(serde::de::Error::custom)
    }
}
