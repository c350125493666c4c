//! Literal and regex patterns.
//!
//! Every search in this crate runs over a `&str` and reports UTF-8 byte
//! offsets. Turning those into code-point indices is the caller's job (see
//! [`Text`](crate::Text)).
//!
//! ## Literal or Regex?
//!
//! A pattern is chosen explicitly with [`Pattern::literal`] / [`Pattern::regex`],
//! or detected by [`Pattern::parse`] with one rule: input of the form
//! `/body/flags` is a regex, anything else is a literal.
//!
//! ```text
//! "a.c"        literal, matches only "a.c"
//! "/a.c/"      regex,   matches "abc"
//! "/abc/i"     regex,   case-insensitive
//! "/[/"        error,   delimited but does not compile
//! "path/to"    literal, does not start with '/'
//! ```
//!
//! A delimited pattern that fails to compile is an error, never a silent
//! fallback to a literal search.

use std::borrow::Cow;
use std::fmt;

use regex::{Captures, Regex, RegexBuilder};

use crate::{Error, Result};

/// Flag letters accepted after the closing delimiter.
const FLAGS: &str = "imsxU";

/// A match reported by a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched text.
    pub text: String,
    /// UTF-8 byte offset of the match in the subject.
    pub offset: usize,
}

impl Match {
    fn new(text: &str, offset: usize) -> Self {
        Self {
            text: text.to_string(),
            offset,
        }
    }

    /// Byte offset one past the end of the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// A literal string or a compiled regular expression.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches the string exactly.
    Literal(String),
    /// Matches a regular expression.
    Regex(Regex),
}

impl Pattern {
    /// A literal pattern.
    pub fn literal(needle: impl Into<String>) -> Self {
        Self::Literal(needle.into())
    }

    /// A literal pattern that ignores case.
    pub fn literal_ignore_case(needle: &str) -> Self {
        // An escaped literal always compiles.
        RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
            .map_or_else(|_| Self::literal(needle), Self::Regex)
    }

    /// Compile an undelimited regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternInvalid`] if the regex does not compile.
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|err| invalid(pattern, &err.to_string()))
    }

    /// Detect and build a pattern from user input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternInvalid`] if `input` is a delimited regex that
    /// does not compile or carries unknown flags.
    pub fn parse(input: &str) -> Result<Self> {
        let Some((body, flags)) = split_delimited(input) else {
            return Ok(Self::literal(input));
        };

        if let Some(bad) = flags.chars().find(|c| !FLAGS.contains(*c)) {
            return Err(invalid(input, &format!("unknown flag {bad:?}")));
        }

        RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .ignore_whitespace(flags.contains('x'))
            .swap_greed(flags.contains('U'))
            .build()
            .map(Self::Regex)
            .map_err(|err| invalid(input, &err.to_string()))
    }

    /// Whether `input` is a delimited regex that compiles.
    ///
    /// ```rust
    /// use unitext::Pattern;
    ///
    /// assert!(Pattern::is_valid("/\\d+/"));
    /// assert!(!Pattern::is_valid("/(/"));
    /// assert!(!Pattern::is_valid("plain"));
    /// ```
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        split_delimited(input).is_some() && Self::parse(input).is_ok()
    }

    /// Whether this is a literal pattern.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// First match starting at or after byte `start`.
    ///
    /// `start` must lie on a char boundary of `subject`.
    #[must_use]
    pub fn find_at(&self, subject: &str, start: usize) -> Option<Match> {
        if start > subject.len() {
            return None;
        }
        match self {
            Self::Literal(needle) => subject[start..]
                .find(needle.as_str())
                .map(|pos| Match::new(needle, start + pos)),
            Self::Regex(re) => re
                .find_at(subject, start)
                .map(|m| Match::new(m.as_str(), m.start())),
        }
    }

    /// All non-overlapping matches, left to right.
    #[must_use]
    pub fn find_iter(&self, subject: &str) -> Vec<Match> {
        match self {
            Self::Literal(needle) => subject
                .match_indices(needle.as_str())
                .map(|(pos, text)| Match::new(text, pos))
                .collect(),
            Self::Regex(re) => re
                .find_iter(subject)
                .map(|m| Match::new(m.as_str(), m.start()))
                .collect(),
        }
    }

    /// Capture groups of up to `limit` matches (`0` for all).
    ///
    /// Group 0 is the whole match; unmatched optional groups are `None`.
    /// A literal pattern has only group 0.
    #[must_use]
    pub fn execute(&self, subject: &str, limit: usize) -> Vec<Vec<Option<String>>> {
        let limit = if limit == 0 { usize::MAX } else { limit };
        match self {
            Self::Literal(_) => self
                .find_iter(subject)
                .into_iter()
                .take(limit)
                .map(|m| vec![Some(m.text)])
                .collect(),
            Self::Regex(re) => re
                .captures_iter(subject)
                .take(limit)
                .map(|caps| {
                    caps.iter()
                        .map(|g| g.map(|m| m.as_str().to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    /// Replace up to `limit` matches (`0` for all).
    ///
    /// For regex patterns `replacement` may refer to groups as `$1`/`${name}`;
    /// for literals it is inserted verbatim.
    #[must_use]
    pub fn replace<'a>(&self, subject: &'a str, replacement: &str, limit: usize) -> Cow<'a, str> {
        match self {
            Self::Literal(needle) if needle.is_empty() => Cow::Borrowed(subject),
            Self::Literal(needle) if limit == 0 => {
                Cow::Owned(subject.replace(needle.as_str(), replacement))
            }
            Self::Literal(needle) => {
                Cow::Owned(subject.replacen(needle.as_str(), replacement, limit))
            }
            Self::Regex(re) => re.replacen(subject, limit, replacement),
        }
    }

    /// Replace every match with the result of `callback`.
    ///
    /// The callback receives group 0 followed by any capture groups.
    pub fn replace_with<'a, F>(&self, subject: &'a str, mut callback: F) -> Cow<'a, str>
    where
        F: FnMut(&[Option<&str>]) -> String,
    {
        match self {
            Self::Literal(needle) if needle.is_empty() => Cow::Borrowed(subject),
            Self::Literal(needle) => {
                let mut out = String::with_capacity(subject.len());
                let mut last = 0;
                for (pos, text) in subject.match_indices(needle.as_str()) {
                    out.push_str(&subject[last..pos]);
                    out.push_str(&callback(&[Some(text)]));
                    last = pos + text.len();
                }
                out.push_str(&subject[last..]);
                Cow::Owned(out)
            }
            Self::Regex(re) => re.replace_all(subject, |caps: &Captures<'_>| {
                let groups: Vec<Option<&str>> =
                    caps.iter().map(|g| g.map(|m| m.as_str())).collect();
                callback(&groups)
            }),
        }
    }

    /// Split `subject` around every match.
    #[must_use]
    pub fn split(&self, subject: &str) -> Vec<String> {
        match self {
            Self::Literal(needle) if needle.is_empty() => {
                subject.chars().map(String::from).collect()
            }
            Self::Literal(needle) => subject.split(needle.as_str()).map(String::from).collect(),
            Self::Regex(re) => re.split(subject).map(String::from).collect(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(needle) => f.write_str(needle),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(needle: &str) -> Self {
        Self::literal(needle)
    }
}

impl From<String> for Pattern {
    fn from(needle: String) -> Self {
        Self::Literal(needle)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Split `/body/flags` into its parts.
fn split_delimited(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    flags
        .chars()
        .all(|c| c.is_ascii_alphabetic())
        .then_some((body, flags))
}

fn invalid(pattern: &str, reason: &str) -> Error {
    log::debug!("rejected pattern {pattern:?}: {reason}");
    Error::PatternInvalid {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}
