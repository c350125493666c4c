//! Python-style slice notation.
//!
//! ## The Notation
//!
//! A slice is written `start:stop:step`, each field optional:
//!
//! ```text
//! "1:"     every element from index 1
//! ":-1"    everything but the last element
//! "::-1"   everything, reversed
//! "2:8:2"  every second element of [2, 8)
//! ```
//!
//! Negative `start`/`stop` count from the end of the sequence. Nothing about
//! the sequence is known until [`Slice::resolve_indices`] is given a length,
//! so a parsed slice is just three optional integers.
//!
//! ## Resolution
//!
//! Given a length, defaults are filled in according to the sign of the step,
//! negative bounds are wrapped, and the indices of `range(start, stop, step)`
//! are produced. Members that fall outside `[0, length)` are dropped. Once the
//! walk leaves the sequence in the direction it is stepping, it ends.
//!
//! ```text
//! length = 5, "::-1"
//!
//! step  = -1
//! stop  = -1      (one before index 0)
//! start = 4       (length - 1)
//!
//! indices: 4, 3, 2, 1, 0
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

fn notation_regex() -> &'static Regex {
    static NOTATION: OnceLock<Regex> = OnceLock::new();
    NOTATION.get_or_init(|| {
        Regex::new(r"^([+-]?\d+)?:([+-]?\d+)?(?::([+-]?\d+)?)?$").expect("slice notation regex")
    })
}

/// A parsed `start:stop:step` slice.
///
/// # Examples
///
/// ```rust
/// use unitext::Slice;
///
/// let slice = Slice::parse("::-1").unwrap();
/// let indices: Vec<usize> = slice.resolve_indices(4).collect();
/// assert_eq!(indices, vec![3, 2, 1, 0]);
///
/// let slice = Slice::parse("2:8:2").unwrap();
/// assert_eq!(slice.resolve_indices(5).collect::<Vec<_>>(), vec![2, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slice {
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
}

impl Slice {
    /// Create a slice from its three fields.
    ///
    /// A zero `step` is accepted here but resolves to no indices.
    #[must_use]
    pub const fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The slice selecting every element, in order.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(Some(0), None, None)
    }

    /// Whether `notation` is well-formed slice notation.
    ///
    /// ```rust
    /// use unitext::Slice;
    ///
    /// assert!(Slice::is_valid("1:-1"));
    /// assert!(Slice::is_valid("::"));
    /// assert!(!Slice::is_valid("12"));
    /// assert!(!Slice::is_valid("a:b"));
    /// ```
    #[must_use]
    pub fn is_valid(notation: &str) -> bool {
        Self::parse(notation).is_ok()
    }

    /// Parse slice notation.
    ///
    /// `":"` and `"::"` are shortcuts for [`Slice::full`]. Empty fields are
    /// absent, never zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the notation has no `:`, has
    /// non-integer fields, overflows `i64`, or has a zero step.
    pub fn parse(notation: &str) -> Result<Self> {
        if notation == ":" || notation == "::" {
            return Ok(Self::full());
        }

        let invalid = || {
            log::debug!("rejected slice notation {notation:?}");
            Error::InvalidArgument(format!("{notation:?} is not valid slice notation"))
        };

        let caps = notation_regex().captures(notation).ok_or_else(invalid)?;
        let field = |i: usize| -> Result<Option<i64>> {
            caps.get(i)
                .map(|m| m.as_str().parse::<i64>().map_err(|_| invalid()))
                .transpose()
        };

        let slice = Self::new(field(1)?, field(2)?, field(3)?);
        if slice.step == Some(0) {
            return Err(Error::InvalidArgument(format!(
                "slice step cannot be zero in {notation:?}"
            )));
        }
        Ok(slice)
    }

    /// The start field, if present.
    #[must_use]
    pub const fn start(&self) -> Option<i64> {
        self.start
    }

    /// The stop field, if present.
    #[must_use]
    pub const fn stop(&self) -> Option<i64> {
        self.stop
    }

    /// The step field, if present.
    #[must_use]
    pub const fn step(&self) -> Option<i64> {
        self.step
    }

    /// Resolve this slice against a sequence of `length` elements.
    ///
    /// The returned iterator is finite and can be cloned to restart it.
    /// A length of zero, or a zero step, yields nothing.
    #[must_use]
    pub fn resolve_indices(&self, length: usize) -> SliceIndices {
        let len = length as i64;
        let step = self.step.unwrap_or(1);

        if len == 0 || step == 0 {
            return SliceIndices::empty();
        }

        let forward = step > 0;
        let mut stop = self.stop.unwrap_or(if forward { len } else { -1 });
        let mut start = self.start.unwrap_or(if forward { 0 } else { len - 1 });

        if start < 0 {
            start = start.rem_euclid(len);
        }

        // -1 is a legal stop when walking backwards: one before index 0.
        let floor = if forward { 0 } else { -1 };
        if stop < floor {
            let (len, wide) = (i128::from(len), i128::from(stop));
            let wraps = (i128::from(floor) - wide + len - 1) / len;
            stop = (wide + wraps * len) as i64;
        }

        let nonempty = if forward { start < stop } else { start > stop };
        if !nonempty {
            return SliceIndices::empty();
        }

        // Skip members above the sequence when walking down; they are out of
        // bounds against the walk direction, not in it.
        if !forward && start >= len {
            let stride = i128::from(step).abs();
            let skips = (i128::from(start) - i128::from(len - 1) + stride - 1) / stride;
            start = (i128::from(start) - skips * stride) as i64;
            if start <= stop {
                return SliceIndices::empty();
            }
        }

        SliceIndices {
            next: start,
            stop,
            step,
            len,
            done: false,
        }
    }
}

impl FromStr for Slice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Renders `start:stop:step` with absent fields left empty.
///
/// This is not guaranteed to reproduce the parsed input: `":"` renders as
/// `"0::"`.
impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        write!(
            f,
            "{}:{}:{}",
            field(self.start),
            field(self.stop),
            field(self.step)
        )
    }
}

impl From<std::ops::Range<i64>> for Slice {
    fn from(range: std::ops::Range<i64>) -> Self {
        Self::new(Some(range.start), Some(range.end), None)
    }
}

impl From<std::ops::RangeFrom<i64>> for Slice {
    fn from(range: std::ops::RangeFrom<i64>) -> Self {
        Self::new(Some(range.start), None, None)
    }
}

impl From<std::ops::RangeTo<i64>> for Slice {
    fn from(range: std::ops::RangeTo<i64>) -> Self {
        Self::new(None, Some(range.end), None)
    }
}

impl From<std::ops::RangeFull> for Slice {
    fn from(_: std::ops::RangeFull) -> Self {
        Self::full()
    }
}

/// Indices selected by a [`Slice`] over a sequence of known length.
#[derive(Debug, Clone)]
pub struct SliceIndices {
    next: i64,
    stop: i64,
    step: i64,
    len: i64,
    done: bool,
}

impl SliceIndices {
    const fn empty() -> Self {
        Self {
            next: 0,
            stop: 0,
            step: 1,
            len: 0,
            done: true,
        }
    }
}

impl Iterator for SliceIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }

        let value = self.next;
        let in_range = if self.step > 0 {
            value < self.stop
        } else {
            value > self.stop
        };
        let in_bounds = (0..self.len).contains(&value);

        if !in_range || !in_bounds {
            self.done = true;
            return None;
        }

        match value.checked_add(self.step) {
            Some(next) => self.next = next,
            None => self.done = true,
        }
        Some(value as usize)
    }
}

impl FusedIterator for SliceIndices {}
