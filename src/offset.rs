//! Byte offset ↔ code-point index translation.
//!
//! ## The Problem
//!
//! In a variable-width encoding the Nth code point does not start at byte N.
//! Regex engines report byte offsets; callers think in code points. Bridging
//! the two needs a scan, and doing that scan on every lookup is quadratic.
//!
//! ## The Map
//!
//! The map is built once per buffer. For each code point it records the code
//! point's index once per byte it occupies, so the entry at byte `b` is the
//! code point `b` belongs to:
//!
//! ```text
//! text:   "aé日"
//! bytes:  61 c3 a9 e6 97 a5
//! owner:   0  1  1  2  2  2
//! starts:  0  1     3
//! ```
//!
//! `starts` is the inverse, giving O(1) lookup in both directions.

use crate::Encoding;

/// Which coordinate space an offset is given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The offset is a byte position; look up the code point that owns it.
    ByteToCodepoint,
    /// The offset is a code-point index; look up the byte it starts at.
    CodepointToByte,
}

/// Cached byte ↔ code-point lookup for one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    owner: Vec<usize>,
    starts: Vec<usize>,
}

impl OffsetMap {
    /// Build the map for `text` as encoded by `encoding`.
    pub(crate) fn build(text: &str, encoding: Encoding) -> Self {
        let mut owner = Vec::with_capacity(text.len());
        let mut starts = Vec::new();

        for (index, c) in text.chars().enumerate() {
            starts.push(owner.len());
            let width = encoding.width(c);
            owner.extend(std::iter::repeat(index).take(width));
        }

        log::trace!(
            "built offset map: {} code points over {} bytes ({})",
            starts.len(),
            owner.len(),
            encoding
        );

        Self { owner, starts }
    }

    /// Number of bytes covered.
    pub fn byte_len(&self) -> usize {
        self.owner.len()
    }

    /// Number of code points covered.
    pub fn codepoint_len(&self) -> usize {
        self.starts.len()
    }

    /// Translate `offset` in the given direction.
    ///
    /// Returns `None` when the offset is outside the covered range.
    pub fn lookup(&self, offset: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::ByteToCodepoint => self.owner.get(offset).copied(),
            Direction::CodepointToByte => self.starts.get(offset).copied(),
        }
    }

    /// Byte offset where code point `index` starts, with `index == len`
    /// mapping to the end of the buffer.
    pub(crate) fn byte_boundary(&self, index: usize) -> usize {
        self.starts.get(index).copied().unwrap_or(self.owner.len())
    }

    /// Byte range occupied by code point `index`.
    pub(crate) fn byte_range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.starts.get(index)?;
        Some(start..self.byte_boundary(index + 1))
    }
}
