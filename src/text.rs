//! The Text type: an immutable, code-point indexed string.
//!
//! ## Three Coordinate Spaces
//!
//! ```text
//! text:        "naïve"
//! code points:  n  a  ï     v  e
//! cp index:     0  1  2     3  4
//! byte offset:  0  1  2  3  4  5
//! negative:    -5 -4 -3    -2 -1
//! ```
//!
//! The public API counts and indexes code points, accepting negative indices
//! counted from the end. Storage is a byte buffer in some [`Encoding`], and
//! search engines report byte offsets. The [`OffsetMap`] bridges the two; it
//! is built the first time a translation is needed and kept for the life of
//! the value.
//!
//! Search runs on the decoded UTF-8 string. For any other storage encoding a
//! second map over the decoded string turns match offsets into code points,
//! cached the same way:
//!
//! ```text
//! text (Shift_JIS):  "a日b"
//! stored bytes:       61 93 fa 62       offsets:  0 1 1 2
//! decoded UTF-8:      61 e6 97 a5 62    decoded:  0 1 1 1 2
//! ```
//!
//! ## Immutability
//!
//! Every operation that looks like it changes a `Text` returns a new one.
//! A value handed out is never modified, which is what makes caching the map
//! safe and makes `Text` freely shareable across threads.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Direction, Encoding, Error, OffsetMap, Result, Slice, Stringable};

/// An immutable string indexed by code point.
///
/// ```rust
/// use unitext::Text;
///
/// let text = Text::new("café");
/// assert_eq!(text.len(), 4);      // code points
/// assert_eq!(text.size(), 5);     // bytes
/// assert_eq!(text.at(-1).unwrap(), "é");
/// assert_eq!(text.slice(1, Some(-1)), "af");
/// assert_eq!(text.get_notation("::-1").unwrap(), "éfac");
/// ```
#[derive(Clone)]
pub struct Text {
    bytes: Vec<u8>,
    encoding: Encoding,
    length: usize,
    offsets: OnceLock<OffsetMap>,
    decoded_offsets: OnceLock<OffsetMap>,
}

impl Text {
    /// Build UTF-8 text from anything [`Stringable`].
    pub fn new(value: impl Into<Stringable>) -> Self {
        Self::of(value, Encoding::utf8())
    }

    /// Build text in `encoding` from anything [`Stringable`].
    pub fn of(value: impl Into<Stringable>, encoding: Encoding) -> Self {
        Self::encode_in(&value.into().into_string(), encoding)
    }

    /// Build text from a dynamic JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for arrays and objects.
    ///
    /// ```rust
    /// use unitext::{Encoding, Error, Text};
    /// use serde_json::json;
    ///
    /// let text = Text::from_value(&json!(42), Encoding::utf8()).unwrap();
    /// assert_eq!(text, "42");
    ///
    /// let err = Text::from_value(&json!([1, 2, 3]), Encoding::utf8());
    /// assert!(matches!(err, Err(Error::InvalidArgument(_))));
    /// ```
    pub fn from_value(value: &serde_json::Value, encoding: Encoding) -> Result<Self> {
        Stringable::try_from(value).map(|s| Self::of(s, encoding))
    }

    /// Wrap raw bytes already encoded in `encoding`.
    ///
    /// Non-UTF-8 input is re-encoded to its canonical byte form, so every
    /// code point's bytes agree with [`Encoding::width`]. The decoded
    /// contents are never altered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBytes`] if the bytes do not decode, or decode
    /// to code points the encoding cannot write back.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, encoding: Encoding) -> Result<Self> {
        let bytes = bytes.into();
        let malformed = || Error::MalformedBytes {
            encoding: encoding.name(),
        };

        if encoding.is_utf8() {
            let length = std::str::from_utf8(&bytes)
                .map_err(|_| malformed())?
                .chars()
                .count();
            return Ok(Self::build(bytes, encoding, length));
        }

        let decoded = encoding.decode(&bytes).ok_or_else(malformed)?;
        let canonical = encoding.encode_exact(&decoded).ok_or_else(|| {
            log::debug!("{} bytes decode to unencodable code points", encoding.name());
            malformed()
        })?;
        let length = decoded.chars().count();
        Ok(Self::build(canonical.into_owned(), encoding, length))
    }

    /// Empty text in `encoding`.
    #[must_use]
    pub fn empty_in(encoding: Encoding) -> Self {
        Self::build(Vec::new(), encoding, 0)
    }

    /// The one place a `Text` comes into existence.
    ///
    /// `length` must be the code-point count of `bytes`.
    fn build(bytes: Vec<u8>, encoding: Encoding, length: usize) -> Self {
        Self {
            bytes,
            encoding,
            length,
            offsets: OnceLock::new(),
            decoded_offsets: OnceLock::new(),
        }
    }

    /// Encode `s` and build from the result.
    pub(crate) fn encode_in(s: &str, encoding: Encoding) -> Self {
        let bytes = encoding.encode(s);
        // Substituted code points change the count, so count what was stored.
        let length = match &bytes {
            Cow::Borrowed(_) => s.chars().count(),
            Cow::Owned(owned) => encoding.decode(owned).map_or(0, |d| d.chars().count()),
        };
        Self::build(bytes.into_owned(), encoding, length)
    }

    /// Build a sibling value in the same encoding.
    pub(crate) fn derive(&self, s: &str) -> Self {
        Self::encode_in(s, self.encoding)
    }

    /// Build a sibling from bytes assembled out of whole code points of
    /// values in the same encoding.
    pub(crate) fn derive_bytes(&self, bytes: Vec<u8>, length: usize) -> Self {
        Self::build(bytes, self.encoding, length)
    }

    /// Number of code points.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Number of bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The encoding the bytes are stored in.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decoded contents. Borrows for UTF-8.
    pub fn to_str(&self) -> Cow<'_, str> {
        self.encoding
            .decode(&self.bytes)
            .unwrap_or(Cow::Borrowed(""))
    }

    fn offsets(&self) -> &OffsetMap {
        self.offsets
            .get_or_init(|| OffsetMap::build(&self.to_str(), self.encoding))
    }

    /// Map over the decoded UTF-8 form. Same as [`Self::offsets`] for UTF-8.
    fn decoded_offsets(&self) -> &OffsetMap {
        if self.encoding.is_utf8() {
            return self.offsets();
        }
        self.decoded_offsets
            .get_or_init(|| OffsetMap::build(&self.to_str(), Encoding::utf8()))
    }

    /// Map a possibly negative code-point index to an absolute one.
    ///
    /// Negative indices count from the end. The result is not bounds-checked
    /// and may still be negative or past the end.
    pub fn translate(&self, index: i64) -> i64 {
        if index < 0 {
            index.saturating_add(self.length as i64)
        } else {
            index
        }
    }

    /// Translate between byte offsets and code-point indices.
    ///
    /// Offset 0 always maps to 0. Offsets outside the text give `None`.
    ///
    /// ```rust
    /// use unitext::{Direction, Text};
    ///
    /// let text = Text::new("aé日");
    /// assert_eq!(text.get_offset(2, Direction::ByteToCodepoint), Some(1));
    /// assert_eq!(text.get_offset(2, Direction::CodepointToByte), Some(3));
    /// assert_eq!(text.get_offset(9, Direction::ByteToCodepoint), None);
    /// ```
    pub fn get_offset(&self, offset: usize, direction: Direction) -> Option<usize> {
        if offset == 0 {
            return Some(0);
        }
        self.offsets().lookup(offset, direction)
    }

    /// Resolve `index` to a code point that exists.
    fn resolve(&self, index: i64) -> Option<usize> {
        let index = self.translate(index);
        (0..self.length as i64)
            .contains(&index)
            .then_some(index as usize)
    }

    /// Clamp a translated index into `0..=len`.
    fn clamp(&self, index: i64) -> usize {
        self.translate(index).clamp(0, self.length as i64) as usize
    }

    /// Byte range covering code points `range`.
    fn byte_span(&self, range: Range<usize>) -> Range<usize> {
        let map = self.offsets();
        map.byte_boundary(range.start)..map.byte_boundary(range.end)
    }

    /// Code points `range` as a new value.
    pub(crate) fn sub(&self, range: Range<usize>) -> Self {
        if range.is_empty() {
            return Self::empty_in(self.encoding);
        }
        let span = self.byte_span(range.clone());
        self.derive_bytes(self.bytes[span].to_vec(), range.len())
    }

    /// Offset of code point `index` within the decoded UTF-8 string.
    pub(crate) fn utf8_offset(&self, index: usize) -> usize {
        self.decoded_offsets().byte_boundary(index)
    }

    /// Code-point index owning `offset` of the decoded UTF-8 string.
    pub(crate) fn codepoint_index(&self, offset: usize) -> usize {
        self.decoded_offsets()
            .lookup(offset, Direction::ByteToCodepoint)
            .unwrap_or(self.length)
    }

    /// The code point at `index`, or `None` when out of range.
    pub fn at(&self, index: i64) -> Option<Self> {
        let index = self.resolve(index)?;
        Some(self.sub(index..index + 1))
    }

    /// The code point at `index`, or empty text when out of range.
    pub fn char_at(&self, index: i64) -> Self {
        self.at(index)
            .unwrap_or_else(|| Self::empty_in(self.encoding))
    }

    /// The scalar value of the code point at `index`.
    pub fn code_point_at(&self, index: i64) -> Option<char> {
        self.at(index).and_then(|c| c.to_str().chars().next())
    }

    /// The first code point.
    pub fn first(&self) -> Option<Self> {
        self.at(0)
    }

    /// The last code point.
    pub fn last(&self) -> Option<Self> {
        self.at(-1)
    }

    /// Code points `start..stop`, negative indices counted from the end.
    ///
    /// `stop` defaults to the length. An empty range gives empty text.
    pub fn slice(&self, start: i64, stop: Option<i64>) -> Self {
        let start = self.clamp(start);
        let stop = stop.map_or(self.length, |s| self.clamp(s));
        if stop <= start {
            return Self::empty_in(self.encoding);
        }
        self.sub(start..stop)
    }

    /// Up to `length` code points starting at `start`.
    pub fn substr(&self, start: i64, length: Option<usize>) -> Self {
        let start = self.clamp(start);
        let stop = length.map_or(self.length, |n| start.saturating_add(n).min(self.length));
        self.sub(start..stop)
    }

    /// Single-index read; see [`Text::at`].
    pub fn get(&self, index: i64) -> Option<Self> {
        self.at(index)
    }

    /// The code points a slice selects, in slice order.
    pub fn get_range(&self, slice: &Slice) -> Self {
        let map = self.offsets();
        let mut bytes = Vec::new();
        let mut length = 0;
        for index in slice.resolve_indices(self.length) {
            if let Some(span) = map.byte_range(index) {
                bytes.extend_from_slice(&self.bytes[span]);
                length += 1;
            }
        }
        self.derive_bytes(bytes, length)
    }

    /// Read by slice notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed notation.
    pub fn get_notation(&self, notation: &str) -> Result<Self> {
        Slice::parse(notation).map(|slice| self.get_range(&slice))
    }

    /// Write `value` at `index`, padding with spaces past the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if a negative index reaches before the
    /// start.
    ///
    /// ```rust
    /// use unitext::Text;
    ///
    /// let text = Text::new("abc");
    /// assert_eq!(text.set(1, "X").unwrap(), "aXc");
    /// assert_eq!(text.set(5, "X").unwrap(), "abc  X");
    /// assert!(text.set(-4, "X").is_err());
    /// ```
    pub fn set(&self, index: i64, value: impl Into<Stringable>) -> Result<Self> {
        self.set_with_fill(index, value, " ")
    }

    /// Write `value` at `index`, padding with `fill` past the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if a negative index reaches before the
    /// start, or padding is needed and `fill` is empty. Returns
    /// [`Error::InvalidArgument`] if padding is needed and `fill` has code
    /// points the encoding cannot represent.
    pub fn set_with_fill(
        &self,
        index: i64,
        value: impl Into<Stringable>,
        fill: &str,
    ) -> Result<Self> {
        let out_of_range = || Error::OutOfRange {
            index,
            length: self.length,
        };

        let target = usize::try_from(self.translate(index)).map_err(|_| out_of_range())?;
        let value = value.into().into_string();

        if target >= self.length {
            if target > self.length {
                if fill.is_empty() {
                    return Err(out_of_range());
                }
                if !self.encoding.can_encode(fill) {
                    return Err(Error::InvalidArgument(format!(
                        "fill {fill:?} is not representable in {}",
                        self.encoding
                    )));
                }
            }
            let padded = self.pad_end_with(target, fill);
            return Ok(padded.concat(value));
        }

        let value = self.derive(&value);
        let span = self.byte_span(target..target + 1);
        let mut bytes = Vec::with_capacity(self.size() - span.len() + value.size());
        bytes.extend_from_slice(&self.bytes[..span.start]);
        bytes.extend_from_slice(&value.bytes);
        bytes.extend_from_slice(&self.bytes[span.end..]);
        Ok(self.derive_bytes(bytes, self.length - 1 + value.length))
    }

    /// Replace every code point a slice selects with `value`.
    pub fn set_range(&self, slice: &Slice, value: impl Into<Stringable>) -> Self {
        let value = value.into().into_string();
        let mut parts: Vec<Cow<'_, str>> = self
            .to_str()
            .chars()
            .map(|c| Cow::Owned(c.to_string()))
            .collect();
        for index in slice.resolve_indices(self.length) {
            parts[index] = Cow::Borrowed(value.as_str());
        }
        self.derive(&parts.concat())
    }

    /// Write by slice notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed notation.
    pub fn set_notation(&self, notation: &str, value: impl Into<Stringable>) -> Result<Self> {
        Slice::parse(notation).map(|slice| self.set_range(&slice, value))
    }

    /// Remove the code point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` does not name a code point.
    pub fn unset(&self, index: i64) -> Result<Self> {
        let target = self.resolve(index).ok_or(Error::OutOfRange {
            index,
            length: self.length,
        })?;
        let span = self.byte_span(target..target + 1);
        let mut bytes = Vec::with_capacity(self.size() - span.len());
        bytes.extend_from_slice(&self.bytes[..span.start]);
        bytes.extend_from_slice(&self.bytes[span.end..]);
        Ok(self.derive_bytes(bytes, self.length - 1))
    }

    /// Remove every code point a slice selects.
    pub fn unset_range(&self, slice: &Slice) -> Self {
        let mut keep = vec![true; self.length];
        for index in slice.resolve_indices(self.length) {
            keep[index] = false;
        }
        let s: String = self
            .to_str()
            .chars()
            .zip(keep)
            .filter_map(|(c, kept)| kept.then_some(c))
            .collect();
        self.derive(&s)
    }

    /// Remove by slice notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed notation.
    pub fn unset_notation(&self, notation: &str) -> Result<Self> {
        Slice::parse(notation).map(|slice| self.unset_range(&slice))
    }

    /// Iterate code points, each as a one-code-point `Text`.
    pub fn chars(&self) -> Chars<'_> {
        Chars {
            text: self,
            front: 0,
            back: self.length,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::empty_in(Encoding::utf8())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("text", &self.to_str())
            .field("encoding", &self.encoding)
            .field("len", &self.length)
            .field("size", &self.size())
            .finish()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding && self.bytes == other.bytes
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.to_str() == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.to_str() == *other
    }
}

impl PartialEq<String> for Text {
    fn eq(&self, other: &String) -> bool {
        self.to_str() == other.as_str()
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoding.hash(state);
        self.bytes.hash(state);
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::encode_in(s, Encoding::utf8())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        let length = s.chars().count();
        Self::build(s.into_bytes(), Encoding::utf8(), length)
    }
}

impl std::str::FromStr for Text {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_str())
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl<'a> IntoIterator for &'a Text {
    type Item = Text;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Chars<'a> {
        self.chars()
    }
}

/// Iterator over the code points of a [`Text`].
#[derive(Debug, Clone)]
pub struct Chars<'a> {
    text: &'a Text,
    front: usize,
    back: usize,
}

impl Iterator for Chars<'_> {
    type Item = Text;

    fn next(&mut self) -> Option<Text> {
        if self.front >= self.back {
            return None;
        }
        let item = self.text.sub(self.front..self.front + 1);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Chars<'_> {
    fn next_back(&mut self) -> Option<Text> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.text.sub(self.back..self.back + 1))
    }
}

impl ExactSizeIterator for Chars<'_> {}

impl FusedIterator for Chars<'_> {}
