//! Encodings a text buffer can be stored in.
//!
//! UTF-8 is the default and the fast path: its bytes are already a `str`, so
//! decoding borrows and code-point widths come from `char::len_utf8`. Any
//! other encoding goes through `encoding_rs`.
//!
//! Only encodings where every code point encodes to the same bytes regardless
//! of its neighbours are accepted. That rules out stateful encodings
//! (ISO-2022-JP) and decode-only ones (UTF-16, replacement), because the
//! offset map assumes a buffer is the concatenation of its code points'
//! individual encodings.

use std::borrow::Cow;
use std::fmt;

use crate::{Error, Result};

/// A byte encoding for text values.
///
/// ```rust
/// use unitext::Encoding;
///
/// let sjis = Encoding::for_label("shift_jis").unwrap();
/// assert_eq!(sjis.name(), "Shift_JIS");
/// assert_eq!(sjis.width('日'), 2);
/// assert_eq!(Encoding::default().width('日'), 3);
///
/// assert!(Encoding::for_label("utf-16le").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding(&'static encoding_rs::Encoding);

impl Encoding {
    /// UTF-8.
    #[must_use]
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Look up an encoding by its WHATWG label (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] for unknown labels and for
    /// encodings whose code-point widths depend on context.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))?;

        if encoding.output_encoding() != encoding || encoding == encoding_rs::ISO_2022_JP {
            return Err(Error::UnsupportedEncoding(encoding.name().to_string()));
        }
        Ok(Self(encoding))
    }

    /// Canonical name of this encoding.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Whether this is UTF-8.
    #[must_use]
    pub fn is_utf8(&self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    /// Decode `bytes`, failing on any malformed sequence.
    ///
    /// Borrows when the encoding is UTF-8.
    #[must_use]
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        if self.is_utf8() {
            return std::str::from_utf8(bytes).ok().map(Cow::Borrowed);
        }
        self.0.decode_without_bom_handling_and_without_replacement(bytes)
    }

    /// Encode `text`.
    ///
    /// Code points the encoding cannot represent are written as HTML numeric
    /// character references, which is the `encoding_rs` behaviour.
    #[must_use]
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        if self.is_utf8() {
            return Cow::Borrowed(text.as_bytes());
        }
        let (bytes, _, had_errors) = self.0.encode(text);
        if had_errors {
            log::warn!(
                "text contains code points not representable in {}; substituted",
                self.name()
            );
        }
        bytes
    }

    /// Encode `text` only if every code point is representable.
    ///
    /// ```rust
    /// use unitext::Encoding;
    ///
    /// let latin1 = Encoding::for_label("latin1").unwrap();
    /// assert_eq!(latin1.encode_exact("é").as_deref(), Some(&[0xe9][..]));
    /// assert!(latin1.encode_exact("日").is_none());
    /// ```
    #[must_use]
    pub fn encode_exact<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        if self.is_utf8() {
            return Some(Cow::Borrowed(text.as_bytes()));
        }
        let (bytes, _, had_errors) = self.0.encode(text);
        (!had_errors).then_some(bytes)
    }

    /// Whether every code point of `text` is representable.
    #[must_use]
    pub fn can_encode(&self, text: &str) -> bool {
        self.encode_exact(text).is_some()
    }

    /// Number of bytes `c` occupies in this encoding.
    #[must_use]
    pub fn width(&self, c: char) -> usize {
        if self.is_utf8() {
            return c.len_utf8();
        }
        let mut buf = [0u8; 4];
        self.encode(c.encode_utf8(&mut buf)).len()
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoding").field(&self.name()).finish()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::for_label(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utf8() {
        assert!(Encoding::default().is_utf8());
        assert_eq!(Encoding::default().name(), "UTF-8");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Encoding::for_label("latin1").unwrap().name(), "windows-1252");
        assert_eq!(Encoding::for_label(" EUC-JP ").unwrap().name(), "EUC-JP");
        assert!(matches!(
            Encoding::for_label("klingon"),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_rejects_unstable_widths() {
        for label in ["utf-16le", "utf-16be", "iso-2022-jp", "replacement"] {
            assert!(Encoding::for_label(label).is_err(), "{label} should be rejected");
        }
    }

    #[test]
    fn test_widths() {
        let utf8 = Encoding::utf8();
        assert_eq!(utf8.width('a'), 1);
        assert_eq!(utf8.width('é'), 2);
        assert_eq!(utf8.width('😀'), 4);

        let latin1 = Encoding::for_label("latin1").unwrap();
        assert_eq!(latin1.width('é'), 1);

        let gbk = Encoding::for_label("gbk").unwrap();
        assert_eq!(gbk.width('中'), 2);
    }

    #[test]
    fn test_decode_borrows_utf8() {
        let bytes = "café".as_bytes();
        assert!(matches!(Encoding::utf8().decode(bytes), Some(Cow::Borrowed(_))));
        assert!(Encoding::utf8().decode(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_encode_round_trip() {
        let sjis = Encoding::for_label("shift_jis").unwrap();
        let bytes = sjis.encode("日本語");
        assert_eq!(bytes.len(), 6);
        assert_eq!(sjis.decode(&bytes).unwrap(), "日本語");
    }

    #[test]
    fn test_exact_encoding_refuses_substitution() {
        let latin1 = Encoding::for_label("latin1").unwrap();
        assert!(latin1.can_encode("café"));
        assert!(!latin1.can_encode("日"));
        assert_eq!(latin1.encode("日").as_ref(), b"&#26085;");
        assert!(Encoding::utf8().can_encode("日"));
    }
}
