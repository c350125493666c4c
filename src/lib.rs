//! # unitext
//!
//! Immutable text values with Python/JavaScript-style ergonomics: negative
//! indices, `start:stop:step` slicing, search, padding and case transforms,
//! all counted in code points over a byte buffer in a multi-byte encoding.
//!
//! ## The Problem
//!
//! Rust strings index by byte. That is the right default for a systems
//! language and the wrong one for code ported from dynamic languages, where
//! `s[-1]` is the last character and `s[::-1]` reverses it:
//!
//! ```text
//! "café"
//! bytes:        63 61 66 c3 a9      size = 5
//! code points:  c  a  f  é          len  = 4
//!
//! &s[3..4]  -> panics, byte 4 is inside 'é'
//! text.at(3) -> "é"
//! ```
//!
//! Finding the Nth code point needs a scan, and so does turning the byte
//! offset a regex reports back into a code-point index. Doing that per call
//! is quadratic in loops.
//!
//! ## How It Works
//!
//! A [`Text`] owns its encoded bytes, its [`Encoding`], and a code-point
//! count. The first operation that needs to translate between bytes and code
//! points builds an [`OffsetMap`] and caches it. Every later lookup in either
//! direction is O(1):
//!
//! ```text
//! byte:    0  1  2  3  4
//! owner:   0  1  2  3  3       byte -> code point
//! starts:  0  1  2  3          code point -> byte
//! ```
//!
//! Nothing mutates a `Text` once it is built. Operations that look like
//! edits return a new value, so the cache never goes stale.
//!
//! ## Slicing
//!
//! [`Slice`] parses `start:stop:step` notation and resolves it against a
//! length with Python's `range` semantics:
//!
//! ```rust
//! use unitext::{Slice, Text};
//!
//! let text = Text::new("añb日");
//! assert_eq!(text.get_notation("::-1").unwrap(), text.reverse());
//! assert_eq!(text.get_notation("1:3").unwrap(), "ñb");
//! assert_eq!(text.get_notation("::2").unwrap(), "ab");
//!
//! let slice = Slice::parse("-2:").unwrap();
//! assert_eq!(slice.resolve_indices(4).collect::<Vec<_>>(), vec![2, 3]);
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use unitext::{Pattern, Text};
//!
//! let text = Text::new("abcabc");
//! assert_eq!(text.index_of("bc"), Some(1));
//! assert_eq!(text.last_index_of("bc"), Some(4));
//! assert_eq!(text.count("bc"), 2);
//!
//! let text = Text::new("naïve café");
//! assert_eq!(text.len(), 10);
//! assert_eq!(text.at(-1).unwrap(), "é");
//! assert_eq!(text.slice(0, Some(-1)), "naïve caf");
//! assert_eq!(text.title_case(), "Naïve Café");
//!
//! let words = text.split(&Pattern::literal(" "));
//! assert_eq!(words.len(), 2);
//!
//! assert_eq!(Text::pad(5, "ab"), "ababa");
//! ```
//!
//! ## Other Encodings
//!
//! Any encoding `encoding_rs` can both decode and encode statelessly works.
//! Indices stay in code points; only `size()` and the raw bytes change:
//!
//! ```rust
//! use unitext::{Encoding, Text};
//!
//! let sjis = Encoding::for_label("shift_jis").unwrap();
//! let text = Text::of("日本語", sjis);
//! assert_eq!(text.len(), 3);
//! assert_eq!(text.size(), 6);
//! assert_eq!(text.at(1).unwrap().as_bytes(), sjis.encode("本").as_ref());
//! ```
//!
//! ## Patterns
//!
//! Search and replace take a [`Pattern`], which is either a literal or a
//! regex. [`Pattern::parse`] treats `/body/flags` as a regex and anything
//! else as a literal; a malformed delimited regex is an error, not a literal.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade: offset-map builds at `trace`,
//! rejected notation and patterns at `debug`, lossy encoding at `warn`.
//! Install any logger to see them.

mod encoding;
mod error;
mod offset;
mod pattern;
mod search;
mod slice;
mod stringable;
mod text;
mod transform;

pub use encoding::Encoding;
pub use error::{Error, Result};
pub use offset::{Direction, OffsetMap};
pub use pattern::{Match, Pattern};
pub use search::TextMatch;
pub use slice::{Slice, SliceIndices};
pub use stringable::Stringable;
pub use text::{Chars, Text};
