//! Derived values: concatenation, replacement, case, trimming and padding.
//!
//! These are thin: each one works on the decoded string and wraps the result
//! in a new [`Text`] in the receiver's encoding. The receiver is never
//! touched.

use unicode_segmentation::UnicodeSegmentation;

use crate::{Encoding, Pattern, Stringable, Text};

/// Repeat the code points of `fill` until `count` of them have been written.
fn fill_run(fill: &str, count: usize) -> String {
    fill.chars().cycle().take(count).collect()
}

/// The code points of `fill` that `encoding` can store as themselves.
///
/// Padding counts code points, and a substituted code point is stored as
/// several, so those are left out.
fn storable_fill(fill: &str, encoding: Encoding) -> String {
    if encoding.can_encode(fill) {
        return fill.to_string();
    }
    fill.chars()
        .filter(|c| encoding.can_encode(c.encode_utf8(&mut [0; 4])))
        .collect()
}

impl Text {
    /// Text of exactly `length` code points made by repeating `fill`.
    ///
    /// ```rust
    /// use unitext::Text;
    ///
    /// assert_eq!(Text::pad(5, "ab"), "ababa");
    /// assert_eq!(Text::pad(3, ""), "");
    /// ```
    pub fn pad(length: usize, fill: &str) -> Self {
        Self::pad_in(length, fill, Encoding::utf8())
    }

    /// Like [`Text::pad`], stored in `encoding`.
    ///
    /// Fill code points the encoding cannot represent are skipped, so the
    /// result is still exactly `length` code points (or empty if nothing in
    /// `fill` is representable).
    ///
    /// ```rust
    /// use unitext::{Encoding, Text};
    ///
    /// let latin1 = Encoding::for_label("latin1").unwrap();
    /// assert_eq!(Text::pad_in(4, "é-", latin1), "é-é-");
    /// assert_eq!(Text::pad_in(4, "日-", latin1), "----");
    /// assert_eq!(Text::pad_in(4, "日-", latin1).size(), 4);
    /// ```
    pub fn pad_in(length: usize, fill: &str, encoding: Encoding) -> Self {
        let fill = storable_fill(fill, encoding);
        Self::encode_in(&fill_run(&fill, length), encoding)
    }

    /// Append `other`.
    pub fn concat(&self, other: impl Into<Stringable>) -> Self {
        let other = self.derive(&other.into().into_string());
        let mut bytes = Vec::with_capacity(self.size() + other.size());
        bytes.extend_from_slice(self.as_bytes());
        bytes.extend_from_slice(other.as_bytes());
        self.derive_bytes(bytes, self.len() + other.len())
    }

    /// Prepend `other`.
    pub fn prepend(&self, other: impl Into<Stringable>) -> Self {
        self.derive(&other.into().into_string()).concat(self)
    }

    /// Replace the first occurrence of `search`.
    pub fn replace(&self, search: &str, replacement: &str) -> Self {
        self.map_str(|s| Pattern::literal(search).replace(s, replacement, 1).into_owned())
    }

    /// Replace every occurrence of `search`.
    pub fn replace_all(&self, search: &str, replacement: &str) -> Self {
        self.map_str(|s| Pattern::literal(search).replace(s, replacement, 0).into_owned())
    }

    /// Replace every match of `pattern`; see [`Pattern::replace`].
    pub fn replace_pattern(&self, pattern: &Pattern, replacement: &str) -> Self {
        self.map_str(|s| pattern.replace(s, replacement, 0).into_owned())
    }

    /// Replace every match of `pattern` with the callback's result.
    ///
    /// ```rust
    /// use unitext::{Pattern, Text};
    ///
    /// let text = Text::new("3 apples, 12 pears");
    /// let doubled = text.replace_with(&Pattern::regex(r"\d+").unwrap(), |g| {
    ///     let n: u32 = g[0].unwrap_or("0").parse().unwrap();
    ///     (n * 2).to_string()
    /// });
    /// assert_eq!(doubled, "6 apples, 24 pears");
    /// ```
    pub fn replace_with<F>(&self, pattern: &Pattern, callback: F) -> Self
    where
        F: FnMut(&[Option<&str>]) -> String,
    {
        self.map_str(|s| pattern.replace_with(s, callback).into_owned())
    }

    fn map_str(&self, f: impl FnOnce(&str) -> String) -> Self {
        self.derive(&f(&self.to_str()))
    }

    /// Strip leading and trailing whitespace.
    pub fn trim(&self) -> Self {
        self.map_str(|s| s.trim().to_string())
    }

    /// Strip leading whitespace.
    pub fn trim_start(&self) -> Self {
        self.map_str(|s| s.trim_start().to_string())
    }

    /// Strip trailing whitespace.
    pub fn trim_end(&self) -> Self {
        self.map_str(|s| s.trim_end().to_string())
    }

    /// Strip any of the code points in `chars` from both ends.
    pub fn trim_chars(&self, chars: &str) -> Self {
        self.map_str(|s| s.trim_matches(|c| chars.contains(c)).to_string())
    }

    /// Pad on the left with spaces to `length` code points.
    pub fn pad_start(&self, length: usize) -> Self {
        self.pad_start_with(length, " ")
    }

    /// Pad on the left with `fill` to `length` code points.
    ///
    /// Fill code points the encoding cannot represent are skipped; if none
    /// are left the text comes back unchanged.
    pub fn pad_start_with(&self, length: usize, fill: &str) -> Self {
        self.pad_sides(length, fill, |total| (total, 0))
    }

    /// Pad on the right with spaces to `length` code points.
    pub fn pad_end(&self, length: usize) -> Self {
        self.pad_end_with(length, " ")
    }

    /// Pad on the right with `fill` to `length` code points.
    pub fn pad_end_with(&self, length: usize, fill: &str) -> Self {
        self.pad_sides(length, fill, |total| (0, total))
    }

    /// Pad both sides with spaces to `length` code points.
    pub fn pad_both(&self, length: usize) -> Self {
        self.pad_both_with(length, " ")
    }

    /// Pad both sides with `fill` to `length` code points.
    ///
    /// An odd remainder goes to the right.
    pub fn pad_both_with(&self, length: usize, fill: &str) -> Self {
        self.pad_sides(length, fill, |total| (total / 2, total - total / 2))
    }

    fn pad_sides(
        &self,
        length: usize,
        fill: &str,
        split: impl Fn(usize) -> (usize, usize),
    ) -> Self {
        let fill = storable_fill(fill, self.encoding());
        if length <= self.len() || fill.is_empty() {
            return self.clone();
        }
        let (left, right) = split(length - self.len());
        self.map_str(|s| {
            let mut out = fill_run(&fill, left);
            out.push_str(s);
            out.push_str(&fill_run(&fill, right));
            out
        })
    }

    /// Lowercase every code point.
    pub fn to_lowercase(&self) -> Self {
        self.map_str(str::to_lowercase)
    }

    /// Uppercase every code point.
    pub fn to_uppercase(&self) -> Self {
        self.map_str(str::to_uppercase)
    }

    /// Uppercase the first code point.
    pub fn capitalize(&self) -> Self {
        self.map_first(char::to_uppercase)
    }

    /// Lowercase the first code point.
    pub fn uncapitalize(&self) -> Self {
        self.map_first(char::to_lowercase)
    }

    fn map_first<I>(&self, f: impl Fn(char) -> I) -> Self
    where
        I: Iterator<Item = char>,
    {
        self.map_str(|s| {
            let mut chars = s.chars();
            chars
                .next()
                .map(|first| f(first).chain(chars).collect())
                .unwrap_or_default()
        })
    }

    /// Capitalize each word, lowercasing the rest of it.
    ///
    /// Words are found with Unicode word boundaries (UAX #29).
    ///
    /// ```rust
    /// use unitext::Text;
    ///
    /// assert_eq!(Text::new("hello wORLD, élan").title_case(), "Hello World, Élan");
    /// ```
    pub fn title_case(&self) -> Self {
        self.map_str(|s| {
            s.split_word_bounds()
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) if first.is_alphanumeric() => first
                            .to_uppercase()
                            .chain(chars.flat_map(char::to_lowercase))
                            .collect(),
                        _ => word.to_string(),
                    }
                })
                .collect()
        })
    }

    /// Invert the case of every cased code point.
    ///
    /// ```rust
    /// use unitext::Text;
    ///
    /// assert_eq!(Text::new("Héllo Wörld 日本").swap_case(), "hÉLLO wÖRLD 日本");
    /// ```
    pub fn swap_case(&self) -> Self {
        self.map_str(|s| {
            s.chars()
                .flat_map(|c| -> Box<dyn Iterator<Item = char>> {
                    if c.is_uppercase() {
                        Box::new(c.to_lowercase())
                    } else if c.is_lowercase() {
                        Box::new(c.to_uppercase())
                    } else {
                        Box::new(std::iter::once(c))
                    }
                })
                .collect()
        })
    }

    /// Reverse the order of code points.
    pub fn reverse(&self) -> Self {
        self.map_str(|s| s.chars().rev().collect())
    }

    /// Repeat the text `n` times.
    pub fn repeat(&self, n: usize) -> Self {
        let bytes = self.as_bytes().repeat(n);
        self.derive_bytes(bytes, self.len() * n)
    }

    /// Split around every match of `pattern`.
    ///
    /// ```rust
    /// use unitext::{Pattern, Text};
    ///
    /// let parts = Text::new("a, b,c").split(&Pattern::parse("/,\\s*/").unwrap());
    /// assert_eq!(parts, vec!["a", "b", "c"]);
    /// ```
    pub fn split(&self, pattern: &Pattern) -> Vec<Self> {
        pattern
            .split(&self.to_str())
            .iter()
            .map(|part| self.derive(part))
            .collect()
    }

    /// Split into extended grapheme clusters.
    pub fn graphemes(&self) -> Vec<Self> {
        self.to_str()
            .graphemes(true)
            .map(|g| self.derive(g))
            .collect()
    }

    /// Cut to at most `limit` code points, ending with `suffix` when cut.
    ///
    /// The suffix counts towards the limit.
    pub fn truncate(&self, limit: usize, suffix: &str) -> Self {
        if self.len() <= limit {
            return self.clone();
        }
        let suffix_len = suffix.chars().count();
        if suffix_len >= limit {
            return self.derive(suffix).slice(0, Some(limit as i64));
        }
        self.sub(0..limit - suffix_len).concat(suffix)
    }
}
