//! Searching and inspecting text.
//!
//! Matching runs over the decoded string and reports UTF-8 byte offsets;
//! every offset is translated to a code-point index before it is returned.
//!
//! `last_index_of` does not scan backwards. It searches forward, restarting
//! after each match, and keeps the last match that starts at or before the
//! bound. That is one forward search per match.

use crate::{Pattern, Text};

/// A match with its position in code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    /// The matched text.
    pub text: Text,
    /// Code-point index where the match starts.
    pub index: usize,
}

impl Text {
    /// Code-point index of the first occurrence of `needle`.
    ///
    /// ```rust
    /// use unitext::Text;
    ///
    /// let text = Text::new("añbañb");
    /// assert_eq!(text.index_of("ñb"), Some(1));
    /// assert_eq!(text.index_of_from("ñb", 2), Some(4));
    /// assert_eq!(text.index_of("z"), None);
    /// ```
    pub fn index_of(&self, needle: &str) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// Code-point index of the first occurrence of `needle` at or after
    /// `from` (negative counts from the end).
    pub fn index_of_from(&self, needle: &str, from: i64) -> Option<usize> {
        self.find_from(&Pattern::literal(needle), from)
            .map(|m| m.index)
    }

    /// Code-point index of the last occurrence of `needle`.
    ///
    /// An empty needle matches at the end, so this returns `len()` for it.
    pub fn last_index_of(&self, needle: &str) -> Option<usize> {
        self.last_index_of_before(needle, self.len() as i64)
    }

    /// Code-point index of the last occurrence of `needle` starting at or
    /// before `bound` (negative counts from the end).
    pub fn last_index_of_before(&self, needle: &str, bound: i64) -> Option<usize> {
        let bound = self.translate(bound);
        if bound < 0 {
            return None;
        }

        let pattern = Pattern::literal(needle);
        let decoded = self.to_str();
        let mut from = 0;
        let mut last = None;

        while let Some(m) = pattern.find_at(&decoded, from) {
            let index = self.codepoint_index(m.offset);
            if index as i64 > bound {
                break;
            }
            last = Some(index);
            from = if m.text.is_empty() {
                match decoded[m.offset..].chars().next() {
                    Some(c) => m.offset + c.len_utf8(),
                    None => break,
                }
            } else {
                m.end()
            };
        }

        last
    }

    /// Number of non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: &str) -> usize {
        Pattern::literal(needle).find_iter(&self.to_str()).len()
    }

    /// Whether `needle` occurs anywhere.
    pub fn contains(&self, needle: &str) -> bool {
        self.to_str().contains(needle)
    }

    /// Whether `needle` occurs anywhere, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        Pattern::literal_ignore_case(needle)
            .find_at(&self.to_str(), 0)
            .is_some()
    }

    /// Whether the text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.to_str().starts_with(prefix)
    }

    /// Whether the text ends with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.to_str().ends_with(suffix)
    }

    /// Whether `pattern` matches anywhere.
    pub fn is_match(&self, pattern: &Pattern) -> bool {
        pattern.find_at(&self.to_str(), 0).is_some()
    }

    /// The first match of `pattern`.
    pub fn match_first(&self, pattern: &Pattern) -> Option<TextMatch> {
        self.find_from(pattern, 0)
    }

    /// Every non-overlapping match of `pattern`, left to right.
    ///
    /// ```rust
    /// use unitext::{Pattern, Text};
    ///
    /// let text = Text::new("né 12 ü 345");
    /// let digits = Pattern::parse(r"/\d+/").unwrap();
    /// let found: Vec<_> = text
    ///     .match_all(&digits)
    ///     .into_iter()
    ///     .map(|m| (m.text.to_string(), m.index))
    ///     .collect();
    /// assert_eq!(found, vec![("12".to_string(), 3), ("345".to_string(), 8)]);
    /// ```
    pub fn match_all(&self, pattern: &Pattern) -> Vec<TextMatch> {
        let decoded = self.to_str();
        pattern
            .find_iter(&decoded)
            .into_iter()
            .map(|m| TextMatch {
                index: self.codepoint_index(m.offset),
                text: self.derive(&m.text),
            })
            .collect()
    }

    /// Capture groups of up to `limit` matches (`0` for all).
    pub fn captures(&self, pattern: &Pattern, limit: usize) -> Vec<Vec<Option<Text>>> {
        pattern
            .execute(&self.to_str(), limit)
            .into_iter()
            .map(|groups| {
                groups
                    .into_iter()
                    .map(|g| g.map(|s| self.derive(&s)))
                    .collect()
            })
            .collect()
    }

    fn find_from(&self, pattern: &Pattern, from: i64) -> Option<TextMatch> {
        let from = self.translate(from).clamp(0, self.len() as i64) as usize;
        let decoded = self.to_str();
        let start = self.utf8_offset(from);
        pattern.find_at(&decoded, start).map(|m| TextMatch {
            index: self.codepoint_index(m.offset),
            text: self.derive(&m.text),
        })
    }

    /// Compare with `other`, optionally ignoring case.
    pub fn equals(&self, other: &str, ignore_case: bool) -> bool {
        if ignore_case {
            self.to_str().to_lowercase() == other.to_lowercase()
        } else {
            self.to_str() == other
        }
    }

    /// Whether the text is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.to_str().trim().is_empty()
    }

    /// Whether the text has cased letters and all of them are lowercase.
    pub fn is_lowercase(&self) -> bool {
        self.all_cased(char::is_lowercase)
    }

    /// Whether the text has cased letters and all of them are uppercase.
    pub fn is_uppercase(&self) -> bool {
        self.all_cased(char::is_uppercase)
    }

    fn all_cased(&self, pred: fn(char) -> bool) -> bool {
        let decoded = self.to_str();
        let mut cased = decoded.chars().filter(|c| c.is_lowercase() || c.is_uppercase());
        let mut any = false;
        let all = cased.all(|c| {
            any = true;
            pred(c)
        });
        any && all
    }

    /// Whether the text is non-empty and entirely letters.
    pub fn is_alphabetic(&self) -> bool {
        !self.is_empty() && self.to_str().chars().all(char::is_alphabetic)
    }

    /// Whether the text is non-empty and entirely numeric characters.
    pub fn is_numeric(&self) -> bool {
        !self.is_empty() && self.to_str().chars().all(char::is_numeric)
    }

    /// Whether the text is non-empty and entirely letters or digits.
    pub fn is_alphanumeric(&self) -> bool {
        !self.is_empty() && self.to_str().chars().all(char::is_alphanumeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Encoding;

    #[test]
    fn test_ascii_search() {
        let text = Text::new("abcabc");
        assert_eq!(text.index_of("bc"), Some(1));
        assert_eq!(text.last_index_of("bc"), Some(4));
        assert_eq!(text.count("bc"), 2);
        assert!(!text.contains("xyz"));
    }

    #[test]
    fn test_multibyte_indices() {
        let text = Text::new("日本語日本語");
        assert_eq!(text.index_of("本"), Some(1));
        assert_eq!(text.last_index_of("本"), Some(4));
        assert_eq!(text.index_of_from("本", -3), Some(4));
    }

    #[test]
    fn test_last_index_of_bound() {
        let text = Text::new("abcabc");
        assert_eq!(text.last_index_of_before("bc", 3), Some(1));
        assert_eq!(text.last_index_of_before("bc", 4), Some(4));
        assert_eq!(text.last_index_of_before("bc", 0), None);
        assert_eq!(text.last_index_of_before("bc", -100), None);
    }

    #[test]
    fn test_empty_needle() {
        let text = Text::new("añ");
        assert_eq!(text.index_of(""), Some(0));
        assert_eq!(text.last_index_of(""), Some(2));
        assert_eq!(text.last_index_of_before("", -1), Some(1));
        assert_eq!(Text::new("").last_index_of(""), Some(0));
    }

    #[test]
    fn test_count_non_overlapping() {
        assert_eq!(Text::new("aaaa").count("aa"), 2);
    }

    #[test]
    fn test_non_utf8_offsets() {
        let sjis = Encoding::for_label("shift_jis").unwrap();
        let text = Text::of("abc日本語abc", sjis);
        assert_eq!(text.index_of("語"), Some(5));
        assert_eq!(text.last_index_of("abc"), Some(6));
        let matches = text.match_all(&Pattern::parse("/[a-c]+/").unwrap());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].index, 6);
        assert_eq!(matches[1].text.encoding(), sjis);
    }

    #[test]
    fn test_non_utf8_search_is_linear() {
        let sjis = Encoding::for_label("shift_jis").unwrap();
        let text = Text::of("日本".repeat(20_000), sjis);
        let found = text.match_all(&Pattern::literal("本"));
        assert_eq!(found.len(), 20_000);
        assert_eq!(found[19_999].index, 39_999);
        assert_eq!(text.last_index_of("日"), Some(39_998));
    }

    #[test]
    fn test_patterns() {
        let text = Text::new("Größe 42");
        let p = Pattern::parse(r"/(\d)(\d)/").unwrap();
        assert!(text.is_match(&p));
        let m = text.match_first(&p).unwrap();
        assert_eq!(m.index, 6);
        assert_eq!(m.text, "42");
        let groups = text.captures(&p, 0);
        assert_eq!(groups[0][2].as_ref().unwrap(), "2");
    }

    #[test]
    fn test_predicates() {
        assert!(Text::new("  \t").is_blank());
        assert!(Text::new("abc1").is_lowercase());
        assert!(!Text::new("123").is_lowercase());
        assert!(Text::new("ÄÖÜ").is_uppercase());
        assert!(Text::new("héllo").is_alphabetic());
        assert!(Text::new("٣4").is_numeric());
        assert!(!Text::new("").is_alphanumeric());
        assert!(!Text::new("abc").equals("ABC", false));
        assert!(Text::new("Hello").equals("hELLO", true));
        assert!(Text::new("hello").starts_with("he"));
        assert!(Text::new("hello").ends_with("lo"));
        assert!(Text::new("HeLLo").contains_ignore_case("ll"));
    }
}
