//! Behaviour tests for text values.
//!
//! Each section exercises one surface of `Text` end to end through the
//! public API.

use std::sync::Arc;
use std::thread;

use serde_json::json;
use unitext::{Encoding, Error, Pattern, Slice, Stringable, Text};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn stringable_inputs() {
    assert_eq!(Text::new(()), "");
    assert_eq!(Text::new(true), "1");
    assert_eq!(Text::new(12_u8), "12");
    assert_eq!(Text::new(-3.5), "-3.5");
    assert_eq!(Text::new('ñ'), "ñ");
    assert_eq!(Text::new(String::from("x")), "x");
    assert_eq!(Text::new(Stringable::object(&Slice::full())), "0::");
}

#[test]
fn non_stringable_is_invalid_argument() {
    let err = Text::from_value(&json!([1, 2, 3]), Encoding::utf8()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(Text::from_value(&json!({"k": "v"}), Encoding::utf8()).is_err());
    assert_eq!(Text::from_value(&json!(null), Encoding::utf8()).unwrap(), "");
}

#[test]
fn encoding_is_copied_to_derived_values() {
    let euc = Encoding::for_label("euc-kr").unwrap();
    let text = Text::of("한국어 text", euc);
    for derived in [
        text.slice(1, None),
        text.to_uppercase(),
        text.reverse(),
        text.concat("!"),
        text.get_notation("::2").unwrap(),
        text.pad_start(20),
    ] {
        assert_eq!(derived.encoding(), euc);
    }
    assert_eq!(text.to_uppercase(), "한국어 TEXT");
}

// =============================================================================
// Code-point indexing
// =============================================================================

#[test]
fn cafe_counts_code_points() {
    let text = Text::new("café");
    assert_eq!(text.len(), 4);
    assert_eq!(text.size(), 5);
    assert_eq!(text.at(3).unwrap(), "é");
}

#[test]
fn cjk_slicing() {
    let text = Text::new("東京都渋谷区");
    assert_eq!(text.slice(2, Some(4)), "都渋");
    assert_eq!(text.slice(-2, None), "谷区");
    assert_eq!(text.at(-1).unwrap(), "区");
    assert_eq!(text.slice(0, Some(-1)).len(), 5);
}

#[test]
fn notation_indexing() {
    let text = Text::new("0123456789");
    assert_eq!(text.get_notation("2:8:2").unwrap(), "246");
    assert_eq!(text.get_notation("::-1").unwrap(), text.reverse());
    assert_eq!(text.get_notation(":").unwrap(), text);
    assert_eq!(text.get_notation(":-10").unwrap(), "");
    assert!(matches!(
        text.get_notation("nope"),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn write_past_end_pads() {
    let text = Text::new("abc");
    let written = text.set(100, "x").unwrap();
    assert_eq!(written.len(), 101);
    assert_eq!(text.len(), 3);
}

#[test]
fn negative_write_before_start_is_out_of_range() {
    let err = Text::new("abc").set(-10, "x").unwrap_err();
    assert_eq!(err, Error::OutOfRange { index: -10, length: 3 });
}

#[test]
fn delete_by_notation() {
    let text = Text::new("añbñc");
    assert_eq!(text.unset_notation("1::2").unwrap(), "abc");
    assert_eq!(text.unset(-1).unwrap(), "añbñ");
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn literal_search() {
    let text = Text::new("abcabc");
    assert_eq!(text.index_of("bc"), Some(1));
    assert_eq!(text.last_index_of("bc"), Some(4));
    assert_eq!(text.count("bc"), 2);
    assert!(!text.contains("xyz"));
}

#[test]
fn pattern_errors_surface() {
    assert!(matches!(
        Pattern::parse("/(unclosed/"),
        Err(Error::PatternInvalid { .. })
    ));
    // Not delimited: a literal search for the characters themselves.
    let literal = Pattern::parse("(unclosed").unwrap();
    assert!(Text::new("x(unclosed").is_match(&literal));
}

#[test]
fn regex_matches_report_code_points() {
    let text = Text::new("ñandú 🐦 emu");
    let birds = Pattern::parse("/ñandú|emu/i").unwrap();
    let found = text.match_all(&birds);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].index, 0);
    assert_eq!(found[1].index, 8);
    assert_eq!(found[1].text, "emu");
}

// =============================================================================
// Transforms
// =============================================================================

#[test]
fn padding() {
    assert_eq!(Text::pad(5, "ab").to_string(), "ababa");
    let text = Text::new("añ");
    assert_eq!(text.pad_start(10).len(), 10);
    assert_eq!(Text::new("long enough").pad_start(3).len(), 11);
}

#[test]
fn idempotent_transforms() {
    let text = Text::new("  ÀBC déf  ");
    assert_eq!(text.to_lowercase().to_lowercase(), text.to_lowercase());
    assert_eq!(text.trim().trim(), text.trim());
}

#[test]
fn reverse_keeps_code_points_whole() {
    let text = Text::new("ab日😀");
    assert_eq!(text.reverse().to_string(), "😀日ba");
}

#[test]
fn swap_case_per_code_point() {
    assert_eq!(Text::new("ÉtÉ 東京").swap_case(), "éTé 東京");
}

#[test]
fn replace_variants() {
    let text = Text::new("one two two");
    assert_eq!(text.replace("two", "2"), "one 2 two");
    assert_eq!(text.replace_all("two", "2"), "one 2 2");
    let p = Pattern::parse(r"/(\w+) (\w+)/").unwrap();
    assert_eq!(text.replace_pattern(&p, "$2 $1"), "two one two");
}

#[test]
fn split_into_text() {
    let parts = Text::new("a日b日c").split(&Pattern::literal("日"));
    assert_eq!(parts, vec!["a", "b", "c"]);
}

// =============================================================================
// Other encodings
// =============================================================================

#[test]
fn shift_jis_search_at_scale() {
    let sjis = Encoding::for_label("shift_jis").unwrap();
    let text = Text::of("日本".repeat(20_000), sjis);
    assert_eq!(text.size(), 80_000);

    let found = text.match_all(&Pattern::literal("本"));
    assert_eq!(found.len(), 20_000);
    assert!(found.iter().enumerate().all(|(i, m)| m.index == 2 * i + 1));

    assert_eq!(text.last_index_of("日本"), Some(39_998));
    assert_eq!(text.index_of_from("日", -3), Some(39_998));
    assert_eq!(text.count("日本"), 20_000);
}

#[test]
fn substituted_code_points_keep_length_in_sync() {
    let latin1 = Encoding::for_label("latin1").unwrap();
    let text = Text::of("a日b", latin1);
    let stored = text.to_string();
    assert_eq!(stored, "a&#26085;b");
    assert_eq!(text.len(), stored.chars().count());
    assert_eq!(text.index_of("b"), Some(text.len() - 1));
    assert_eq!(text.at(-1).unwrap(), "b");

    let derived = text.concat("ü日").to_uppercase();
    assert_eq!(derived.len(), derived.to_string().chars().count());
    assert_eq!(derived.len(), derived.chars().count());
}

#[test]
fn write_past_end_lands_at_index_in_latin1() {
    let latin1 = Encoding::for_label("latin1").unwrap();
    let text = Text::of("abc", latin1);
    assert!(matches!(
        text.set_with_fill(5, "x", "日"),
        Err(Error::InvalidArgument(_))
    ));

    let written = text.set_with_fill(5, "x", "·").unwrap();
    assert_eq!(written, "abc··x");
    assert_eq!(written.len(), 6);
    assert_eq!(written.index_of("x"), Some(5));
    assert_eq!(written.size(), 6);
}

#[test]
fn padding_in_latin1_counts_stored_code_points() {
    let latin1 = Encoding::for_label("latin1").unwrap();
    let text = Text::of("abc", latin1);
    assert_eq!(text.pad_start_with(6, "日").len(), 3);
    assert_eq!(text.pad_start_with(6, "日*").len(), 6);
    assert_eq!(Text::pad_in(3, "é", latin1).size(), 3);
    assert_eq!(Text::pad_in(3, "é", latin1).encoding(), latin1);
}

#[test]
fn from_bytes_never_rewrites_content() {
    let big5 = Encoding::for_label("big5").unwrap();
    let err = Text::from_bytes(vec![0x88, 0x62], big5).unwrap_err();
    assert!(matches!(err, Error::MalformedBytes { .. }));

    let euc = Encoding::for_label("euc-kr").unwrap();
    let bytes = euc.encode("한국어").into_owned();
    let text = Text::from_bytes(bytes.clone(), euc).unwrap();
    assert_eq!(text, "한국어");
    assert_eq!(text.as_bytes(), bytes.as_slice());
}

// =============================================================================
// Value semantics
// =============================================================================

#[test]
fn json_is_the_raw_string() {
    let text = Text::new("héllo \"world\"");
    let encoded = serde_json::to_string(&text).unwrap();
    assert_eq!(encoded, r#""héllo \"world\"""#);
    let decoded: Text = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, text);
}

#[test]
fn iteration_is_restartable() {
    let text = Text::new("añ日");
    let first: Vec<String> = text.chars().map(|c| c.to_string()).collect();
    let second: Vec<String> = (&text).into_iter().map(|c| c.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["a", "ñ", "日"]);
}

#[test]
fn case_insensitive_equality() {
    let text = Text::new("Straße");
    assert!(text.equals("STRAßE", true));
    assert!(!text.equals("STRAßE", false));
}

#[test]
fn shared_across_threads() {
    let text = Arc::new(Text::new("ünïcödé ".repeat(200)));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let text = Arc::clone(&text);
            thread::spawn(move || {
                let i = (t * 97) % text.len();
                (i, text.at(i as i64).unwrap().to_string())
            })
        })
        .collect();

    let chars: Vec<char> = text.to_string().chars().collect();
    for handle in handles {
        let (i, got) = handle.join().unwrap();
        assert_eq!(got, chars[i].to_string());
    }
}
