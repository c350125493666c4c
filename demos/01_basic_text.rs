//! Basic Text Indexing
//!
//! The minimal example: index and slice by code point.
//!
//! ```bash
//! cargo run --example 01_basic_text
//! ```

use unitext::Text;

fn main() {
    let text = Text::new("Crème brûlée, 東京, 🍮");

    println!("Text: {text}");
    println!("Code points: {}, bytes: {}\n", text.len(), text.size());

    for (i, c) in text.chars().enumerate().take(6) {
        println!("[{i}] {c:?} ({} bytes)", c.size());
    }

    // Negative indices count from the end
    println!("\nLast: {}", text.char_at(-1));
    println!("Without last: {}", text.slice(0, Some(-1)));

    // Search reports code-point indices, not byte offsets
    if let Some(i) = text.index_of("東京") {
        println!("\"東京\" starts at code point {i}");
    }
}
