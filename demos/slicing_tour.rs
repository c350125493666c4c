//! Slice Notation Tour
//!
//! Shows how `start:stop:step` resolves over text of different lengths,
//! plus notation-based writes and deletes.
//!
//! ```bash
//! cargo run --example slicing_tour
//! ```

use unitext::{Slice, Text};

fn main() -> unitext::Result<()> {
    let text = Text::new("αβγδεζηθ");
    println!("Text: {text} ({} code points)\n", text.len());

    println!("{:<10} {:<22} {}", "Notation", "Indices", "Result");
    println!("{}", "-".repeat(46));

    for notation in [":", "::", "1:", ":-1", "::-1", "2:8:2", "5:1:-1", "-3:", "::3"] {
        let slice = Slice::parse(notation)?;
        let indices: Vec<usize> = slice.resolve_indices(text.len()).collect();
        println!(
            "{:<10} {:<22} {}",
            notation,
            format!("{indices:?}"),
            text.get_range(&slice)
        );
    }

    // Rendering is canonical, not a copy of the input
    println!("\n\":\" renders as {:?}", Slice::parse(":")?.to_string());

    // Writes and deletes return new values
    println!("\nset  \"::2\" = \"_\"  -> {}", text.set_notation("::2", "_")?);
    println!("unset \"1::2\"       -> {}", text.unset_notation("1::2")?);
    println!("set [12] = \"!\"     -> {}", text.set(12, "!")?);

    match Slice::parse("not a slice") {
        Ok(_) => unreachable!(),
        Err(err) => println!("\nrejected: {err}"),
    }

    Ok(())
}
