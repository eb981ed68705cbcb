//! The `vocabquiz validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use vocabquiz_core::parser::parse_vocab_text;

pub fn execute(file: PathBuf) -> Result<()> {
    use comfy_table::{Cell, Table};

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read vocabulary file: {}", file.display()))?;

    let entries = parse_vocab_text(&text);
    anyhow::ensure!(
        !entries.is_empty(),
        "no valid vocabulary lines found in {}. Expected lines like: \"word\" (n) : \"nghĩa\"",
        file.display()
    );

    let mut table = Table::new();
    table.set_header(vec!["Word", "Type", "Meaning"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.word),
            Cell::new(&entry.word_type),
            Cell::new(&entry.meaning),
        ]);
    }
    println!("{table}");
    println!("{} entries parsed.", entries.len());

    let line_count = text.lines().filter(|l| !l.trim().is_empty()).count();
    let skipped = line_count - entries.len();
    if skipped > 0 {
        println!("{skipped} line(s) did not match the expected format and would be skipped.");
    }

    Ok(())
}
