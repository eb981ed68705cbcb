//! The `vocabquiz generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use vocabquiz_core::parser::{format_vocab_text, parse_vocab_text};
use vocabquiz_core::traits::VocabListRequest;
use vocabquiz_providers::config::load_config_from;
use vocabquiz_providers::create_backend;

pub async fn execute(
    topic: String,
    characteristics: String,
    output: PathBuf,
    provider: Option<String>,
    start: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let provider_name = provider
        .clone()
        .unwrap_or_else(|| config.default_provider.clone());
    let backend = create_backend(&provider_name, &config)?;

    println!("Generating a vocabulary list about '{topic}'...");
    let raw = backend
        .vocab
        .generate_list(&VocabListRequest {
            topic,
            characteristics,
        })
        .await?;

    // Re-parse and re-format so the written file contains only lines the
    // quiz will actually accept.
    let entries = parse_vocab_text(&raw);
    anyhow::ensure!(
        !entries.is_empty(),
        "the model returned no parsable vocabulary lines"
    );

    std::fs::write(&output, format_vocab_text(&entries))
        .with_context(|| format!("failed to write list to {}", output.display()))?;
    println!("Wrote {} entries to {}", entries.len(), output.display());

    if start {
        super::quiz::execute(output, provider, None, None, config_path).await?;
    } else {
        println!("Start a quiz with: vocabquiz quiz --file {}", output.display());
    }

    Ok(())
}
