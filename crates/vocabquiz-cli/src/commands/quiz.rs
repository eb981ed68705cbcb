//! The `vocabquiz quiz` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use vocabquiz_core::engine::{QuizEngine, QuizEngineConfig};
use vocabquiz_core::error::QuizError;
use vocabquiz_core::model::Direction;
use vocabquiz_core::parser::parse_vocab_set;
use vocabquiz_core::score::{percent, ScoreBand};
use vocabquiz_core::session::QuizSession;
use vocabquiz_core::summary::QuizSummary;
use vocabquiz_providers::config::load_config_from;
use vocabquiz_providers::create_backend;

pub async fn execute(
    file: PathBuf,
    provider: Option<String>,
    summary: Option<PathBuf>,
    export: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let provider_name = provider.unwrap_or_else(|| config.default_provider.clone());
    let backend = create_backend(&provider_name, &config)?;
    tracing::info!("using provider '{provider_name}'");

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read vocabulary file: {}", file.display()))?;
    let set = parse_vocab_set(&text).with_context(|| {
        format!(
            "{} contains no usable entries. Expected lines like: \"word\" (n) : \"nghĩa\"",
            file.display()
        )
    })?;
    let entry_count = set.len();

    let engine = QuizEngine::new(
        backend.oracle.clone(),
        backend.examples.clone(),
        QuizEngineConfig {
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        },
    );

    println!("Loaded {entry_count} words from {}.", file.display());
    let mut rng = rand::rng();
    let mut session = QuizSession::start(set, &mut rng);

    loop {
        while let Some(question) = session.question() {
            println!(
                "\nQuestion {} of {}",
                session.position() + 1,
                session.total()
            );
            let ask = match question.direction {
                Direction::EnToVi => format!(
                    "Translate '{}' ({}) into Vietnamese",
                    question.prompt, question.word_type
                ),
                Direction::ViToEn => format!(
                    "Translate '{}' ({}) into English",
                    question.prompt, question.word_type
                ),
            };

            let answer = match read_line(&format!("{ask}: "))? {
                Some(answer) => answer,
                None => return Ok(()),
            };

            match engine.submit_answer(&mut session, &answer).await {
                Ok(outcome) => {
                    println!("\n{}", outcome.feedback);
                    println!("Example: {}", outcome.example_sentence);
                    if read_line("\nPress Enter for the next question...")?.is_none() {
                        return Ok(());
                    }
                    session.advance(&mut rng)?;
                }
                Err(QuizError::EmptyAnswer) => {
                    println!("Please type an answer before submitting.");
                }
                Err(e) => return Err(e.into()),
            }
        }

        print_score(&session);

        if let Some(path) = &summary {
            if let Some(s) = QuizSummary::from_session(&session) {
                s.save_json(path)?;
                println!("Summary saved to: {}", path.display());
            }
        }
        if let Some(path) = &export {
            std::fs::write(path, session.export_text())
                .with_context(|| format!("failed to export list to {}", path.display()))?;
            println!("List exported to: {}", path.display());
        }

        match read_line("\nTake the quiz again? [y/N] ")? {
            Some(reply) if reply.eq_ignore_ascii_case("y") => {
                session.restart(&mut rng);
            }
            _ => break,
        }
    }

    Ok(())
}

fn print_score(session: &QuizSession) {
    use comfy_table::{Cell, Table};

    let pct = percent(session.correct_count(), session.total());
    let band = ScoreBand::for_percent(pct);

    let mut table = Table::new();
    table.set_header(vec!["Questions", "Correct", "Score", "Band"]);
    table.add_row(vec![
        Cell::new(session.total()),
        Cell::new(session.correct_count()),
        Cell::new(format!("{pct:.1}%")),
        Cell::new(band.to_string()),
    ]);

    println!("\nQuiz complete!");
    println!("{table}");
    println!("{}", band.message());
}

/// Prompt and read one trimmed line; `None` on EOF.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let bytes = std::io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
