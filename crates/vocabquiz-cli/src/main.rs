//! vocabquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "vocabquiz",
    version,
    about = "LLM-assisted English-Vietnamese vocabulary quiz"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz from a vocabulary file
    Quiz {
        /// Path to the vocabulary file
        #[arg(long)]
        file: PathBuf,

        /// Provider name from the config (default: config's default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Write a JSON summary of the completed run to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Export the (normalized) vocabulary list to this path on completion
        #[arg(long)]
        export: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a fresh vocabulary list with the language model
    Generate {
        /// Topic of the list (e.g. "Technology")
        #[arg(long)]
        topic: String,

        /// Free-form characteristics (e.g. "IELTS Band 7.0, phrasal verbs")
        #[arg(long, default_value = "everyday vocabulary")]
        characteristics: String,

        /// Where to write the generated list
        #[arg(long)]
        output: PathBuf,

        /// Provider name from the config
        #[arg(long)]
        provider: Option<String>,

        /// Start a quiz with the generated list right away
        #[arg(long)]
        start: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a vocabulary file and show what the quiz would use
    Validate {
        /// Path to the vocabulary file
        #[arg(long)]
        file: PathBuf,
    },

    /// Create a starter config and example vocabulary file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vocabquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            file,
            provider,
            summary,
            export,
            config,
        } => commands::quiz::execute(file, provider, summary, export, config).await,
        Commands::Generate {
            topic,
            characteristics,
            output,
            provider,
            start,
            config,
        } => commands::generate::execute(topic, characteristics, output, provider, start, config)
            .await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
