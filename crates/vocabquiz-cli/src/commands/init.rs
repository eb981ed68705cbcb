//! The `vocabquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create vocabquiz.toml
    if std::path::Path::new("vocabquiz.toml").exists() {
        println!("vocabquiz.toml already exists, skipping.");
    } else {
        std::fs::write("vocabquiz.toml", SAMPLE_CONFIG)?;
        println!("Created vocabquiz.toml");
    }

    // Create example vocabulary list
    std::fs::create_dir_all("vocab")?;
    let example_path = std::path::Path::new("vocab/starter.txt");
    if example_path.exists() {
        println!("vocab/starter.txt already exists, skipping.");
    } else {
        std::fs::write(example_path, STARTER_LIST)?;
        println!("Created vocab/starter.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit vocabquiz.toml with your API keys");
    println!("  2. Run: vocabquiz validate --file vocab/starter.txt");
    println!("  3. Run: vocabquiz quiz --file vocab/starter.txt");

    Ok(())
}

// Top-level keys must come before the first [providers.*] table, or TOML
// assigns them to that table.
const SAMPLE_CONFIG: &str = r#"# vocabquiz configuration

default_provider = "gemini"
max_retries = 2
retry_delay_ms = 500

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
"#;

const STARTER_LIST: &str = r#""hello" (n) : "xin chào"
"goodbye" (n) : "tạm biệt"
"beautiful" (adj) : "đẹp"
"quickly" (adv) : "nhanh chóng"
"run" (v) : "chạy"
"give up" (phr. v) : "từ bỏ"
"in front of" (prep) : "ở phía trước"
"piece of cake" (phr) : "chuyện dễ dàng"
"sustain" (v) : "duy trì"
"knowledge" (n) : "kiến thức"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use vocabquiz_providers::VocabquizConfig;

    #[test]
    fn sample_config_top_level_keys_survive_edits() {
        // An edited default_provider must take effect, which requires the
        // top-level keys to sit above the provider tables.
        let edited = SAMPLE_CONFIG.replace(
            "default_provider = \"gemini\"",
            "default_provider = \"openai\"",
        );
        assert_ne!(edited, SAMPLE_CONFIG);

        let config: VocabquizConfig = toml::from_str(&edited).unwrap();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_delay_ms, 500);
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn starter_list_parses_in_full() {
        let entries = vocabquiz_core::parser::parse_vocab_text(STARTER_LIST);
        assert_eq!(entries.len(), STARTER_LIST.lines().count());
    }
}
