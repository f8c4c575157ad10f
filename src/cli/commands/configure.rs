//! Configure command handler for editing plugin settings.

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};

use crate::config::{API_KEY_ENV, ConfigManager, PluginConfig};
use crate::translation::TARGET_LANGUAGES;
use crate::ui::Style;

/// Runs the configure command.
///
/// With `show`, prints the current settings and exits; otherwise walks
/// through each setting interactively and saves the result.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        let manager = ConfigManager::new();
        print_current_settings(&manager.load_or_default());
        return Ok(());
    }

    // Ctrl+C or Escape in a prompt aborts the walkthrough without saving;
    // that is a normal exit, not an error.
    match run_configure_inner() {
        Err(e) if is_prompt_cancelled(&e) => {
            println!();
            Ok(())
        }
        other => other,
    }
}

fn is_prompt_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load_or_default();

    print_current_settings(&config);

    config.api_key = prompt_api_key(&config)?;
    config.target_lang = select_language("Default target language:", &config.target_lang)?;

    config.auto_translate_incoming = Confirm::new("Auto-translate incoming messages?")
        .with_default(config.auto_translate_incoming)
        .prompt()?;

    if config.auto_translate_incoming {
        config.auto_incoming_target_lang = select_language(
            "Incoming auto-translate target:",
            &config.auto_incoming_target_lang,
        )?;
    }

    config.preserve_formatting = Confirm::new("Preserve simple formatting (bold/italic/newlines)?")
        .with_default(config.preserve_formatting)
        .prompt()?;

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_settings(config: &PluginConfig) {
    println!("{}", Style::header("Current settings"));
    println!(
        "  {}                    {}",
        Style::label("api_key"),
        if config.has_api_key() {
            Style::value("(set)")
        } else {
            Style::secondary("(not set)")
        }
    );
    println!(
        "  {}                {}",
        Style::label("target_lang"),
        Style::value(&config.target_lang)
    );
    println!(
        "  {}    {}",
        Style::label("auto_translate_incoming"),
        Style::value(config.auto_translate_incoming)
    );
    println!(
        "  {}  {}",
        Style::label("auto_incoming_target_lang"),
        Style::value(&config.auto_incoming_target_lang)
    );
    println!(
        "  {}        {}",
        Style::label("preserve_formatting"),
        Style::value(config.preserve_formatting)
    );
    println!();
}

fn prompt_api_key(config: &PluginConfig) -> Result<String> {
    let help = format!("Stored in config.toml; the {API_KEY_ENV} environment variable overrides it");
    let mut prompt = Text::new("DeepL API key:").with_help_message(&help);

    if config.has_api_key() {
        prompt = prompt.with_default(&config.api_key);
    }

    let key = prompt.prompt()?;
    Ok(key.trim().to_string())
}

fn select_language(message: &str, current: &str) -> Result<String> {
    // Options rendered as "code - Name"
    let options: Vec<String> = TARGET_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_index = TARGET_LANGUAGES
        .iter()
        .position(|(code, _)| code.eq_ignore_ascii_case(current))
        .unwrap_or(0);

    let selection = Select::new(message, options)
        .with_starting_cursor(default_index)
        .prompt()?;

    // split() always returns at least one element; unwrap_or is a fallback
    let code = selection.split(" - ").next().unwrap_or(&selection);

    Ok(code.to_string())
}
