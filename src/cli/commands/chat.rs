//! Interactive console session driving the plugin.
//!
//! Stands in for a real chat client during development: typed lines go
//! through [`Plugin::handle_outgoing`] exactly as a host would route them,
//! and `/incoming` simulates a message arriving from a peer.

use anyhow::Result;
use inquire::Text;
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use crate::config::{ConfigManager, PluginConfig};
use crate::plugin::{self, Action, COMMANDS, Direction, Host, Plugin, parse_line};
use crate::translation::{DEEPL_API_URL, DeepLClient};
use crate::ui::{Spinner, Style};

/// Options for the chat session.
pub struct ChatOptions {
    pub to: Option<String>,
    pub endpoint: Option<String>,
}

// Session-only commands, on top of the plugin's own command table.
const SESSION_COMMANDS: &[(&str, &str)] = &[
    ("/incoming", "Simulate an incoming message from a peer"),
    ("/config", "Show current plugin settings"),
    ("/quit", "Exit the session"),
];

/// Console-backed [`Host`].
///
/// Output is buffered and flushed after the spinner clears so the two
/// never interleave. Only peer messages count as "recent": the bare
/// `@LANG` shortcut translates what the other side said, not our own
/// last line.
#[derive(Default)]
struct ConsoleHost {
    recent: Option<String>,
    pending: Vec<Echo>,
}

enum Echo {
    Sent(String),
    Local(String),
}

impl ConsoleHost {
    fn note_incoming(&mut self, sender: &str, text: &str) {
        self.recent = Some(text.to_string());
        println!("{} {text}", Style::code(format!("{sender} →")));
    }

    fn flush(&mut self) {
        for echo in self.pending.drain(..) {
            match echo {
                Echo::Sent(text) => println!("{} {text}", Style::sent("you →")),
                Echo::Local(text) => println!("{}", Style::secondary(text)),
            }
        }
    }
}

impl Host for ConsoleHost {
    fn send_message(&mut self, text: &str) {
        self.pending.push(Echo::Sent(text.to_string()));
    }

    fn show_local(&mut self, text: &str) {
        self.pending.push(Echo::Local(text.to_string()));
    }

    fn recent_message(&self) -> Option<String> {
        self.recent.clone()
    }
}

/// Slash command autocompleter over plugin and session commands.
#[derive(Clone)]
struct SlashCommandCompleter {
    entries: Vec<(String, String)>,
}

impl SlashCommandCompleter {
    fn new() -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for spec in COMMANDS {
            entries.push((format!("/{}", spec.name), spec.description.to_string()));
            for alias in spec.aliases {
                entries.push((format!("/{alias}"), spec.description.to_string()));
            }
        }
        for (cmd, desc) in SESSION_COMMANDS {
            entries.push(((*cmd).to_string(), (*desc).to_string()));
        }
        entries.sort();

        Self { entries }
    }
}

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = self
            .entries
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Runs the interactive session until `/quit` or Ctrl+C.
pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load_or_default();
    config.apply_env_override();
    if let Some(to) = options.to {
        config.target_lang = to;
    }

    let endpoint = options
        .endpoint
        .unwrap_or_else(|| DEEPL_API_URL.to_string());
    let client = DeepLClient::with_endpoint(endpoint, config.api_key.clone());
    let mut plugin = Plugin::new(config, Box::new(client)).with_manager(manager);
    let mut host = ConsoleHost::default();

    print_header(plugin.config());

    let prompt_style = Styled::new("❯")
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    // Non-highlighted suggestions: gray
    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    // Highlighted suggestion: purple
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

    let completer = SlashCommandCompleter::new();

    loop {
        let input = Text::new("")
            .with_render_config(render_config)
            .with_autocomplete(completer.clone())
            .with_help_message("Type a message, /trhelp for commands, Ctrl+C to quit")
            .prompt();

        match input {
            Ok(line) => {
                if !handle_session_line(&mut plugin, &mut host, &line).await {
                    break;
                }
            }
            Err(
                inquire::InquireError::OperationCanceled
                | inquire::InquireError::OperationInterrupted,
            ) => {
                println!(); // Clear line before goodbye message
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", Style::success("Goodbye!"));
    Ok(())
}

/// Routes one typed line. Returns `false` to end the session.
async fn handle_session_line(plugin: &mut Plugin, host: &mut ConsoleHost, line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }

    match trimmed.split_whitespace().next().unwrap_or_default() {
        "/quit" | "/exit" | "/q" => return false,
        "/config" => {
            print_config(plugin.config());
            return true;
        }
        "/incoming" => {
            let text = trimmed.strip_prefix("/incoming").unwrap_or_default().trim();
            if text.is_empty() {
                println!("{}", Style::secondary("Usage: /incoming <text..>"));
                return true;
            }
            host.note_incoming("peer", text);

            let spinner = plugin
                .config()
                .auto_translate_incoming
                .then(|| Spinner::new("Translating..."));
            plugin.handle_incoming("peer", text, host).await;
            if let Some(spinner) = spinner {
                spinner.stop();
            }
            host.flush();
            return true;
        }
        _ => {}
    }

    let action = parse_line(line, Direction::Outgoing, plugin.config());
    let needs_network = matches!(
        action,
        Action::SendTranslated { .. } | Action::EchoRecentTranslated { .. }
    );

    let spinner = needs_network.then(|| Spinner::new("Translating..."));
    let consumed = plugin.handle_outgoing(line, host).await;
    if let Some(spinner) = spinner {
        spinner.stop();
    }
    host.flush();

    if !consumed {
        if let Some(word) = trimmed.strip_prefix('/') {
            let name = word
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let known = COMMANDS
                .iter()
                .any(|spec| spec.name == name || spec.aliases.contains(&name.as_str()));
            if known {
                println!(
                    "{}",
                    Style::secondary("Nothing to translate. Usage: /tr [TARGET_LANG] <text..>")
                );
            } else {
                println!("{}", Style::error(format!("Unknown command: /{name}")));
            }
        } else {
            // An ordinary chat line; a real host would transmit it as-is.
            println!("{} {trimmed}", Style::sent("you →"));
        }
    }

    true
}

fn print_header(config: &PluginConfig) {
    println!(
        "{} {} - Console Translation Session",
        Style::header("deepl-chat"),
        Style::version(format!("v{}", plugin::VERSION))
    );
    if !config.has_api_key() {
        println!(
            "{}",
            Style::error("No DeepL API key configured. Run 'dlchat configure' or set DEEPL_API_KEY.")
        );
    }
    println!();
}

fn print_config(config: &PluginConfig) {
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
