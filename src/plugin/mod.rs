//! The plugin core: command dispatch and host integration.
//!
//! [`Plugin`] owns the configuration, parses chat lines through
//! [`command::parse_line`], and executes the resulting actions against the
//! host and the translation backend. Every failure path reports locally
//! and returns control to the host with the plugin still active.

/// Chat-line parsing and the command table.
pub mod command;
mod host;

pub use command::{Action, COMMANDS, CommandSpec, Direction, parse_line};
pub use host::Host;

use tracing::{debug, warn};

use crate::config::{ConfigManager, PluginConfig};
use crate::translation::{TranslateError, Translation, TranslationRequest, Translator};

/// Plugin version, shown by `/trver` and in the help header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The plugin's top-level instance.
pub struct Plugin {
    config: PluginConfig,
    translator: Box<dyn Translator>,
    manager: Option<ConfigManager>,
}

impl Plugin {
    /// Creates a plugin with the given configuration and translation
    /// backend.
    pub fn new(config: PluginConfig, translator: Box<dyn Translator>) -> Self {
        Self {
            config,
            translator,
            manager: None,
        }
    }

    /// Persists configuration changes (`/tri`) through `manager`.
    pub fn with_manager(mut self, manager: ConfigManager) -> Self {
        self.manager = Some(manager);
        self
    }

    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Handles a line the local user is about to send.
    ///
    /// Returns `true` when the plugin consumed the line; `false` means the
    /// host should deliver it unchanged.
    pub async fn handle_outgoing(&mut self, line: &str, host: &mut dyn Host) -> bool {
        let action = command::parse_line(line, Direction::Outgoing, &self.config);
        if action == Action::Noop {
            return false;
        }

        self.run_action(action, line, host).await;
        true
    }

    /// Handles a message received from `sender`.
    pub async fn handle_incoming(&mut self, sender: &str, line: &str, host: &mut dyn Host) {
        let action = command::parse_line(line, Direction::Incoming, &self.config);
        if let Action::AutoTranslateIncoming { target_lang, text } = action {
            self.auto_translate(sender, &target_lang, &text, host).await;
        }
    }

    async fn run_action(&mut self, action: Action, line: &str, host: &mut dyn Host) {
        match action {
            Action::Noop | Action::AutoTranslateIncoming { .. } => {}
            Action::SendTranslated { target_lang, text } => {
                match self.translate(&target_lang, &text).await {
                    Ok(translation) => {
                        host.send_message(strip_wrapping_quotes(translation.text.trim()));
                    }
                    Err(err) => report_error(host, line, &err),
                }
            }
            Action::EchoRecentTranslated { target_lang } => {
                let Some(recent) = host.recent_message() else {
                    host.show_local("No recent message to translate");
                    return;
                };
                match self.translate(&target_lang, &recent).await {
                    Ok(translation) => {
                        host.show_local(&format!(
                            "[{target_lang}] {}",
                            strip_wrapping_quotes(translation.text.trim())
                        ));
                    }
                    Err(err) => report_error(host, line, &err),
                }
            }
            Action::ShowHelp => host.show_local(&help_text(&self.config)),
            Action::ShowVersion => host.show_local(&format!("DeepL Translate v{VERSION}")),
            Action::SetIncomingLang(lang) => {
                self.config.auto_incoming_target_lang.clone_from(&lang);
                self.persist_config();
                host.show_local(&format!("Incoming auto-translate target set to {lang}"));
            }
        }
    }

    async fn auto_translate(
        &mut self,
        sender: &str,
        target_lang: &str,
        text: &str,
        host: &mut dyn Host,
    ) {
        match self.translate(target_lang, text).await {
            Ok(translation) => {
                if is_redundant(&translation, text, target_lang) {
                    debug!(target_lang, "skipping redundant auto-translation");
                    return;
                }
                let detected = translation
                    .detected_source_lang
                    .as_deref()
                    .unwrap_or("?")
                    .to_uppercase();
                host.show_local(&format!(
                    "[{detected}→{target_lang}] {sender}: {}",
                    translation.text
                ));
            }
            Err(err) => {
                // Auto-translation errors are logged, not echoed: one bad
                // key would otherwise spam every incoming message.
                debug!(error = %err, "auto-translation failed");
            }
        }
    }

    /// Builds and issues one translation request.
    ///
    /// The API-key invariant is enforced here, before the backend is
    /// touched: a missing key never causes network traffic.
    async fn translate(
        &self,
        target_lang: &str,
        text: &str,
    ) -> Result<Translation, TranslateError> {
        if !self.config.has_api_key() {
            return Err(TranslateError::MissingApiKey);
        }

        let request = TranslationRequest {
            source_text: text.to_string(),
            target_lang: target_lang.to_string(),
            preserve_formatting: self.config.preserve_formatting,
        };
        self.translator.translate(&request).await
    }

    fn persist_config(&self) {
        if let Some(manager) = &self.manager
            && let Err(err) = manager.save(&self.config)
        {
            warn!(error = %err, "failed to persist plugin config");
        }
    }
}

/// Builds the `/trhelp` output from the command table and current settings.
pub fn help_text(config: &PluginConfig) -> String {
    let auto = if config.auto_translate_incoming {
        "on"
    } else {
        "off"
    };

    let mut lines = vec![
        format!("DeepL Translate v{VERSION}"),
        String::new(),
        format!("Outgoing default target: {}", config.target_lang),
        format!(
            "Incoming auto-translate: {auto} → {}",
            config.auto_incoming_target_lang
        ),
        String::new(),
        "Usage:".to_string(),
    ];

    for spec in COMMANDS {
        lines.push(format!("  {:34} {}", spec.usage, spec.description));
    }

    lines.extend([
        String::new(),
        "Shortcuts:".to_string(),
        "  @LANG <text..>                     inline shortcut; sends the translation".to_string(),
        "  @LANG                              translate the latest message (local-only)"
            .to_string(),
        String::new(),
        "Examples:".to_string(),
        "  /tr FR how are you".to_string(),
        "  /tr \"DE\" \"how are you\"".to_string(),
        "  @ES buenos dias".to_string(),
        "  @EN-GB".to_string(),
    ]);

    lines.join("\n")
}

/// An auto-translation that adds nothing gets dropped: the detected source
/// already matches the target's primary subtag, or the text came back
/// unchanged.
fn is_redundant(translation: &Translation, original: &str, target_lang: &str) -> bool {
    if translation.text.trim() == original.trim() {
        return true;
    }

    let primary = target_lang
        .split(['-', '_'])
        .next()
        .unwrap_or(target_lang);
    translation
        .detected_source_lang
        .as_deref()
        .is_some_and(|detected| detected.eq_ignore_ascii_case(primary))
}

fn report_error(host: &mut dyn Host, line: &str, err: &TranslateError) {
    host.show_local(&format!(
        "Translation failed for \"{}\": {err}",
        summarize(line)
    ));
}

/// Trims a command line down to an error-message-sized label.
fn summarize(line: &str) -> String {
    const CONTEXT_CHARS: usize = 32;

    let trimmed = line.trim();
    let mut out: String = trimmed.chars().take(CONTEXT_CHARS).collect();
    if trimmed.chars().count() > CONTEXT_CHARS {
        out.push('…');
    }
    out
}

fn strip_wrapping_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| {
            text.strip_prefix('\'')
                .and_then(|t| t.strip_suffix('\''))
        })
        .unwrap_or(text)
}
