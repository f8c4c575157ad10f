//! Chat-line parsing: one line in, one [`Action`] out.
//!
//! Parsing is pure (no I/O, no network) so the whole command surface is
//! testable without a translation backend. Execution of the resulting
//! action lives in [`crate::plugin::Plugin`].

use crate::config::PluginConfig;
use crate::translation::looks_like_target_lang;

/// Which way a chat line is traveling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Typed by the local user, about to be sent.
    Outgoing,
    /// Received from a peer.
    Incoming,
}

/// What the plugin should do with a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Not ours: pass the line through unchanged.
    Noop,
    /// Translate `text` and send the result.
    SendTranslated { target_lang: String, text: String },
    /// Translate the most recent message and display it locally.
    EchoRecentTranslated { target_lang: String },
    /// Display the usage summary.
    ShowHelp,
    /// Display the plugin version.
    ShowVersion,
    /// Update the incoming auto-translate target language.
    SetIncomingLang(String),
    /// Translate an incoming message and display it locally.
    AutoTranslateIncoming { target_lang: String, text: String },
}

/// A chat command exposed by the plugin.
///
/// The table drives help output and the harness autocompleter; it is the
/// command-name-to-handler registration the host performs at plugin load.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub description: &'static str,
}

/// All chat commands, in help-output order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "translate",
        aliases: &["tr"],
        usage: "/tr [TARGET_LANG] <text..>",
        description: "Translate text with DeepL and send the translation",
    },
    CommandSpec {
        name: "trincoming",
        aliases: &["tri"],
        usage: "/tri <TARGET_LANG>",
        description: "Set the target language for incoming auto-translation",
    },
    CommandSpec {
        name: "trhelp",
        aliases: &["trh"],
        usage: "/trhelp",
        description: "Show help and current settings",
    },
    CommandSpec {
        name: "trver",
        aliases: &["trversion"],
        usage: "/trver",
        description: "Show the plugin version",
    },
];

/// Classifies one chat line.
///
/// Command prefixes are matched case-insensitively. Lines that are not
/// addressed to the plugin come back as [`Action::Noop`] and must reach
/// the host unchanged.
pub fn parse_line(line: &str, direction: Direction, config: &PluginConfig) -> Action {
    match direction {
        Direction::Incoming => parse_incoming(line, config),
        Direction::Outgoing => parse_outgoing(line, config),
    }
}

fn parse_incoming(line: &str, config: &PluginConfig) -> Action {
    if !config.auto_translate_incoming || line.trim().is_empty() {
        return Action::Noop;
    }

    let target_lang = if config.auto_incoming_target_lang.trim().is_empty() {
        "EN-GB".to_string()
    } else {
        config.auto_incoming_target_lang.clone()
    };

    Action::AutoTranslateIncoming {
        target_lang,
        text: line.to_string(),
    }
}

fn parse_outgoing(line: &str, config: &PluginConfig) -> Action {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix('/') {
        let (word, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return match word.to_lowercase().as_str() {
            "tr" | "translate" => parse_translate(args, config),
            "tri" | "trincoming" => parse_set_incoming(args),
            "trhelp" | "trh" => Action::ShowHelp,
            "trver" | "trversion" => Action::ShowVersion,
            _ => Action::Noop,
        };
    }

    if trimmed.starts_with('@') {
        return parse_inline_shortcut(trimmed);
    }

    Action::Noop
}

fn parse_translate(args: &str, config: &PluginConfig) -> Action {
    match args.trim().to_lowercase().as_str() {
        "help" | "-h" | "--help" | "?" => return Action::ShowHelp,
        "version" | "-v" | "--version" => return Action::ShowVersion,
        _ => {}
    }

    let tokens = tokenize(args);
    let Some(first) = tokens.first() else {
        return Action::Noop;
    };

    // A quoted language token counts: /tr "DE" "how are you" targets DE.
    let (target_lang, text_tokens) = if looks_like_target_lang(first) {
        (Some(first.clone()), &tokens[1..])
    } else {
        (None, &tokens[..])
    };

    let text = text_tokens.join(" ");
    if text.trim().is_empty() {
        return Action::Noop;
    }

    Action::SendTranslated {
        target_lang: target_lang.unwrap_or_else(|| config.target_lang.clone()),
        text,
    }
}

fn parse_set_incoming(args: &str) -> Action {
    let lang = args.trim().trim_matches(['"', '\'']);
    if looks_like_target_lang(lang) {
        Action::SetIncomingLang(lang.to_string())
    } else {
        // Malformed commands get the usage summary.
        Action::ShowHelp
    }
}

/// `@LANG text` sends a translation; bare `@LANG` translates the latest
/// message. Anything that does not look like a language code after the
/// `@` passes through so addressing people stays possible.
fn parse_inline_shortcut(trimmed: &str) -> Action {
    let rest = &trimmed[1..];
    let lang_end = rest
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_alphabetic() || *ch == '-' || *ch == '_'))
        .map_or(rest.len(), |(i, _)| i);

    let lang = &rest[..lang_end];
    if lang.len() < 2 || !looks_like_target_lang(lang) {
        return Action::Noop;
    }

    let text = rest[lang_end..].trim();
    if text.is_empty() {
        Action::EchoRecentTranslated {
            target_lang: lang.to_string(),
        }
    } else {
        Action::SendTranslated {
            target_lang: lang.to_string(),
            text: text.to_string(),
        }
    }
}

/// Splits `input` on whitespace, honoring `"…"` and `'…'` quoting.
///
/// Quotes around a token are removed; an unterminated quote makes the
/// rest of the line one literal token, quote character included.
fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if chars[i] == '"' || chars[i] == '\'' {
            let quote = chars[i];
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == quote) {
                tokens.push(chars[i + 1..i + 1 + close].iter().collect());
                i += close + 2;
                continue;
            }
            let literal: String = chars[i..].iter().collect();
            tokens.push(literal.trim_end().to_string());
            break;
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}
