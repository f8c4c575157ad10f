//! Command-dispatch contract tests.
//!
//! These pin the parsing rules of the chat command surface: prefix
//! matching, language-token detection, quoting, and the incoming
//! auto-translate path.

use deepl_chat::config::PluginConfig;
use deepl_chat::plugin::{Action, Direction, parse_line};

fn config_with_default(target_lang: &str) -> PluginConfig {
    PluginConfig {
        target_lang: target_lang.to_string(),
        ..PluginConfig::default()
    }
}

fn parse(line: &str) -> Action {
    parse_line(line, Direction::Outgoing, &config_with_default("DE"))
}

#[test]
fn test_prefixes_are_case_insensitive() {
    for (upper, lower) in [
        ("/TR FR hi", "/tr FR hi"),
        ("/TRANSLATE FR hi", "/translate FR hi"),
        ("/TRI ES", "/tri ES"),
        ("/TRHELP", "/trhelp"),
        ("/TRVER", "/trver"),
    ] {
        assert_eq!(parse(upper), parse(lower), "{upper} vs {lower}");
    }
}

#[test]
fn test_tr_with_language_and_text() {
    assert_eq!(
        parse("/tr FR bonjour"),
        Action::SendTranslated {
            target_lang: "FR".to_string(),
            text: "bonjour".to_string(),
        }
    );
}

#[test]
fn test_tr_without_language_uses_default_target() {
    assert_eq!(
        parse("/tr \"how are you\""),
        Action::SendTranslated {
            target_lang: "DE".to_string(),
            text: "how are you".to_string(),
        }
    );
}

#[test]
fn test_inline_shortcut_with_text() {
    assert_eq!(
        parse("@ES buenos dias"),
        Action::SendTranslated {
            target_lang: "ES".to_string(),
            text: "buenos dias".to_string(),
        }
    );
}

#[test]
fn test_inline_shortcut_alone_echoes_recent_message() {
    assert_eq!(
        parse("@EN"),
        Action::EchoRecentTranslated {
            target_lang: "EN".to_string(),
        }
    );
}

#[test]
fn test_help_and_version_are_local_actions() {
    assert_eq!(parse("/trhelp"), Action::ShowHelp);
    assert_eq!(parse("/trver"), Action::ShowVersion);
}

#[test]
fn test_empty_payload_is_a_noop() {
    assert_eq!(parse("/tr"), Action::Noop);
    assert_eq!(parse("/tr FR"), Action::Noop);
    assert_eq!(parse("/translate \"\""), Action::Noop);
}

#[test]
fn test_unterminated_quote_is_literal_text() {
    assert_eq!(
        parse("/tr FR \"oops no close"),
        Action::SendTranslated {
            target_lang: "FR".to_string(),
            text: "\"oops no close".to_string(),
        }
    );
}

#[test]
fn test_ordinary_lines_pass_through() {
    assert_eq!(parse("good morning"), Action::Noop);
    assert_eq!(parse("/me waves"), Action::Noop);
}

#[test]
fn test_incoming_auto_translate_uses_stored_target() {
    let config = PluginConfig {
        auto_translate_incoming: true,
        auto_incoming_target_lang: "FR".to_string(),
        ..PluginConfig::default()
    };

    assert_eq!(
        parse_line("hello over there", Direction::Incoming, &config),
        Action::AutoTranslateIncoming {
            target_lang: "FR".to_string(),
            text: "hello over there".to_string(),
        }
    );
}

#[test]
fn test_incoming_without_auto_translate_is_a_noop() {
    assert_eq!(
        parse_line(
            "hello over there",
            Direction::Incoming,
            &config_with_default("DE")
        ),
        Action::Noop
    );
}

#[test]
fn test_tri_updates_incoming_target() {
    assert_eq!(parse("/tri EN-GB"), Action::SetIncomingLang("EN-GB".to_string()));
}
