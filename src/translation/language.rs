//! Target-language codes and the shape check used by the command parser.

use crate::ui::Style;

/// DeepL target-language codes and their names.
///
/// Informational only: the parser never gates on this list. Unknown codes
/// are sent to the service and rejected remotely, so newly added DeepL
/// languages work without a plugin update.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("AR", "Arabic"),
    ("BG", "Bulgarian"),
    ("CS", "Czech"),
    ("DA", "Danish"),
    ("DE", "German"),
    ("EL", "Greek"),
    ("EN-GB", "English (British)"),
    ("EN-US", "English (American)"),
    ("ES", "Spanish"),
    ("ET", "Estonian"),
    ("FI", "Finnish"),
    ("FR", "French"),
    ("HU", "Hungarian"),
    ("ID", "Indonesian"),
    ("IT", "Italian"),
    ("JA", "Japanese"),
    ("KO", "Korean"),
    ("LT", "Lithuanian"),
    ("LV", "Latvian"),
    ("NB", "Norwegian (Bokmål)"),
    ("NL", "Dutch"),
    ("PL", "Polish"),
    ("PT-BR", "Portuguese (Brazilian)"),
    ("PT-PT", "Portuguese (European)"),
    ("RO", "Romanian"),
    ("RU", "Russian"),
    ("SK", "Slovak"),
    ("SL", "Slovenian"),
    ("SV", "Swedish"),
    ("TR", "Turkish"),
    ("UK", "Ukrainian"),
    ("ZH", "Chinese (Simplified)"),
    ("ZH-HANT", "Chinese (Traditional)"),
];

/// Prints all known target-language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("DeepL target-language codes"));
    for (code, name) in TARGET_LANGUAGES {
        println!("  {:8} {}", Style::code(code), Style::secondary(name));
    }
}

/// Returns `true` if the token has the shape of a language code.
///
/// Shape only: 1-10 characters, alphabetic plus `-`/`_`, starting with a
/// letter. Whether the code is actually supported is decided by the remote
/// service.
pub fn looks_like_target_lang(token: &str) -> bool {
    if token.is_empty() || token.len() > 10 {
        return false;
    }

    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|ch| ch.is_ascii_alphabetic() || ch == '-' || ch == '_')
}
