use thiserror::Error;

/// Failures surfaced by the translation client.
///
/// Each variant is terminal for its request; the caller decides whether to
/// re-issue the command. `MissingApiKey` is raised before any network
/// traffic happens.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("DeepL API key is not set; configure it before translating")]
    MissingApiKey,

    #[error("DeepL rejected the API key")]
    Auth,

    #[error("DeepL translation quota exceeded")]
    QuotaExceeded,

    #[error("target language '{0}' is not supported by DeepL")]
    UnsupportedLanguage(String),

    #[error("network error talking to DeepL: {0}")]
    Network(#[source] reqwest::Error),

    #[error("DeepL service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("DeepL returned a malformed response")]
    MalformedResponse,
}
