use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::TranslateError;
use super::formatting::{extract_markers, reapply_markers};

/// Default DeepL endpoint (free-tier host).
pub const DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Upper bound on waiting for the remote response. A request that exceeds
/// it resolves to [`TranslateError::Network`]; cancellation beyond that is
/// not supported.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One translation invocation. Created per request, immutable, discarded
/// after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_lang: String,
    pub preserve_formatting: bool,
}

/// The success side of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated text, with formatting markers reapplied when requested.
    pub text: String,
    /// Source language as detected by the service (e.g., `EN`).
    pub detected_source_lang: Option<String>,
}

/// A translation backend.
///
/// Implemented by [`DeepLClient`] for the real service and by
/// deterministic stubs in tests. One call, one request; retry policy (if
/// any) belongs to the caller.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError>;
}

#[derive(Debug, Serialize)]
struct TranslateForm<'a> {
    text: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
    detected_source_language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// HTTP client for the DeepL translation endpoint.
pub struct DeepLClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DeepLClient {
    /// Creates a client against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEEPL_API_URL, api_key)
    }

    /// Creates a client against a custom endpoint (pro-tier host, proxy,
    /// or a local stub in tests).
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Translator for DeepLClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.trim().is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let (plain, markers) = if request.preserve_formatting {
            extract_markers(&request.source_text)
        } else {
            (request.source_text.clone(), Vec::new())
        };

        debug!(
            target_lang = %request.target_lang,
            chars = plain.chars().count(),
            "sending translation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&TranslateForm {
                text: &plain,
                target_lang: &request.target_lang,
            })
            .send()
            .await
            .map_err(TranslateError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &body, &request.target_lang));
        }

        let payload: TranslateResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                TranslateError::MalformedResponse
            } else {
                TranslateError::Network(err)
            }
        })?;

        let first = payload
            .translations
            .into_iter()
            .next()
            .ok_or(TranslateError::MalformedResponse)?;

        let text = if markers.is_empty() {
            first.text
        } else {
            reapply_markers(&first.text, &markers, plain.chars().count())
        };

        Ok(Translation {
            text,
            detected_source_lang: first.detected_source_language,
        })
    }
}

/// Maps a non-success HTTP status to the failure taxonomy.
fn map_error_status(status: StatusCode, body: &str, target_lang: &str) -> TranslateError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .unwrap_or_default()
        .message
        .unwrap_or_else(|| body.trim().to_string());

    match status.as_u16() {
        401 | 403 => TranslateError::Auth,
        456 => TranslateError::QuotaExceeded,
        400 if message.to_lowercase().contains("target_lang") => {
            TranslateError::UnsupportedLanguage(target_lang.to_string())
        }
        _ => TranslateError::Service {
            status: status.as_u16(),
            message,
        },
    }
}
