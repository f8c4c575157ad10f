//! End-to-end plugin flows against a deterministic stub backend.
//!
//! The stub stands in for DeepL, so every property here is verified
//! without a network: call counts prove when the backend is (not)
//! reached, and the recording host captures what would have been sent
//! or displayed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use deepl_chat::config::PluginConfig;
use deepl_chat::plugin::{Host, Plugin};
use deepl_chat::translation::{TranslateError, Translation, TranslationRequest, Translator};

/// Deterministic stand-in for DeepL: uppercases the text and tags the
/// target language, counting every call.
struct StubTranslator {
    calls: Arc<AtomicUsize>,
    detected: Option<&'static str>,
    fail: bool,
}

impl StubTranslator {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                detected: Some("IT"),
                fail: false,
            },
            calls,
        )
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(TranslateError::Service {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        Ok(Translation {
            text: format!(
                "[{}] {}",
                request.target_lang,
                request.source_text.to_uppercase()
            ),
            detected_source_lang: self.detected.map(str::to_string),
        })
    }
}

#[derive(Default)]
struct RecordingHost {
    sent: Vec<String>,
    local: Vec<String>,
    recent: Option<String>,
}

impl Host for RecordingHost {
    fn send_message(&mut self, text: &str) {
        self.sent.push(text.to_string());
    }

    fn show_local(&mut self, text: &str) {
        self.local.push(text.to_string());
    }

    fn recent_message(&self) -> Option<String> {
        self.recent.clone()
    }
}

fn configured() -> PluginConfig {
    PluginConfig {
        api_key: "stub-key".to_string(),
        ..PluginConfig::default()
    }
}

fn plugin_with(config: PluginConfig) -> (Plugin, Arc<AtomicUsize>) {
    let (stub, calls) = StubTranslator::new();
    (Plugin::new(config, Box::new(stub)), calls)
}

#[tokio::test]
async fn test_tr_sends_translation() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    let consumed = plugin.handle_outgoing("/tr FR bonjour", &mut host).await;

    assert!(consumed);
    assert_eq!(host.sent, vec!["[FR] BONJOUR"]);
    assert!(host.local.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_help_and_version_never_call_backend() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    assert!(plugin.handle_outgoing("/trhelp", &mut host).await);
    assert!(plugin.handle_outgoing("/trver", &mut host).await);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(host.local.len(), 2);
    assert!(host.sent.is_empty());
}

#[tokio::test]
async fn test_missing_api_key_is_reported_before_any_call() {
    let (mut plugin, calls) = plugin_with(PluginConfig::default());
    let mut host = RecordingHost::default();

    let consumed = plugin.handle_outgoing("/tr FR bonjour", &mut host).await;

    assert!(consumed);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(host.sent.is_empty());
    assert!(
        host.local[0].contains("API key"),
        "got: {:?}",
        host.local
    );
}

#[tokio::test]
async fn test_backend_failure_never_sends_the_original() {
    let (mut stub, _) = StubTranslator::new();
    stub.fail = true;
    let calls = Arc::clone(&stub.calls);
    let mut plugin = Plugin::new(configured(), Box::new(stub));
    let mut host = RecordingHost::default();

    let consumed = plugin.handle_outgoing("/tr FR bonjour", &mut host).await;

    assert!(consumed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(host.sent.is_empty());
    assert!(host.local[0].contains("Translation failed"));
    assert!(host.local[0].contains("/tr FR bonjour"));
}

#[tokio::test]
async fn test_identical_requests_yield_identical_results() {
    let (mut plugin, _) = plugin_with(configured());
    let mut host = RecordingHost::default();

    plugin.handle_outgoing("/tr FR bonjour", &mut host).await;
    plugin.handle_outgoing("/tr FR bonjour", &mut host).await;

    assert_eq!(host.sent.len(), 2);
    assert_eq!(host.sent[0], host.sent[1]);
}

#[tokio::test]
async fn test_inline_shortcut_sends_translation() {
    let (mut plugin, _) = plugin_with(configured());
    let mut host = RecordingHost::default();

    plugin.handle_outgoing("@ES buenos dias", &mut host).await;

    assert_eq!(host.sent, vec!["[ES] BUENOS DIAS"]);
}

#[tokio::test]
async fn test_bare_inline_shortcut_translates_recent_message() {
    let (mut plugin, _) = plugin_with(configured());
    let mut host = RecordingHost {
        recent: Some("ciao".to_string()),
        ..RecordingHost::default()
    };

    plugin.handle_outgoing("@EN", &mut host).await;

    assert!(host.sent.is_empty());
    assert_eq!(host.local.len(), 1);
    assert!(host.local[0].starts_with("[EN]"));
    assert!(host.local[0].contains("CIAO"));
}

#[tokio::test]
async fn test_bare_inline_shortcut_without_recent_message() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    plugin.handle_outgoing("@EN", &mut host).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(host.local, vec!["No recent message to translate"]);
}

#[tokio::test]
async fn test_incoming_auto_translation_is_labeled() {
    let config = PluginConfig {
        auto_translate_incoming: true,
        ..configured()
    };
    let (mut plugin, _) = plugin_with(config);
    let mut host = RecordingHost::default();

    plugin.handle_incoming("peer", "ciao a tutti", &mut host).await;

    assert!(host.sent.is_empty());
    assert_eq!(host.local.len(), 1);
    assert!(
        host.local[0].starts_with("[IT→EN-GB] peer:"),
        "got: {}",
        host.local[0]
    );
}

#[tokio::test]
async fn test_incoming_auto_translation_skips_target_language_messages() {
    let config = PluginConfig {
        auto_translate_incoming: true,
        ..configured()
    };
    let (mut stub, _) = StubTranslator::new();
    stub.detected = Some("EN");
    let mut plugin = Plugin::new(config, Box::new(stub));
    let mut host = RecordingHost::default();

    plugin.handle_incoming("peer", "already english", &mut host).await;

    assert!(host.local.is_empty());
    assert!(host.sent.is_empty());
}

#[tokio::test]
async fn test_incoming_without_auto_translate_does_nothing() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    plugin.handle_incoming("peer", "ciao a tutti", &mut host).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(host.local.is_empty());
}

#[tokio::test]
async fn test_tri_updates_incoming_target_language() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    let consumed = plugin.handle_outgoing("/tri ES", &mut host).await;

    assert!(consumed);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(plugin.config().auto_incoming_target_lang, "ES");
    assert_eq!(
        host.local,
        vec!["Incoming auto-translate target set to ES"]
    );
}

#[tokio::test]
async fn test_ordinary_lines_are_not_consumed() {
    let (mut plugin, calls) = plugin_with(configured());
    let mut host = RecordingHost::default();

    let consumed = plugin.handle_outgoing("good morning", &mut host).await;

    assert!(!consumed);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(host.sent.is_empty());
    assert!(host.local.is_empty());
}
