//! The seam between the plugin and its host chat application.

/// Everything the plugin needs from the host chat application.
///
/// The host delivers chat lines to [`crate::plugin::Plugin`]; the plugin
/// answers through this trait. The host's plugin loader, preferences UI,
/// and message transport all stay on the other side of it.
pub trait Host {
    /// Sends `text` as an outgoing chat message to the current conversation.
    fn send_message(&mut self, text: &str);

    /// Displays `text` locally (never transmitted to peers).
    fn show_local(&mut self, text: &str);

    /// Returns the most recent message visible in the current conversation,
    /// used by the bare `@LANG` shortcut.
    fn recent_message(&self) -> Option<String>;
}
