//! # deepl-chat - Chat Translation Plugin
//!
//! `deepl-chat` is the core of a chat-client translation plugin backed by the
//! DeepL API. It parses a small set of chat commands, calls the DeepL HTTP
//! endpoint, and optionally relays incoming chat messages through the same
//! endpoint (auto-translate mode).
//!
//! The host chat application is abstracted behind the [`plugin::Host`] trait;
//! everything the plugin needs from its host is sending a message, displaying
//! a local line, and fetching the most recent message in the conversation.
//!
//! ## Chat commands
//!
//! ```text
//! /tr [LANG] <text..>    translate and send
//! /tri <LANG>            set the incoming auto-translate target language
//! /trhelp                show help and current settings
//! /trver                 show the plugin version
//! @LANG <text..>         inline shortcut; translates and sends
//! @LANG                  translate the most recent message (local-only)
//! ```
//!
//! ## Console harness
//!
//! The `dlchat` binary drives the plugin against a console-backed host for
//! development and demos:
//!
//! ```bash
//! # Interactive session
//! dlchat
//!
//! # One-time setup (API key, target language, auto-translate)
//! dlchat configure
//!
//! # List DeepL target-language codes
//! dlchat languages
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/deepl-chat/config.toml`:
//!
//! ```toml
//! api_key = "xxxx-xxxx"
//! target_lang = "EN-US"
//! auto_translate_incoming = false
//! auto_incoming_target_lang = "EN-GB"
//! preserve_formatting = true
//! ```
//!
//! The `DEEPL_API_KEY` environment variable overrides the file's `api_key`.

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and plugin settings.
pub mod config;

/// XDG-style path utilities for the configuration directory.
pub mod paths;

/// The plugin core: command dispatch and host integration.
pub mod plugin;

/// DeepL translation client, failure taxonomy, and formatting preservation.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
