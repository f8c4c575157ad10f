//! Subcommand implementations.

/// Interactive console session handler.
pub mod chat;

/// Configure command handler.
pub mod configure;
