use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dlchat")]
#[command(about = "DeepL chat translation plugin - console harness")]
#[command(version)]
pub struct Args {
    /// Target language override for this session (e.g., EN-US, DE, JA)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// DeepL API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive console chat session (default)
    Chat {
        /// Target language override for this session (e.g., EN-US, DE, JA)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// DeepL API endpoint URL
        #[arg(short = 'e', long)]
        endpoint: Option<String>,
    },
    /// List DeepL target-language codes
    Languages,
    /// Edit plugin settings interactively
    Configure {
        /// Show current settings without editing
        #[arg(long)]
        show: bool,
    },
}
