use anyhow::Result;
use clap::Parser;

use deepl_chat::cli::commands::{chat, configure};
use deepl_chat::cli::{Args, Command};
use deepl_chat::translation::print_languages;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Chat { to, endpoint }) => {
            chat::run_chat(chat::ChatOptions { to, endpoint }).await?;
        }
        None => {
            chat::run_chat(chat::ChatOptions {
                to: args.to,
                endpoint: args.endpoint,
            })
            .await?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix into the chat transcript.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
