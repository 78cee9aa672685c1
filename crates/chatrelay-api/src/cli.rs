//! CLI definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros. Credentials and process settings can be given as
//! flags or environment variables; tunables live in the TOML config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Relay Telegram chats to an OpenAI chat model.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults).
    #[arg(long, global = true, env = "CHATRELAY_CONFIG", default_value = "chatrelay.toml")]
    pub config: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register the webhook (when a bot domain is set) and serve updates.
    Serve(ServeArgs),

    /// Register the webhook URL with Telegram and exit.
    SetWebhook {
        #[command(flatten)]
        telegram: TelegramArgs,

        /// Externally reachable base URL of this server.
        #[arg(long, env = "BOT_DOMAIN")]
        bot_domain: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct TelegramArgs {
    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub telegram: TelegramArgs,

    /// OpenAI API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Redis password, if the server requires one.
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Externally reachable base URL; the webhook is registered on startup when set.
    #[arg(long, env = "BOT_DOMAIN")]
    pub bot_domain: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
}
