//! chatrelay webhook server and CLI entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, loads the config file, wires the relay to Redis,
//! OpenAI and Telegram, then serves Telegram updates or runs a one-shot
//! command.

mod cli;
mod http;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;
use secrecy::SecretString;

use chatrelay_core::llm::client::CompletionClient;
use chatrelay_core::platform::{ChatPlatform, webhook_url};
use chatrelay_core::storage::conversation_store::ConversationStore;
use chatrelay_infra::config::load_relay_config;
use chatrelay_infra::store::memory::InMemoryConversationStore;
use chatrelay_infra::store::redis_store::RedisConversationStore;
use chatrelay_observe::tracing_setup::{LogFormat, default_filter, init_tracing};
use chatrelay_types::config::StoreBackend;

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        config,
        log_json,
        quiet,
        verbose,
        command,
    } = Cli::parse();

    match command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        }

        Commands::Serve(args) => {
            init_logging(log_json, verbose, quiet)?;
            let config = load_relay_config(&config).await;

            let completion = state::completion_client(&args.openai_api_key, &config)?;
            let platform = state::telegram_client(&args.telegram.telegram_bot_token, &config)?;
            let messages = config.messages.clone();
            tracing::info!(model = completion.model(), "Completion client ready");

            match config.store {
                StoreBackend::Redis => {
                    let password = args.redis_password.clone().map(SecretString::from);
                    let store = RedisConversationStore::connect(
                        &config.redis_url,
                        password.as_ref(),
                        config.history_key_prefix.clone(),
                    )
                    .await
                    .context("failed to connect to Redis")?;
                    run(AppState::new(store, completion, platform, messages), &args).await?;
                }
                StoreBackend::Memory => {
                    tracing::warn!("Using in-memory store, history is lost on restart");
                    let store = InMemoryConversationStore::new();
                    run(AppState::new(store, completion, platform, messages), &args).await?;
                }
            }
        }

        Commands::SetWebhook {
            telegram,
            bot_domain,
        } => {
            init_logging(log_json, verbose, quiet)?;
            let config = load_relay_config(&config).await;

            let platform = state::telegram_client(&telegram.telegram_bot_token, &config)?;
            let url = webhook_url(&bot_domain);
            platform
                .set_webhook(&url)
                .await
                .context("failed to register webhook")?;
            println!("Webhook set to {url}");
        }
    }

    Ok(())
}

fn init_logging(log_json: bool, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let format = if log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(format, default_filter(verbose, quiet)).map_err(|e| anyhow::anyhow!(e))
}

/// Bind the listener, register the webhook when a bot domain is configured,
/// then serve until a shutdown signal arrives.
async fn run<S, C, P>(state: AppState<S, C, P>, args: &ServeArgs) -> anyhow::Result<()>
where
    S: ConversationStore + 'static,
    C: CompletionClient + 'static,
    P: ChatPlatform + 'static,
{
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Only point Telegram here once the port is ours.
    if let Some(bot_domain) = &args.bot_domain {
        let url = webhook_url(bot_domain);
        if let Err(e) = state.relay.platform().set_webhook(&url).await {
            tracing::warn!(url = %url, error = %e, "Failed to register webhook, continuing");
        }
    }

    tracing::info!(addr = %addr, "chatrelay listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
