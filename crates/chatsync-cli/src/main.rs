//! chatsync CLI entry point.
//!
//! Binary name: `chatsync`
//!
//! Parses CLI arguments, initializes logging and the session manager, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatsync_observe::tracing_setup::{init_tracing, shutdown_tracing};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatsync_core=debug,chatsync_infra=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("{e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatsync", &mut std::io::stdout());
        shutdown_tracing();
        return Ok(());
    }

    let result = execute(cli).await;

    // Flush exported spans on every exit path, including a failed init
    shutdown_tracing();
    result
}

/// Build app state and run the command. Never exits early past the caller's
/// tracing shutdown.
async fn execute(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(&cli.connection).await?;
    run(&state, cli.command, cli.json).await
}

async fn run(state: &AppState, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Sessions => cli::session::list_sessions(state, json).await,
        Commands::Create => cli::session::create_session(state, json).await,
        Commands::Rename {
            session_id,
            name,
            local,
        } => cli::session::rename_session(state, &session_id, &name, local, json).await,
        Commands::Delete { session_id, force } => {
            cli::session::delete_session(state, &session_id, force, json).await
        }
        Commands::Messages { session_id } => {
            cli::message::show_messages(state, &session_id, json).await
        }
        Commands::Send {
            session_id,
            prompt,
            name,
        } => cli::message::send_prompt(state, &session_id, &prompt.join(" "), name, json).await,
        Commands::Summarize { session_id, prompt } => {
            cli::message::summarize(state, &session_id, &prompt.join(" "), json).await
        }
        Commands::Rate {
            session_id,
            message_id,
            rating,
        } => {
            cli::message::rate_message(state, &session_id, &message_id, rating.into(), json).await
        }
        Commands::DebugLog {
            session_id,
            debug_log_id,
        } => cli::message::debug_log(state, &session_id, &debug_log_id).await,
        Commands::Tenants => cli::directory::list_tenants(state, json).await,
        Commands::Users => cli::directory::list_users(state, json).await,
        Commands::Completions { .. } => Ok(()),
    }
}
