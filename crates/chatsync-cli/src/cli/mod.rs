//! CLI command definitions for the `chatsync` binary.
//!
//! Uses clap derive macros for argument parsing. Every command maps onto one
//! session manager operation.

pub mod directory;
pub mod message;
pub mod session;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use chatsync_types::chat::Rating;
use chatsync_types::config::ClientConfig;

/// Browse and drive chat sessions on a remote chat gateway.
#[derive(Parser)]
#[command(name = "chatsync", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Gateway and scope overrides. Flags win over environment and config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Gateway base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Tenant to act as.
    #[arg(long, global = true)]
    pub tenant: Option<String>,

    /// User to act as.
    #[arg(long, global = true)]
    pub user: Option<String>,
}

impl ConnectionArgs {
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(tenant) = &self.tenant {
            config.tenant = tenant.clone();
        }
        if let Some(user) = &self.user {
            config.user = user.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List chat sessions.
    #[command(alias = "ls")]
    Sessions,

    /// Create a new chat session.
    Create,

    /// Rename a chat session.
    Rename {
        /// Session id.
        session_id: String,
        /// New display name.
        name: String,
        /// Only rename the local copy; do not call the gateway.
        #[arg(long)]
        local: bool,
    },

    /// Delete a chat session.
    #[command(alias = "rm")]
    Delete {
        /// Session id.
        session_id: String,
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Show the messages of a session.
    Messages {
        /// Session id.
        session_id: String,
    },

    /// Send a prompt to a session and print the reply.
    Send {
        /// Session id.
        session_id: String,
        /// Prompt text.
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Also summarize the prompt into a session name.
        #[arg(long)]
        name: bool,
    },

    /// Suggest a session name for a prompt (does not rename).
    Summarize {
        /// Session id.
        session_id: String,
        /// Prompt text.
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Rate a message.
    Rate {
        /// Session id.
        session_id: String,
        /// Message id.
        message_id: String,
        /// Rating to apply; `unset` sends the request without a rating.
        #[arg(value_enum)]
        rating: RatingArg,
    },

    /// Show the completion details recorded for a reply.
    DebugLog {
        /// Session id.
        session_id: String,
        /// Debug log id (from the message's `debugLogId`).
        debug_log_id: String,
    },

    /// List tenants known to the gateway.
    Tenants,

    /// List users known to the gateway.
    Users,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Rating choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatingArg {
    Up,
    Down,
    Unset,
}

impl From<RatingArg> for Rating {
    fn from(arg: RatingArg) -> Self {
        match arg {
            RatingArg::Up => Rating::Positive,
            RatingArg::Down => Rating::Negative,
            RatingArg::Unset => Rating::Unset,
        }
    }
}

/// Shorten text for table cells, on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
