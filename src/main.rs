use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli_exec;

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Quote collection with category filters and remote sync", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding (or to hold) `.quotebook`; defaults to the nearest one above the
    /// current directory
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the configured remote collection URL
    #[arg(long, global = true, env = "QUOTEBOOK_REMOTE_URL")]
    remote_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a quote collection (.quotebook)
    Init {
        /// Re-initialize if .quotebook already exists
        #[arg(long)]
        force: bool,
    },

    /// Add a quote
    Add {
        #[arg(long)]
        text: String,
        #[arg(long)]
        category: String,
    },

    /// Show a random quote from the active category
    Random,

    /// Show the last quote displayed by `random`
    Last,

    /// List quotes matching the active category
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List categories, "all" first, with the active filter starred
    Categories {
        /// Sort alphabetically instead of first-seen order
        #[arg(long)]
        sorted: bool,
    },

    /// Set the active category ("all" for every category)
    Filter { category: String },

    /// Reset the active category to "all"
    ClearFilter,

    /// Import quotes from a JSON file
    Import { file: PathBuf },

    /// Export all quotes as pretty-printed JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Configure or show the remote collection
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Show store and sync status
    Status {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one sync against the remote collection
    Sync,

    /// Sync periodically until interrupted
    Watch {
        /// Seconds between syncs (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub(crate) enum RemoteCommands {
    /// Show the configured remote
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set the remote collection URL
    Set {
        #[arg(long)]
        url: String,
    },
    /// Remove the configured remote
    Clear,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    // `watch` is long-running; surface each sync attempt.
    let directive = match cli.command {
        Commands::Watch { .. } => "info",
        _ => "warn",
    };
    quotebook::logging::init(directive);
    cli_exec::handle_command(cli).await
}
