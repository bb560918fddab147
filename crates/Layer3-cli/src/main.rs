//! MFE shell CLI - Main entry point

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// MFE shell - inspect remotes, resolve manifests, manage local overrides
#[derive(Parser, Debug)]
#[command(name = "mfe")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Registry file (remotes.json). Defaults to the remotes in mfe.json,
    /// then .mfe-shell/remotes.json
    #[arg(short, long, global = true)]
    registry: Option<PathBuf>,

    /// Resolve as a production build
    #[arg(long, global = true)]
    production: bool,

    /// Origin prepended to production manifest paths
    #[arg(long, global = true)]
    base_origin: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered remotes
    List,
    /// Show the route bindings the shell would mount
    Routes,
    /// Resolve the manifest URL of a remote
    Resolve {
        /// Remote name
        name: String,

        /// Query string of the current navigation (e.g. "?mfe-override=mfe1:3005")
        #[arg(short, long, default_value = "")]
        query: String,

        /// Ignore persisted overrides
        #[arg(long)]
        no_persisted: bool,
    },
    /// Suggest a dev port for a new remote
    NextPort,
    /// Print Module Federation config as JSON
    Federation {
        /// Remote name (omit with --shell)
        name: Option<String>,

        /// Print the shell (host) config instead
        #[arg(long)]
        shell: bool,
    },
    /// Manage persisted overrides
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },
    /// Fetch a remote's manifest and report its entry
    Fetch {
        /// Remote name
        name: String,

        /// Query string of the current navigation
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[derive(Subcommand, Debug)]
enum OverrideAction {
    /// Point a remote at another location (port or URL)
    Set { name: String, location: String },
    /// Remove an override
    Remove { name: String },
    /// List persisted overrides
    List,
    /// Remove all overrides
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let ctx = commands::Context::load(
        args.registry.as_deref(),
        args.production,
        args.base_origin.clone(),
    )?;

    match args.command {
        Command::List => commands::list(&ctx),
        Command::Routes => commands::routes(&ctx),
        Command::Resolve {
            name,
            query,
            no_persisted,
        } => commands::resolve(&ctx, &name, &query, !no_persisted),
        Command::NextPort => commands::next_port(&ctx),
        Command::Federation { name, shell } => commands::federation(&ctx, name.as_deref(), shell),
        Command::Override { action } => match action {
            OverrideAction::Set { name, location } => commands::override_set(&ctx, &name, &location),
            OverrideAction::Remove { name } => commands::override_remove(&name),
            OverrideAction::List => commands::override_list(&ctx),
            OverrideAction::Clear => commands::override_clear(),
        },
        Command::Fetch { name, query } => commands::fetch(&ctx, &name, &query).await,
    }
}
