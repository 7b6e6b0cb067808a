mod commands;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::derive::DeriveArgs;
use commands::statement::{InitArgs, SetArgs};
use store::StatementStore;

/// Indirect-method cash flow statements from comparative balance sheets
#[derive(Parser)]
#[command(
    name = "cfs",
    version,
    about = "Indirect-method cash flow statements from comparative balance sheets",
    long_about = "Derives a statement of cash flows (operating, investing, financing) \
                  from a prior and current balance sheet, an income statement and the \
                  profit appropriation, with exact decimal arithmetic. Snapshots can be \
                  derived one-off from a file or stdin, or kept per owner in a local store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding stored statements
    #[arg(long, env = "CFS_STORE_DIR", global = true)]
    store_dir: Option<PathBuf>,

    /// Owner of the stored statement
    #[arg(long, env = "CFS_OWNER", global = true)]
    owner: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a cash flow statement from a snapshot file or stdin
    Derive(DeriveArgs),
    /// Create the owner's statement if it does not exist yet
    Init(InitArgs),
    /// Set one field of the stored snapshot and re-derive
    Set(SetArgs),
    /// Reset every field of the stored snapshot to zero
    Clear,
    /// Derive the cash flow statement from the stored snapshot
    Show,
    /// Print the stored snapshot
    Export,
    /// List every input field path
    Fields,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the store and resolve the owner for commands that need both.
fn stored(cli: &Cli) -> Result<(StatementStore, String), Box<dyn std::error::Error>> {
    let owner = cli
        .owner
        .clone()
        .ok_or("--owner (or CFS_OWNER) is required for stored statements")?;
    let store = StatementStore::open(cli.store_dir.clone())?;
    Ok((store, owner))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match &cli.command {
        Commands::Derive(args) => commands::derive::run_derive(args),
        Commands::Init(args) => stored(&cli)
            .and_then(|(store, owner)| commands::statement::run_init(&store, &owner, args)),
        Commands::Set(args) => stored(&cli)
            .and_then(|(store, owner)| commands::statement::run_set(&store, &owner, args)),
        Commands::Clear => {
            stored(&cli).and_then(|(store, owner)| commands::statement::run_clear(&store, &owner))
        }
        Commands::Show => {
            stored(&cli).and_then(|(store, owner)| commands::statement::run_show(&store, &owner))
        }
        Commands::Export => {
            stored(&cli).and_then(|(store, owner)| commands::statement::run_export(&store, &owner))
        }
        Commands::Fields => commands::fields::run_fields(),
        Commands::Version => {
            println!("cfs {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
