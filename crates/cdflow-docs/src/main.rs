//! cdflow-docs CLI - checks and inspects the cdflow2 documentation descriptor.

use std::path::PathBuf;

use anyhow::Result;
use cdflow_docs_config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::show::OutputFormat;

#[derive(Parser)]
#[command(name = "cdflow-docs")]
#[command(about = "Check and inspect the cdflow2 documentation descriptor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the descriptor file (.toml, .yaml or .json)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the cdflow2 descriptor to the config path
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,

        /// Also create a stub page for every menu label
        #[arg(long)]
        pages: bool,
    },

    /// Print the descriptor
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: OutputFormat,
    },

    /// Validate the descriptor and resolve its menu against the source pages
    Check,

    /// Print the resolved navigation as JSON
    Nav,

    /// Compare the menu of an older descriptor against the current one
    Diff {
        /// Older descriptor file
        old: PathBuf,

        /// Newer descriptor file (defaults to --config)
        new: Option<PathBuf>,

        /// Fail unless the newer menu only adds entries
        #[arg(long)]
        require_additive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes, pages } => {
            commands::init::run(&cli.config, yes, pages).await?;
        }
        Commands::Show { format } => {
            let output = commands::show::run(&cli.config, format).await?;
            print!("{output}");
        }
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
        Commands::Nav => {
            let output = commands::nav::run(&cli.config).await?;
            println!("{output}");
        }
        Commands::Diff {
            old,
            new,
            require_additive,
        } => {
            let new = new.unwrap_or_else(|| cli.config.clone());
            let output = commands::diff::run(&old, &new, require_additive).await?;
            print!("{output}");
        }
    }

    Ok(())
}
