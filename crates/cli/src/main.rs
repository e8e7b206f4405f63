mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use incbuild_lib::consts::COMPOSITE_FILENAME;
use output::OutputFormat;

/// inc - Resolve plugins across the builds of a composite
#[derive(Parser)]
#[command(name = "inc")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the composite manifest
  #[arg(short, long, global = true, default_value = COMPOSITE_FILENAME)]
  manifest: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the included builds of the composite
  Builds {
    /// Build whose point of view is shown (default: the root build)
    #[arg(long)]
    from: Option<String>,
  },

  /// List the plugins available from included builds
  Plugins {
    /// Build requesting the plugins (default: the root build)
    #[arg(long)]
    from: Option<String>,
  },

  /// Resolve plugin ids against the included builds
  Resolve {
    /// Plugin ids to resolve
    #[arg(required = true)]
    ids: Vec<String>,

    /// Build requesting the plugins (default: the root build)
    #[arg(long)]
    from: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG wins over --verbose
  let default_filter = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Builds { from } => cmd::cmd_builds(&cli.manifest, from.as_deref(), cli.output),
    Commands::Plugins { from } => cmd::cmd_plugins(&cli.manifest, from.as_deref(), cli.output),
    Commands::Resolve { ids, from } => cmd::cmd_resolve(&cli.manifest, &ids, from.as_deref(), cli.output),
  }
}
