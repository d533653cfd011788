use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scribble::build::build_site;
use scribble::config::Config;
use scribble::deploy::deploy_site;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scribble")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project file (defaults to the nearest `scribble.yaml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of note source files
    #[arg(long, env = "NOTES_DIR", global = true)]
    source: Option<PathBuf>,

    /// Output directory; its contents are replaced on every build
    #[arg(long, env = "DIST_PATH", global = true)]
    output: Option<PathBuf>,

    /// Directory of static assets copied into the output
    #[arg(long, global = true)]
    static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the static site (the default)
    Build,

    /// Build the static site, then publish it with the deploy command
    Deploy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(if cli.verbose {
            Level::DEBUG.into()
        } else {
            Level::INFO.into()
        }))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => Config::from_project_file(path)?,
        None => Config::from_directory(&std::env::current_dir()?)?,
    };
    if let Some(source) = cli.source {
        config.notes_directory = source;
    }
    if let Some(output) = cli.output {
        config.output_directory = output;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_directory = static_dir;
    }

    build_site(&config).context("Building site")?;

    if let Some(Command::Deploy) = cli.command {
        deploy_site(&config.deploy, &config.root_directory).context("Deploying site")?;
    }
    Ok(())
}
