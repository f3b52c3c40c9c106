//! Branchline - a remote branches panel for git

use anyhow::{Context, Result};
use branchline::App;
use branchline::config::Config;
use branchline::git::GitCli;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Browse and act on the branches of a git remote
#[derive(Debug, Parser)]
#[command(name = "branchline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to open (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Remote whose branches are shown on startup
    #[arg(long, value_name = "NAME")]
    remote: Option<String>,
}

fn main() -> Result<()> {
    let log_path = branchline::paths::log_path();

    // Clear the log file on startup
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "branchline.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let start = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let git = GitCli::discover(&start)?;
    tracing::info!(root = %git.root().display(), "Opened repository");

    let mut app = App::new(config, git);
    app.load()?;
    if let Some(remote) = cli.remote.as_deref() {
        app.open_remote(remote)?;
    }

    branchline::tui::run(app)
}
