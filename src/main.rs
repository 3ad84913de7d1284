use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use drivepick::config::PickerConfig;
use drivepick::model::Selection;
use drivepick::remote::DriveClient;
use drivepick::session::{resolve_and_snapshot, run_interactive_session};

#[derive(Parser)]
#[command(name = "drivepick")]
#[command(about = "Pick a directory from a remote drive without mirroring all of it", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bearer access token (overrides DRIVEPICK_TOKEN and the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Remote id of the top-level container
    #[arg(long, global = true)]
    root_id: Option<String>,

    /// Keep an on-disk scratch mirror inside this directory while the session runs
    #[arg(long, global = true)]
    scratch_dir: Option<PathBuf>,

    /// Write the selection JSON here instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate interactively and select a directory (default)
    Pick,

    /// Snapshot a known directory without prompting
    Snapshot {
        /// Path expression, e.g. `~/Projects/site`
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    if let Some(url) = cli.api_url {
        cfg.api_base_url = url;
    }
    if let Some(root_id) = cli.root_id {
        cfg.root_id = root_id;
    }
    if let Some(dir) = cli.scratch_dir {
        cfg.scratch_dir = Some(dir);
    }

    let token = cfg.resolve_token(cli.token)?;
    let client = DriveClient::new(cfg.remote(), token)?;
    let options = cfg.session_options();

    let selection = match cli.command.unwrap_or(Commands::Pick) {
        Commands::Pick => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let picked = run_interactive_session(client, &options, stdin.lock(), stdout.lock())
                .context("interactive session")?;
            match picked {
                Some(selection) => selection,
                None => {
                    println!("No directory selected");
                    return Ok(());
                }
            }
        }
        Commands::Snapshot { path } => resolve_and_snapshot(client, &options, &path)
            .with_context(|| format!("snapshot {}", path))?,
    };

    write_selection(&selection, cli.out.as_deref())
}

fn write_selection(selection: &Selection, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(selection).context("serialize selection")?;
    match out {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("write {}", path.display()))?;
            eprintln!(
                "Selected {} ({} files), written to {}",
                selection.chosen_path,
                selection.files.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
