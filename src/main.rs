use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use screenstore::config::Config;
use screenstore::logging::init_tracing;
use screenstore::replay::{load_snapshot, read_actions, replay};
use screenstore::screen::{project_or, ScreenData, ScreenState};

#[derive(Debug, Parser)]
#[command(name = "screenstore", version, about = "Replay and inspect keyed screen state")]
struct Cli {
    /// Config file (default: ~/.config/screenstore/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply an action log and print the resulting store
    Replay {
        /// JSON-lines action log
        actions: PathBuf,
        /// Store snapshot to start from instead of the empty store
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Apply an action log and print the record for one key
    Get {
        /// JSON-lines action log
        actions: PathBuf,
        /// Screen key to read
        key: String,
        /// JSON object printed when the key has no data
        #[arg(long)]
        fallback: Option<String>,
        /// Store snapshot to start from instead of the empty store
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;
    init_tracing(&config.log);

    match cli.command {
        Command::Replay {
            actions,
            snapshot,
            compact,
        } => {
            let state = run_replay(&actions, snapshot.as_deref())?;
            print_json(&state, config.output.pretty && !compact)
        }
        Command::Get {
            actions,
            key,
            fallback,
            snapshot,
            compact,
        } => {
            let fallback = fallback.as_deref().map(parse_fallback).transpose()?;
            let state = run_replay(&actions, snapshot.as_deref())?;
            let value = project_or(&state, &key, fallback.as_ref());
            print_json(&value, config.output.pretty && !compact)
        }
    }
}

fn run_replay(actions: &Path, snapshot: Option<&Path>) -> Result<ScreenState> {
    let initial = match snapshot {
        Some(path) => load_snapshot(path)?,
        None => ScreenState::new(),
    };
    let actions = read_actions(actions)?;
    let (state, _) = replay(initial, actions);
    Ok(state)
}

fn parse_fallback(raw: &str) -> Result<ScreenData> {
    match serde_json::from_str::<Value>(raw).context("parsing --fallback")? {
        Value::Object(record) => Ok(record),
        other => bail!("--fallback must be a JSON object, got {other}"),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
