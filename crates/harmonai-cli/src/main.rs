//! harmonai: diatonic chords, related chords and modulations from the terminal

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use commands::KeySpec;
use harmonai_core::{Chord, PitchClass, ScaleType};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harmonai", version, about = "Explore chord relationships and modulations")]
struct Cli {
    /// Config file (defaults to <config dir>/harmonai/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Key override; unset parts come from the config
#[derive(Args, Debug, Clone)]
struct KeyArgs {
    /// Root note, e.g. C or F#
    #[arg(long, short)]
    root: Option<PitchClass>,
    /// Scale id, e.g. major or natural_minor
    #[arg(long, short)]
    scale: Option<ScaleType>,
}

#[derive(Subcommand)]
enum Command {
    /// List scale ids by category
    Scales,
    /// Notes of the key's scale
    Scale {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Diatonic chords of the key
    Chords {
        #[command(flatten)]
        key: KeyArgs,
        /// Circle-of-fifths order (seven-note scales only)
        #[arg(long)]
        fifths: bool,
    },
    /// Chords sharing notes with CHORD; `*` marks chords in the key
    Related {
        chord: Chord,
        #[command(flatten)]
        key: KeyArgs,
        /// Also label each chord with its degree in ROOT:SCALE
        #[arg(long, value_name = "ROOT:SCALE")]
        compare: Option<KeySpec>,
    },
    /// Keys CHORD can pivot into
    Modulate {
        chord: Chord,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Walk a path: chord names, `@ROOT:SCALE` to modulate, `^N` to go back to step N,
    /// `!` to clear the path
    Explore {
        #[command(flatten)]
        key: KeyArgs,
        /// Label related chords with their degree in ROOT:SCALE
        #[arg(long, value_name = "ROOT:SCALE")]
        compare: Option<KeySpec>,
        /// Save the resulting path under NAME (empty for a default name)
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
        #[arg(required = true)]
        steps: Vec<String>,
    },
    /// Ask the suggestion model for progressions starting on CHORD
    Suggest {
        chord: Chord,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Saved progressions
    Paths {
        #[command(subcommand)]
        action: PathsCommand,
    },
    /// Show the effective config
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum PathsCommand {
    List,
    /// Replay a saved progression
    Show { id: String },
    Delete { id: String },
}

fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("harmonai=info".parse()?))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let mut config = config::load_config(&config_path);
    config.apply_ollama_url(std::env::var(config::OLLAMA_URL_ENV).ok());

    commands::run(cli.command, &config, &config_path)
}
