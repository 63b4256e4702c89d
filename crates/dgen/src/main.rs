//! Dungeon layout generator
//!
//! Prints a generated layout as ASCII (one block per level in 3D) or as
//! JSON for other tools to consume.

mod logging;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use dgen_core::{Coord, DungeonConfig, GenerationError, generate_2d, generate_3d};

/// Generate a dungeon layout
#[derive(Parser, Debug)]
#[command(name = "dgen")]
#[command(author, version, about = "Procedural dungeon layout generator", long_about = None)]
struct Args {
    /// Number of grid dimensions (2 or 3)
    #[arg(short = 'd', long = "dims", default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
    dims: u8,

    /// JSON configuration file; flags below override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// RNG seed (0 picks a fresh one)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of room placement samples
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<usize>,

    /// Grid extent, e.g. 30,30 or 30,5,30
    #[arg(long = "size", value_delimiter = ',')]
    size: Option<Vec<i32>>,

    /// Largest room extent, e.g. 6,6 or 6,2,6
    #[arg(long = "max-room", value_delimiter = ',')]
    max_room: Option<Vec<i32>>,

    /// Probability of keeping each extra loop connection
    #[arg(short = 'l', long = "loop-rate")]
    loop_rate: Option<f64>,

    /// Print the full layout as JSON instead of ASCII
    #[arg(long = "json")]
    json: bool,

    /// More logging to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Command-line failures
#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("invalid configuration file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("--{flag} needs {expected} values, got {got}")]
    Dimensions {
        flag: &'static str,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("cannot encode layout: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("dgen: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    logging::install(args.verbose)?;

    if args.dims == 3 {
        let config = build_config::<3>(args)?;
        let dungeon = generate_3d(&config)?;
        emit(args.json, &dungeon, || dungeon.to_ascii())
    } else {
        let config = build_config::<2>(args)?;
        let dungeon = generate_2d(&config)?;
        emit(args.json, &dungeon, || dungeon.to_ascii())
    }
}

/// Defaults, then the config file, then flags
fn build_config<const N: usize>(args: &Args) -> Result<DungeonConfig<N>, CliError>
where
    DungeonConfig<N>: Default + DeserializeOwned,
{
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => DungeonConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(size) = &args.size {
        config.size = coord_arg("size", size)?;
    }
    if let Some(max_room) = &args.max_room {
        config.room_max_size = coord_arg("max-room", max_room)?;
    }
    if let Some(loop_rate) = args.loop_rate {
        config.loop_rate = loop_rate;
    }

    log::debug!("configuration: {config:?}");
    Ok(config)
}

fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn coord_arg<const N: usize>(flag: &'static str, values: &[i32]) -> Result<Coord<N>, CliError> {
    let components: [i32; N] = values.try_into().map_err(|_| CliError::Dimensions {
        flag,
        expected: N,
        got: values.len(),
    })?;
    Ok(Coord::new(components))
}

fn emit<T: Serialize>(
    json: bool,
    dungeon: &T,
    ascii: impl FnOnce() -> String,
) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, dungeon)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", ascii())?;
    }
    out.flush()?;
    Ok(())
}
