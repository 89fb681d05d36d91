//! Liuyao CLI
//!
//! Usage:
//!   liuyao cast                                  # Random cast
//!   liuyao cast --seed 42                        # Reproducible cast
//!   liuyao cast --phrase "question text"         # Cast seeded from a phrase
//!   liuyao cast --tosses 0,1,2,3,1,2             # Replay recorded tosses
//!   liuyao solar --date 1990-06-15T12:30 --location 臺北市
//!   liuyao cities                                # List known locations
//!   liuyao --json cast --seed 42                 # JSON output

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use liuyao::config::{ReferenceData, CITIES_ENV, HEXAGRAMS_ENV};
use liuyao::core::{handle_cast, handle_solar};
use liuyao::types::{CastRequest, SolarRequest};
use liuyao::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "liuyao",
    version = VERSION,
    about = "Three-coin hexagram casting and true solar time correction",
    long_about = "Casts a six-line hexagram with the three-coin method, names the\n\
                  primary and transformed figures, and corrects civil birth times\n\
                  to true solar time for a known location.\n\n\
                  Line kinds:\n  \
                  OLD_YIN     - 0 backs, moving\n  \
                  YOUNG_YANG  - 1 back\n  \
                  YOUNG_YIN   - 2 backs\n  \
                  OLD_YANG    - 3 backs, moving"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    no_color: bool,

    /// Debug logging on stderr (default: info)
    #[arg(long, global = true)]
    verbose: bool,

    /// Hexagram table file (default: bundled)
    #[arg(long, global = true, env = HEXAGRAMS_ENV)]
    hexagrams: Option<PathBuf>,

    /// City table file (default: bundled)
    #[arg(long, global = true, env = CITIES_ENV)]
    cities: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast a hexagram
    Cast {
        /// Seed for a reproducible cast
        #[arg(long, conflicts_with_all = ["phrase", "tosses"])]
        seed: Option<u64>,

        /// Derive the seed from a phrase
        #[arg(long, conflicts_with = "tosses")]
        phrase: Option<String>,

        /// Six back-counts, bottom line first (e.g. 0,1,2,3,1,2)
        #[arg(long, value_delimiter = ',')]
        tosses: Option<Vec<u8>>,
    },

    /// Correct a civil time to true solar time
    Solar {
        /// ISO-8601 date-time, read as UTC+8 when no offset is given
        #[arg(long)]
        date: String,

        /// Location key or alias from the city table
        #[arg(long)]
        location: String,
    },

    /// List known locations
    Cities,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG overrides --verbose
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {}", e);
    }

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let data = ReferenceData::load(args.hexagrams.as_deref(), args.cities.as_deref())
        .map_err(|e| e.to_string())?;

    match &args.command {
        Command::Cast { seed, phrase, tosses } => {
            let request = CastRequest {
                seed: *seed,
                phrase: phrase.clone(),
                tosses: tosses.clone(),
            };
            let response = handle_cast(&data.builder(), &request).map_err(|e| e.to_string())?;
            if args.json {
                println!("{}", to_json(&response)?);
            } else if args.no_color {
                println!("{}", response.to_parseable_string());
            } else {
                println!("{}", response.to_terminal_string());
            }
        }
        Command::Solar { date, location } => {
            let request = SolarRequest {
                date: date.clone(),
                location: location.clone(),
            };
            let response = handle_solar(&data.corrector(), &request).map_err(|e| e.to_string())?;
            if args.json {
                println!("{}", to_json(&response)?);
            } else if args.no_color {
                println!("{}", response.to_parseable_string());
            } else {
                println!("{}", response.to_terminal_string());
            }
        }
        Command::Cities => {
            if args.json {
                println!("{}", to_json(&data.cities.entries())?);
            } else {
                for city in data.cities.entries() {
                    let aliases = if city.aliases.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", city.aliases.join(", "))
                    };
                    println!(
                        "{}{}  {:.4}N {:.4}E",
                        city.key.bold(),
                        aliases,
                        city.latitude,
                        city.longitude
                    );
                }
            }
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
