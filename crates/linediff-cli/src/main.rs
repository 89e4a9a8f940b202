//! linediff CLI
//!
//! Command-line interface for the linediff engine

use clap::{Parser, Subcommand, ValueEnum};
use linediff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "linediff")]
#[command(about = "linediff - Line-oriented diff with inline highlighting", long_about = None)]
struct Cli {
    /// Emit engine logs to stderr
    #[arg(long, value_enum, global = true)]
    log: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two text files line by line
    Diff(commands::diff::DiffArgs),
    /// Print the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let logging = match cli.log {
        Some(LogFormat::Pretty) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => Ok(()),
    };
    if let Err(e) = logging {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
