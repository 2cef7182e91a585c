//! # sia CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, sets up
//! tracing, and dispatches to the policy handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sia_cli::config::{CliConfig, OutputFormat};
use sia_cli::policy::{
    run_address, run_decode, run_encode, run_parse, run_standard_address, DecodeArgs,
    PolicyArgs, StandardAddressArgs,
};

/// Spend policy toolkit.
///
/// Normalizes the policy text form, derives addresses, and converts between
/// the text form and the canonical binary encoding.
#[derive(Parser, Debug)]
#[command(name = "sia", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format. Overrides the config file.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a policy and print its canonical text form.
    Parse(PolicyArgs),

    /// Derive the address of a policy.
    Address(PolicyArgs),

    /// Print the canonical binary encoding of a policy as hex.
    Encode(PolicyArgs),

    /// Decode a hex-encoded canonical policy.
    Decode(DecodeArgs),

    /// Address of the single-key policy for an ed25519 public key.
    StandardAddress(StandardAddressArgs),
}

fn env_filter(verbose: u8, config: Option<&CliConfig>) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = config
                .and_then(|c| c.log_filter.as_deref())
                .unwrap_or("warn");
            EnvFilter::new(directive)
        }),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config before tracing so the file can supply the filter.
    let config = CliConfig::load(cli.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose, config.as_ref().ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let format = config.resolve_format(cli.format);
    tracing::debug!(?format, "sia CLI starting");

    let result = match &cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Address(args) => run_address(args),
        Commands::Encode(args) => run_encode(args),
        Commands::Decode(args) => run_decode(args),
        Commands::StandardAddress(args) => run_standard_address(args),
    }
    .and_then(|report| report.render(format));

    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
