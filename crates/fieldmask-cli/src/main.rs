//! FieldMask CLI
//!
//! Masks payloads read from stdin (or `--input`) and writes them to stdout.
//!
//! Usage:
//! ```bash
//! # Path-rule masking of a JSON payload
//! echo '{"pfmidata":{"rlno":"1234567890123"}}' | fieldmask --config masking.yaml json --scope common
//!
//! # Sensitive-key masking of legacy bracket text
//! echo '{abc=secret, test=value}' | fieldmask legacy
//!
//! # Show the merged rules a scope resolves to
//! fieldmask --config masking.yaml rules --scope NCDP_MIMEIN10A0
//! ```

mod commands;

use clap::{Parser, Subcommand};
use fieldmask_config_file::{FileConfigLoader, MaskingConfig};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "fieldmask")]
#[command(about = "FieldMask - redact sensitive fields before they are logged or stored", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to masking configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "FIELDMASK_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default masking configuration file
    Init {
        /// Destination path (extension selects YAML or TOML)
        #[arg(default_value = "fieldmask.yaml")]
        path: PathBuf,
    },
    /// Mask a JSON payload with the path rules of a scope
    Json {
        /// Scope id whose rules apply, in addition to the common rules
        #[arg(short, long)]
        scope: String,

        /// Read the payload from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the masked JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
    /// Mask sensitive keys in legacy `{key=value}` text
    Legacy {
        /// Read the text from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the rules a scope resolves to
    Rules {
        #[arg(short, long)]
        scope: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => FileConfigLoader::new(path)?.load()?,
        None => MaskingConfig::default(),
    };

    // Environment variables override the config file
    config.merge_env();
    config.validate()?;

    init_tracing(&config.logging.level)?;

    if let Some(ref path) = cli.config {
        info!("Using masking config {:?}", path);
    }

    match cli.command {
        Commands::Init { path } => {
            FileConfigLoader::create(&path, &MaskingConfig::default())?;
            eprintln!("Wrote default masking config to {}", path.display());
        }
        Commands::Json {
            scope,
            input,
            pretty,
        } => {
            let payload = commands::read_input(input.as_deref())?;
            let masked =
                commands::mask_json(&config.path_masker(), &scope, &payload, pretty)?;
            println!("{}", masked);
        }
        Commands::Legacy { input } => {
            let text = commands::read_input(input.as_deref())?;
            let masked = config.legacy_masker().mask(text.trim_end_matches(['\r', '\n']))?;
            println!("{}", masked);
        }
        Commands::Rules { scope } => {
            print!("{}", commands::describe_rules(&config.rule_index(), &scope));
        }
    }

    Ok(())
}

/// Install a stderr subscriber so stdout carries only masked output
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!("{}", log_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
