mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// SESF specification validator.
#[derive(Parser)]
#[command(name = "sesf", version, about = "SESF specification validator")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an SESF specification and report findings
    Validate {
        /// Path to the SESF markdown specification
        file: PathBuf,
        /// Comma-separated checks to run: structure, types, rules, errors, examples, cross
        #[arg(long)]
        check: Option<String>,
    },

    /// Parse an SESF specification and print the document tree as JSON
    Parse {
        /// Path to the SESF markdown specification
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { file, check } => {
            commands::validate::cmd_validate(&file, check.as_deref(), cli.output, cli.quiet);
        }
        Commands::Parse { file } => {
            commands::parse::cmd_parse(&file, cli.output, cli.quiet);
        }
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("sesf_core=debug,sesf_analyze=debug,sesf_cli=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Report an error message in the appropriate output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            eprintln!("{}", msg);
        }
        OutputFormat::Json => {
            eprintln!("{}", error_json(msg));
        }
    }
}

pub(crate) fn error_json(msg: &str) -> String {
    serde_json::json!({ "error": msg }).to_string()
}
