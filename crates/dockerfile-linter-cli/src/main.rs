mod display;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use dockerfile_linter_core::config::{self, OutputFormat};
use dockerfile_linter_core::linter::{self, LintOptions};
use dockerfile_linter_core::recipe::parser::DockerfileParser;
use dockerfile_linter_core::LintError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "dockerfile-linter",
    version,
    about = "Dockerfile Linter",
    long_about = "Check a Dockerfile for base image hygiene, a non-root USER and chained RUN commands.\n\nChecks: 'Base Image Check', 'Non-Root User Check', 'Optimized RUN Check'."
)]
struct Cli {
    /// Path to the Dockerfile to analyze
    dockerfile: PathBuf,

    /// Output format [default: text]
    #[arg(long, value_enum)]
    output: Option<OutputArg>,

    /// List of checks to ignore (e.g., 'Base Image Check')
    #[arg(long, num_args = 1.., value_name = "NAME")]
    ignore: Vec<String>,

    /// Config file (defaults to .dockerfile-linter.toml beside the Dockerfile or in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_failure(&cli.dockerfile, &err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Parse before anything else so a missing Dockerfile is always the
    // reported failure.
    let recipe = DockerfileParser::parse_file(&cli.dockerfile)?;

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = config::resolve_config(cli.config.as_deref(), &cli.dockerfile, &cwd)?
        .merge_cli(cli.output.map(Into::into), &cli.ignore);

    let options = LintOptions::new(config.ignore.clone());
    let report = linter::lint(&recipe, &options);

    match config.output_format() {
        OutputFormat::Json => {
            let json = report.to_json().context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => display::print_report(&report),
    }

    Ok(())
}

fn print_failure(dockerfile: &Path, err: &anyhow::Error) {
    let not_found = err
        .downcast_ref::<LintError>()
        .is_some_and(LintError::is_not_found);

    if not_found {
        println!("Error: Dockerfile not found at '{}'", dockerfile.display());
    } else {
        println!("An unexpected error occurred: {:#}", err);
    }
}
