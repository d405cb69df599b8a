//! Arena Carousel CLI
//!
//! ## Usage
//!
//! ```bash
//! arena-carousel catalog                          # List the default reel
//! arena-carousel quality -e 3g                    # low
//! arena-carousel simulate --step end:0 --step advance:3000
//! arena-carousel simulate -s session.yaml -f json # Replay a script
//! ```

use arena_carousel_cli::{
    handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, OutputFormat, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    let output = match &cli.command {
        Commands::Catalog(args) => {
            handlers::run_catalog(&config.clone().with_format(args.format.into()), args)?
        }
        Commands::Quality(args) => handlers::run_quality(args),
        Commands::Simulate(args) => {
            handlers::run_simulate(&config.clone().with_format(args.format.into()), args)?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(OutputFormat::Text)
}

/// Logs go to stderr so command output stays parseable.
fn init_tracing(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.verbosity.log_filter().into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.use_log_color())
                .with_target(false),
        )
        .try_init();
}
