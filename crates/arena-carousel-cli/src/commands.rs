//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arena Carousel: inspect the café gallery and replay carousel sessions
#[derive(Parser, Debug)]
#[command(name = "arena-carousel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the slides and the sources chosen for a connection
    Catalog(CatalogArgs),

    /// Print the video quality chosen for a connection
    Quality(QualityArgs),

    /// Replay a scripted carousel session against headless collaborators
    ///
    /// Steps: advance:MS, end:I, click:I, drag:I, next, prev, close, hint:TYPE
    Simulate(SimulateArgs),
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Gallery configuration file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Effective connection type reported by the host (e.g. 4g, 3g)
    #[arg(short, long)]
    pub effective_type: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the quality command
#[derive(Parser, Debug)]
pub struct QualityArgs {
    /// Effective connection type reported by the host (omit for no hint)
    #[arg(short, long)]
    pub effective_type: Option<String>,
}

/// Arguments for the simulate command
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Gallery configuration file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Step script (.yaml, .yml or .json list of steps)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Step in compact form, applied after the script (repeatable)
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<String>,

    /// Effective connection type reported at mount
    #[arg(short, long)]
    pub effective_type: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
