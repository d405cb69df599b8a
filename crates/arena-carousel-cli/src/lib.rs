//! Arena Carousel CLI Library
//!
//! Command-line driver for the headless media carousel: inspect a gallery
//! catalog, check the quality decision for a connection, and replay
//! scripted sessions against fake timers and mock video elements.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{CatalogArgs, Cli, ColorArg, Commands, FormatArg, QualityArgs, SimulateArgs};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_catalog, render_trace, CatalogReport};
