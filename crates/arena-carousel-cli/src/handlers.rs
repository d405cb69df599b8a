//! Command handlers
//!
//! Each handler returns the rendered result so `main` only decides where it
//! goes.

use crate::commands::{CatalogArgs, QualityArgs, SimulateArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_catalog, render_trace};
use arena_carousel::mock::{CarouselHarness, HarnessStep, MockNetwork};
use arena_carousel::{select_quality, ConnectionInfo, GalleryConfig, NoNetworkInformation};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Script entry: either the compact form or a tagged step
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Compact(String),
    Tagged(HarnessStep),
}

impl ScriptStep {
    fn into_step(self) -> CliResult<HarnessStep> {
        match self {
            Self::Compact(text) => Ok(HarnessStep::parse(&text)?),
            Self::Tagged(step) => Ok(step),
        }
    }
}

/// Gallery from `path`, or the default reel
pub fn load_gallery(path: Option<&Path>) -> CliResult<GalleryConfig> {
    match path {
        Some(path) => {
            let gallery = GalleryConfig::load(path)?;
            info!(path = %path.display(), slides = gallery.catalog.len(), "gallery loaded");
            Ok(gallery)
        }
        None => Ok(GalleryConfig::default()),
    }
}

/// Steps from a YAML or JSON script file
pub fn load_script(path: &Path) -> CliResult<Vec<HarnessStep>> {
    let text = std::fs::read_to_string(path)?;
    let entries: Vec<ScriptStep> = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml_ng::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        _ => {
            return Err(CliError::config(format!(
                "unsupported script extension: {}",
                path.display()
            )))
        }
    };
    entries.into_iter().map(ScriptStep::into_step).collect()
}

/// Script steps followed by `--step` flags
pub fn collect_steps(script: Option<&Path>, flags: &[String]) -> CliResult<Vec<HarnessStep>> {
    let mut steps = match script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    for flag in flags {
        let step = HarnessStep::parse(flag)
            .map_err(|e| CliError::invalid_argument(format!("--step {flag}: {e}")))?;
        steps.push(step);
    }
    Ok(steps)
}

fn network_for(effective_type: Option<&str>) -> MockNetwork {
    effective_type.map_or_else(MockNetwork::unavailable, MockNetwork::with_effective_type)
}

/// `catalog`: list the slides with the sources chosen for the hint
pub fn run_catalog(config: &CliConfig, args: &CatalogArgs) -> CliResult<String> {
    let gallery = load_gallery(args.config.as_deref())?;
    let harness = CarouselHarness::mount_with(
        gallery.catalog,
        gallery.carousel,
        network_for(args.effective_type.as_deref()),
    )?;
    render_catalog(config, harness.carousel.quality(), &harness.carousel.slides())
}

/// `quality`: print `low` or `high`
pub fn run_quality(args: &QualityArgs) -> String {
    let quality = match args.effective_type.as_deref() {
        Some(hint) => select_quality(&ConnectionInfo::with_effective_type(hint)),
        None => select_quality(&NoNetworkInformation),
    };
    debug!(hint = ?args.effective_type, %quality, "quality selected");
    quality.to_string()
}

/// `simulate`: replay steps against a headless carousel
pub fn run_simulate(config: &CliConfig, args: &SimulateArgs) -> CliResult<String> {
    let gallery = load_gallery(args.config.as_deref())?;
    let steps = collect_steps(args.script.as_deref(), &args.steps)?;
    let mut harness = CarouselHarness::mount_with(
        gallery.catalog,
        gallery.carousel,
        network_for(args.effective_type.as_deref()),
    )?;
    info!(steps = steps.len(), "replaying session");
    let trace = harness.run(&steps)?;
    harness.unmount();
    render_trace(config, &trace)
}
