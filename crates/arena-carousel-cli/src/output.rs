//! Output formatting for command results

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;
use arena_carousel::mock::{SessionTrace, TraceEntry};
use arena_carousel::{Interaction, SlideView, VideoQuality};
use console::style;
use serde::Serialize;

/// Catalog listing as emitted by `catalog --format json`
#[derive(Debug, Serialize)]
pub struct CatalogReport<'a> {
    /// Session quality
    pub quality: VideoQuality,
    /// Render model of every slide
    pub slides: &'a [SlideView],
}

/// Render the slide listing
pub fn render_catalog(
    config: &CliConfig,
    quality: VideoQuality,
    slides: &[SlideView],
) -> CliResult<String> {
    if config.format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&CatalogReport { quality, slides })?);
    }

    let color = config.use_color();
    let mut out = String::new();
    if !config.verbosity.is_quiet() {
        out.push_str(&header(
            &format!("{} slides, {quality} quality", slides.len()),
            color,
        ));
    }
    for slide in slides {
        let marker = if slide.selected { ">" } else { " " };
        let kind = if color {
            style(slide.kind).cyan().to_string()
        } else {
            slide.kind.to_string()
        };
        out.push_str(&format!("{marker} {:>2}  {kind:<5}  {}", slide.index, slide.source));
        if let Some(poster) = &slide.poster {
            out.push_str(&format!("  (poster {poster})"));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Render a replayed session
pub fn render_trace(config: &CliConfig, trace: &SessionTrace) -> CliResult<String> {
    if config.format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(trace)?);
    }

    let color = config.use_color();
    let mut out = String::new();
    if !config.verbosity.is_quiet() {
        out.push_str(&header(
            &format!(
                "{} slides, {} quality, {} steps",
                trace.slides,
                trace.quality,
                trace.entries.len().saturating_sub(1)
            ),
            color,
        ));
    }
    for entry in &trace.entries {
        out.push_str(&trace_line(entry, color));
        out.push('\n');
    }
    Ok(out)
}

fn trace_line(entry: &TraceEntry, color: bool) -> String {
    let step = entry.step.as_deref().unwrap_or("mount");
    let step = if color {
        style(format!("{step:<14}")).bold().to_string()
    } else {
        format!("{step:<14}")
    };
    let zoomed = entry
        .zoomed_index
        .map_or_else(|| "-".to_string(), |i| i.to_string());
    let playing = if entry.playing.is_empty() {
        "-".to_string()
    } else {
        entry
            .playing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };
    let advance = entry
        .advance_due_ms
        .map_or_else(|| "-".to_string(), |ms| format!("{ms}ms"));

    let mut line = format!(
        "[{:>7}ms] {step} selected={} zoomed={zoomed} playing={playing} advance@{advance} {}",
        entry.at_ms,
        entry.selected_index,
        describe_interaction(entry.interaction),
    );
    if let Some(outcome) = entry.outcome {
        line.push_str(&format!(" -> {outcome:?}"));
    }
    line
}

fn describe_interaction(interaction: Interaction) -> String {
    match interaction {
        Interaction::Idle => "idle".to_string(),
        Interaction::Centering { target } => format!("centering:{target}"),
        Interaction::Zoomed { index } => format!("zoomed:{index}"),
    }
}

fn header(title: &str, color: bool) -> String {
    if color {
        format!("{}\n", style(title).bold().underlined())
    } else {
        format!("=== {title} ===\n")
    }
}
