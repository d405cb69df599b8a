//! Carousel configuration
//!
//! `GalleryConfig` bundles the catalog with timing options and loads from
//! YAML or JSON files. Every field has a default, so an empty file yields
//! the café reel with a 3 second dwell.

use crate::catalog::MediaCatalog;
use crate::result::{CarouselError, CarouselResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default dwell time for image slides, in milliseconds
pub const DEFAULT_DWELL_MS: u64 = 3000;

/// Timing and looping options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// How long an image slide stays centered before auto-advancing
    pub dwell_ms: u64,
    /// Whether the default strip wraps around at its ends. A host viewport
    /// keeps its own setting.
    pub looped: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
            looped: true,
        }
    }
}

impl CarouselConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dwell time
    #[must_use]
    pub const fn with_dwell_ms(mut self, dwell_ms: u64) -> Self {
        self.dwell_ms = dwell_ms;
        self
    }

    /// Set looping
    #[must_use]
    pub const fn with_loop(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Dwell as a `Duration`
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    /// Reject settings that would stall or spin the carousel
    pub fn validate(&self) -> CarouselResult<()> {
        if self.dwell_ms == 0 {
            return Err(CarouselError::config("dwell_ms must be greater than zero"));
        }
        Ok(())
    }
}

/// Catalog plus carousel options, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Carousel options
    pub carousel: CarouselConfig,
    /// Slides, in display order
    pub catalog: MediaCatalog,
}

impl GalleryConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> CarouselResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> CarouselResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> CarouselResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents),
            Some("json") => Self::from_json(&contents),
            other => Err(CarouselError::config(format!(
                "unsupported config extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.dwell(), Duration::from_millis(3000));
        assert!(config.looped);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dwell_rejected() {
        let config = CarouselConfig::new().with_dwell_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_yaml_uses_reel() {
        let config = GalleryConfig::from_yaml("{}").unwrap();
        assert_eq!(config.catalog, MediaCatalog::arena_reel());
        assert_eq!(config.carousel.dwell_ms, DEFAULT_DWELL_MS);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r"
carousel:
  dwell_ms: 1500
catalog:
  - kind: image
    source: /g/one.webp
";
        let config = GalleryConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.carousel.dwell_ms, 1500);
        assert!(config.carousel.looped);
        assert_eq!(config.catalog.len(), 1);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"carousel":{{"looped":false}},"catalog":[{{"kind":"image","source":"/g/a.webp"}}]}}"#
        )
        .unwrap();
        let config = GalleryConfig::load(file.path()).unwrap();
        assert!(!config.carousel.looped);
        assert_eq!(config.catalog.len(), 1);
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = GalleryConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config extension"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GalleryConfig::load(Path::new("/nonexistent/gallery.yaml")).unwrap_err();
        assert!(matches!(err, CarouselError::Io(_)));
    }
}
