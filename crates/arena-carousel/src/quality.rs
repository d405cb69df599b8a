//! Network-Aware Video Quality
//!
//! Chooses between the low- and high-bitrate variant of every video slide
//! from the host's effective-connection-type hint. The decision is made
//! once per mount; later changes to the hint are not observed.
//!
//! The hint mirrors the browser shape: a standard `connection` entry with
//! `mozConnection`/`webkitConnection` fallbacks, any of which may be absent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-wide video quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    /// Low-bitrate sources
    Low,
    /// High-bitrate sources
    #[default]
    High,
}

impl VideoQuality {
    /// Whether high-bitrate sources are preferred
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Coarse network class reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveConnectionType {
    /// `slow-2g`
    Slow2g,
    /// `2g`
    TwoG,
    /// `3g`
    ThreeG,
    /// `4g`
    FourG,
    /// Anything else, kept verbatim
    Other(String),
}

impl EffectiveConnectionType {
    /// Parse a hint string. Unknown or malformed values become `Other`.
    #[must_use]
    pub fn parse(hint: &str) -> Self {
        let normalized = hint.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "slow-2g" => Self::Slow2g,
            "2g" => Self::TwoG,
            "3g" => Self::ThreeG,
            "4g" => Self::FourG,
            _ => Self::Other(normalized),
        }
    }

    /// Whether this class is too slow for high-bitrate video
    #[must_use]
    pub const fn is_constrained(&self) -> bool {
        matches!(self, Self::Slow2g | Self::TwoG | Self::ThreeG)
    }
}

impl fmt::Display for EffectiveConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slow2g => write!(f, "slow-2g"),
            Self::TwoG => write!(f, "2g"),
            Self::ThreeG => write!(f, "3g"),
            Self::FourG => write!(f, "4g"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Connection details exposed by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Effective connection type string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<String>,
    /// Estimated downlink in Mbit/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downlink: Option<f64>,
    /// Estimated round-trip time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt: Option<u32>,
    /// Data-saver preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_data: Option<bool>,
}

impl ConnectionInfo {
    /// Connection with only an effective type
    #[must_use]
    pub fn with_effective_type(effective_type: impl Into<String>) -> Self {
        Self {
            effective_type: Some(effective_type.into()),
            ..Self::default()
        }
    }

    /// Parsed effective type, if any
    #[must_use]
    pub fn effective_connection_type(&self) -> Option<EffectiveConnectionType> {
        self.effective_type
            .as_deref()
            .map(EffectiveConnectionType::parse)
    }
}

/// Host capability that may report connection details
pub trait NetworkInformation {
    /// Best available connection details, or `None` if the host has none
    fn connection(&self) -> Option<ConnectionInfo>;
}

/// Host without any network information API
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNetworkInformation;

impl NetworkInformation for NoNetworkInformation {
    fn connection(&self) -> Option<ConnectionInfo> {
        None
    }
}

/// Navigator-shaped hint with vendor-prefixed fallbacks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorConnection {
    /// Standard `navigator.connection`
    #[serde(default)]
    pub connection: Option<ConnectionInfo>,
    /// Firefox `navigator.mozConnection`
    #[serde(default)]
    pub moz_connection: Option<ConnectionInfo>,
    /// WebKit `navigator.webkitConnection`
    #[serde(default)]
    pub webkit_connection: Option<ConnectionInfo>,
}

impl NetworkInformation for NavigatorConnection {
    fn connection(&self) -> Option<ConnectionInfo> {
        self.connection
            .as_ref()
            .or(self.moz_connection.as_ref())
            .or(self.webkit_connection.as_ref())
            .cloned()
    }
}

impl NetworkInformation for ConnectionInfo {
    fn connection(&self) -> Option<ConnectionInfo> {
        Some(self.clone())
    }
}

/// Decide the session quality from a host hint.
///
/// `slow-2g`, `2g` and `3g` select low bitrate; any other value, a missing
/// `effective_type`, or a host without the capability select high bitrate.
#[must_use]
pub fn select_quality(network: &dyn NetworkInformation) -> VideoQuality {
    let constrained = network
        .connection()
        .and_then(|info| info.effective_connection_type())
        .is_some_and(|ect| ect.is_constrained());

    if constrained {
        VideoQuality::Low
    } else {
        VideoQuality::High
    }
}
