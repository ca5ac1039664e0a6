//! Serializable widget configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PaletteResult;
use crate::geometry::{Edge, Range};
use crate::palette::BoundsPolicy;

/// Default duration of the palette show/hide transition, in milliseconds.
pub const PALETTE_TRANSITION_MS: u64 = 450;

/// Configuration of a single palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Edge of the sibling element the palette hangs from.
    pub sibling_edge: Edge,
    /// Range the palette's anchored edge must stay within; unbounded when absent.
    pub bounds: Option<Range>,
    pub policy: BoundsPolicy,
    /// Whether the palette starts visible.
    pub visible: bool,
    /// Show/hide transition length, after which delayed handlers fire.
    pub transition_ms: u64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            sibling_edge: Edge::Bottom,
            bounds: None,
            policy: BoundsPolicy::Tolerant,
            visible: false,
            transition_ms: PALETTE_TRANSITION_MS,
        }
    }
}

impl PaletteConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The validated bounding range.
    pub fn bounds(&self) -> PaletteResult<Range> {
        match self.bounds {
            Some(range) => range.validated(),
            None => Ok(Range::UNBOUNDED),
        }
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Configuration of hover tooltips.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Delay between pointer enter and the tooltip appearing.
    pub display_delay_ms: u64,
}

impl TooltipConfig {
    pub fn display_delay(&self) -> Duration {
        Duration::from_millis(self.display_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteError;

    #[test]
    fn test_palette_config_defaults() {
        let config = PaletteConfig::from_json("{}").unwrap();
        assert_eq!(config, PaletteConfig::default());
        assert_eq!(config.transition(), Duration::from_millis(450));
        assert_eq!(config.bounds().unwrap(), Range::UNBOUNDED);
    }

    #[test]
    fn test_palette_config_from_json() {
        let config = PaletteConfig::from_json(
            r#"{"sibling_edge": "right", "bounds": {"min": 0, "max": 800}, "policy": "strict", "visible": true}"#,
        )
        .unwrap();
        assert_eq!(config.sibling_edge, Edge::Right);
        assert_eq!(config.policy, BoundsPolicy::Strict);
        assert!(config.visible);
        assert_eq!(config.bounds().unwrap(), Range::new(0.0, 800.0).unwrap());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert!(PaletteConfig::from_json(r#"{"bounds": {"min": 10, "max": 0}}"#).is_err());

        let config = PaletteConfig {
            bounds: Some(Range { min: 10.0, max: 0.0 }),
            ..Default::default()
        };
        assert!(matches!(config.bounds(), Err(PaletteError::InvalidBounds { .. })));
    }

    #[test]
    fn test_unknown_edge_rejected() {
        assert!(PaletteConfig::from_json(r#"{"sibling_edge": "diagonal"}"#).is_err());
    }

    #[test]
    fn test_tooltip_config() {
        let config: TooltipConfig = serde_json::from_str(r#"{"display_delay_ms": 1000}"#).unwrap();
        assert_eq!(config.display_delay(), Duration::from_secs(1));
    }
}
