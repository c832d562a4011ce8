//! Configuration structs for visibility margins, preset timing, and the carousel.
//!
//! Every timing constant the presets use lives here so it can be re-tuned
//! without touching the evaluation code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Top-level choreography configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreoConfig {
    pub visibility: VisibilityMargins,
    pub timing: PresetTiming,
    pub carousel: CarouselConfig,
    pub smooth_scroll: SmoothScrollConfig,
}

/// How far outside its window a segment still counts as mounted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityMargins {
    /// Progress before the window start at which the element is pre-rendered.
    pub entry: f32,
    /// Progress after the window end at which the element is dropped.
    pub exit: f32,
}

impl Default for VisibilityMargins {
    fn default() -> Self {
        Self {
            entry: 0.01,
            exit: 0.01,
        }
    }
}

impl VisibilityMargins {
    pub const NONE: Self = Self {
        entry: 0.0,
        exit: 0.0,
    };
}

/// Fractions of one step's width used by the step presets.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetTiming {
    /// Offset of the description block after the title.
    pub description_offset: f32,
    /// Offset of the tech chips after the title.
    pub tech_offset: f32,
    /// Offset of the links row after the title.
    pub links_offset: f32,
    /// Length of the fade-out tail at the end of a step.
    pub fade_out: f32,
    /// Absolute progress a fade-in takes.
    pub fade_span: f32,
    /// Card reaches upright at this fraction of its step.
    pub card_straight: f32,
    /// Card starts flipping away at this fraction of its step.
    pub card_hold: f32,
    /// Absolute progress the card spends at its edge angle before and after the step.
    pub card_preroll: f32,
    /// Vertical travel in pixels for fade-up text.
    pub travel: f32,
}

impl Default for PresetTiming {
    fn default() -> Self {
        Self {
            description_offset: 0.15,
            tech_offset: 0.30,
            links_offset: 0.45,
            fade_out: 0.20,
            fade_span: 0.02,
            card_straight: 0.2,
            card_hold: 0.7,
            card_preroll: 0.01,
            travel: 30.0,
        }
    }
}

/// Geometry of the arc carousel.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Card width used when the card has not been measured yet.
    pub fallback_card_width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    /// Gap as a fraction of the viewport width, before clamping.
    pub gap_ratio: f32,
    /// Extra distance past the viewport edge before a card counts as off-screen.
    pub offscreen_margin: f32,
    /// Cards further than this many steps from the focus snap off-screen.
    pub arc_reach: f32,
    /// Vertical lift at one step from the focus.
    pub arc_lift: f32,
    pub arc_exponent: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            fallback_card_width: 400.0,
            gap_min: 140.0,
            gap_max: 220.0,
            gap_ratio: 0.12,
            offscreen_margin: 64.0,
            arc_reach: 2.5,
            arc_lift: 80.0,
            arc_exponent: 0.8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Default duration of a programmatic scroll.
    pub duration_ms: u64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { duration_ms: 2000 }
    }
}

impl ChoreoConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(?config, "Parsed choreography config");
        Ok(config)
    }

    /// Check ranges that would otherwise produce nonsensical layouts.
    pub fn validate(&self) -> ConfigResult<()> {
        let v = &self.visibility;
        if !(v.entry >= 0.0 && v.exit >= 0.0) {
            return Err(invalid(format!(
                "visibility margins must be non-negative (entry {}, exit {})",
                v.entry, v.exit
            )));
        }

        let t = &self.timing;
        let fractions = [
            ("description_offset", t.description_offset),
            ("tech_offset", t.tech_offset),
            ("links_offset", t.links_offset),
            ("fade_out", t.fade_out),
            ("fade_span", t.fade_span),
            ("card_straight", t.card_straight),
            ("card_hold", t.card_hold),
            ("card_preroll", t.card_preroll),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("timing.{name} must be in [0, 1], got {value}")));
            }
        }
        for (name, value) in [
            ("fade_span", t.fade_span),
            ("fade_out", t.fade_out),
            ("card_preroll", t.card_preroll),
            ("card_straight", t.card_straight),
        ] {
            if value <= 0.0 {
                return Err(invalid(format!("timing.{name} must be positive, got {value}")));
            }
        }
        // Every text block needs room to enter before the step starts fading out.
        let fade_out_at = 1.0 - t.fade_out;
        for (name, offset) in [
            ("description_offset", t.description_offset),
            ("tech_offset", t.tech_offset),
            ("links_offset", t.links_offset),
        ] {
            if offset >= fade_out_at {
                return Err(invalid(format!(
                    "timing.{name} ({offset}) must come before the fade-out at {fade_out_at}"
                )));
            }
        }
        if t.card_hold >= 1.0 {
            return Err(invalid(format!("timing.card_hold must be below 1, got {}", t.card_hold)));
        }
        if t.card_straight >= t.card_hold {
            return Err(invalid(format!(
                "timing.card_straight ({}) must come before timing.card_hold ({})",
                t.card_straight, t.card_hold
            )));
        }

        let c = &self.carousel;
        if c.gap_min > c.gap_max {
            return Err(invalid(format!(
                "carousel.gap_min ({}) exceeds carousel.gap_max ({})",
                c.gap_min, c.gap_max
            )));
        }
        if c.fallback_card_width <= 0.0 {
            return Err(invalid("carousel.fallback_card_width must be positive".into()));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

/// Load a configuration file from disk.
pub fn load_config(path: &Path) -> ConfigResult<ChoreoConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read config file");
        ConfigError::Io(e)
    })?;
    let config = ChoreoConfig::from_json_str(&json)?;

    info!(path = %path.display(), "Choreography config loaded");
    Ok(config)
}
