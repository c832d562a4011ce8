//! `pf-common` — Shared types and configuration for the scroll choreography engine.
//!
//! This crate is the foundation the other crates depend on:
//!
//! - **Types**: `Progress`, `ElementId` (newtypes for safety)
//! - **Style**: `VisualProperty`, `StyleSnapshot` (render target interface)
//! - **Config**: `ChoreoConfig` and its sections, loaded from JSON
//! - **Errors**: `ConfigError` (thiserror-based)

pub mod config;
pub mod error;
pub mod style;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    load_config, CarouselConfig, ChoreoConfig, PresetTiming, SmoothScrollConfig,
    VisibilityMargins,
};
pub use error::{ConfigError, ConfigResult};
pub use style::{StyleSnapshot, VisualProperty};
pub use types::{ElementId, Progress};
