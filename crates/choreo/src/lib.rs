//! `pf-choreo` — Scroll-progress timeline evaluation.
//!
//! This crate evaluates a timeline at a progress value P in `[0, 1]` and
//! produces a [`StyleSnapshot`](pf_common::StyleSnapshot) per element for the
//! render target. It handles:
//!
//! - **Segment windows**: which segments are active, entered, or exited at P
//! - **Curve interpolation**: piecewise linear with optional per-span easing
//! - **Step selection**: current item index and crossfades for pinned sections
//! - **Presets**: fade-up, slide-in, staggered reveals, card flips, parallax
//! - **Arc carousel**: distance-driven card layout
//!
//! # Usage
//!
//! ```rust
//! use pf_choreo::{evaluate, Segment, Timeline};
//! use pf_common::{ElementId, Progress, VisualProperty};
//!
//! let timeline = Timeline::new(vec![
//!     Segment::new("hero", 0.0, 0.8).with_tween(VisualProperty::Opacity, 1.0, 0.0),
//! ])
//! .unwrap();
//! let styles = evaluate(&timeline, Progress::new(0.4));
//! assert!((styles[&ElementId::new("hero")].opacity - 0.5).abs() < 1e-6);
//! ```

pub mod carousel;
pub mod curve;
pub mod error;
pub mod evaluator;
pub mod presets;
pub mod stepper;
pub mod types;

// Re-export primary API
pub use carousel::CarouselLayout;
pub use error::{ChoreoError, ChoreoResult};
pub use evaluator::{compute_visibility, evaluate, evaluate_element, StyleMap};
pub use presets::{
    card_flip, fade_up, parallax, project_showcase, showcase_outro, slide_in, staggered_reveal,
    step_text, text_reveal, StepBlocks,
};
pub use stepper::{
    crossfade_offset, crossfade_opacity, crossfade_styles, current_index, item_progress,
    progress_for_index, EvenSteps,
};
pub use types::{ControlPoint, Curve, Easing, Segment, Timeline};
