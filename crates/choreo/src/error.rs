//! Error types for timeline construction.

use pf_common::{ElementId, VisualProperty};
use thiserror::Error;

/// Errors raised while building or loading a timeline.
///
/// All of these are construction-time: a `Timeline` that exists has passed
/// validation, so evaluating it cannot fail.
#[derive(Error, Debug)]
pub enum ChoreoError {
    #[error("Invalid window [{start}, {end}] for {element_id}: need 0 <= start < end <= 1")]
    InvalidSegment {
        element_id: ElementId,
        start: f32,
        end: f32,
    },

    #[error("Invalid {property} curve for {element_id}: {reason}")]
    InvalidCurve {
        element_id: ElementId,
        property: VisualProperty,
        reason: String,
    },

    #[error("Timeline has no segments")]
    EmptyTimeline,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for timeline construction.
pub type ChoreoResult<T> = Result<T, ChoreoError>;
