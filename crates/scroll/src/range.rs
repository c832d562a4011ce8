//! Scroll ranges: map a document scroll offset onto a `Progress`.
//!
//! Each constructor mirrors one way a section ties its animation to the page:
//! pinned for a fixed distance, animating while it crosses the viewport, or
//! sticky inside a taller container.

use pf_common::Progress;
use serde::{Deserialize, Serialize};

/// A span of scroll offsets in pixels, `start` mapping to 0 and `end` to 1.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Section pinned at the viewport top for `length` pixels of scrolling.
    pub fn pinned(top: f32, length: f32) -> Self {
        Self::new(top, top + length.max(0.0))
    }

    /// From the element's top touching the viewport bottom until its bottom
    /// leaves the viewport top.
    pub fn through_viewport(top: f32, height: f32, viewport_height: f32) -> Self {
        Self::new(top - viewport_height, top + height)
    }

    /// Sticky content inside a container: from the container's top reaching the
    /// viewport top until its bottom reaches the viewport bottom.
    ///
    /// A container no taller than the viewport yields a zero-length range.
    pub fn sticky(top: f32, height: f32, viewport_height: f32) -> Self {
        Self::new(top, top + (height - viewport_height).max(0.0))
    }

    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Progress at `scroll_y`, clamped to the range.
    ///
    /// A zero-length range jumps straight to 1 once its start is reached.
    pub fn progress(&self, scroll_y: f32) -> Progress {
        if self.length() <= 0.0 {
            return if scroll_y >= self.start {
                Progress::ONE
            } else {
                Progress::ZERO
            };
        }
        Progress::from_ratio(scroll_y - self.start, self.length())
    }

    /// Scroll offset that produces `progress`.
    pub fn offset_at(&self, progress: Progress) -> f32 {
        self.start + self.length().max(0.0) * progress.as_f32()
    }
}

/// Progress of a pointer `offset` pixels along a track `extent` pixels long.
pub fn pointer_progress(offset: f32, extent: f32) -> Progress {
    if extent <= 0.0 {
        return Progress::ZERO;
    }
    Progress::new(offset / extent)
}
