//! Discrete step selection over a continuous progress value.
//!
//! A pinned section with N items divides its progress into N equal steps.
//! These helpers pick the current item, compute each item's local phase, and
//! derive the crossfade style used when one item hands over to the next.

use std::collections::BTreeMap;

use pf_common::{ElementId, Progress, StyleSnapshot};

/// Vertical offset of an item that has not entered yet (positive) or has left (negative).
pub const CROSSFADE_OFFSET: f32 = 50.0;

/// Index of the current item: `clamp(floor(progress * count), 0, count - 1)`.
///
/// Returns `None` when there are no items. Monotonically non-decreasing in
/// `progress`, with `0` at progress 0 and `count - 1` at progress 1.
pub fn current_index(progress: Progress, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let raw = (progress.as_f32() * count as f32).floor();
    Some((raw.max(0.0) as usize).min(count - 1))
}

/// Phase of item `index`: negative before it starts, `0..1` while current, above 1 after.
pub fn item_progress(progress: Progress, index: usize, count: usize) -> f32 {
    progress.as_f32() * count as f32 - index as f32
}

/// Opacity of an item given its phase: a triangle peaking at phase 0.5.
pub fn crossfade_opacity(phase: f32) -> f32 {
    (1.0 - (phase - 0.5).abs() * 2.0).clamp(0.0, 1.0)
}

/// Vertical offset of an item given its phase.
pub fn crossfade_offset(phase: f32) -> f32 {
    if phase < 0.0 {
        CROSSFADE_OFFSET
    } else if phase > 1.0 {
        -CROSSFADE_OFFSET
    } else {
        0.0
    }
}

/// Crossfade styles for a list of items sharing one progress value.
pub fn crossfade_styles(
    progress: Progress,
    items: &[ElementId],
) -> BTreeMap<ElementId, StyleSnapshot> {
    let count = items.len();
    items
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let phase = item_progress(progress, index, count);
            let style = StyleSnapshot {
                opacity: crossfade_opacity(phase),
                translate_y: crossfade_offset(phase),
                ..StyleSnapshot::default()
            };
            (id.clone(), style)
        })
        .collect()
}

/// Progress that lands on item `index` when jumping directly to it.
///
/// Items are spread so the first sits at 0 and the last at 1.
pub fn progress_for_index(index: usize, count: usize) -> Progress {
    if count <= 1 {
        return Progress::ZERO;
    }
    Progress::new(index as f32 / (count - 1) as f32)
}

/// Equal-width steps, optionally followed by trailing slots that belong to no item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EvenSteps {
    count: usize,
    slots: usize,
}

impl EvenSteps {
    /// `count` items plus `trailing` empty slots, each `1 / (count + trailing)` wide.
    pub fn new(count: usize, trailing: usize) -> Self {
        Self {
            count,
            slots: (count + trailing).max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of one step in progress units.
    pub fn size(&self) -> f32 {
        1.0 / self.slots as f32
    }

    /// `[start, end)` window of item `index`.
    pub fn window(&self, index: usize) -> Option<(f32, f32)> {
        (index < self.count).then(|| {
            let start = index as f32 / self.slots as f32;
            (start, (index + 1) as f32 / self.slots as f32)
        })
    }

    /// Item whose window contains `progress`, or `None` once past the last item.
    ///
    /// Without trailing slots the last item stays current at progress 1.
    pub fn index_at(&self, progress: Progress) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = (progress.as_f32() * self.slots as f32).floor() as usize;
        if self.slots == self.count {
            return Some(index.min(self.count - 1));
        }
        (index < self.count).then_some(index)
    }
}
