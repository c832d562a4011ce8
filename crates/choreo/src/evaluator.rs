//! Core timeline evaluation: `evaluate()` takes a timeline and a progress value
//! and produces the style of every element for the render target.
//!
//! The evaluation process:
//! 1. For each segment, compare the progress against its window.
//! 2. For each animated property, keep the best candidate value: a segment
//!    whose window contains the progress beats one that does not; among
//!    containing segments the later one wins; otherwise the nearest window
//!    supplies its boundary value (ties go to the later segment).
//! 3. Start every element from the rest style and overwrite the resolved
//!    properties.

use std::collections::BTreeMap;

use pf_common::{ElementId, Progress, StyleSnapshot, VisibilityMargins, VisualProperty};

use crate::types::{Segment, Timeline};

/// Styles for every element of a timeline, keyed by element id.
pub type StyleMap = BTreeMap<ElementId, StyleSnapshot>;

/// Evaluate the timeline at the given progress.
///
/// This is a pure function: the same timeline and progress always produce the
/// same map. Every element referenced by the timeline appears in the result,
/// including elements whose segments animate no property.
pub fn evaluate(timeline: &Timeline, progress: Progress) -> StyleMap {
    let mut resolved: BTreeMap<&ElementId, Slots> = BTreeMap::new();

    for segment in timeline.segments() {
        offer(resolved.entry(&segment.element_id).or_default(), segment, progress);
    }

    tracing::trace!(progress = %progress, elements = resolved.len(), "Timeline evaluated");

    resolved
        .into_iter()
        .map(|(id, slots)| (id.clone(), finish(slots)))
        .collect()
}

/// Evaluate a single element, or `None` if the timeline never animates it.
///
/// Segments of other elements never influence this one, so the result equals
/// the element's entry in [`evaluate`].
pub fn evaluate_element(
    timeline: &Timeline,
    element_id: &ElementId,
    progress: Progress,
) -> Option<StyleSnapshot> {
    let mut slots: Option<Slots> = None;
    for segment in timeline
        .segments()
        .iter()
        .filter(|s| &s.element_id == element_id)
    {
        offer(slots.get_or_insert_with(Slots::new), segment, progress);
    }
    slots.map(finish)
}

type Slots = BTreeMap<VisualProperty, Candidate>;

/// Let `segment` compete for each property it animates.
fn offer(slots: &mut Slots, segment: &Segment, progress: Progress) {
    let base = Candidate::for_segment(segment, progress);
    for property in segment.curves.keys() {
        let Some(value) = segment.sample(*property, progress) else {
            continue;
        };
        let candidate = Candidate { value, ..base };
        slots
            .entry(*property)
            .and_modify(|best| {
                if candidate.supersedes(best) {
                    *best = candidate;
                }
            })
            .or_insert(candidate);
    }
}

/// Rest style overwritten by the winning candidate of each property.
fn finish(slots: Slots) -> StyleSnapshot {
    let mut style = StyleSnapshot::default();
    for (property, candidate) in slots {
        style.set(property, candidate.value);
    }
    style
}

/// Whether the element of `segment` should be mounted at `progress`.
///
/// True iff `progress` lies in `[start - margins.entry, end + margins.exit]`,
/// which lets a renderer pre-mount an element slightly before it enters.
pub fn compute_visibility(
    progress: Progress,
    segment: &Segment,
    margins: VisibilityMargins,
) -> bool {
    segment.is_visible_at(progress, margins)
}

/// One segment's claim on a property at the current progress.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    inside: bool,
    distance: f32,
    value: f32,
}

impl Candidate {
    fn for_segment(segment: &Segment, progress: Progress) -> Self {
        Self {
            inside: segment.contains(progress),
            distance: segment.distance_to(progress),
            value: 0.0,
        }
    }

    /// Whether this candidate (from a later segment) replaces `current`.
    fn supersedes(&self, current: &Self) -> bool {
        match (self.inside, current.inside) {
            (true, _) => true,
            (false, true) => false,
            (false, false) => self.distance <= current.distance,
        }
    }
}
