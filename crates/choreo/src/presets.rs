//! Segment builders for the recurring scroll choreographies.
//!
//! Each builder returns plain [`Segment`]s so presets can be mixed with
//! hand-written segments in one [`Timeline`]. Timing constants come from
//! [`PresetTiming`] rather than being baked in.

use pf_common::{ElementId, PresetTiming, VisualProperty};

use crate::error::ChoreoResult;
use crate::stepper::EvenSteps;
use crate::types::{ControlPoint, Easing, Segment, Timeline};

/// Edge angle of a flipping card, in degrees.
pub const CARD_EDGE_ANGLE: f32 = 90.0;

/// Fade in while rising `travel` pixels into place.
pub fn fade_up(element: impl Into<ElementId>, start: f32, end: f32, travel: f32) -> Segment {
    Segment::new(element, start, end)
        .with_curve(
            VisualProperty::Opacity,
            vec![
                ControlPoint::eased(0.0, 0.0, Easing::PowerOut(1)),
                ControlPoint::new(1.0, 1.0),
            ],
        )
        .with_curve(
            VisualProperty::TranslateY,
            vec![
                ControlPoint::eased(0.0, travel, Easing::PowerOut(1)),
                ControlPoint::new(1.0, 0.0),
            ],
        )
}

/// Fade in while sliding horizontally from `from_x` to rest.
pub fn slide_in(element: impl Into<ElementId>, start: f32, end: f32, from_x: f32) -> Segment {
    Segment::new(element, start, end)
        .with_tween(VisualProperty::Opacity, 0.0, 1.0)
        .with_tween(VisualProperty::TranslateX, from_x, 0.0)
}

/// Fill a reveal mask from empty to full.
pub fn text_reveal(element: impl Into<ElementId>, start: f32, end: f32) -> Segment {
    Segment::new(element, start, end).with_curve(
        VisualProperty::Reveal,
        vec![
            ControlPoint::eased(0.0, 0.0, Easing::PowerInOut(2)),
            ControlPoint::new(1.0, 1.0),
        ],
    )
}

/// Linear drift and zoom across the whole window (scrubbed, no easing).
pub fn parallax(
    element: impl Into<ElementId>,
    start: f32,
    end: f32,
    translate_y: [f32; 2],
    scale: [f32; 2],
) -> Segment {
    Segment::new(element, start, end)
        .with_tween(VisualProperty::TranslateY, translate_y[0], translate_y[1])
        .with_tween(VisualProperty::Scale, scale[0], scale[1])
}

/// Text block of one step: fade and rise in at `enter`, hold, then fade and
/// rise out at the step end.
///
/// `enter` and the step bounds are absolute timeline progress. The fade-in
/// span is shortened on narrow steps so it never reaches the fade-out.
pub fn step_text(
    element: impl Into<ElementId>,
    enter: f32,
    step_end: f32,
    step_size: f32,
    timing: &PresetTiming,
) -> ChoreoResult<Segment> {
    let fade_out_start = step_end - step_size * timing.fade_out;
    let shown = enter + timing.fade_span.min((fade_out_start - enter) * 0.5);
    let stops = [enter, shown, fade_out_start, step_end];

    Segment::from_absolute(
        element,
        [
            (VisualProperty::Opacity, points(&stops, &[0.0, 1.0, 1.0, 0.0])),
            (
                VisualProperty::TranslateY,
                points(&stops, &[timing.travel, 0.0, 0.0, -timing.travel]),
            ),
        ],
    )
}

/// Ids of the text blocks of one step, revealed in this order.
#[derive(Clone, Debug)]
pub struct StepBlocks {
    pub title: ElementId,
    pub description: ElementId,
    pub tech: ElementId,
    pub links: ElementId,
}

impl StepBlocks {
    /// Conventional ids for step `index`: `{prefix}-{index}-title` and so on.
    pub fn numbered(prefix: &str, index: usize) -> Self {
        Self {
            title: ElementId::new(format!("{prefix}-{index}-title")),
            description: ElementId::new(format!("{prefix}-{index}-description")),
            tech: ElementId::new(format!("{prefix}-{index}-tech")),
            links: ElementId::new(format!("{prefix}-{index}-links")),
        }
    }
}

/// Stagger the text blocks of one step: each block enters a little after the previous one.
pub fn staggered_reveal(
    blocks: &StepBlocks,
    step_start: f32,
    step_size: f32,
    timing: &PresetTiming,
) -> ChoreoResult<Vec<Segment>> {
    let step_end = step_start + step_size;
    let offsets = [
        (&blocks.title, 0.0),
        (&blocks.description, timing.description_offset),
        (&blocks.tech, timing.tech_offset),
        (&blocks.links, timing.links_offset),
    ];

    offsets
        .into_iter()
        .map(|(id, offset)| {
            step_text(
                id.clone(),
                step_start + step_size * offset,
                step_end,
                step_size,
                timing,
            )
        })
        .collect()
}

/// Card that flips up into view at the step start, holds, and flips away at the step end.
///
/// Rotation runs edge-on → upright → upright → opposite edge; opacity pops in
/// and out within `card_preroll` of the step bounds so the edge-on card is hidden.
/// On narrow steps the pre-roll shrinks to a quarter of the step.
pub fn card_flip(
    element: impl Into<ElementId>,
    step_start: f32,
    step_end: f32,
    timing: &PresetTiming,
) -> ChoreoResult<Segment> {
    let size = step_end - step_start;
    let straight = step_start + size * timing.card_straight;
    let hold = step_start + size * timing.card_hold;
    let preroll = timing.card_preroll.min(size * 0.25);

    let mut rotation = Vec::with_capacity(6);
    let pre = (step_start - preroll).max(0.0);
    if pre < step_start {
        rotation.push(ControlPoint::new(pre, CARD_EDGE_ANGLE));
    }
    rotation.extend([
        ControlPoint::new(step_start, CARD_EDGE_ANGLE),
        ControlPoint::new(straight, 0.0),
        ControlPoint::new(hold, 0.0),
        ControlPoint::new(step_end, -CARD_EDGE_ANGLE),
    ]);
    let post = (step_end + preroll).min(1.0);
    if post > step_end {
        rotation.push(ControlPoint::new(post, -CARD_EDGE_ANGLE));
    }

    let opacity = points(
        &[
            step_start,
            step_start + preroll,
            step_end - preroll,
            step_end,
        ],
        &[0.0, 1.0, 1.0, 0.0],
    );

    Segment::from_absolute(
        element,
        [
            (VisualProperty::RotateX, rotation),
            (VisualProperty::Opacity, opacity),
        ],
    )
}

/// Full projects section: `count` steps of staggered text plus a flipping card,
/// followed by one trailing slot for the section that comes after.
///
/// The trailing slot stays empty; [`showcase_outro`] builds the segment that
/// fills it.
pub fn project_showcase(count: usize, timing: &PresetTiming) -> ChoreoResult<Timeline> {
    let steps = EvenSteps::new(count, 1);
    let mut segments = Vec::with_capacity(count * 5);

    for index in 0..count {
        let Some((start, end)) = steps.window(index) else {
            continue;
        };
        let blocks = StepBlocks::numbered("project", index);
        segments.extend(staggered_reveal(&blocks, start, steps.size(), timing)?);
        segments.push(card_flip(
            format!("project-{index}-card"),
            start,
            end,
            timing,
        )?);
    }

    Timeline::new(segments)
}

/// Section following a `count`-project showcase: fades up from the middle of
/// the last project's step through the trailing slot.
pub fn showcase_outro(
    element: impl Into<ElementId>,
    count: usize,
    timing: &PresetTiming,
) -> Segment {
    let steps = EvenSteps::new(count, 1);
    let start = ((count as f32 - 0.5) * steps.size()).max(0.0);
    fade_up(element, start, 1.0, timing.travel)
}

fn points(stops: &[f32], values: &[f32]) -> Vec<ControlPoint> {
    stops
        .iter()
        .zip(values)
        .map(|(&p, &v)| ControlPoint::new(p, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChoreoError;
    use crate::evaluator::evaluate;
    use pf_common::Progress;

    fn style_at(tl: &Timeline, id: &str, p: f32) -> pf_common::StyleSnapshot {
        evaluate(tl, Progress::new(p))[&ElementId::new(id)]
    }

    #[test]
    fn fade_up_starts_low_and_transparent() {
        let tl = Timeline::new(vec![fade_up("intro", 0.0, 0.5, 60.0)]).unwrap();
        let start = style_at(&tl, "intro", 0.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.translate_y, 60.0);

        let done = style_at(&tl, "intro", 0.6);
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.translate_y, 0.0);
    }

    #[test]
    fn slide_in_midway() {
        let tl = Timeline::new(vec![slide_in("item", 0.2, 0.4, -50.0)]).unwrap();
        let mid = style_at(&tl, "item", 0.3);
        assert!((mid.translate_x - -25.0).abs() < 1e-4);
        assert!((mid.opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn text_reveal_fills_mask() {
        let tl = Timeline::new(vec![text_reveal("headline", 0.1, 0.3)]).unwrap();
        assert_eq!(style_at(&tl, "headline", 0.0).reveal, 0.0);
        assert!((style_at(&tl, "headline", 0.2).reveal - 0.5).abs() < 1e-4);
        assert_eq!(style_at(&tl, "headline", 0.5).reveal, 1.0);
    }

    #[test]
    fn parallax_is_linear() {
        let tl =
            Timeline::new(vec![parallax("bg", 0.0, 1.0, [-100.0, 100.0], [1.5, 1.0])]).unwrap();
        let mid = style_at(&tl, "bg", 0.5);
        assert!(mid.translate_y.abs() < 1e-4);
        assert!((mid.scale - 1.25).abs() < 1e-4);
    }

    #[test]
    fn card_flip_phases() {
        let timing = PresetTiming::default();
        let tl = Timeline::new(vec![card_flip("card", 0.2, 0.4, &timing).unwrap()]).unwrap();

        // Before the pre-roll: edge-on and hidden.
        let early = style_at(&tl, "card", 0.1);
        assert_eq!(early.rotate_x, CARD_EDGE_ANGLE);
        assert_eq!(early.opacity, 0.0);

        // Upright and visible between straight and hold.
        let held = style_at(&tl, "card", 0.3);
        assert!(held.rotate_x.abs() < 1e-4);
        assert!((held.opacity - 1.0).abs() < 1e-4);

        // Past the step: flipped away and hidden.
        let late = style_at(&tl, "card", 0.5);
        assert_eq!(late.rotate_x, -CARD_EDGE_ANGLE);
        assert_eq!(late.opacity, 0.0);
    }

    #[test]
    fn card_flip_at_timeline_start_drops_preroll() {
        let timing = PresetTiming::default();
        let segment = card_flip("card", 0.0, 0.25, &timing).unwrap();
        assert_eq!(segment.start, 0.0);
        assert_eq!(segment.curves[&VisualProperty::RotateX].points.len(), 5);
    }

    #[test]
    fn staggered_blocks_enter_in_order() {
        let timing = PresetTiming::default();
        let blocks = StepBlocks::numbered("project", 0);
        let segments = staggered_reveal(&blocks, 0.0, 0.25, &timing).unwrap();
        let starts: Vec<f32> = segments.iter().map(|s| s.start).collect();
        assert!(starts.windows(2).all(|w| w[0] < w[1]));

        let tl = Timeline::new(segments).unwrap();
        // Just after the title's fade-in, the links have not appeared yet.
        let p = 0.25 * 0.1;
        assert!((style_at(&tl, "project-0-title", p).opacity - 1.0).abs() < 1e-4);
        assert_eq!(style_at(&tl, "project-0-links", p).opacity, 0.0);
    }

    #[test]
    fn narrow_step_shortens_fade_in() {
        // Fade-in span (0.02) is wider than the room before the fade-out.
        let timing = PresetTiming::default();
        let segment = step_text("title", 0.0, 0.02, 0.02, &timing).unwrap();
        let opacity = &segment.curves[&VisualProperty::Opacity].points;
        assert!(opacity.windows(2).all(|w| w[0].progress < w[1].progress));

        let tl = Timeline::new(vec![segment]).unwrap();
        assert!((style_at(&tl, "title", 0.01).opacity - 1.0).abs() < 1e-4);
    }

    #[test]
    fn validated_timings_always_build_showcase() {
        let mut tight = PresetTiming::default();
        tight.fade_span = 0.5;
        tight.card_preroll = 0.4;
        tight.links_offset = 0.79;
        let timings = [PresetTiming::default(), tight];

        for timing in &timings {
            let config = pf_common::ChoreoConfig {
                timing: *timing,
                ..pf_common::ChoreoConfig::default()
            };
            config.validate().unwrap();
            for count in 1..=25 {
                let tl = project_showcase(count, timing);
                assert!(tl.is_ok(), "count = {count}: {tl:?}");
            }
        }
    }

    #[test]
    fn outro_fills_trailing_slot() {
        let timing = PresetTiming::default();
        let mut segments: Vec<Segment> = project_showcase(3, &timing)
            .unwrap()
            .segments()
            .to_vec();
        segments.push(showcase_outro("about", 3, &timing));
        let tl = Timeline::new(segments).unwrap();

        // Fade begins halfway through the last project's step (2.5 / 4).
        assert_eq!(style_at(&tl, "about", 0.6).opacity, 0.0);
        assert!(style_at(&tl, "about", 0.8).opacity > 0.0);
        assert_eq!(style_at(&tl, "about", 1.0).opacity, 1.0);
    }

    #[test]
    fn showcase_hands_over_between_projects() {
        let timing = PresetTiming::default();
        let tl = project_showcase(3, &timing).unwrap();
        assert_eq!(tl.len(), 3 * 5);

        // Middle of step 1 (of 4 slots): project 1 shown, projects 0 and 2 hidden.
        let p = 1.5 / 4.0;
        assert!((style_at(&tl, "project-1-card", p).opacity - 1.0).abs() < 1e-4);
        assert_eq!(style_at(&tl, "project-0-card", p).opacity, 0.0);
        assert_eq!(style_at(&tl, "project-2-card", p).opacity, 0.0);
        assert!((style_at(&tl, "project-1-title", p).opacity - 1.0).abs() < 1e-4);
        assert_eq!(style_at(&tl, "project-0-title", p).opacity, 0.0);
    }

    #[test]
    fn empty_showcase_is_rejected() {
        assert!(matches!(
            project_showcase(0, &PresetTiming::default()),
            Err(ChoreoError::EmptyTimeline)
        ));
    }
}
