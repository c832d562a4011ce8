//! Timeline data model types: Timeline, Segment, Curve, ControlPoint, Easing.
//!
//! A timeline is an ordered list of segments sharing one progress source. Each
//! segment animates one element over a window of that progress, with one
//! piecewise curve per visual property. Curve control points are expressed in
//! the segment's local progress (0 = window start, 1 = window end).

use std::collections::{BTreeMap, BTreeSet};

use pf_common::{ElementId, Progress, VisibilityMargins, VisualProperty};
use serde::{Deserialize, Serialize};

use crate::error::{ChoreoError, ChoreoResult};

/// A validated, read-only collection of segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Build a timeline, validating every segment and curve.
    pub fn new(segments: Vec<Segment>) -> ChoreoResult<Self> {
        if segments.is_empty() {
            return Err(ChoreoError::EmptyTimeline);
        }
        for segment in &segments {
            segment.validate()?;
        }

        tracing::debug!(
            segments = segments.len(),
            elements = segments
                .iter()
                .map(|s| &s.element_id)
                .collect::<BTreeSet<_>>()
                .len(),
            "Timeline constructed"
        );

        Ok(Self { segments })
    }

    /// Parse and validate a timeline from its JSON form (an array of segments).
    pub fn from_json(json: &str) -> ChoreoResult<Self> {
        let segments: Vec<Segment> = serde_json::from_str(json)?;
        Self::new(segments).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected timeline loaded from JSON");
        })
    }

    pub fn to_json(&self) -> ChoreoResult<String> {
        Ok(serde_json::to_string(&self.segments)?)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every element animated by at least one segment, in id order.
    pub fn elements(&self) -> BTreeSet<&ElementId> {
        self.segments.iter().map(|s| &s.element_id).collect()
    }

    /// Elements that should be mounted at `progress`, given the entry/exit margins.
    pub fn visible_elements(
        &self,
        progress: Progress,
        margins: VisibilityMargins,
    ) -> BTreeSet<&ElementId> {
        self.segments
            .iter()
            .filter(|s| s.is_visible_at(progress, margins))
            .map(|s| &s.element_id)
            .collect()
    }
}

impl TryFrom<Vec<Segment>> for Timeline {
    type Error = ChoreoError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<Timeline> for Vec<Segment> {
    fn from(timeline: Timeline) -> Self {
        timeline.segments
    }
}

/// One element's animation over a progress window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Element this segment animates.
    pub element_id: ElementId,
    /// Window start in timeline progress.
    pub start: f32,
    /// Window end in timeline progress.
    pub end: f32,
    /// One curve per animated property, in local window progress.
    #[serde(default)]
    pub curves: BTreeMap<VisualProperty, Curve>,
}

impl Segment {
    /// Create a segment with no curves. Validation happens when it joins a timeline.
    pub fn new(element_id: impl Into<ElementId>, start: f32, end: f32) -> Self {
        Self {
            element_id: element_id.into(),
            start,
            end,
            curves: BTreeMap::new(),
        }
    }

    /// Attach a curve for `property`, replacing any previous one.
    pub fn with_curve(mut self, property: VisualProperty, points: Vec<ControlPoint>) -> Self {
        self.curves.insert(property, Curve::new(points));
        self
    }

    /// Attach a linear two-point curve running `from` → `to` across the whole window.
    pub fn with_tween(self, property: VisualProperty, from: f32, to: f32) -> Self {
        self.with_curve(
            property,
            vec![ControlPoint::new(0.0, from), ControlPoint::new(1.0, to)],
        )
    }

    /// Build a segment from control points given in absolute timeline progress.
    ///
    /// The window spans from the earliest to the latest control point across
    /// all curves; each curve is re-expressed in local window progress.
    pub fn from_absolute(
        element_id: impl Into<ElementId>,
        curves: impl IntoIterator<Item = (VisualProperty, Vec<ControlPoint>)>,
    ) -> ChoreoResult<Self> {
        let element_id = element_id.into();
        let curves: Vec<(VisualProperty, Vec<ControlPoint>)> = curves.into_iter().collect();

        let mut start = f32::INFINITY;
        let mut end = f32::NEG_INFINITY;
        for (property, points) in &curves {
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return Err(ChoreoError::InvalidCurve {
                    element_id,
                    property: *property,
                    reason: "curve has no control points".into(),
                });
            };
            start = start.min(first.progress);
            end = end.max(last.progress);
        }

        let mut segment = Self::new(element_id, start, end);
        if !segment.has_valid_window() {
            return Err(segment.invalid_window());
        }

        let span = end - start;
        for (property, points) in curves {
            let local = points
                .into_iter()
                .map(|cp| ControlPoint {
                    progress: ((cp.progress - start) / span).clamp(0.0, 1.0),
                    ..cp
                })
                .collect();
            segment.curves.insert(property, Curve::new(local));
        }

        segment.validate()?;
        Ok(segment)
    }

    pub fn duration(&self) -> f32 {
        self.end - self.start
    }

    /// Whether the window contains `progress` (both ends inclusive).
    pub fn contains(&self, progress: Progress) -> bool {
        let p = progress.as_f32();
        p >= self.start && p <= self.end
    }

    /// Distance from `progress` to the window; zero inside it.
    pub fn distance_to(&self, progress: Progress) -> f32 {
        let p = progress.as_f32();
        if p < self.start {
            self.start - p
        } else if p > self.end {
            p - self.end
        } else {
            0.0
        }
    }

    /// Map timeline progress into this window, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: Progress) -> f32 {
        ((progress.as_f32() - self.start) / self.duration()).clamp(0.0, 1.0)
    }

    /// Value of `property` at `progress`, or `None` if this segment does not animate it.
    pub fn sample(&self, property: VisualProperty, progress: Progress) -> Option<f32> {
        self.curves
            .get(&property)
            .map(|curve| curve.sample(self.local_progress(progress)))
    }

    /// Whether the element should be mounted at `progress`.
    pub fn is_visible_at(&self, progress: Progress, margins: VisibilityMargins) -> bool {
        let p = progress.as_f32();
        p >= self.start - margins.entry && p <= self.end + margins.exit
    }

    fn has_valid_window(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.end <= 1.0
            && self.start < self.end
    }

    fn invalid_window(&self) -> ChoreoError {
        ChoreoError::InvalidSegment {
            element_id: self.element_id.clone(),
            start: self.start,
            end: self.end,
        }
    }

    pub(crate) fn validate(&self) -> ChoreoResult<()> {
        if !self.has_valid_window() {
            return Err(self.invalid_window());
        }
        for (property, curve) in &self.curves {
            curve
                .validate()
                .map_err(|reason| ChoreoError::InvalidCurve {
                    element_id: self.element_id.clone(),
                    property: *property,
                    reason,
                })?;
        }
        Ok(())
    }
}

/// Piecewise curve over local window progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    /// Control points sorted by strictly increasing progress.
    pub points: Vec<ControlPoint>,
}

/// A single control point with a progress, value, and easing to the next point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Local progress within the segment window.
    pub progress: f32,
    /// Value at this point.
    pub value: f32,
    /// How to travel from this point to the next.
    #[serde(default, skip_serializing_if = "Easing::is_linear")]
    pub easing: Easing,
}

impl ControlPoint {
    pub fn new(progress: f32, value: f32) -> Self {
        Self {
            progress,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn eased(progress: f32, value: f32, easing: Easing) -> Self {
        Self {
            progress,
            value,
            easing,
        }
    }
}

/// Shapes the fraction travelled between two control points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Straight-line interpolation.
    #[default]
    Linear,
    /// Keep this point's value until the next point (step function).
    Hold,
    /// Quadratic ease in and out.
    EaseInOutQuad,
    /// Smooth Hermite step, `t² (3 - 2t)`.
    Smoothstep,
    /// Accelerating polynomial; `n` selects exponent `n + 1`.
    PowerIn(u8),
    /// Decelerating polynomial; `n` selects exponent `n + 1`.
    PowerOut(u8),
    /// Accelerate then decelerate; `n` selects exponent `n + 1`.
    PowerInOut(u8),
    /// Overshoots the target and settles back.
    BackOut { overshoot: f32 },
    /// CSS-style cubic bezier with endpoints fixed at (0,0) and (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(element: &str, start: f32, end: f32) -> Segment {
        Segment::new(element, start, end).with_tween(VisualProperty::Opacity, 0.0, 1.0)
    }

    #[test]
    fn empty_timeline_rejected() {
        assert!(matches!(
            Timeline::new(vec![]),
            Err(ChoreoError::EmptyTimeline)
        ));
    }

    #[test]
    fn start_not_before_end_rejected() {
        let err = Timeline::new(vec![fade("a", 0.4, 0.4)]).unwrap_err();
        assert!(matches!(err, ChoreoError::InvalidSegment { .. }));

        let err = Timeline::new(vec![fade("a", 0.6, 0.2)]).unwrap_err();
        assert!(matches!(err, ChoreoError::InvalidSegment { .. }));
    }

    #[test]
    fn window_outside_unit_range_rejected() {
        let err = Timeline::new(vec![fade("a", -0.1, 0.5)]).unwrap_err();
        assert!(matches!(err, ChoreoError::InvalidSegment { .. }));

        let err = Timeline::new(vec![fade("a", 0.5, f32::NAN)]).unwrap_err();
        assert!(matches!(err, ChoreoError::InvalidSegment { .. }));
    }

    #[test]
    fn non_increasing_curve_rejected() {
        let segment = Segment::new("a", 0.0, 1.0).with_curve(
            VisualProperty::Scale,
            vec![
                ControlPoint::new(0.0, 1.0),
                ControlPoint::new(0.5, 2.0),
                ControlPoint::new(0.5, 3.0),
            ],
        );
        let err = Timeline::new(vec![segment]).unwrap_err();
        match err {
            ChoreoError::InvalidCurve {
                element_id,
                property,
                ..
            } => {
                assert_eq!(element_id, ElementId::new("a"));
                assert_eq!(property, VisualProperty::Scale);
            }
            other => panic!("expected InvalidCurve, got {other:?}"),
        }
    }

    #[test]
    fn empty_curve_rejected() {
        let segment = Segment::new("a", 0.0, 1.0).with_curve(VisualProperty::Opacity, vec![]);
        assert!(matches!(
            Timeline::new(vec![segment]),
            Err(ChoreoError::InvalidCurve { .. })
        ));
    }

    #[test]
    fn from_absolute_normalizes_points() {
        let segment = Segment::from_absolute(
            "title",
            [(
                VisualProperty::Opacity,
                vec![
                    ControlPoint::new(0.2, 0.0),
                    ControlPoint::new(0.3, 1.0),
                    ControlPoint::new(0.6, 0.0),
                ],
            )],
        )
        .unwrap();

        assert!((segment.start - 0.2).abs() < 1e-6);
        assert!((segment.end - 0.6).abs() < 1e-6);
        let points = &segment.curves[&VisualProperty::Opacity].points;
        assert!((points[0].progress - 0.0).abs() < 1e-6);
        assert!((points[1].progress - 0.25).abs() < 1e-6);
        assert!((points[2].progress - 1.0).abs() < 1e-6);
    }

    #[test]
    fn from_absolute_window_spans_all_curves() {
        let segment = Segment::from_absolute(
            "card",
            [
                (
                    VisualProperty::RotateX,
                    vec![ControlPoint::new(0.1, 90.0), ControlPoint::new(0.5, -90.0)],
                ),
                (
                    VisualProperty::Opacity,
                    vec![ControlPoint::new(0.2, 0.0), ControlPoint::new(0.4, 1.0)],
                ),
            ],
        )
        .unwrap();
        assert!((segment.start - 0.1).abs() < 1e-6);
        assert!((segment.end - 0.5).abs() < 1e-6);
    }

    #[test]
    fn from_absolute_single_point_rejected() {
        let err = Segment::from_absolute(
            "a",
            [(VisualProperty::Opacity, vec![ControlPoint::new(0.3, 1.0)])],
        )
        .unwrap_err();
        assert!(matches!(err, ChoreoError::InvalidSegment { .. }));
    }

    #[test]
    fn local_progress_clamps() {
        let segment = fade("a", 0.2, 0.4);
        assert_eq!(segment.local_progress(Progress::new(0.1)), 0.0);
        assert!((segment.local_progress(Progress::new(0.3)) - 0.5).abs() < 1e-6);
        assert_eq!(segment.local_progress(Progress::new(0.9)), 1.0);
    }

    #[test]
    fn distance_to_window() {
        let segment = fade("a", 0.2, 0.4);
        assert!((segment.distance_to(Progress::new(0.1)) - 0.1).abs() < 1e-6);
        assert_eq!(segment.distance_to(Progress::new(0.3)), 0.0);
        assert!((segment.distance_to(Progress::new(0.7)) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn elements_deduplicated() {
        let tl = Timeline::new(vec![fade("b", 0.0, 0.5), fade("a", 0.2, 0.6), fade("b", 0.5, 1.0)])
            .unwrap();
        let ids: Vec<&str> = tl.elements().into_iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn json_roundtrip_preserves_segments() {
        let tl = Timeline::new(vec![Segment::new("hero", 0.0, 0.8)
            .with_tween(VisualProperty::Opacity, 1.0, 0.0)
            .with_curve(
                VisualProperty::Rotate,
                vec![
                    ControlPoint::eased(0.0, -180.0, Easing::BackOut { overshoot: 1.7 }),
                    ControlPoint::new(1.0, 0.0),
                ],
            )])
        .unwrap();

        let json = tl.to_json().unwrap();
        let restored = Timeline::from_json(&json).unwrap();
        assert_eq!(restored, tl);
    }

    #[test]
    fn json_with_invalid_window_rejected() {
        let json = r#"[{ "element_id": "a", "start": 0.5, "end": 0.5, "curves": {} }]"#;
        assert!(matches!(
            Timeline::from_json(json),
            Err(ChoreoError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn json_control_point_easing_defaults_to_linear() {
        let json = r#"[{
            "element_id": "a",
            "start": 0.0,
            "end": 1.0,
            "curves": {
                "opacity": [
                    { "progress": 0.0, "value": 0.0 },
                    { "progress": 1.0, "value": 1.0 }
                ]
            }
        }]"#;
        let tl = Timeline::from_json(json).unwrap();
        let curve = &tl.segments()[0].curves[&VisualProperty::Opacity];
        assert_eq!(curve.points[0].easing, Easing::Linear);
    }
}
