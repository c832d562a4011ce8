//! Curve sampling: piecewise interpolation with per-span easing.
//!
//! Given the sorted control points of a curve and a local progress value,
//! this module finds the bracketing pair and interpolates between them using
//! the easing attached to the left point.

use crate::types::{ControlPoint, Curve, Easing};

impl Curve {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self { points }
    }

    /// Sample the curve at local progress `p`.
    ///
    /// Before the first point the first value is held, after the last point
    /// the last value is held; the curve never extrapolates.
    pub fn sample(&self, p: f32) -> f32 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };

        if p <= first.progress {
            return first.value;
        }
        if p >= last.progress {
            return last.value;
        }

        // First point strictly after p; p lies in [points[idx - 1], points[idx]).
        let idx = self.points.partition_point(|cp| cp.progress <= p);
        interpolate(&self.points[idx - 1], &self.points[idx], p)
    }

    /// Check the structural rules a curve must satisfy. Returns the reason on failure.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.points.is_empty() {
            return Err("curve has no control points".into());
        }

        for (i, cp) in self.points.iter().enumerate() {
            if !cp.progress.is_finite() || !cp.value.is_finite() {
                return Err(format!("control point {i} is not finite"));
            }
            if !(0.0..=1.0).contains(&cp.progress) {
                return Err(format!(
                    "control point {i} progress {} lies outside [0, 1]",
                    cp.progress
                ));
            }
            if let Easing::CubicBezier { x1, x2, .. } = cp.easing {
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(format!(
                        "control point {i} bezier x handles ({x1}, {x2}) must lie in [0, 1]"
                    ));
                }
            }
        }

        if let Some(pair) = self
            .points
            .windows(2)
            .position(|w| w[1].progress <= w[0].progress)
        {
            return Err(format!(
                "control point progress must be strictly increasing ({} then {})",
                self.points[pair].progress,
                self.points[pair + 1].progress
            ));
        }

        Ok(())
    }
}

/// Interpolate between two control points at progress `p`.
fn interpolate(a: &ControlPoint, b: &ControlPoint, p: f32) -> f32 {
    let span = b.progress - a.progress;
    if span <= 0.0 {
        return b.value;
    }

    let frac = (p - a.progress) / span;
    lerp(a.value, b.value, a.easing.apply(frac))
}

/// Linear interpolation.
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` to the eased fraction.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Hold => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::PowerIn(n) => t.powi(i32::from(n) + 1),
            Self::PowerOut(n) => 1.0 - (1.0 - t).powi(i32::from(n) + 1),
            Self::PowerInOut(n) => {
                let exp = i32::from(n) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
            Self::CubicBezier { x1, y1, x2, y2 } => UnitBezier::new(x1, y1, x2, y2).ease(t),
        }
    }
}

/// CSS-style timing curve from `(0, 0)` to `(1, 1)` with two inner handles,
/// kept in polynomial form `((a*t + b)*t + c)*t` per axis.
struct UnitBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl UnitBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x_at(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y_at(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn slope_x(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Curve parameter whose x equals `x`. Handles in `[0, 1]` keep x monotonic,
    /// so bisection always converges when Newton steps stall.
    fn param_for(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.x_at(t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = self.slope_x(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        let mut t = x;
        for _ in 0..24 {
            let here = self.x_at(t);
            if (here - x).abs() < 1e-6 {
                break;
            }
            if here < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }

    fn ease(&self, x: f32) -> f32 {
        self.y_at(self.param_for(x))
    }
}
