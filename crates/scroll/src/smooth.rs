//! Smooth scroll tween for programmatic jumps (navigation links, step dots).

use pf_choreo::Easing;
use pf_common::SmoothScrollConfig;

/// Scroll offset animated from `from` to `to` with ease-in-out-quad.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothScroll {
    pub from: f32,
    pub to: f32,
    start_ms: u64,
    duration_ms: u64,
}

impl SmoothScroll {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    /// Tween with the configured duration.
    pub fn with_config(from: f32, to: f32, start_ms: u64, config: &SmoothScrollConfig) -> Self {
        Self::new(from, to, start_ms, config.duration_ms)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Scroll offset at `now_ms`. Holds `from` before the start and `to` after the end.
    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * Easing::EaseInOutQuad.apply(t)
    }

    /// Redirect an in-flight tween: restart from the current position toward `to`.
    pub fn retarget(&mut self, now_ms: u64, to: f32) {
        let from = self.sample(now_ms);
        tracing::debug!(from, to, "Smooth scroll retargeted");
        *self = Self::new(from, to, now_ms, self.duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        let tween = SmoothScroll::new(0.0, 1000.0, 100, 2000);
        assert_eq!(tween.sample(0), 0.0);
        assert_eq!(tween.sample(100), 0.0);
        assert!((tween.sample(1100) - 500.0).abs() < 1e-3);
        assert_eq!(tween.sample(2100), 1000.0);
        assert_eq!(tween.sample(9999), 1000.0);
    }

    #[test]
    fn eases_in_and_out() {
        let tween = SmoothScroll::new(0.0, 1000.0, 0, 1000);
        // Quarter time covers 2 * 0.25^2 = 12.5% of the distance.
        assert!((tween.sample(250) - 125.0).abs() < 1e-2);
        assert!((tween.sample(750) - 875.0).abs() < 1e-2);
    }

    #[test]
    fn done_after_duration() {
        let tween = SmoothScroll::new(0.0, 10.0, 50, 100);
        assert!(!tween.is_done(149));
        assert!(tween.is_done(150));
    }

    #[test]
    fn retarget_continues_from_current_position() {
        let mut tween = SmoothScroll::new(0.0, 1000.0, 0, 1000);
        let here = tween.sample(500);
        tween.retarget(500, 0.0);
        assert_eq!(tween.sample(500), here);
        assert!(!tween.is_done(1000));
        assert_eq!(tween.sample(1500), 0.0);
    }

    #[test]
    fn configured_duration() {
        let tween = SmoothScroll::with_config(0.0, 1.0, 0, &SmoothScrollConfig::default());
        assert_eq!(tween.duration_ms(), 2000);
    }

    #[test]
    fn zero_duration_jumps() {
        let tween = SmoothScroll::new(0.0, 300.0, 0, 0);
        assert_eq!(tween.sample(1), 300.0);
        assert!(tween.is_done(1));
    }
}
