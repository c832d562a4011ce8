//! Arc carousel: cards travel right-to-left along a shallow arc as progress advances.
//!
//! Unlike segment timelines this layout is computed directly from the
//! fractional focus position, because every card's pose depends on its
//! distance to the focus rather than on a fixed window.

use pf_common::{CarouselConfig, Progress, StyleSnapshot};

/// Measured geometry of an arc carousel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarouselLayout {
    /// Number of cards.
    pub count: usize,
    /// Distance between neighbouring card centres in pixels.
    pub step_x: f32,
    /// Horizontal distance from the centre at which a card is fully off-screen.
    pub off_x: f32,
    /// Focus travel (in cards) before the first card arrives.
    pub lead: f32,
    /// Focus travel (in cards) after the last card leaves.
    pub tail: f32,
    arc_reach: f32,
    arc_lift: f32,
    arc_exponent: f32,
}

impl CarouselLayout {
    /// Derive the layout from the viewport and the measured card width.
    ///
    /// `card_width` is `None` before the first card has been laid out; the
    /// configured fallback is used then.
    pub fn measure(
        count: usize,
        card_width: Option<f32>,
        viewport_width: f32,
        config: &CarouselConfig,
    ) -> Self {
        let card_w = card_width
            .filter(|w| *w > 0.0)
            .unwrap_or(config.fallback_card_width);
        // Bounds may arrive inverted from an unvalidated config.
        let gap_lo = config.gap_min.min(config.gap_max);
        let gap_hi = config.gap_min.max(config.gap_max);
        let gap = (viewport_width * config.gap_ratio)
            .floor()
            .max(gap_lo)
            .min(gap_hi);
        let step_x = (card_w + gap).round().max(1.0);
        let off_x = (viewport_width / 2.0 + card_w / 2.0 + config.offscreen_margin).ceil();
        let lead = off_x / step_x;

        tracing::debug!(count, step_x, off_x, lead, "Carousel measured");

        Self {
            count,
            step_x,
            off_x,
            lead,
            tail: lead,
            arc_reach: config.arc_reach,
            arc_lift: config.arc_lift,
            arc_exponent: config.arc_exponent,
        }
    }

    fn start_raw(&self) -> f32 {
        -1.0 - self.lead
    }

    /// Total focus travel from "nothing visible" to "last card gone".
    pub fn span(&self) -> f32 {
        self.count as f32 + self.lead + self.tail
    }

    /// Scroll distance in pixels the section stays pinned for.
    pub fn total_scroll_px(&self) -> f32 {
        (self.span() * self.step_x).round()
    }

    /// Fractional focus position: card `i` is centred when this equals `i`.
    pub fn focus(&self, progress: Progress) -> f32 {
        self.start_raw() + progress.as_f32() * self.span()
    }

    /// Card in focus, or `None` while the first card is still arriving.
    pub fn current(&self, progress: Progress) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let raw = self.focus(progress);
        if raw < 0.0 {
            return None;
        }
        Some((raw.floor() as usize).min(self.count - 1))
    }

    /// Pose of card `index` at `progress`, with translations rounded to whole pixels.
    pub fn card_style(&self, index: usize, progress: Progress) -> StyleSnapshot {
        let offset = index as f32 - self.focus(progress);
        let distance = offset.abs();

        let (x, y) = if distance <= self.arc_reach {
            (
                offset * self.step_x,
                distance.powf(self.arc_exponent) * self.arc_lift,
            )
        } else if offset < 0.0 {
            (-self.off_x, 0.0)
        } else {
            (self.off_x, 0.0)
        };

        let (x, y) = (x.round(), y.round());

        // Cards snap between fully shown and hidden; fractional opacity blurs text.
        let opacity = if x.abs() < self.off_x { 1.0 } else { 0.0 };

        StyleSnapshot {
            opacity,
            translate_x: x,
            translate_y: y,
            ..StyleSnapshot::default()
        }
    }

    /// Poses of every card, in index order.
    pub fn styles(&self, progress: Progress) -> Vec<StyleSnapshot> {
        (0..self.count)
            .map(|index| self.card_style(index, progress))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize) -> CarouselLayout {
        // 1200px viewport: gap = 144, step = 544, off_x = 600 + 200 + 64 = 864.
        CarouselLayout::measure(count, Some(400.0), 1200.0, &CarouselConfig::default())
    }

    #[test]
    fn measure_derives_geometry() {
        let l = layout(4);
        assert_eq!(l.step_x, 544.0);
        assert_eq!(l.off_x, 864.0);
        assert!((l.lead - 864.0 / 544.0).abs() < 1e-6);
        assert_eq!(l.lead, l.tail);
    }

    #[test]
    fn gap_is_clamped() {
        let config = CarouselConfig::default();
        let narrow = CarouselLayout::measure(1, Some(400.0), 500.0, &config);
        assert_eq!(narrow.step_x, 540.0);
        let wide = CarouselLayout::measure(1, Some(400.0), 4000.0, &config);
        assert_eq!(wide.step_x, 620.0);
    }

    #[test]
    fn missing_width_uses_fallback() {
        let config = CarouselConfig::default();
        assert_eq!(
            CarouselLayout::measure(3, None, 1200.0, &config),
            CarouselLayout::measure(3, Some(400.0), 1200.0, &config)
        );
    }

    #[test]
    fn nothing_visible_at_either_end() {
        let l = layout(4);
        for style in l.styles(Progress::ZERO) {
            assert_eq!(style.opacity, 0.0);
            assert_eq!(style.translate_x, l.off_x);
        }
        for style in l.styles(Progress::ONE) {
            assert_eq!(style.opacity, 0.0);
            assert_eq!(style.translate_x, -l.off_x);
        }
    }

    #[test]
    fn focused_card_sits_centred_on_the_baseline() {
        let l = layout(4);
        // Progress at which card 2 is exactly in focus.
        let p = Progress::new((2.0 - (-1.0 - l.lead)) / l.span());
        let style = l.card_style(2, p);
        assert_eq!(style.translate_x, 0.0);
        assert_eq!(style.translate_y, 0.0);
        assert_eq!(style.opacity, 1.0);

        let neighbour = l.card_style(3, p);
        assert_eq!(neighbour.translate_x, l.step_x);
        assert_eq!(neighbour.translate_y, 80.0);
    }

    #[test]
    fn current_is_none_until_first_card_arrives() {
        let l = layout(4);
        assert_eq!(l.current(Progress::ZERO), None);
        assert_eq!(l.current(Progress::ONE), Some(3));

        let mut last = None;
        for i in 0..=100 {
            let now = l.current(Progress::new(i as f32 / 100.0));
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn total_scroll_covers_span() {
        let l = layout(4);
        assert_eq!(l.total_scroll_px(), (l.span() * 544.0).round());
    }

    #[test]
    fn empty_carousel() {
        let l = layout(0);
        assert_eq!(l.current(Progress::new(0.5)), None);
        assert!(l.styles(Progress::new(0.5)).is_empty());
    }

    #[test]
    fn inverted_gap_bounds_do_not_panic() {
        let config = CarouselConfig {
            gap_min: 300.0,
            ..CarouselConfig::default()
        };
        // Bounds read as [220, 300]; 1200 * 0.12 = 144 rises to 220.
        let l = CarouselLayout::measure(3, Some(400.0), 1200.0, &config);
        assert_eq!(l.step_x, 620.0);
        assert_eq!(l.current(Progress::ONE), Some(2));
    }
}
