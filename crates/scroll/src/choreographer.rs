//! Runtime binding of a timeline to a progress source and a render target.
//!
//! Mounting subscribes to the source; every publish evaluates the timeline and
//! hands the resulting snapshots to the target. Dropping the choreographer
//! unmounts it.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use pf_choreo::{evaluate, StyleMap, Timeline};
use pf_common::Progress;

use crate::source::{ProgressSource, Subscription};

/// Receives evaluated styles, one map per frame.
pub trait RenderTarget {
    fn apply(&mut self, styles: &StyleMap);
}

/// A plain style map keeps the latest frame.
impl RenderTarget for StyleMap {
    fn apply(&mut self, styles: &StyleMap) {
        self.clone_from(styles);
    }
}

/// A timeline mounted on a progress source.
pub struct ScrollChoreographer<T: RenderTarget + 'static> {
    timeline: Rc<Timeline>,
    target: Rc<RefCell<T>>,
    subscription: Option<Subscription>,
}

impl<T: RenderTarget + 'static> ScrollChoreographer<T> {
    /// Render the source's current progress once, then follow every publish.
    pub fn mount(timeline: Timeline, source: &ProgressSource, target: T) -> Self {
        let timeline = Rc::new(timeline);
        let target = Rc::new(RefCell::new(target));

        render(&timeline, &target, source.current());

        let subscription = {
            let timeline = Rc::clone(&timeline);
            let target = Rc::clone(&target);
            source.subscribe(move |progress| render(&timeline, &target, progress))
        };

        tracing::debug!(
            segments = timeline.len(),
            elements = timeline.elements().len(),
            progress = %source.current(),
            "Choreographer mounted"
        );

        Self {
            timeline,
            target,
            subscription: Some(subscription),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Borrow the render target, e.g. to inspect what it last received.
    pub fn target(&self) -> Ref<'_, T> {
        self.target.borrow()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Re-render at `progress` without publishing to the source.
    pub fn render_at(&self, progress: Progress) {
        render(&self.timeline, &self.target, progress);
    }

    /// Stop following the source. The target keeps its last frame.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!(segments = self.timeline.len(), "Choreographer unmounted");
        }
    }
}

impl<T: RenderTarget + 'static> Drop for ScrollChoreographer<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn render<T: RenderTarget>(timeline: &Timeline, target: &RefCell<T>, progress: Progress) {
    let styles = evaluate(timeline, progress);
    match target.try_borrow_mut() {
        Ok(mut target) => target.apply(&styles),
        Err(_) => tracing::warn!(%progress, "Render target busy, frame dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_choreo::Segment;
    use pf_common::{ElementId, VisualProperty};

    #[derive(Default)]
    struct CountingTarget {
        frames: usize,
        last: StyleMap,
    }

    impl RenderTarget for CountingTarget {
        fn apply(&mut self, styles: &StyleMap) {
            self.frames += 1;
            self.last = styles.clone();
        }
    }

    fn fade() -> Timeline {
        Timeline::new(vec![
            Segment::new("a", 0.0, 1.0).with_tween(VisualProperty::Opacity, 0.0, 1.0)
        ])
        .unwrap()
    }

    #[test]
    fn mount_renders_current_progress() {
        let source = ProgressSource::new();
        source.publish(0.5);
        let choreo = ScrollChoreographer::mount(fade(), &source, CountingTarget::default());

        let target = choreo.target();
        assert_eq!(target.frames, 1);
        assert!((target.last[&ElementId::new("a")].opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn publishes_drive_frames() {
        let source = ProgressSource::new();
        let choreo = ScrollChoreographer::mount(fade(), &source, CountingTarget::default());
        source.publish(0.2);
        source.publish(0.9);

        let target = choreo.target();
        assert_eq!(target.frames, 3);
        assert!((target.last[&ElementId::new("a")].opacity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn unmount_releases_subscription() {
        let source = ProgressSource::new();
        let mut choreo = ScrollChoreographer::mount(fade(), &source, CountingTarget::default());
        assert!(choreo.is_mounted());
        assert_eq!(source.listener_count(), 1);

        choreo.unmount();
        assert!(!choreo.is_mounted());
        assert_eq!(source.listener_count(), 0);

        source.publish(1.0);
        assert_eq!(choreo.target().frames, 1);
    }

    #[test]
    fn drop_unmounts() {
        let source = ProgressSource::new();
        {
            let _choreo = ScrollChoreographer::mount(fade(), &source, StyleMap::new());
            assert_eq!(source.listener_count(), 1);
        }
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn render_at_bypasses_source() {
        let source = ProgressSource::new();
        let choreo = ScrollChoreographer::mount(fade(), &source, StyleMap::new());
        choreo.render_at(Progress::ONE);
        assert!((choreo.target()[&ElementId::new("a")].opacity - 1.0).abs() < 1e-6);
        assert_eq!(source.current(), Progress::ZERO);
    }
}
