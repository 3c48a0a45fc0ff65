//! Timeline orchestration for multiple tweens
//!
//! A timeline groups tweens on several elements under one handle: the
//! dropdown panel plus its staggered rows, or a dialog backdrop and card.
//! The whole group is killed, queried, and completed as a unit, which is
//! what makes "cancel the in-flight transition" a single call.

use std::fmt;

use vitrine_core::dom::ElementId;
use vitrine_core::visual::Visual;

use crate::easing::Easing;
use crate::presets::Motion;
use crate::tween::{CompleteFn, UpdateFn};

/// One tween inside a timeline
#[derive(Clone, Debug)]
pub struct TimelineStep {
    pub target: ElementId,
    /// Explicit start endpoint; `None` resolves from the element when the
    /// timeline is scheduled
    pub from: Option<Visual>,
    pub to: Visual,
    pub duration_ms: f32,
    pub easing: Easing,
    /// Offset in milliseconds from timeline start
    pub offset_ms: f32,
}

/// A group of tweens scheduled together under one handle
#[derive(Default)]
pub struct TimelineSpec {
    pub steps: Vec<TimelineStep>,
    pub on_complete: Option<CompleteFn>,
    pub on_update: Option<UpdateFn>,
}

/// Start building a timeline
pub fn timeline() -> TimelineSpec {
    TimelineSpec::default()
}

impl TimelineSpec {
    /// Add a tween starting at `offset_ms` whose start endpoint is the
    /// element's state when the timeline is scheduled
    pub fn tween_at(
        mut self,
        offset_ms: f32,
        target: ElementId,
        to: Visual,
        duration_ms: f32,
        easing: Easing,
    ) -> Self {
        self.steps.push(TimelineStep {
            target,
            from: None,
            to,
            duration_ms,
            easing,
            offset_ms,
        });
        self
    }

    /// Add a tween starting at `offset_ms` with both endpoints explicit
    ///
    /// The `from` state is applied to the element as soon as the timeline is
    /// scheduled, so items sit at their entrance pose during their stagger
    /// delay.
    pub fn from_to_at(
        mut self,
        offset_ms: f32,
        target: ElementId,
        from: Visual,
        to: Visual,
        duration_ms: f32,
        easing: Easing,
    ) -> Self {
        self.steps.push(TimelineStep {
            target,
            from: Some(from),
            to,
            duration_ms,
            easing,
            offset_ms,
        });
        self
    }

    /// Add a [`Motion`] at `offset_ms`
    ///
    /// Timelines play each step once; a motion's repeat and yoyo settings
    /// only apply when it is scheduled as a standalone tween.
    pub fn motion_at(self, offset_ms: f32, target: ElementId, motion: &Motion) -> Self {
        match motion.from.clone() {
            Some(from) => self.from_to_at(
                offset_ms,
                target,
                from,
                motion.to.clone(),
                motion.duration_ms,
                motion.easing,
            ),
            None => self.tween_at(
                offset_ms,
                target,
                motion.to.clone(),
                motion.duration_ms,
                motion.easing,
            ),
        }
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut dyn vitrine_core::dom::DomTree) + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut dyn vitrine_core::dom::DomTree, f32) + Send + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Divide all step timings by `speed`; 2.0 plays twice as fast
    pub fn speed(mut self, speed: f32) -> Self {
        if speed > 0.0 {
            for step in &mut self.steps {
                step.offset_ms /= speed;
                step.duration_ms /= speed;
            }
        }
        self
    }

    /// Total duration: the latest step end
    pub fn duration_ms(&self) -> f32 {
        self.steps
            .iter()
            .map(|s| s.offset_ms + s.duration_ms)
            .fold(0.0, f32::max)
    }
}

impl fmt::Debug for TimelineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineSpec")
            .field("steps", &self.steps)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}
