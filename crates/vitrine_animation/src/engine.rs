//! The tween engine capability
//!
//! Widgets animate through this trait and nothing else. They supply targets,
//! endpoints, timings, and callbacks; the engine owns the clock. The
//! in-tree implementation is [`crate::scheduler::TweenScheduler`].

use smallvec::SmallVec;

use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::visual::Visual;

use crate::scheduler::TweenId;
use crate::timeline::TimelineSpec;
use crate::tween::TweenSpec;

/// Schedules, advances, and cancels tweens
///
/// Kill semantics are strict: a killed tween stops where it is and its
/// completion callback never runs. That is what makes kill-then-start a safe
/// universal rule for superseding an in-flight transition.
pub trait TweenEngine {
    /// Advance the clock by `dt_ms`, apply samples to `dom`, fire callbacks,
    /// and report the handles that finished
    fn tick(&mut self, dt_ms: f32, dom: &mut dyn DomTree) -> SmallVec<[TweenId; 4]>;

    /// Tween from the element's current visuals to `spec.to`
    fn to(&mut self, dom: &dyn DomTree, target: ElementId, spec: TweenSpec) -> TweenId;

    /// Tween between two explicit endpoints; `from` is applied immediately
    fn from_to(
        &mut self,
        dom: &mut dyn DomTree,
        target: ElementId,
        from: Visual,
        spec: TweenSpec,
    ) -> TweenId;

    /// Apply `props` to `target` right now, outside any tween
    fn set(&mut self, dom: &mut dyn DomTree, target: ElementId, props: &Visual);

    /// Schedule a group of tweens under one handle
    fn timeline(&mut self, dom: &mut dyn DomTree, spec: TimelineSpec) -> TweenId;

    /// Cancel by handle without firing completions
    fn kill(&mut self, id: TweenId);

    /// Cancel every tween or timeline touching `target`, without firing
    /// completions
    fn kill_tweens_of(&mut self, target: ElementId);

    fn is_active(&self, id: TweenId) -> bool;
}
