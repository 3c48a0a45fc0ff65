//! Motion presets for the widget set
//!
//! The timing and easing constants for every stock transition live here, so
//! a widget file reads as wiring rather than a wall of numbers.

use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::visual::Visual;

use crate::easing::Easing;
use crate::engine::TweenEngine;
use crate::scheduler::TweenId;
use crate::tween::{tween, TweenSpec};

/// A named motion: endpoints plus timing
///
/// `from` is `None` for tweens that start from the element's current state.
#[derive(Clone, Debug)]
pub struct Motion {
    pub from: Option<Visual>,
    pub to: Visual,
    pub duration_ms: f32,
    pub easing: Easing,
    pub repeat: u32,
    pub yoyo: bool,
}

impl Motion {
    fn to_only(to: Visual, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from: None,
            to,
            duration_ms,
            easing,
            repeat: 0,
            yoyo: false,
        }
    }

    fn from_to(from: Visual, to: Visual, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from: Some(from),
            to,
            duration_ms,
            easing,
            repeat: 0,
            yoyo: false,
        }
    }

    fn pulse(mut self, extra_plays: u32) -> Self {
        self.repeat = extra_plays;
        self.yoyo = true;
        self
    }

    /// Build the engine spec for this motion
    pub fn spec(&self) -> TweenSpec {
        let mut spec = tween(self.to.clone())
            .duration(self.duration_ms)
            .ease(self.easing)
            .repeat(self.repeat);
        if self.yoyo {
            spec = spec.yoyo();
        }
        spec
    }

    /// Schedule this motion on `target` as a standalone tween
    ///
    /// Use [`spec`](Self::spec) instead when callbacks need attaching.
    pub fn start(
        &self,
        anim: &mut dyn TweenEngine,
        dom: &mut dyn DomTree,
        target: ElementId,
    ) -> TweenId {
        match self.from.clone() {
            Some(from) => anim.from_to(dom, target, from, self.spec()),
            None => anim.to(dom, target, self.spec()),
        }
    }
}

/// Stock motions for common widget transitions
pub struct MotionPreset;

impl MotionPreset {
    // ========================================================================
    // Overlay panels
    // ========================================================================

    /// Dropdown panel entrance: fade up from a slight shrink
    pub fn menu_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_scale(0.95).with_y(-10.0),
            Visual::opacity(1.0).with_scale(1.0).with_y(0.0),
            300.0,
            Easing::QuartOut,
        )
    }

    /// Dropdown panel exit: quick fade into a shrink
    pub fn menu_out() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_scale(0.98).with_y(-5.0),
            200.0,
            Easing::CubicIn,
        )
    }

    /// Menu row entrance, staggered by the caller
    pub fn menu_item_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_x(-10.0),
            Visual::opacity(1.0).with_x(0.0),
            300.0,
            Easing::QuartOut,
        )
    }

    /// Combobox/listbox panel entrance with overshoot
    pub fn panel_pop_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_scale(0.95).with_y(-15.0),
            Visual::opacity(1.0).with_scale(1.0).with_y(0.0),
            400.0,
            Easing::BackOut(1.7),
        )
    }

    /// Combobox/listbox panel exit
    pub fn panel_drop_out() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_scale(0.95).with_y(-15.0),
            200.0,
            Easing::CubicIn,
        )
    }

    /// Trigger chevron rotating open
    pub fn chevron_open() -> Motion {
        Motion::to_only(Visual::rotation(180.0), 300.0, Easing::BackOut(1.8))
    }

    /// Trigger chevron rotating closed
    pub fn chevron_close() -> Motion {
        Motion::to_only(Visual::rotation(0.0), 300.0, Easing::CubicOut)
    }

    // ========================================================================
    // Dialog
    // ========================================================================

    /// Backdrop fading in
    pub fn backdrop_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0),
            Visual::opacity(1.0),
            300.0,
            Easing::QuadOut,
        )
    }

    /// Backdrop fading out
    pub fn backdrop_out() -> Motion {
        Motion::to_only(Visual::opacity(0.0), 250.0, Easing::CubicIn)
    }

    /// Dialog card popping in
    pub fn card_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_scale(0.8).with_y(20.0),
            Visual::opacity(1.0).with_scale(1.0).with_y(0.0),
            400.0,
            Easing::BackOut(1.5),
        )
    }

    /// Dialog card dropping out
    pub fn card_out() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_scale(0.85).with_y(10.0),
            250.0,
            Easing::CubicIn,
        )
    }

    // ========================================================================
    // Buttons and rows
    // ========================================================================

    /// Press feedback: shrink and recover
    pub fn press_pulse() -> Motion {
        Motion::to_only(Visual::scale(0.96), 100.0, Easing::QuadOut).pulse(1)
    }

    /// Icon hop
    pub fn icon_bounce() -> Motion {
        Motion::to_only(Visual::default().with_y(-8.0), 180.0, Easing::CubicOut).pulse(1)
    }

    /// Icon full turn from its current angle
    pub fn icon_spin(base_deg: f32) -> Motion {
        Motion::from_to(
            Visual::rotation(base_deg),
            Visual::rotation(base_deg + 360.0),
            600.0,
            Easing::BackInOut(1.7),
        )
    }

    /// Icon jitter
    pub fn icon_vibrate() -> Motion {
        Motion::to_only(Visual::default().with_x(2.0), 50.0, Easing::Linear).pulse(5)
    }

    /// Icon swell and settle
    pub fn icon_pop() -> Motion {
        Motion::to_only(Visual::scale(1.5), 200.0, Easing::BackOut(2.0)).pulse(1)
    }

    /// Checkbox row feedback
    pub fn row_pulse() -> Motion {
        Motion::to_only(Visual::scale(0.96), 120.0, Easing::QuadInOut).pulse(1)
    }

    /// List row entrance, staggered by the caller
    pub fn row_slide_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_x(-20.0),
            Visual::opacity(1.0).with_x(0.0),
            800.0,
            Easing::CubicOut,
        )
    }

    // ========================================================================
    // Disclosure
    // ========================================================================

    /// Panel expanding to its natural height
    pub fn expand_open(natural_height: f32) -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_height(0.0),
            Visual::opacity(1.0).with_height(natural_height),
            500.0,
            Easing::QuartOut,
        )
    }

    /// Panel collapsing shut
    pub fn expand_close() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_height(0.0),
            400.0,
            Easing::QuartInOut,
        )
    }

    // ========================================================================
    // Tabs
    // ========================================================================

    /// Outgoing tab panel
    pub fn tab_out() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_y(8.0).with_scale(0.98),
            300.0,
            Easing::CubicIn,
        )
    }

    /// Incoming tab panel
    pub fn tab_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_y(-8.0).with_scale(0.98),
            Visual::opacity(1.0).with_y(0.0).with_scale(1.0),
            500.0,
            Easing::BackOut(1.2),
        )
    }

    /// Settle a half-faded panel back to rest, used when a switch is
    /// superseded by a click on the panel already showing
    pub fn tab_restore() -> Motion {
        Motion::to_only(
            Visual::opacity(1.0).with_y(0.0).with_scale(1.0),
            300.0,
            Easing::CubicOut,
        )
    }

    // ========================================================================
    // Toasts
    // ========================================================================

    /// Toast sliding in from the right
    pub fn toast_in() -> Motion {
        Motion::from_to(
            Visual::opacity(0.0).with_x(100.0),
            Visual::opacity(1.0).with_x(0.0),
            500.0,
            Easing::QuartOut,
        )
    }

    /// Toast sliding back out
    pub fn toast_out() -> Motion {
        Motion::to_only(
            Visual::opacity(0.0).with_x(100.0),
            300.0,
            Easing::CubicIn,
        )
    }

    /// Countdown bar draining over the toast's lifetime
    pub fn toast_progress(duration_ms: f32) -> Motion {
        Motion::from_to(
            Visual::default().with_width_pct(100.0),
            Visual::default().with_width_pct(0.0),
            duration_ms,
            Easing::Linear,
        )
    }

    // ========================================================================
    // Pagination dots
    // ========================================================================

    /// Dot taking the active highlight
    pub fn dot_active() -> Motion {
        Motion::to_only(
            Visual::scale(1.4).with_opacity(1.0),
            300.0,
            Easing::BackOut(2.0),
        )
    }

    /// Dot dropping back to rest
    pub fn dot_inactive() -> Motion {
        Motion::to_only(
            Visual::scale(1.0).with_opacity(0.5),
            300.0,
            Easing::CubicOut,
        )
    }
}
