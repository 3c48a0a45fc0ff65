//! Tweens
//!
//! A [`Tween`] is pure interpolation math: two visual endpoints, a duration,
//! an easing curve, and optional repeat/yoyo playback. It carries no clock of
//! its own; the scheduler samples it at a local time. That keeps the type
//! `Clone + Debug` and the playback rules directly testable.
//!
//! [`TweenSpec`] is what callers hand to the engine: the target endpoint plus
//! timing and the completion/update callbacks. The free [`tween`] constructor
//! reads well at call sites:
//!
//! ```ignore
//! anim.to(dom, panel, tween(Visual::opacity(1.0)).duration(300.0).ease(Easing::QuartOut));
//! ```

use std::fmt;

use vitrine_core::dom::DomTree;
use vitrine_core::visual::Visual;

use crate::easing::Easing;

/// Completion callback, run inside the scheduler tick
///
/// A killed tween never runs this.
pub type CompleteFn = Box<dyn FnOnce(&mut dyn DomTree) + Send>;

/// Per-tick callback with overall progress (0.0 to 1.0, linear in time)
pub type UpdateFn = Box<dyn FnMut(&mut dyn DomTree, f32) + Send>;

/// Stateless two-endpoint interpolation with repeat/yoyo playback
#[derive(Clone, Debug)]
pub struct Tween {
    from: Visual,
    to: Visual,
    duration_ms: f32,
    easing: Easing,
    /// Extra plays after the first
    repeat: u32,
    yoyo: bool,
}

impl Tween {
    pub fn new(from: Visual, to: Visual, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(1.0),
            easing: Easing::default(),
            repeat: 0,
            yoyo: false,
        }
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, extra_plays: u32) -> Self {
        self.repeat = extra_plays;
        self
    }

    /// Reverse direction on every other play
    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Duration of all plays together
    pub fn total_duration_ms(&self) -> f32 {
        self.duration_ms * (self.repeat + 1) as f32
    }

    pub fn is_finished_at(&self, local_ms: f32) -> bool {
        local_ms >= self.total_duration_ms()
    }

    /// Sample playback at a local time in milliseconds
    ///
    /// Times before 0 clamp to the start, times past the end to the final
    /// resting value. With yoyo and an odd number of extra plays the resting
    /// value is `from`, which is how a press pulse returns to scale 1.0.
    pub fn sample(&self, local_ms: f32) -> Visual {
        let total = self.total_duration_ms();
        let local = local_ms.clamp(0.0, total);

        let mut play = (local / self.duration_ms).floor() as u32;
        if play > self.repeat {
            play = self.repeat;
        }
        let mut t = local / self.duration_ms - play as f32;
        if local >= total {
            t = 1.0;
        }

        let reversed = self.yoyo && play % 2 == 1;
        if reversed {
            t = 1.0 - t;
        }

        self.from.lerp(&self.to, self.easing.apply(t))
    }
}

// ============================================================================
// Tween builder
// ============================================================================

/// Target endpoint, timing, and callbacks for one scheduled tween
///
/// Build with [`tween`] and the chained setters. The start endpoint comes
/// from the engine call: `to` resolves it from the element's current
/// visuals, `from_to` takes it explicitly.
pub struct TweenSpec {
    pub to: Visual,
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub easing: Easing,
    pub repeat: u32,
    pub yoyo: bool,
    pub on_complete: Option<CompleteFn>,
    pub on_update: Option<UpdateFn>,
}

/// Start building a tween toward `to`
pub fn tween(to: Visual) -> TweenSpec {
    TweenSpec {
        to,
        duration_ms: 300.0,
        delay_ms: 0.0,
        easing: Easing::default(),
        repeat: 0,
        yoyo: false,
        on_complete: None,
        on_update: None,
    }
}

impl TweenSpec {
    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, extra_plays: u32) -> Self {
        self.repeat = extra_plays;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Divide durations by `speed`; 2.0 plays twice as fast
    pub fn speed(mut self, speed: f32) -> Self {
        if speed > 0.0 {
            self.duration_ms /= speed;
            self.delay_ms /= speed;
        }
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut dyn DomTree) + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut dyn DomTree, f32) + Send + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Turn the builder into playback math with an explicit start endpoint
    pub fn into_tween(self, from: Visual) -> (Tween, f32, Option<CompleteFn>, Option<UpdateFn>) {
        let tween = Tween {
            from,
            to: self.to,
            duration_ms: self.duration_ms.max(1.0),
            easing: self.easing,
            repeat: self.repeat,
            yoyo: self.yoyo,
        };
        (tween, self.delay_ms, self.on_complete, self.on_update)
    }
}

impl fmt::Debug for TweenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenSpec")
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("repeat", &self.repeat)
            .field("yoyo", &self.yoyo)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_endpoints() {
        let t = Tween::new(Visual::opacity(0.0), Visual::opacity(1.0), 200.0);
        assert_eq!(t.sample(0.0).opacity, Some(0.0));
        assert_eq!(t.sample(200.0).opacity, Some(1.0));
        assert_eq!(t.sample(500.0).opacity, Some(1.0));
    }

    #[test]
    fn sample_midpoint_linear() {
        let t = Tween::new(Visual::translate(0.0, -10.0), Visual::translate(0.0, 0.0), 100.0);
        let mid = t.sample(50.0);
        assert_eq!(mid.y, Some(-5.0));
    }

    #[test]
    fn yoyo_returns_to_start() {
        // One extra play, reversed: a press pulse ends where it began
        let t = Tween::new(Visual::scale(1.0), Visual::scale(0.96), 100.0)
            .repeat(1)
            .yoyo();
        assert_eq!(t.total_duration_ms(), 200.0);
        assert_eq!(t.sample(100.0).scale_x, Some(0.96));
        assert_eq!(t.sample(200.0).scale_x, Some(1.0));
        assert!(t.is_finished_at(200.0));
    }

    #[test]
    fn yoyo_even_repeats_end_at_target() {
        let t = Tween::new(Visual::translate(0.0, 0.0), Visual::translate(2.0, 0.0), 50.0)
            .repeat(2)
            .yoyo();
        // Plays: forward, reverse, forward
        assert_eq!(t.sample(150.0).x, Some(2.0));
    }

    #[test]
    fn spec_speed_scales_timing() {
        let spec = tween(Visual::opacity(1.0)).duration(300.0).delay(60.0).speed(2.0);
        assert_eq!(spec.duration_ms, 150.0);
        assert_eq!(spec.delay_ms, 30.0);
    }

    #[test]
    fn negative_time_clamps_to_start() {
        let t = Tween::new(Visual::opacity(0.2), Visual::opacity(0.8), 100.0);
        assert_eq!(t.sample(-40.0).opacity, Some(0.2));
    }
}
