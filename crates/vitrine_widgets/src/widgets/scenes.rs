//! Scene transitions
//!
//! A deck of full-bleed scenes with exactly one on screen. Switching plays
//! the outgoing scene's exit, swaps display, then plays the incoming scene's
//! entrance. Each scene declares its transition style through
//! `data-transition`; the incoming scene's style shapes both halves of the
//! switch, and the endpoints flip with the travel direction. Pagination dots
//! re-target on the same timeline as the exit, so a superseded switch drags
//! them to the new target immediately.
//!
//! `data-speed` on the root divides every duration, which is how the demo
//! page offers a slow-motion inspection mode.

use std::str::FromStr;

use tracing::debug;

use vitrine_animation::{timeline, Easing, MotionPreset, TimelineSpec, TweenId};
use vitrine_core::config::DataAttrs;
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::error::{ConfigError, Result};
use vitrine_core::events::{event_types, Event};
use vitrine_core::Visual;

use crate::page::{Ui, Widget};

/// Transition style, chosen per scene via `data-transition`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneTransition {
    /// Springy horizontal slide
    #[default]
    Glide,
    /// Perspective swing around the vertical axis
    Tilt,
    /// Blur-and-scale dissolve
    Ripple,
    /// Clip-inset wipe
    Expand,
}

impl FromStr for SceneTransition {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "glide" => Ok(Self::Glide),
            "tilt" => Ok(Self::Tilt),
            "ripple" => Ok(Self::Ripple),
            "expand" => Ok(Self::Expand),
            _ => Err(()),
        }
    }
}

impl SceneTransition {
    /// Outgoing endpoints for a switch travelling in `direction`
    /// (`1.0` forward, `-1.0` back)
    fn exit(self, direction: f32) -> (Visual, f32, Easing) {
        match self {
            Self::Glide => (
                Visual::opacity(0.0)
                    .with_x(-80.0 * direction)
                    .with_scale(0.9),
                400.0,
                Easing::QuartIn,
            ),
            Self::Tilt => (
                Visual::opacity(0.0)
                    .with_rotation_y(-25.0 * direction)
                    .with_scale(0.92),
                400.0,
                Easing::CubicIn,
            ),
            Self::Ripple => (
                Visual::opacity(0.0).with_blur(12.0).with_scale(1.05),
                400.0,
                Easing::QuadIn,
            ),
            Self::Expand => {
                let inset = if direction > 0.0 {
                    [0.0, 0.0, 0.0, 100.0]
                } else {
                    [0.0, 100.0, 0.0, 0.0]
                };
                (
                    Visual::default().with_clip_inset(inset),
                    450.0,
                    Easing::QuartIn,
                )
            }
        }
    }

    /// Incoming endpoints for a switch travelling in `direction`
    fn enter(self, direction: f32) -> (Visual, Visual, f32, Easing) {
        match self {
            Self::Glide => (
                Visual::opacity(0.0).with_x(80.0 * direction).with_scale(0.9),
                Visual::opacity(1.0).with_x(0.0).with_scale(1.0),
                700.0,
                Easing::ElasticOut,
            ),
            Self::Tilt => (
                Visual::opacity(0.0)
                    .with_rotation_y(25.0 * direction)
                    .with_scale(0.92),
                Visual::opacity(1.0).with_rotation_y(0.0).with_scale(1.0),
                600.0,
                Easing::BackOut(1.4),
            ),
            Self::Ripple => (
                Visual::opacity(0.0).with_blur(12.0).with_scale(0.95),
                Visual::opacity(1.0).with_blur(0.0).with_scale(1.0),
                600.0,
                Easing::CubicOut,
            ),
            Self::Expand => {
                let inset = if direction > 0.0 {
                    [0.0, 100.0, 0.0, 0.0]
                } else {
                    [0.0, 0.0, 0.0, 100.0]
                };
                (
                    Visual::default().with_clip_inset(inset),
                    Visual::default().with_clip_inset([0.0; 4]),
                    550.0,
                    Easing::QuartOut,
                )
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScenesConfig {
    /// Root element; carries the optional `data-speed`
    pub root: String,
    pub scenes: Vec<String>,
    /// Container whose children are the pagination dots
    pub dots: Option<String>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl Default for ScenesConfig {
    fn default() -> Self {
        Self {
            root: "scenes".into(),
            scenes: vec![
                "scene-1".into(),
                "scene-2".into(),
                "scene-3".into(),
                "scene-4".into(),
            ],
            dots: Some("scene-dots".into()),
            next: Some("scenes-next".into()),
            prev: Some("scenes-prev".into()),
        }
    }
}

#[derive(Debug)]
struct Scene {
    element: ElementId,
    transition: SceneTransition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Exit,
    Enter,
}

#[derive(Clone, Copy, Debug)]
struct SceneSwitch {
    from: usize,
    to: usize,
    stage: Stage,
    handle: TweenId,
}

#[derive(Debug)]
pub struct Scenes {
    scenes: Vec<Scene>,
    dots: Vec<ElementId>,
    next: Option<ElementId>,
    prev: Option<ElementId>,
    current: usize,
    switching: Option<SceneSwitch>,
    speed: f32,
}

impl Scenes {
    /// Bind to existing markup and read per-scene configuration
    ///
    /// Missing elements are skipped; a present-but-unusable `data-speed` or
    /// `data-transition` is an error.
    pub fn mount(dom: &mut dyn DomTree, config: ScenesConfig) -> Result<Option<Self>> {
        let Some(root) = dom.element_by_id(&config.root) else {
            debug!(id = %config.root, "markup not found, widget not mounted");
            return Ok(None);
        };
        let speed = DataAttrs::new(dom, root).number_or("speed", 1.0)?;
        if speed <= 0.0 {
            return Err(ConfigError::InvalidAttribute {
                attr: "data-speed".into(),
                value: speed.to_string(),
                expected: "a speed greater than zero",
            });
        }

        let mut scenes = Vec::new();
        for id in &config.scenes {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "scene missing, skipped");
                continue;
            };
            let transition = DataAttrs::new(dom, element).parse_or(
                "transition",
                SceneTransition::default(),
                "one of glide, tilt, ripple, expand",
            )?;
            scenes.push(Scene {
                element,
                transition,
            });
        }
        if scenes.is_empty() {
            debug!("no scenes found, widget not mounted");
            return Ok(None);
        }

        let dots = config
            .dots
            .as_deref()
            .and_then(|id| dom.element_by_id(id))
            .map(|container| dom.children(container))
            .unwrap_or_default();
        let next = config.next.as_deref().and_then(|id| dom.element_by_id(id));
        let prev = config.prev.as_deref().and_then(|id| dom.element_by_id(id));

        for (index, scene) in scenes.iter().enumerate() {
            dom.set_display(scene.element, index == 0);
        }
        for (index, &dot) in dots.iter().enumerate() {
            let rest = if index == 0 {
                Visual::scale(1.4).with_opacity(1.0)
            } else {
                Visual::scale(1.0).with_opacity(0.5)
            };
            dom.merge_visual(dot, &rest);
        }

        Ok(Some(Self {
            scenes,
            dots,
            next,
            prev,
            current: 0,
            switching: None,
            speed,
        }))
    }

    /// Index of the settled scene; mid-switch this is still the old one
    pub fn current(&self) -> usize {
        self.current
    }

    fn transition_to(&mut self, ui: &mut Ui<'_>, target: usize) {
        let visible = match self.switching {
            Some(sw) => match sw.stage {
                Stage::Exit => sw.from,
                Stage::Enter => sw.to,
            },
            None => self.current,
        };
        if self.switching.is_none() && target == self.current {
            return;
        }
        if let Some(sw) = self.switching.take() {
            ui.anim.kill(sw.handle);
        }

        if target == visible {
            // Superseded back onto the scene already showing: settle it in
            // place instead of replaying a full switch.
            let rest = Visual::opacity(1.0)
                .with_x(0.0)
                .with_scale(1.0)
                .with_rotation_y(0.0)
                .with_blur(0.0)
                .with_clip_inset([0.0; 4]);
            let tl = timeline().tween_at(
                0.0,
                self.scenes[visible].element,
                rest,
                300.0,
                Easing::CubicOut,
            );
            let tl = self.retarget_dots(tl, target);
            let handle = ui.anim.timeline(ui.dom, tl.speed(self.speed));
            self.switching = Some(SceneSwitch {
                from: visible,
                to: target,
                stage: Stage::Enter,
                handle,
            });
            return;
        }

        let direction = if target > visible { 1.0 } else { -1.0 };
        let kind = self.scenes[target].transition;
        let (out, duration, easing) = kind.exit(direction);
        let tl = timeline().tween_at(0.0, self.scenes[visible].element, out, duration, easing);
        let tl = self.retarget_dots(tl, target);
        let handle = ui.anim.timeline(ui.dom, tl.speed(self.speed));
        self.switching = Some(SceneSwitch {
            from: visible,
            to: target,
            stage: Stage::Exit,
            handle,
        });
        debug!(from = visible, to = target, ?kind, "scene exit started");
    }

    /// Dot highlights travel with the exit so a superseded switch re-aims
    /// them immediately
    fn retarget_dots(&self, mut tl: TimelineSpec, target: usize) -> TimelineSpec {
        for (index, &dot) in self.dots.iter().enumerate() {
            let motion = if index == target {
                MotionPreset::dot_active()
            } else {
                MotionPreset::dot_inactive()
            };
            tl = tl.motion_at(0.0, dot, &motion);
        }
        tl
    }

    fn advance(&mut self, ui: &mut Ui<'_>, forward: bool) {
        let base = self.switching.map(|sw| sw.to).unwrap_or(self.current);
        let target = if forward {
            (base + 1).min(self.scenes.len() - 1)
        } else {
            base.saturating_sub(1)
        };
        self.transition_to(ui, target);
    }
}

impl Widget for Scenes {
    fn name(&self) -> &'static str {
        "scenes"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        if let Some(index) = self.dots.iter().position(|&d| ui.dom.contains(d, target)) {
            self.transition_to(ui, index);
            return;
        }
        if self.next.is_some_and(|b| ui.dom.contains(b, target)) {
            self.advance(ui, true);
        } else if self.prev.is_some_and(|b| ui.dom.contains(b, target)) {
            self.advance(ui, false);
        }
    }

    fn tween_finished(&mut self, id: TweenId, ui: &mut Ui<'_>) {
        let Some(sw) = self.switching else {
            return;
        };
        if sw.handle != id {
            return;
        }
        match sw.stage {
            Stage::Exit => {
                let direction = if sw.to > sw.from { 1.0 } else { -1.0 };
                let incoming = &self.scenes[sw.to];
                ui.dom.set_display(self.scenes[sw.from].element, false);
                ui.dom.set_display(incoming.element, true);
                let (from, to, duration, easing) = incoming.transition.enter(direction);
                let tl = timeline()
                    .from_to_at(0.0, incoming.element, from, to, duration, easing)
                    .speed(self.speed);
                let handle = ui.anim.timeline(ui.dom, tl);
                self.switching = Some(SceneSwitch {
                    stage: Stage::Enter,
                    handle,
                    ..sw
                });
                debug!(from = sw.from, to = sw.to, "scene entrance started");
            }
            Stage::Enter => {
                self.current = sw.to;
                self.switching = None;
                debug!(current = self.current, "scene transition settled");
            }
        }
    }
}
