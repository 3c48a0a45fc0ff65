//! Toast host
//!
//! Spawns transient notification elements into a container. Each toast
//! slides in, drains a linear progress bar for the configured lifetime,
//! then slides out; the exit's completion removes the element. Toasts are
//! independent: several can be live at once and each dismisses on its own
//! clock or on click.
//!
//! The exit is scheduled only when the lifetime timeline finishes, so its
//! start captures the toast's settled visuals rather than the slide-in's
//! endpoints.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId, ViewNode};
use vitrine_core::events::{event_types, Event};

use crate::page::{Ui, Widget};
use crate::widgets::shared::require;

/// Visual flavor of a toast, reflected as a class on the element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
            Self::Info => "toast-info",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToastConfig {
    pub container: String,
    /// Demo button that spawns a canned toast
    pub trigger: Option<String>,
    /// How long a toast stays before sliding out
    pub duration_ms: f32,
    pub message: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            container: "toasts".into(),
            trigger: Some("toast-trigger".into()),
            duration_ms: 3000.0,
            message: "Changes saved".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastStage {
    /// Slide-in plus progress drain
    Showing,
    /// Slide-out; completion removes the element
    Leaving,
}

struct LiveToast {
    element: ElementId,
    handle: TweenId,
    stage: ToastStage,
}

pub struct ToastHost {
    container: ElementId,
    trigger: Option<ElementId>,
    duration_ms: f32,
    message: String,
    live: Vec<LiveToast>,
}

impl ToastHost {
    pub fn mount(dom: &mut dyn DomTree, config: ToastConfig) -> Option<Self> {
        let container = require(dom, &config.container, "toast-host")?;
        let trigger = config.trigger.as_deref().and_then(|id| dom.element_by_id(id));
        Some(Self {
            container,
            trigger,
            duration_ms: config.duration_ms,
            message: config.message,
            live: Vec::new(),
        })
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Spawn a toast and start its lifetime
    pub fn show(&mut self, ui: &mut Ui<'_>, message: &str, kind: ToastKind) -> ElementId {
        let node = ViewNode::new("div")
            .class("toast")
            .class(kind.class())
            .child(ViewNode::new("span").class("toast-message").text(message))
            .child(ViewNode::new("div").class("toast-progress"));
        let toast = ui.dom.append_child(self.container, &node);
        let bar = ui
            .dom
            .children(toast)
            .into_iter()
            .find(|&c| ui.dom.has_class(c, "toast-progress"));

        let mut tl = timeline().motion_at(0.0, toast, &MotionPreset::toast_in());
        if let Some(bar) = bar {
            tl = tl.motion_at(0.0, bar, &MotionPreset::toast_progress(self.duration_ms));
        }
        let handle = ui.anim.timeline(ui.dom, tl);
        self.live.push(LiveToast {
            element: toast,
            handle,
            stage: ToastStage::Showing,
        });
        debug!(?kind, "toast shown");
        toast
    }

    fn start_leaving(&mut self, ui: &mut Ui<'_>, index: usize) {
        let toast = self.live[index].element;
        let tl = timeline()
            .motion_at(0.0, toast, &MotionPreset::toast_out())
            .on_complete(move |dom| dom.remove(toast));
        self.live[index].handle = ui.anim.timeline(ui.dom, tl);
        self.live[index].stage = ToastStage::Leaving;
    }

    fn dismiss_at(&mut self, ui: &mut Ui<'_>, index: usize) {
        if self.live[index].stage == ToastStage::Leaving {
            return;
        }
        ui.anim.kill(self.live[index].handle);
        self.start_leaving(ui, index);
        debug!("toast dismissed early");
    }
}

impl Widget for ToastHost {
    fn name(&self) -> &'static str {
        "toast-host"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        if self.trigger.is_some_and(|t| ui.dom.contains(t, target)) {
            let message = self.message.clone();
            self.show(ui, &message, ToastKind::Success);
            return;
        }
        let hit = self
            .live
            .iter()
            .position(|t| ui.dom.contains(t.element, target));
        if let Some(index) = hit {
            self.dismiss_at(ui, index);
        }
    }

    fn tween_finished(&mut self, id: TweenId, ui: &mut Ui<'_>) {
        let Some(index) = self.live.iter().position(|t| t.handle == id) else {
            return;
        };
        match self.live[index].stage {
            ToastStage::Showing => self.start_leaving(ui, index),
            ToastStage::Leaving => {
                self.live.remove(index);
                debug!("toast removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::{TweenEngine, TweenScheduler};
    use vitrine_core::dom::MemoryDom;

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("div").id("toasts"),
            ViewNode::new("button").id("toast-trigger"),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        host: ToastHost,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = markup();
            let host = ToastHost::mount(&mut dom, ToastConfig::default()).unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                host,
            }
        }

        fn click_el(&mut self, target: vitrine_core::dom::ElementId) {
            let mut event = Event::click(target);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            self.host.handle_event(&mut event, &mut ui);
        }

        fn click(&mut self, id: &str) {
            let target = self.dom.element_by_id(id).unwrap();
            self.click_el(target);
        }

        fn tick(&mut self, ms: f32) {
            let finished = self.sched.tick(ms, &mut self.dom);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            for id in finished {
                self.host.tween_finished(id, &mut ui);
            }
        }

        fn toast_count(&self) -> usize {
            let container = self.dom.element_by_id("toasts").unwrap();
            self.dom.children(container).len()
        }
    }

    #[test]
    fn trigger_spawns_a_toast_that_expires_on_its_own() {
        let mut fx = Fixture::new();
        fx.click("toast-trigger");
        assert_eq!(fx.toast_count(), 1);
        assert_eq!(fx.host.live_count(), 1);

        fx.tick(3000.0);
        assert_eq!(fx.toast_count(), 1, "slide-out still playing");

        fx.tick(300.0);
        assert_eq!(fx.toast_count(), 0);
        assert_eq!(fx.host.live_count(), 0);
        assert!(fx.sched.is_idle());
    }

    #[test]
    fn toasts_stack_and_expire_independently() {
        let mut fx = Fixture::new();
        fx.click("toast-trigger");
        fx.tick(500.0);
        fx.click("toast-trigger");
        assert_eq!(fx.toast_count(), 2);

        fx.tick(2500.0);
        fx.tick(300.0);
        assert_eq!(fx.toast_count(), 1, "first gone, second still draining");

        fx.tick(200.0);
        fx.tick(300.0);
        assert_eq!(fx.toast_count(), 0);
    }

    #[test]
    fn clicking_a_toast_dismisses_it_early() {
        let mut fx = Fixture::new();
        fx.click("toast-trigger");
        fx.tick(600.0);

        let container = fx.dom.element_by_id("toasts").unwrap();
        let toast = fx.dom.children(container)[0];
        fx.click_el(toast);
        assert_eq!(fx.sched.active_count(), 1, "lifetime killed, exit live");

        fx.tick(300.0);
        assert_eq!(fx.toast_count(), 0);
        assert_eq!(fx.host.live_count(), 0);
    }

    #[test]
    fn show_carries_kind_class_and_message() {
        let mut fx = Fixture::new();
        let toast = {
            let mut ui = Ui {
                dom: &mut fx.dom,
                anim: &mut fx.sched,
                overlays: &mut fx.overlays,
            };
            fx.host.show(&mut ui, "Disk almost full", ToastKind::Error)
        };
        assert!(fx.dom.has_class(toast, "toast"));
        assert!(fx.dom.has_class(toast, "toast-error"));
        let message = fx
            .dom
            .children(toast)
            .into_iter()
            .find(|&c| fx.dom.has_class(c, "toast-message"))
            .unwrap();
        assert_eq!(fx.dom.text(message).as_deref(), Some("Disk almost full"));
    }

    #[test]
    fn progress_bar_drains_over_the_lifetime() {
        let mut fx = Fixture::new();
        fx.click("toast-trigger");
        let container = fx.dom.element_by_id("toasts").unwrap();
        let toast = fx.dom.children(container)[0];
        let bar = fx
            .dom
            .children(toast)
            .into_iter()
            .find(|&c| fx.dom.has_class(c, "toast-progress"))
            .unwrap();
        assert_eq!(fx.dom.visual(bar).width_pct, Some(100.0));

        fx.tick(1500.0);
        assert_eq!(fx.dom.visual(bar).width_pct, Some(50.0));

        fx.tick(1500.0);
        assert_eq!(fx.dom.visual(bar).width_pct, Some(0.0));
    }
}
