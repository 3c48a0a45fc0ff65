//! Modal dialog
//!
//! A full-screen container holding a backdrop and a card. The open button
//! hides while the dialog is up; clicking the backdrop, the close button, or
//! pressing Escape plays the exit. Backdrop and card animate on one timeline
//! so the whole transition is a single cancellable unit.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};

use crate::overlay::OverlayCore;
use crate::page::{Ui, Widget, WidgetId};
use crate::widgets::shared::require;

/// Element ids the dialog binds to
#[derive(Clone, Debug)]
pub struct DialogConfig {
    /// Container holding backdrop and card
    pub root: String,
    pub backdrop: String,
    pub card: String,
    pub open_button: String,
    pub close_button: Option<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            root: "dialog".into(),
            backdrop: "dialog-backdrop".into(),
            card: "dialog-card".into(),
            open_button: "dialog-open".into(),
            close_button: Some("dialog-close".into()),
        }
    }
}

pub struct Dialog {
    core: OverlayCore,
    backdrop: ElementId,
    card: ElementId,
    open_button: ElementId,
    close_button: Option<ElementId>,
}

impl Dialog {
    pub fn mount(dom: &mut dyn DomTree, widget: WidgetId, config: DialogConfig) -> Option<Self> {
        let root = require(dom, &config.root, "dialog")?;
        let backdrop = require(dom, &config.backdrop, "dialog")?;
        let card = require(dom, &config.card, "dialog")?;
        let open_button = require(dom, &config.open_button, "dialog")?;
        let close_button = config
            .close_button
            .as_deref()
            .and_then(|id| dom.element_by_id(id));

        dom.set_display(root, false);
        Some(Self {
            core: OverlayCore::new(widget, root, root),
            backdrop,
            card,
            open_button,
            close_button,
        })
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    fn open(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_open(ui) {
            return;
        }
        ui.dom.set_display(self.open_button, false);
        let tl = timeline()
            .motion_at(0.0, self.backdrop, &MotionPreset::backdrop_in())
            .motion_at(60.0, self.card, &MotionPreset::card_in());
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn close(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_close(ui) {
            return;
        }
        let root = self.core.root();
        let open_button = self.open_button;
        let tl = timeline()
            .motion_at(0.0, self.card, &MotionPreset::card_out())
            .motion_at(50.0, self.backdrop, &MotionPreset::backdrop_out())
            .on_complete(move |dom| {
                dom.set_display(root, false);
                dom.set_display(open_button, true);
            });
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }
}

impl Widget for Dialog {
    fn name(&self) -> &'static str {
        "dialog"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        if ui.dom.contains(self.open_button, target) {
            self.open(ui);
            return;
        }
        if !self.core.is_open() {
            return;
        }
        if self
            .close_button
            .is_some_and(|button| ui.dom.contains(button, target))
        {
            self.close(ui);
            return;
        }
        // The card sits on top of the backdrop, so a click that reaches the
        // backdrop missed the card. Modal: clicks elsewhere are ignored.
        if ui.dom.contains(self.backdrop, target) && !ui.dom.contains(self.card, target) {
            self.close(ui);
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if let Some(phase) = self.core.tween_finished(id) {
            debug!(?phase, "dialog settled");
        }
    }

    fn dismiss(&mut self, ui: &mut Ui<'_>) {
        self.close(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayPhase;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::{TweenEngine, TweenScheduler};
    use vitrine_core::dom::{MemoryDom, ViewNode};

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("button").id("dialog-open").text("Open dialog"),
            ViewNode::new("div").id("dialog").child(
                ViewNode::new("div").id("dialog-backdrop"),
            ).child(
                ViewNode::new("div")
                    .id("dialog-card")
                    .child(ViewNode::new("button").id("dialog-close").text("Got it")),
            ),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        dialog: Dialog,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = markup();
            let dialog =
                Dialog::mount(&mut dom, WidgetId::default(), DialogConfig::default()).unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                dialog,
            }
        }

        fn click(&mut self, id: &str) {
            let target = self.dom.element_by_id(id).unwrap();
            let mut event = Event::click(target);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            self.dialog.handle_event(&mut event, &mut ui);
        }

        fn tick(&mut self, ms: f32) {
            let finished = self.sched.tick(ms, &mut self.dom);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            for id in finished {
                self.dialog.tween_finished(id, &mut ui);
            }
        }
    }

    #[test]
    fn opening_hides_the_trigger_and_shows_the_container() {
        let mut fx = Fixture::new();
        let root = fx.dom.element_by_id("dialog").unwrap();
        let open_button = fx.dom.element_by_id("dialog-open").unwrap();

        fx.click("dialog-open");
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Opening);
        assert!(fx.dom.is_displayed(root));
        assert!(!fx.dom.is_displayed(open_button));
        assert_eq!(fx.overlays.len(), 1);

        // Card entrance: 60ms offset plus 400ms.
        fx.tick(460.0);
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Open);
    }

    #[test]
    fn backdrop_click_closes_but_card_click_does_not() {
        let mut fx = Fixture::new();
        fx.click("dialog-open");
        fx.tick(460.0);

        fx.click("dialog-card");
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Open);

        fx.click("dialog-backdrop");
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Closing);

        // Exit: card 250ms, backdrop ends at 50 + 250 = 300ms.
        let root = fx.dom.element_by_id("dialog").unwrap();
        let open_button = fx.dom.element_by_id("dialog-open").unwrap();
        fx.tick(300.0);
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Closed);
        assert!(!fx.dom.is_displayed(root));
        assert!(fx.dom.is_displayed(open_button));
    }

    #[test]
    fn close_button_closes() {
        let mut fx = Fixture::new();
        fx.click("dialog-open");
        fx.tick(460.0);
        fx.click("dialog-close");
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Closing);
        assert!(fx.overlays.is_empty());
    }

    #[test]
    fn reopen_mid_close_kills_the_exit_and_lands_open() {
        let mut fx = Fixture::new();
        fx.click("dialog-open");
        fx.tick(460.0);
        fx.click("dialog-backdrop");
        fx.tick(150.0);

        fx.click("dialog-open");
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Opening);
        assert_eq!(fx.sched.active_count(), 1, "the exit must be killed");

        let root = fx.dom.element_by_id("dialog").unwrap();
        let open_button = fx.dom.element_by_id("dialog-open").unwrap();
        fx.tick(460.0);
        assert_eq!(fx.dialog.core.phase(), OverlayPhase::Open);
        assert!(fx.dom.is_displayed(root));
        assert!(
            !fx.dom.is_displayed(open_button),
            "the killed exit must not re-show the trigger"
        );
    }
}
