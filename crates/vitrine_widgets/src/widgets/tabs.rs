//! Tab strip
//!
//! One panel visible at a time. Switching plays the outgoing panel's exit,
//! then swaps display and active classes, then plays the incoming panel's
//! entrance. The two halves run as separate tweens so a click landing
//! mid-switch can supersede cleanly: the pending handle is killed and the
//! new switch starts from whichever panel is actually on screen.

use tracing::debug;

use vitrine_animation::{MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};

use crate::page::{Ui, Widget};

#[derive(Clone, Debug)]
pub struct TabsConfig {
    /// `(button id, panel id)` pairs in strip order
    pub tabs: Vec<(String, String)>,
    pub active_class: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            tabs: vec![
                ("tab-1".into(), "tab-panel-1".into()),
                ("tab-2".into(), "tab-panel-2".into()),
                ("tab-3".into(), "tab-panel-3".into()),
            ],
            active_class: "active".into(),
        }
    }
}

struct Tab {
    button: ElementId,
    panel: ElementId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Exit,
    Enter,
}

#[derive(Clone, Copy)]
struct Switch {
    from: usize,
    to: usize,
    stage: Stage,
    handle: TweenId,
}

pub struct Tabs {
    tabs: Vec<Tab>,
    active: usize,
    switching: Option<Switch>,
    active_class: String,
}

impl Tabs {
    /// Bind to existing markup. Pairs with missing elements are skipped;
    /// mounting fails only when none remain.
    pub fn mount(dom: &mut dyn DomTree, config: TabsConfig) -> Option<Self> {
        let mut tabs = Vec::new();
        for (button_id, panel_id) in &config.tabs {
            let (Some(button), Some(panel)) =
                (dom.element_by_id(button_id), dom.element_by_id(panel_id))
            else {
                debug!(button = %button_id, "tab markup incomplete, pair skipped");
                continue;
            };
            tabs.push(Tab { button, panel });
        }
        if tabs.is_empty() {
            debug!("no tab pairs found, widget not mounted");
            return None;
        }
        for (index, tab) in tabs.iter().enumerate() {
            dom.set_display(tab.panel, index == 0);
        }
        dom.add_class(tabs[0].button, &config.active_class);
        Some(Self {
            tabs,
            active: 0,
            switching: None,
            active_class: config.active_class,
        })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    fn switch_to(&mut self, ui: &mut Ui<'_>, target: usize) {
        let visible = match self.switching {
            Some(sw) => match sw.stage {
                Stage::Exit => sw.from,
                Stage::Enter => sw.to,
            },
            None => self.active,
        };
        if self.switching.is_none() && target == self.active {
            return;
        }
        if let Some(sw) = self.switching.take() {
            ui.anim.kill(sw.handle);
        }

        let panel = self.tabs[visible].panel;
        if target == visible {
            // Superseded back onto the panel already showing: settle it in
            // place rather than replaying a full exit and entrance.
            let handle = MotionPreset::tab_restore().start(ui.anim, ui.dom, panel);
            self.switching = Some(Switch {
                from: visible,
                to: target,
                stage: Stage::Enter,
                handle,
            });
        } else {
            let handle = MotionPreset::tab_out().start(ui.anim, ui.dom, panel);
            self.switching = Some(Switch {
                from: visible,
                to: target,
                stage: Stage::Exit,
                handle,
            });
        }
    }
}

impl Widget for Tabs {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        let hit = self
            .tabs
            .iter()
            .position(|t| ui.dom.contains(t.button, target));
        if let Some(index) = hit {
            self.switch_to(ui, index);
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
                ui.dom.set_display(self.tabs[sw.from].panel, false);
                ui.dom
                    .remove_class(self.tabs[sw.from].button, &self.active_class);
                ui.dom.add_class(self.tabs[sw.to].button, &self.active_class);
                ui.dom.set_display(self.tabs[sw.to].panel, true);
                let handle =
                    MotionPreset::tab_in().start(ui.anim, ui.dom, self.tabs[sw.to].panel);
                self.switching = Some(Switch {
                    stage: Stage::Enter,
                    handle,
                    ..sw
                });
                debug!(from = sw.from, to = sw.to, "tab entrance started");
            }
            Stage::Enter => {
                self.active = sw.to;
                self.switching = None;
                debug!(active = self.active, "tab switch settled");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::{TweenEngine, TweenScheduler};
    use vitrine_core::dom::{MemoryDom, ViewNode};

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("nav")
                .child(ViewNode::new("button").id("tab-1"))
                .child(ViewNode::new("button").id("tab-2"))
                .child(ViewNode::new("button").id("tab-3")),
            ViewNode::new("div").id("tab-panel-1"),
            ViewNode::new("div").id("tab-panel-2"),
            ViewNode::new("div").id("tab-panel-3"),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        tabs: Tabs,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = markup();
            let tabs = Tabs::mount(&mut dom, TabsConfig::default()).unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                tabs,
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
            self.tabs.handle_event(&mut event, &mut ui);
        }

        fn tick(&mut self, ms: f32) {
            let finished = self.sched.tick(ms, &mut self.dom);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            for id in finished {
                self.tabs.tween_finished(id, &mut ui);
            }
        }

        fn displayed(&self, id: &str) -> bool {
            let el = self.dom.element_by_id(id).unwrap();
            self.dom.is_displayed(el)
        }

        fn has_active(&self, id: &str) -> bool {
            let el = self.dom.element_by_id(id).unwrap();
            self.dom.has_class(el, "active")
        }
    }

    #[test]
    fn mounts_with_the_first_tab_active() {
        let fx = Fixture::new();
        assert!(fx.has_active("tab-1"));
        assert!(fx.displayed("tab-panel-1"));
        assert!(!fx.displayed("tab-panel-2"));
        assert!(!fx.displayed("tab-panel-3"));
    }

    #[test]
    fn switching_sequences_exit_then_enter() {
        let mut fx = Fixture::new();
        fx.click("tab-2");
        assert!(fx.displayed("tab-panel-1"), "exit still playing");

        fx.tick(300.0);
        assert!(!fx.displayed("tab-panel-1"));
        assert!(fx.displayed("tab-panel-2"));
        assert!(fx.has_active("tab-2"));
        assert!(!fx.has_active("tab-1"));
        assert_eq!(fx.tabs.active(), 0, "not settled until the entrance lands");

        fx.tick(500.0);
        assert_eq!(fx.tabs.active(), 1);
        assert!(fx.sched.is_idle());
    }

    #[test]
    fn clicking_the_active_tab_is_a_no_op() {
        let mut fx = Fixture::new();
        fx.click("tab-1");
        assert!(fx.sched.is_idle());
        assert!(fx.has_active("tab-1"));
    }

    #[test]
    fn reclicking_mid_switch_supersedes_the_sequence() {
        let mut fx = Fixture::new();
        fx.click("tab-2");
        fx.tick(150.0);

        fx.click("tab-3");
        assert_eq!(fx.sched.active_count(), 1, "old exit killed");

        fx.tick(300.0);
        fx.tick(500.0);
        assert_eq!(fx.tabs.active(), 2);
        assert!(!fx.displayed("tab-panel-2"), "superseded target never shown");
        assert!(fx.displayed("tab-panel-3"));
        assert!(fx.has_active("tab-3"));
        assert!(!fx.has_active("tab-1"));
    }

    #[test]
    fn clicking_back_to_the_visible_tab_mid_exit_restores_it() {
        let mut fx = Fixture::new();
        let panel1 = fx.dom.element_by_id("tab-panel-1").unwrap();
        fx.click("tab-2");
        fx.tick(150.0);

        fx.click("tab-1");
        assert_eq!(fx.sched.active_count(), 1);

        fx.tick(300.0);
        assert_eq!(fx.tabs.active(), 0);
        assert!(fx.sched.is_idle());
        assert!(fx.displayed("tab-panel-1"));
        assert!(!fx.displayed("tab-panel-2"));
        assert!(fx.has_active("tab-1"));
        assert_eq!(fx.dom.visual(panel1).opacity, Some(1.0));
    }

    #[test]
    fn incomplete_pairs_are_skipped() {
        let mut dom = MemoryDom::build(&[
            ViewNode::new("button").id("tab-1"),
            ViewNode::new("div").id("tab-panel-1"),
            ViewNode::new("button").id("tab-2"),
        ]);
        let tabs = Tabs::mount(&mut dom, TabsConfig::default()).unwrap();
        assert_eq!(tabs.tabs.len(), 1);
    }
}
