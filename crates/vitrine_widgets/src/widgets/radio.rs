//! Radio plan picker
//!
//! A hard-coded list of hosting plans with exactly one checked. Selection
//! re-renders the whole option list from view records rather than patching
//! classes in place. Mounting plays a staggered slide-in across the rows,
//! and the first selection supersedes whatever is left of it.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, Stagger, TweenEngine, TweenId};
use vitrine_core::dom::{DomTree, ElementId, ViewNode};
use vitrine_core::events::{event_types, Event, KeyCode};

use crate::page::{Ui, Widget};
use crate::widgets::shared::{plans, require, Plan};

#[derive(Clone, Debug)]
pub struct RadioConfig {
    pub root: String,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            root: "plans".into(),
        }
    }
}

pub struct RadioGroup {
    root: ElementId,
    plans: Vec<Plan>,
    selected: usize,
    rows: Vec<ElementId>,
    entrance: Option<TweenId>,
}

impl RadioGroup {
    /// Bind to existing markup, render the plans, and play the entrance
    pub fn mount(
        dom: &mut dyn DomTree,
        anim: &mut dyn TweenEngine,
        config: RadioConfig,
    ) -> Option<Self> {
        let root = require(dom, &config.root, "radio-group")?;
        let plans = plans();
        let rows = dom.replace_children(root, &plan_rows(&plans, 0));

        let stagger = Stagger::each(100.0);
        let slide = MotionPreset::row_slide_in();
        let mut tl = timeline();
        for (index, &row) in rows.iter().enumerate() {
            tl = tl.motion_at(stagger.delay_for_index(index, rows.len()), row, &slide);
        }
        let entrance = Some(anim.timeline(dom, tl));

        Some(Self {
            root,
            plans,
            selected: 0,
            rows,
            entrance,
        })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn select(&mut self, ui: &mut Ui<'_>, index: usize) {
        if let Some(id) = self.entrance.take() {
            ui.anim.kill(id);
        }
        for &row in &self.rows {
            ui.anim.kill_tweens_of(row);
        }
        self.selected = index;
        self.rows = ui
            .dom
            .replace_children(self.root, &plan_rows(&self.plans, index));
        MotionPreset::row_pulse().start(ui.anim, ui.dom, self.rows[index]);
        debug!(index, "plan selected");
    }

    fn row_hit(&self, dom: &dyn DomTree, target: ElementId) -> Option<usize> {
        self.rows.iter().position(|&r| dom.contains(r, target))
    }
}

impl Widget for RadioGroup {
    fn name(&self) -> &'static str {
        "radio-group"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        match event.event_type {
            event_types::CLICK => {
                let Some(target) = event.target else {
                    return;
                };
                if let Some(index) = self.row_hit(ui.dom, target) {
                    self.select(ui, index);
                }
            }
            event_types::KEY_DOWN => {
                if !matches!(event.key(), Some(KeyCode::ENTER) | Some(KeyCode::SPACE)) {
                    return;
                }
                let Some(target) = event.target else {
                    return;
                };
                let Some(index) = self.row_hit(ui.dom, target) else {
                    return;
                };
                // Suppress the default action before mutating anything.
                event.prevent_default();
                self.select(ui, index);
            }
            _ => {}
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if self.entrance == Some(id) {
            self.entrance = None;
            debug!("plan entrance settled");
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Build one row per plan, with the selected row carrying `checked`
pub fn plan_rows(plans: &[Plan], selected: usize) -> Vec<ViewNode> {
    plans
        .iter()
        .enumerate()
        .map(|(index, plan)| {
            let mut row = ViewNode::new("div")
                .id(format!("plan-{}", plan.id))
                .class("plan")
                .attr("tabindex", "0")
                .child(ViewNode::new("span").class("plan-name").text(plan.name))
                .child(
                    ViewNode::new("span")
                        .class("plan-specs")
                        .text(format!("{} / {} / {}", plan.ram, plan.cpus, plan.disk)),
                );
            if index == selected {
                row = row.class("checked");
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::TweenScheduler;
    use vitrine_core::dom::MemoryDom;

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("div").id("plans"),
            ViewNode::new("div").id("elsewhere"),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        radio: RadioGroup,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = markup();
            let mut sched = TweenScheduler::new();
            let radio = RadioGroup::mount(&mut dom, &mut sched, RadioConfig::default()).unwrap();
            Self {
                dom,
                sched,
                overlays: OverlayRegistry::new(),
                radio,
            }
        }

        fn send(&mut self, event: &mut Event) {
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            self.radio.handle_event(event, &mut ui);
        }

        fn click(&mut self, id: &str) {
            let target = self.dom.element_by_id(id).unwrap();
            self.send(&mut Event::click(target));
        }

        fn tick(&mut self, ms: f32) {
            let finished = self.sched.tick(ms, &mut self.dom);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            for id in finished {
                self.radio.tween_finished(id, &mut ui);
            }
        }

        fn has_checked(&self, id: &str) -> bool {
            let el = self.dom.element_by_id(id).unwrap();
            self.dom.has_class(el, "checked")
        }
    }

    #[test]
    fn mounts_rendering_all_plans_with_a_staggered_entrance() {
        let mut fx = Fixture::new();
        let root = fx.dom.element_by_id("plans").unwrap();
        assert_eq!(fx.dom.children(root).len(), 3);
        assert!(fx.has_checked("plan-startup"));
        assert!(!fx.has_checked("plan-business"));
        assert_eq!(fx.sched.active_count(), 1);

        fx.tick(1000.0);
        assert!(fx.sched.is_idle());
        assert!(fx.radio.entrance.is_none());
        let first = fx.dom.element_by_id("plan-startup").unwrap();
        assert_eq!(fx.dom.visual(first).x, Some(0.0));
    }

    #[test]
    fn selecting_re_renders_with_exactly_one_checked() {
        let mut fx = Fixture::new();
        fx.click("plan-business");
        assert_eq!(fx.radio.selected(), 1);
        assert!(fx.has_checked("plan-business"));
        assert!(!fx.has_checked("plan-startup"));
        assert_eq!(fx.sched.active_count(), 1, "entrance killed, pulse live");
    }

    #[test]
    fn enter_selects_and_suppresses_the_default() {
        let mut fx = Fixture::new();
        let row = fx.dom.element_by_id("plan-enterprise").unwrap();
        let mut event = Event::key_down(Some(row), KeyCode::ENTER);
        fx.send(&mut event);

        assert!(event.default_prevented);
        assert_eq!(fx.radio.selected(), 2);
    }

    #[test]
    fn space_selects_too() {
        let mut fx = Fixture::new();
        let row = fx.dom.element_by_id("plan-business").unwrap();
        fx.send(&mut Event::key_down(Some(row), KeyCode::SPACE));
        assert_eq!(fx.radio.selected(), 1);
    }

    #[test]
    fn keys_outside_any_row_do_nothing() {
        let mut fx = Fixture::new();
        let outside = fx.dom.element_by_id("elsewhere").unwrap();
        let mut event = Event::key_down(Some(outside), KeyCode::ENTER);
        fx.send(&mut event);

        assert!(!event.default_prevented);
        assert_eq!(fx.radio.selected(), 0);
    }
}
