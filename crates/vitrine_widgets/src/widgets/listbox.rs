//! Listbox select
//!
//! A button labelled with the current choice; clicking it drops a panel of
//! options. Picking an option updates the label, re-renders the check mark,
//! and closes the panel.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, Stagger, TweenId};
use vitrine_core::dom::{DomTree, ElementId, ViewNode};
use vitrine_core::events::{event_types, Event};

use crate::overlay::OverlayCore;
use crate::page::{Ui, Widget, WidgetId};
use crate::widgets::shared::{listbox_people, require, OptionItem};

/// Element ids the listbox binds to
#[derive(Clone, Debug)]
pub struct ListboxConfig {
    pub root: String,
    pub trigger: String,
    /// Label inside the trigger showing the current choice
    pub label: String,
    pub panel: String,
    /// Initially selected option id
    pub selected: u32,
}

impl Default for ListboxConfig {
    fn default() -> Self {
        Self {
            root: "listbox".into(),
            trigger: "listbox-button".into(),
            label: "listbox-label".into(),
            panel: "listbox-options".into(),
            selected: 2,
        }
    }
}

pub struct Listbox {
    core: OverlayCore,
    trigger: ElementId,
    label: ElementId,
    items: Vec<OptionItem>,
    selected: u32,
    /// Rendered rows, aligned with `items`
    rows: Vec<(ElementId, u32)>,
}

impl Listbox {
    pub fn mount(dom: &mut dyn DomTree, widget: WidgetId, config: ListboxConfig) -> Option<Self> {
        let root = require(dom, &config.root, "listbox")?;
        let trigger = require(dom, &config.trigger, "listbox")?;
        let label = require(dom, &config.label, "listbox")?;
        let panel = require(dom, &config.panel, "listbox")?;

        let items = listbox_people();
        let selected = if items.iter().any(|i| i.id == config.selected) {
            config.selected
        } else {
            items[0].id
        };
        if let Some(item) = items.iter().find(|i| i.id == selected) {
            dom.set_text(label, item.name);
        }
        dom.set_display(panel, false);

        Some(Self {
            core: OverlayCore::new(widget, root, panel),
            trigger,
            label,
            items,
            selected,
            rows: Vec::new(),
        })
    }

    pub fn selected(&self) -> u32 {
        self.selected
    }

    fn toggle(&mut self, ui: &mut Ui<'_>) {
        if self.core.is_open() {
            self.close(ui);
        } else {
            self.open(ui);
        }
    }

    fn open(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_open(ui) {
            return;
        }
        let panel = self.core.panel();
        let nodes = listbox_rows(&self.items, self.selected);
        let ids = ui.dom.replace_children(panel, &nodes);
        self.rows = ids
            .into_iter()
            .zip(self.items.iter().map(|i| i.id))
            .collect();

        let stagger = Stagger::each(30.0).start_at(40.0);
        let row_in = MotionPreset::menu_item_in();
        let mut tl = timeline().motion_at(0.0, panel, &MotionPreset::menu_in());
        for (index, (row, _)) in self.rows.iter().enumerate() {
            tl = tl.motion_at(stagger.delay_for_index(index, self.rows.len()), *row, &row_in);
        }
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn close(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_close(ui) {
            return;
        }
        let panel = self.core.panel();
        let tl = timeline()
            .motion_at(0.0, panel, &MotionPreset::menu_out())
            .on_complete(move |dom| dom.set_display(panel, false));
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn select(&mut self, ui: &mut Ui<'_>, option_id: u32) {
        let Some(item) = self.items.iter().find(|i| i.id == option_id) else {
            return;
        };
        self.selected = option_id;
        ui.dom.set_text(self.label, item.name);
        debug!(option_id, name = item.name, "listbox selection");
        self.close(ui);
    }
}

/// Render the option rows; the selected row carries its check mark
pub fn listbox_rows(items: &[OptionItem], selected: u32) -> Vec<ViewNode> {
    items
        .iter()
        .map(|item| {
            let mut row = ViewNode::new("li")
                .class("listbox-option")
                .attr("data-option-id", item.id.to_string())
                .child(
                    ViewNode::new("span")
                        .class("option-label")
                        .text(item.name),
                );
            if item.id == selected {
                row = row
                    .class("selected")
                    .child(ViewNode::new("span").class("option-check"));
            }
            row
        })
        .collect()
}

impl Widget for Listbox {
    fn name(&self) -> &'static str {
        "listbox"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        if let Some(target) = event.target {
            if ui.dom.contains(self.trigger, target) {
                self.toggle(ui);
                return;
            }
            if self.core.is_open() {
                let hit = self
                    .rows
                    .iter()
                    .find(|(row, _)| ui.dom.contains(*row, target))
                    .map(|(_, id)| *id);
                if let Some(option_id) = hit {
                    self.select(ui, option_id);
                    return;
                }
            }
        }
        if self.core.dismissed_by(ui.dom, event) {
            self.close(ui);
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if let Some(phase) = self.core.tween_finished(id) {
            debug!(?phase, "listbox settled");
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
    use vitrine_core::dom::MemoryDom;

    fn markup() -> MemoryDom {
        MemoryDom::build(&[
            ViewNode::new("div").id("listbox").child(
                ViewNode::new("button")
                    .id("listbox-button")
                    .child(ViewNode::new("span").id("listbox-label")),
            ).child(ViewNode::new("ul").id("listbox-options")),
            ViewNode::new("div").id("elsewhere"),
        ])
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        listbox: Listbox,
    }

    impl Fixture {
        fn new() -> Self {
            let mut dom = markup();
            let listbox =
                Listbox::mount(&mut dom, WidgetId::default(), ListboxConfig::default()).unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                listbox,
            }
        }

        fn click_el(&mut self, target: ElementId) {
            let mut event = Event::click(target);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            self.listbox.handle_event(&mut event, &mut ui);
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
                self.listbox.tween_finished(id, &mut ui);
            }
        }
    }

    #[test]
    fn mounts_with_the_default_choice_in_the_label() {
        let fx = Fixture::new();
        let label = fx.dom.element_by_id("listbox-label").unwrap();
        assert_eq!(fx.dom.text(label).as_deref(), Some("Wade Cooper"));
        assert_eq!(fx.listbox.selected(), 2);
    }

    #[test]
    fn open_renders_a_row_per_option_with_one_check() {
        let mut fx = Fixture::new();
        fx.click("listbox-button");
        assert_eq!(fx.listbox.rows.len(), 5);

        let panel = fx.dom.element_by_id("listbox-options").unwrap();
        let rows = fx.dom.children(panel);
        let checked: Vec<_> = rows
            .iter()
            .filter(|r| fx.dom.has_class(**r, "selected"))
            .collect();
        assert_eq!(checked.len(), 1);
    }

    #[test]
    fn selecting_id_3_sets_the_label_and_lands_closed() {
        let mut fx = Fixture::new();
        fx.click("listbox-button");
        fx.tick(500.0);
        assert_eq!(fx.listbox.core.phase(), OverlayPhase::Open);

        let row = fx
            .listbox
            .rows
            .iter()
            .find(|(_, id)| *id == 3)
            .map(|(row, _)| *row)
            .unwrap();
        fx.click_el(row);

        let label = fx.dom.element_by_id("listbox-label").unwrap();
        assert_eq!(fx.dom.text(label).as_deref(), Some("Tanya Fox"));
        assert_eq!(fx.listbox.selected(), 3);
        assert_eq!(fx.listbox.core.phase(), OverlayPhase::Closing);

        fx.tick(200.0);
        assert_eq!(fx.listbox.core.phase(), OverlayPhase::Closed);
        let panel = fx.dom.element_by_id("listbox-options").unwrap();
        assert!(!fx.dom.is_displayed(panel));
    }

    #[test]
    fn reopening_shows_the_check_on_the_new_choice() {
        let mut fx = Fixture::new();
        fx.click("listbox-button");
        fx.tick(500.0);
        let row = fx.listbox.rows.iter().find(|(_, id)| *id == 3).unwrap().0;
        fx.click_el(row);
        fx.tick(200.0);

        fx.click("listbox-button");
        let checked_id = fx
            .listbox
            .rows
            .iter()
            .find(|(row, _)| fx.dom.has_class(*row, "selected"))
            .map(|(_, id)| *id);
        assert_eq!(checked_id, Some(3));
    }

    #[test]
    fn outside_click_closes() {
        let mut fx = Fixture::new();
        fx.click("listbox-button");
        fx.tick(500.0);
        fx.click("elsewhere");
        assert_eq!(fx.listbox.core.phase(), OverlayPhase::Closing);
    }
}
