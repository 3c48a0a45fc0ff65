//! Disclosure group
//!
//! Collapsible sections driven by height: a closed panel sits at height zero
//! and expands to its natural height. In exclusive mode (the default) opening
//! one section collapses every other open section, accordion style. Sections
//! are plain in-page content, so they never join the overlay registry.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};
use vitrine_core::Visual;

use crate::overlay::OverlayPhase;
use crate::page::{Ui, Widget};

/// Element ids for one collapsible section
#[derive(Clone, Debug)]
pub struct DisclosureItemIds {
    pub root: String,
    pub trigger: String,
    pub panel: String,
    pub chevron: Option<String>,
}

impl DisclosureItemIds {
    /// Conventional ids derived from a stem: `{stem}`, `{stem}-trigger`,
    /// `{stem}-panel`, `{stem}-chevron`
    pub fn from_stem(stem: &str) -> Self {
        Self {
            root: stem.to_string(),
            trigger: format!("{stem}-trigger"),
            panel: format!("{stem}-panel"),
            chevron: Some(format!("{stem}-chevron")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DisclosureConfig {
    pub items: Vec<DisclosureItemIds>,
    /// Opening a section closes the others
    pub exclusive: bool,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            items: vec![
                DisclosureItemIds::from_stem("disclosure-1"),
                DisclosureItemIds::from_stem("disclosure-2"),
            ],
            exclusive: true,
        }
    }
}

struct Section {
    root: ElementId,
    trigger: ElementId,
    panel: ElementId,
    chevron: Option<ElementId>,
    phase: OverlayPhase,
    transition: Option<TweenId>,
}

pub struct Disclosure {
    sections: Vec<Section>,
    exclusive: bool,
}

impl Disclosure {
    /// Bind to existing markup. Sections with missing elements are skipped;
    /// mounting fails only when none remain.
    pub fn mount(dom: &mut dyn DomTree, config: DisclosureConfig) -> Option<Self> {
        let mut sections = Vec::new();
        for ids in &config.items {
            let (Some(root), Some(trigger), Some(panel)) = (
                dom.element_by_id(&ids.root),
                dom.element_by_id(&ids.trigger),
                dom.element_by_id(&ids.panel),
            ) else {
                debug!(root = %ids.root, "disclosure section markup incomplete, skipped");
                continue;
            };
            let chevron = ids.chevron.as_deref().and_then(|id| dom.element_by_id(id));
            dom.merge_visual(panel, &Visual::opacity(0.0).with_height(0.0));
            sections.push(Section {
                root,
                trigger,
                panel,
                chevron,
                phase: OverlayPhase::Closed,
                transition: None,
            });
        }
        if sections.is_empty() {
            debug!("no disclosure sections found, widget not mounted");
            return None;
        }
        Some(Self {
            sections,
            exclusive: config.exclusive,
        })
    }

    pub fn open_count(&self) -> usize {
        self.sections.iter().filter(|s| s.phase.is_open()).count()
    }

    fn toggle(&mut self, ui: &mut Ui<'_>, index: usize) {
        if self.sections[index].phase.is_open() {
            self.collapse(ui, index);
        } else {
            self.expand(ui, index);
        }
    }

    fn expand(&mut self, ui: &mut Ui<'_>, index: usize) {
        if self.exclusive {
            for other in 0..self.sections.len() {
                if other != index && self.sections[other].phase.is_open() {
                    self.collapse(ui, other);
                }
            }
        }
        let section = &mut self.sections[index];
        if section.phase.is_open() {
            return;
        }
        if let Some(id) = section.transition.take() {
            ui.anim.kill(id);
        }
        section.phase = OverlayPhase::Opening;
        ui.dom.set_attr(section.root, "open", "");

        let natural = ui.dom.natural_height(section.panel);
        let mut tl = timeline().motion_at(0.0, section.panel, &MotionPreset::expand_open(natural));
        if let Some(chevron) = section.chevron {
            tl = tl.motion_at(0.0, chevron, &MotionPreset::chevron_open());
        }
        section.transition = Some(ui.anim.timeline(ui.dom, tl));
    }

    fn collapse(&mut self, ui: &mut Ui<'_>, index: usize) {
        let section = &mut self.sections[index];
        if !section.phase.is_open() {
            return;
        }
        if let Some(id) = section.transition.take() {
            ui.anim.kill(id);
        }
        section.phase = OverlayPhase::Closing;

        let root = section.root;
        let mut tl = timeline()
            .motion_at(0.0, section.panel, &MotionPreset::expand_close())
            .on_complete(move |dom| dom.remove_attr(root, "open"));
        if let Some(chevron) = section.chevron {
            tl = tl.motion_at(0.0, chevron, &MotionPreset::chevron_close());
        }
        section.transition = Some(ui.anim.timeline(ui.dom, tl));
    }
}

impl Widget for Disclosure {
    fn name(&self) -> &'static str {
        "disclosure"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        let hit = self
            .sections
            .iter()
            .position(|s| ui.dom.contains(s.trigger, target));
        if let Some(index) = hit {
            self.toggle(ui, index);
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        for section in &mut self.sections {
            if section.transition != Some(id) {
                continue;
            }
            section.transition = None;
            section.phase = match section.phase {
                OverlayPhase::Opening => OverlayPhase::Open,
                OverlayPhase::Closing => OverlayPhase::Closed,
                settled => settled,
            };
            debug!(phase = ?section.phase, "disclosure section settled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OverlayRegistry;
    use vitrine_animation::{TweenEngine, TweenScheduler};
    use vitrine_core::dom::{MemoryDom, ViewNode};

    fn section_markup(stem: &str) -> ViewNode {
        ViewNode::new("div").id(stem).child(
            ViewNode::new("button")
                .id(format!("{stem}-trigger"))
                .child(ViewNode::new("span").id(format!("{stem}-chevron"))),
        ).child(ViewNode::new("div").id(format!("{stem}-panel")))
    }

    struct Fixture {
        dom: MemoryDom,
        sched: TweenScheduler,
        overlays: OverlayRegistry,
        disclosure: Disclosure,
    }

    impl Fixture {
        fn new(exclusive: bool) -> Self {
            let mut dom = MemoryDom::build(&[
                section_markup("disclosure-1"),
                section_markup("disclosure-2"),
            ]);
            for stem in ["disclosure-1", "disclosure-2"] {
                let panel = dom.element_by_id(&format!("{stem}-panel")).unwrap();
                dom.set_natural_height(panel, 120.0);
            }
            let disclosure = Disclosure::mount(
                &mut dom,
                DisclosureConfig {
                    exclusive,
                    ..DisclosureConfig::default()
                },
            )
            .unwrap();
            Self {
                dom,
                sched: TweenScheduler::new(),
                overlays: OverlayRegistry::new(),
                disclosure,
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
            self.disclosure.handle_event(&mut event, &mut ui);
        }

        fn tick(&mut self, ms: f32) {
            let finished = self.sched.tick(ms, &mut self.dom);
            let mut ui = Ui {
                dom: &mut self.dom,
                anim: &mut self.sched,
                overlays: &mut self.overlays,
            };
            for id in finished {
                self.disclosure.tween_finished(id, &mut ui);
            }
        }
    }

    #[test]
    fn expand_animates_to_natural_height_and_marks_open() {
        let mut fx = Fixture::new(true);
        let root = fx.dom.element_by_id("disclosure-1").unwrap();
        let panel = fx.dom.element_by_id("disclosure-1-panel").unwrap();

        fx.click("disclosure-1-trigger");
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Opening);
        assert!(fx.dom.attr(root, "open").is_some());

        fx.tick(500.0);
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Open);
        assert_eq!(fx.dom.visual(panel).height, Some(120.0));
    }

    #[test]
    fn exclusive_mode_collapses_the_other_section() {
        let mut fx = Fixture::new(true);
        fx.click("disclosure-1-trigger");
        fx.tick(500.0);

        fx.click("disclosure-2-trigger");
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Closing);
        assert_eq!(fx.disclosure.sections[1].phase, OverlayPhase::Opening);

        fx.tick(500.0);
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Closed);
        assert_eq!(fx.disclosure.sections[1].phase, OverlayPhase::Open);
        assert_eq!(fx.disclosure.open_count(), 1);
        let root1 = fx.dom.element_by_id("disclosure-1").unwrap();
        assert!(fx.dom.attr(root1, "open").is_none());
    }

    #[test]
    fn multi_mode_leaves_other_sections_alone() {
        let mut fx = Fixture::new(false);
        fx.click("disclosure-1-trigger");
        fx.click("disclosure-2-trigger");
        fx.tick(500.0);
        assert_eq!(fx.disclosure.open_count(), 2);
    }

    #[test]
    fn retoggle_mid_expand_kills_and_reverses() {
        let mut fx = Fixture::new(true);
        fx.click("disclosure-1-trigger");
        fx.tick(250.0);

        fx.click("disclosure-1-trigger");
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Closing);
        assert_eq!(fx.sched.active_count(), 1);

        fx.tick(400.0);
        assert_eq!(fx.disclosure.sections[0].phase, OverlayPhase::Closed);
    }

    #[test]
    fn chevron_rotates_with_the_section() {
        let mut fx = Fixture::new(true);
        let chevron = fx.dom.element_by_id("disclosure-1-chevron").unwrap();
        fx.click("disclosure-1-trigger");
        fx.tick(500.0);
        assert_eq!(fx.dom.visual(chevron).rotation, Some(180.0));
    }
}
