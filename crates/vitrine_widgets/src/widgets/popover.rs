//! Popover
//!
//! A trigger toggling a floating panel with a decorative glow layer. The
//! glow is kept centered on the panel; it realigns when the popover opens
//! and again on every viewport resize while open.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};
use vitrine_core::Visual;

use crate::overlay::OverlayCore;
use crate::page::{Ui, Widget, WidgetId};
use crate::widgets::shared::require;

/// Element ids the popover binds to
#[derive(Clone, Debug)]
pub struct PopoverConfig {
    pub root: String,
    pub trigger: String,
    pub panel: String,
    pub glow: Option<String>,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            root: "popover".into(),
            trigger: "popover-trigger".into(),
            panel: "popover-panel".into(),
            glow: Some("popover-glow".into()),
        }
    }
}

pub struct Popover {
    core: OverlayCore,
    trigger: ElementId,
    glow: Option<ElementId>,
}

impl Popover {
    pub fn mount(dom: &mut dyn DomTree, widget: WidgetId, config: PopoverConfig) -> Option<Self> {
        let root = require(dom, &config.root, "popover")?;
        let trigger = require(dom, &config.trigger, "popover")?;
        let panel = require(dom, &config.panel, "popover")?;
        let glow = config.glow.as_deref().and_then(|id| dom.element_by_id(id));

        dom.set_display(panel, false);
        Some(Self {
            core: OverlayCore::new(widget, root, panel),
            trigger,
            glow,
        })
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
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
        self.realign_glow(ui);
        let panel = self.core.panel();
        let tl = timeline().motion_at(0.0, panel, &MotionPreset::panel_pop_in());
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn close(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_close(ui) {
            return;
        }
        let panel = self.core.panel();
        let tl = timeline()
            .motion_at(0.0, panel, &MotionPreset::panel_drop_out())
            .on_complete(move |dom| dom.set_display(panel, false));
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    /// Center the glow on the panel's current bounds
    fn realign_glow(&self, ui: &mut Ui<'_>) {
        let Some(glow) = self.glow else {
            return;
        };
        let bounds = ui.dom.bounds(self.core.panel());
        let patch = Visual::default()
            .with_x(bounds.width / 2.0)
            .with_y(bounds.height / 2.0);
        ui.anim.set(ui.dom, glow, &patch);
    }
}

impl Widget for Popover {
    fn name(&self) -> &'static str {
        "popover"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        match event.event_type {
            event_types::CLICK => {
                if let Some(target) = event.target {
                    if ui.dom.contains(self.trigger, target) {
                        self.toggle(ui);
                        return;
                    }
                }
                if self.core.dismissed_by(ui.dom, event) {
                    self.close(ui);
                }
            }
            event_types::RESIZE if self.core.is_open() => {
                self.realign_glow(ui);
            }
            _ => {}
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if let Some(phase) = self.core.tween_finished(id) {
            debug!(?phase, "popover settled");
        }
    }

    fn dismiss(&mut self, ui: &mut Ui<'_>) {
        self.close(ui);
    }
}
