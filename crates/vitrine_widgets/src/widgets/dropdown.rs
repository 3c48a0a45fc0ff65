//! Dropdown menu
//!
//! A trigger button toggling a panel of menu items. Opening plays the panel
//! entrance with every row staggered in behind it and the chevron rotating
//! half a turn alongside; all of it is one timeline, so superseding the
//! transition mid-flight is a single kill.
//!
//! # Example
//!
//! ```ignore
//! let dropdown = page.mount(|id| Dropdown::mount(&mut dom, id, DropdownConfig::default()));
//! ```

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, Stagger, TweenId};
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};

use crate::overlay::OverlayCore;
use crate::page::{Ui, Widget, WidgetId};
use crate::widgets::shared::require;

/// Element ids the dropdown binds to
#[derive(Clone, Debug)]
pub struct DropdownConfig {
    pub root: String,
    pub trigger: String,
    pub panel: String,
    pub chevron: Option<String>,
    /// Class toggled on the root while open
    pub open_class: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            root: "dropdown".into(),
            trigger: "dropdown-trigger".into(),
            panel: "dropdown-menu".into(),
            chevron: Some("dropdown-chevron".into()),
            open_class: "open".into(),
        }
    }
}

pub struct Dropdown {
    core: OverlayCore,
    trigger: ElementId,
    chevron: Option<ElementId>,
    open_class: String,
}

impl Dropdown {
    /// Bind to existing markup. Returns `None` when the root, trigger, or
    /// panel is missing; a missing chevron only skips its rotation.
    pub fn mount(dom: &mut dyn DomTree, widget: WidgetId, config: DropdownConfig) -> Option<Self> {
        let root = require(dom, &config.root, "dropdown")?;
        let trigger = require(dom, &config.trigger, "dropdown")?;
        let panel = require(dom, &config.panel, "dropdown")?;
        let chevron = config
            .chevron
            .as_deref()
            .and_then(|id| dom.element_by_id(id));

        dom.set_display(panel, false);
        Some(Self {
            core: OverlayCore::new(widget, root, panel),
            trigger,
            chevron,
            open_class: config.open_class,
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
        ui.dom.add_class(self.core.root(), &self.open_class);

        let panel = self.core.panel();
        let rows = ui.dom.children(panel);
        let stagger = Stagger::each(40.0).start_at(50.0);
        let row_in = MotionPreset::menu_item_in();

        let mut tl = timeline().motion_at(0.0, panel, &MotionPreset::menu_in());
        for (index, row) in rows.iter().enumerate() {
            tl = tl.motion_at(stagger.delay_for_index(index, rows.len()), *row, &row_in);
        }
        if let Some(chevron) = self.chevron {
            tl = tl.motion_at(0.0, chevron, &MotionPreset::chevron_open());
        }
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn close(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_close(ui) {
            return;
        }
        ui.dom.remove_class(self.core.root(), &self.open_class);

        let panel = self.core.panel();
        let mut tl = timeline()
            .motion_at(0.0, panel, &MotionPreset::menu_out())
            .on_complete(move |dom| dom.set_display(panel, false));
        if let Some(chevron) = self.chevron {
            tl = tl.motion_at(0.0, chevron, &MotionPreset::chevron_close());
        }
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }
}

impl Widget for Dropdown {
    fn name(&self) -> &'static str {
        "dropdown"
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
            // A click on a menu row acts on the row and closes the menu.
            if self.core.is_open() && ui.dom.contains(self.core.panel(), target) {
                self.close(ui);
                return;
            }
        }
        if self.core.dismissed_by(ui.dom, event) {
            self.close(ui);
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if let Some(phase) = self.core.tween_finished(id) {
            debug!(?phase, "dropdown settled");
        }
    }

    fn dismiss(&mut self, ui: &mut Ui<'_>) {
        self.close(ui);
    }
}
