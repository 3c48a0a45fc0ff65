//! Checkbox rows
//!
//! Plain toggle rows: clicking flips the row's checked state and class and
//! plays a short scale pulse. State is seeded from the markup, so rows that
//! ship with the checked class start checked.

use tracing::debug;

use vitrine_animation::MotionPreset;
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};

use crate::page::{Ui, Widget};

#[derive(Clone, Debug)]
pub struct CheckboxConfig {
    pub rows: Vec<String>,
    pub checked_class: String,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            rows: vec![
                "check-comments".into(),
                "check-candidates".into(),
                "check-offers".into(),
            ],
            checked_class: "checked".into(),
        }
    }
}

struct CheckRow {
    element: ElementId,
    checked: bool,
}

pub struct Checkboxes {
    rows: Vec<CheckRow>,
    checked_class: String,
}

impl Checkboxes {
    pub fn mount(dom: &mut dyn DomTree, config: CheckboxConfig) -> Option<Self> {
        let mut rows = Vec::new();
        for id in &config.rows {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "checkbox row missing, skipped");
                continue;
            };
            let checked = dom.has_class(element, &config.checked_class);
            rows.push(CheckRow { element, checked });
        }
        if rows.is_empty() {
            debug!("no checkbox rows found, widget not mounted");
            return None;
        }
        Some(Self {
            rows,
            checked_class: config.checked_class,
        })
    }

    fn toggle(&mut self, ui: &mut Ui<'_>, index: usize) {
        let row = &mut self.rows[index];
        row.checked = !row.checked;
        if row.checked {
            ui.dom.add_class(row.element, &self.checked_class);
        } else {
            ui.dom.remove_class(row.element, &self.checked_class);
        }
        ui.anim.kill_tweens_of(row.element);
        MotionPreset::row_pulse().start(ui.anim, ui.dom, row.element);
        debug!(index, checked = row.checked, "checkbox toggled");
    }
}

impl Widget for Checkboxes {
    fn name(&self) -> &'static str {
        "checkboxes"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        let hit = self
            .rows
            .iter()
            .position(|r| ui.dom.contains(r.element, target));
        if let Some(index) = hit {
            self.toggle(ui, index);
        }
    }
}
