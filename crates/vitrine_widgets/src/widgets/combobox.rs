//! Combobox
//!
//! A text input filtering a panel of options as the user types. Filtering is
//! case-insensitive substring match; an empty query shows everything and an
//! empty result set shows a placeholder row. Closing restores the input to
//! the committed selection and resets the query, so the next open starts
//! from the full list.

use tracing::debug;

use vitrine_animation::{timeline, MotionPreset, TweenId};
use vitrine_core::dom::{DomTree, ElementId, ViewNode};
use vitrine_core::events::{event_types, Event, EventData};

use crate::overlay::OverlayCore;
use crate::page::{Ui, Widget, WidgetId};
use crate::widgets::shared::{combobox_people, require, OptionItem};

/// Element ids the combobox binds to
#[derive(Clone, Debug)]
pub struct ComboboxConfig {
    pub root: String,
    pub input: String,
    pub panel: String,
    /// Optional chevron button toggling the panel
    pub button: Option<String>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            root: "combobox".into(),
            input: "combobox-input".into(),
            panel: "combobox-options".into(),
            button: Some("combobox-button".into()),
        }
    }
}

pub struct Combobox {
    core: OverlayCore,
    input: ElementId,
    button: Option<ElementId>,
    items: Vec<OptionItem>,
    query: String,
    selected: Option<u32>,
    /// Rendered rows; `None` marks the no-results placeholder
    rows: Vec<(ElementId, Option<u32>)>,
}

impl Combobox {
    pub fn mount(dom: &mut dyn DomTree, widget: WidgetId, config: ComboboxConfig) -> Option<Self> {
        let root = require(dom, &config.root, "combobox")?;
        let input = require(dom, &config.input, "combobox")?;
        let panel = require(dom, &config.panel, "combobox")?;
        let button = config
            .button
            .as_deref()
            .and_then(|id| dom.element_by_id(id));

        dom.set_display(panel, false);
        Some(Self {
            core: OverlayCore::new(widget, root, panel),
            input,
            button,
            items: combobox_people(),
            query: String::new(),
            selected: None,
            rows: Vec::new(),
        })
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn render_options(&mut self, dom: &mut dyn DomTree) {
        let matches = filter_options(&self.items, &self.query);
        let nodes = combobox_rows(&matches, self.selected);
        let ids = dom.replace_children(self.core.panel(), &nodes);
        self.rows = if matches.is_empty() {
            ids.into_iter().map(|el| (el, None)).collect()
        } else {
            ids.into_iter()
                .zip(matches.iter().map(|i| Some(i.id)))
                .collect()
        };
    }

    fn open(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_open(ui) {
            return;
        }
        self.render_options(ui.dom);
        let panel = self.core.panel();
        let tl = timeline().motion_at(0.0, panel, &MotionPreset::panel_pop_in());
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn close(&mut self, ui: &mut Ui<'_>) {
        if !self.core.begin_close(ui) {
            return;
        }
        // Restore the committed selection and forget the query.
        let restored = self
            .selected
            .and_then(|id| self.items.iter().find(|i| i.id == id))
            .map(|i| i.name)
            .unwrap_or("");
        ui.dom.set_attr(self.input, "value", restored);
        self.query.clear();

        let panel = self.core.panel();
        let tl = timeline()
            .motion_at(0.0, panel, &MotionPreset::panel_drop_out())
            .on_complete(move |dom| dom.set_display(panel, false));
        self.core.set_transition(ui.anim.timeline(ui.dom, tl));
    }

    fn select(&mut self, ui: &mut Ui<'_>, option_id: u32) {
        let Some(item) = self.items.iter().find(|i| i.id == option_id) else {
            return;
        };
        self.selected = Some(option_id);
        debug!(option_id, name = item.name, "combobox selection");
        self.close(ui);
    }

    fn edited(&mut self, ui: &mut Ui<'_>, text: &str) {
        self.query = text.to_string();
        ui.dom.set_attr(self.input, "value", text);
        if self.core.is_open() {
            self.render_options(ui.dom);
        } else {
            self.open(ui);
        }
    }
}

/// Case-insensitive substring filter; an empty query matches everything
pub fn filter_options<'a>(items: &'a [OptionItem], query: &str) -> Vec<&'a OptionItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}

/// Render the filtered rows, or the placeholder when nothing matched
pub fn combobox_rows(matches: &[&OptionItem], selected: Option<u32>) -> Vec<ViewNode> {
    if matches.is_empty() {
        return vec![ViewNode::new("li")
            .class("combobox-empty")
            .text("No results found")];
    }
    matches
        .iter()
        .map(|item| {
            let mut row = ViewNode::new("li")
                .class("combobox-option")
                .attr("data-option-id", item.id.to_string())
                .text(item.name);
            if selected == Some(item.id) {
                row = row.class("selected");
            }
            row
        })
        .collect()
}

impl Widget for Combobox {
    fn name(&self) -> &'static str {
        "combobox"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        match event.event_type {
            event_types::TEXT_INPUT if event.target == Some(self.input) => {
                if let EventData::TextInput { text } = &event.data {
                    let text = text.clone();
                    self.edited(ui, &text);
                }
            }
            event_types::FOCUS if event.target == Some(self.input) => {
                self.open(ui);
            }
            event_types::CLICK => {
                if let Some(target) = event.target {
                    if self
                        .button
                        .is_some_and(|button| ui.dom.contains(button, target))
                    {
                        if self.core.is_open() {
                            self.close(ui);
                        } else {
                            self.open(ui);
                        }
                        return;
                    }
                    if target == self.input {
                        self.open(ui);
                        return;
                    }
                    if self.core.is_open() {
                        let hit = self
                            .rows
                            .iter()
                            .find(|(row, _)| ui.dom.contains(*row, target))
                            .and_then(|(_, id)| *id);
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
            _ => {}
        }
    }

    fn tween_finished(&mut self, id: TweenId, _ui: &mut Ui<'_>) {
        if let Some(phase) = self.core.tween_finished(id) {
            debug!(?phase, "combobox settled");
        }
    }

    fn dismiss(&mut self, ui: &mut Ui<'_>) {
        self.close(ui);
    }
}
