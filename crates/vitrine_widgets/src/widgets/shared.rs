//! Data and helpers shared by the widget set

use tracing::debug;

use vitrine_core::dom::{DomTree, ElementId};

/// A selectable entry in a picker widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionItem {
    pub id: u32,
    pub name: &'static str,
}

/// Entries backing the combobox
pub fn combobox_people() -> Vec<OptionItem> {
    vec![
        OptionItem { id: 1, name: "Tom Cook" },
        OptionItem { id: 2, name: "Wade Cooper" },
        OptionItem { id: 3, name: "Tanya Fox" },
        OptionItem { id: 4, name: "Jinuk Chanthusa" },
    ]
}

/// Entries backing the listbox
pub fn listbox_people() -> Vec<OptionItem> {
    vec![
        OptionItem { id: 1, name: "Tom Cook" },
        OptionItem { id: 2, name: "Wade Cooper" },
        OptionItem { id: 3, name: "Tanya Fox" },
        OptionItem { id: 4, name: "Arlene Mccoy" },
        OptionItem { id: 5, name: "Devon Webb" },
    ]
}

/// A hosting plan shown by the radio group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub ram: &'static str,
    pub cpus: &'static str,
    pub disk: &'static str,
}

/// Plans backing the radio group
pub fn plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "startup",
            name: "Startup",
            ram: "12GB",
            cpus: "6 CPUs",
            disk: "160 GB SSD disk",
        },
        Plan {
            id: "business",
            name: "Business",
            ram: "16GB",
            cpus: "8 CPUs",
            disk: "512 GB SSD disk",
        },
        Plan {
            id: "enterprise",
            name: "Enterprise",
            ram: "32GB",
            cpus: "12 CPUs",
            disk: "1024 GB SSD disk",
        },
    ]
}

/// Resolve an element a widget cannot live without. Logs and returns `None`
/// when the markup is absent, which skips mounting that widget.
pub(crate) fn require(dom: &dyn DomTree, id: &str, widget: &'static str) -> Option<ElementId> {
    let found = dom.element_by_id(id);
    if found.is_none() {
        debug!(widget, id, "markup not found, widget not mounted");
    }
    found
}
