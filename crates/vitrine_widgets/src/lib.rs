//! Vitrine Widgets
//!
//! The interactive widget collection: overlay state machines, a page-level
//! dispatcher, and one module per widget kind.
//!
//! Widgets own their state behind a constructor, receive events from the
//! [`Page`], and drive animation exclusively through the injected
//! [`vitrine_animation::TweenEngine`]. Two rules hold everywhere:
//!
//! - **Kill then start**: superseding an in-flight transition kills its
//!   handle first, and a killed tween never fires its completion
//! - **Flip up front**: logical state (open/closed, selected) changes when
//!   a transition *starts*; the tween only decorates the change
//!
//! # Example
//!
//! ```ignore
//! let mut page = Page::default();
//! page.mount(|id| Dropdown::mount(&mut dom, id, DropdownConfig::default()));
//!
//! page.dispatch(&mut Event::click(trigger), &mut dom, &mut sched);
//! page.tick(400.0, &mut dom, &mut sched);
//! ```

pub mod overlay;
pub mod page;
pub mod registry;
pub mod widgets;

pub use overlay::{OverlayCore, OverlayPhase};
pub use page::{Page, Ui, Widget, WidgetId};
pub use registry::OverlayRegistry;
pub use widgets::{
    Checkboxes, Combobox, Dialog, Disclosure, Dropdown, IconButtons, Listbox, Meters, Popover,
    RadioGroup, Scenes, Tabs, ToastHost,
};
