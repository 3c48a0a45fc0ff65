//! The widget collection
//!
//! Each module wraps one piece of page markup:
//! - Overlays: dropdown, listbox, combobox, dialog, popover
//! - In-page state: disclosure, tabs, scenes, checkbox, radio
//! - Fire-and-forget: buttons, toast, meters
//!
//! Widgets bind to existing elements by id at mount time and never create
//! their trigger markup; option rows and toasts are the exception, rendered
//! from view records.

pub mod buttons;
pub mod checkbox;
pub mod combobox;
pub mod dialog;
pub mod disclosure;
pub mod dropdown;
pub mod listbox;
pub mod meters;
pub mod popover;
pub mod radio;
pub mod scenes;
pub mod shared;
pub mod tabs;
pub mod toast;

pub use buttons::{IconButtons, IconButtonsConfig, IconMotion};
pub use checkbox::{CheckboxConfig, Checkboxes};
pub use combobox::{Combobox, ComboboxConfig};
pub use dialog::{Dialog, DialogConfig};
pub use disclosure::{Disclosure, DisclosureConfig, DisclosureItemIds};
pub use dropdown::{Dropdown, DropdownConfig};
pub use listbox::{Listbox, ListboxConfig};
pub use meters::{Meters, MetersConfig};
pub use popover::{Popover, PopoverConfig};
pub use radio::{RadioConfig, RadioGroup};
pub use scenes::{SceneTransition, Scenes, ScenesConfig};
pub use shared::{OptionItem, Plan};
pub use tabs::{Tabs, TabsConfig};
pub use toast::{ToastConfig, ToastHost, ToastKind};
