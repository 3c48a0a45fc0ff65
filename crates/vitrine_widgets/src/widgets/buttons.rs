//! Icon buttons
//!
//! Every press plays a scale pulse on the button. A button may also carry
//! an icon child and a `data-anim` attribute naming the icon's motion; the
//! pulse and the icon motion run as independent tweens so rapid presses
//! restart cleanly with `kill_tweens_of`.
//!
//! The spin motion is relative: each press spins a further full turn from
//! wherever the icon currently points, so hammering the button winds the
//! rotation up instead of snapping it back.

use std::str::FromStr;

use tracing::debug;

use vitrine_animation::MotionPreset;
use vitrine_core::config::DataAttrs;
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::error::Result;
use vitrine_core::events::{event_types, Event};

use crate::page::{Ui, Widget};

/// Icon motion, chosen per button via `data-anim`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconMotion {
    Bounce,
    Spin,
    Vibrate,
    Pop,
}

impl FromStr for IconMotion {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bounce" => Ok(Self::Bounce),
            "spin" => Ok(Self::Spin),
            "vibrate" => Ok(Self::Vibrate),
            "pop" => Ok(Self::Pop),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IconButtonsConfig {
    pub buttons: Vec<String>,
}

impl Default for IconButtonsConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                "fx-button-1".into(),
                "fx-button-2".into(),
                "fx-button-3".into(),
                "fx-button-4".into(),
            ],
        }
    }
}

#[derive(Debug)]
struct ButtonEntry {
    element: ElementId,
    /// First child, if any; the target of the icon motion
    icon: Option<ElementId>,
    motion: Option<IconMotion>,
}

#[derive(Debug)]
pub struct IconButtons {
    buttons: Vec<ButtonEntry>,
}

impl IconButtons {
    /// Bind to existing markup and read each button's `data-anim`
    ///
    /// Missing buttons are skipped; a missing `data-anim` means pulse only.
    pub fn mount(dom: &mut dyn DomTree, config: IconButtonsConfig) -> Result<Option<Self>> {
        let mut buttons = Vec::new();
        for id in &config.buttons {
            let Some(element) = dom.element_by_id(id) else {
                debug!(id = %id, "button missing, skipped");
                continue;
            };
            let icon = dom.children(element).into_iter().next();
            let motion = DataAttrs::new(dom, element)
                .parse_opt::<IconMotion>("anim", "one of bounce, spin, vibrate, pop")?;
            buttons.push(ButtonEntry {
                element,
                icon,
                motion,
            });
        }
        if buttons.is_empty() {
            debug!("no buttons found, widget not mounted");
            return Ok(None);
        }
        Ok(Some(Self { buttons }))
    }

    fn press(&mut self, ui: &mut Ui<'_>, index: usize) {
        let entry = &self.buttons[index];
        ui.anim.kill_tweens_of(entry.element);
        MotionPreset::press_pulse().start(ui.anim, ui.dom, entry.element);

        let (Some(icon), Some(motion)) = (entry.icon, entry.motion) else {
            return;
        };
        ui.anim.kill_tweens_of(icon);
        let preset = match motion {
            IconMotion::Bounce => MotionPreset::icon_bounce(),
            IconMotion::Spin => {
                let base = ui.dom.visual(icon).resolved_rotation();
                MotionPreset::icon_spin(base)
            }
            IconMotion::Vibrate => MotionPreset::icon_vibrate(),
            IconMotion::Pop => MotionPreset::icon_pop(),
        };
        preset.start(ui.anim, ui.dom, icon);
    }
}

impl Widget for IconButtons {
    fn name(&self) -> &'static str {
        "icon-buttons"
    }

    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>) {
        if event.event_type != event_types::CLICK {
            return;
        }
        let Some(target) = event.target else {
            return;
        };
        let hit = self
            .buttons
            .iter()
            .position(|b| ui.dom.contains(b.element, target));
        if let Some(index) = hit {
            self.press(ui, index);
        }
    }
}
