//! Toggleable overlay state machine
//!
//! Every widget that shows and hides a floating panel (dropdown menu, combobox
//! options, dialog, popover) shares the same lifecycle, factored out here as
//! [`OverlayCore`]. The core owns the phase, the handle of the in-flight
//! transition, and the widget's slot in the overlay registry.
//!
//! Two rules keep re-entrant toggling consistent:
//!
//! 1. **Kill then start.** Beginning a transition first kills whatever tween
//!    is in flight. Killed tweens never fire their completion callbacks, so a
//!    superseded close can never hide a panel that was just re-opened.
//! 2. **Flip the phase up front.** The phase moves to `Opening`/`Closing` the
//!    moment the transition starts, not when it lands. Anything that asks
//!    "is this overlay open?" mid-flight gets the answer that matches the
//!    user's intent.
//!
//! The core deliberately starts no tweens itself. Widgets decide what an
//! entrance or exit looks like, schedule it, and hand the resulting handle to
//! [`OverlayCore::set_transition`]. When the page routes a finished handle
//! back, [`OverlayCore::tween_finished`] settles `Opening` into `Open` and
//! `Closing` into `Closed`.

use tracing::debug;

use vitrine_animation::TweenId;
use vitrine_core::dom::{DomTree, ElementId};
use vitrine_core::events::{event_types, Event};

use crate::page::{Ui, WidgetId};

/// Lifecycle phase of a toggleable overlay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPhase {
    #[default]
    Closed,
    /// Entrance transition in flight
    Opening,
    Open,
    /// Exit transition in flight
    Closing,
}

impl OverlayPhase {
    /// Logically open: `Opening` counts, `Closing` does not
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayPhase::Opening | OverlayPhase::Open)
    }
}

/// Shared lifecycle state for a widget with a floating panel
#[derive(Debug)]
pub struct OverlayCore {
    widget: WidgetId,
    root: ElementId,
    panel: ElementId,
    phase: OverlayPhase,
    transition: Option<TweenId>,
}

impl OverlayCore {
    /// `root` scopes inside/outside click tests, `panel` is the element shown
    /// and hidden. They may be the same element.
    pub fn new(widget: WidgetId, root: ElementId, panel: ElementId) -> Self {
        Self {
            widget,
            root,
            panel,
            phase: OverlayPhase::Closed,
            transition: None,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// Move toward `Open`. Returns `false` when already logically open, in
    /// which case nothing was killed and no transition should be started.
    ///
    /// On success the panel is displayed and the widget is pushed onto the
    /// overlay registry; the caller starts its entrance tween and records the
    /// handle with [`set_transition`](Self::set_transition).
    pub fn begin_open(&mut self, ui: &mut Ui<'_>) -> bool {
        if self.phase.is_open() {
            return false;
        }
        if let Some(id) = self.transition.take() {
            ui.anim.kill(id);
        }
        self.phase = OverlayPhase::Opening;
        ui.dom.set_display(self.panel, true);
        ui.overlays.push(self.widget);
        debug!(widget = ?self.widget, "overlay opening");
        true
    }

    /// Move toward `Closed`. Returns `false` when already logically closed;
    /// closing a closed overlay is a no-op, no matter how often it is asked.
    pub fn begin_close(&mut self, ui: &mut Ui<'_>) -> bool {
        if !self.phase.is_open() {
            return false;
        }
        if let Some(id) = self.transition.take() {
            ui.anim.kill(id);
        }
        self.phase = OverlayPhase::Closing;
        ui.overlays.remove(self.widget);
        debug!(widget = ?self.widget, "overlay closing");
        true
    }

    /// Record the handle of the transition just started
    pub fn set_transition(&mut self, id: TweenId) {
        self.transition = Some(id);
    }

    pub fn transition(&self) -> Option<TweenId> {
        self.transition
    }

    /// Settle the phase if `id` is this overlay's in-flight transition
    ///
    /// Returns the phase that was just reached, or `None` when the handle
    /// belongs to someone else.
    pub fn tween_finished(&mut self, id: TweenId) -> Option<OverlayPhase> {
        if self.transition != Some(id) {
            return None;
        }
        self.transition = None;
        match self.phase {
            OverlayPhase::Opening => {
                self.phase = OverlayPhase::Open;
                Some(OverlayPhase::Open)
            }
            OverlayPhase::Closing => {
                self.phase = OverlayPhase::Closed;
                Some(OverlayPhase::Closed)
            }
            settled => Some(settled),
        }
    }

    /// Whether `target` sits inside this overlay's root
    pub fn contains(&self, dom: &dyn DomTree, target: Option<ElementId>) -> bool {
        match target {
            Some(el) => dom.contains(self.root, el),
            None => false,
        }
    }

    /// True when `event` is a click outside the root while the overlay is
    /// logically open. Clicks with no target count as outside.
    pub fn dismissed_by(&self, dom: &dyn DomTree, event: &Event) -> bool {
        self.phase.is_open()
            && event.event_type == event_types::CLICK
            && !self.contains(dom, event.target)
    }
}
