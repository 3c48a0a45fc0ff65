//! Page: widget store and event router
//!
//! A [`Page`] owns the mounted widgets and the open-overlay registry, and
//! routes three things into them: input events, finished tween handles, and
//! Escape-key dismissals. The tree and the tween engine stay outside and are
//! passed in per call, which keeps every layer swappable in tests.
//!
//! Dispatch order is fixed. Escape goes straight to the top of the overlay
//! stack and stops there. Everything else is broadcast to widgets in mount
//! order; a widget that calls [`Event::stop_propagation`] ends the broadcast.
//! Clicks are delivered to every widget because each open overlay must see
//! clicks that land outside it.

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use vitrine_animation::{TweenEngine, TweenId};
use vitrine_core::dom::DomTree;
use vitrine_core::events::{event_types, Event, KeyCode};

use crate::registry::OverlayRegistry;

new_key_type! {
    /// Handle to a mounted widget
    pub struct WidgetId;
}

/// Everything a widget may touch while handling an event
pub struct Ui<'a> {
    pub dom: &'a mut dyn DomTree,
    pub anim: &'a mut dyn TweenEngine,
    pub overlays: &'a mut OverlayRegistry,
}

/// A mounted interactive widget
pub trait Widget {
    /// Stable name for logs
    fn name(&self) -> &'static str;

    /// React to a routed event. Events are broadcast; widgets decide from the
    /// target whether the event concerns them.
    fn handle_event(&mut self, event: &mut Event, ui: &mut Ui<'_>);

    /// A tween handle finished this tick. Handles are broadcast too; widgets
    /// compare against the handles they started.
    fn tween_finished(&mut self, _id: TweenId, _ui: &mut Ui<'_>) {}

    /// Close this widget's overlay if it has one open
    fn dismiss(&mut self, _ui: &mut Ui<'_>) {}
}

/// Widget store and event router
#[derive(Default)]
pub struct Page {
    widgets: SlotMap<WidgetId, Option<Box<dyn Widget>>>,
    order: Vec<WidgetId>,
    overlays: OverlayRegistry,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a widget. The constructor receives the id the widget will live
    /// under, so overlay widgets can hand it to their [`OverlayCore`].
    /// Returning `None` (missing markup, for instance) mounts nothing.
    ///
    /// [`OverlayCore`]: crate::overlay::OverlayCore
    pub fn mount<W, F>(&mut self, build: F) -> Option<WidgetId>
    where
        W: Widget + 'static,
        F: FnOnce(WidgetId) -> Option<W>,
    {
        let id = self
            .widgets
            .insert_with_key(|id| build(id).map(|w| Box::new(w) as Box<dyn Widget>));
        match &self.widgets[id] {
            Some(widget) => {
                debug!(?id, name = widget.name(), "widget mounted");
                self.order.push(id);
                Some(id)
            }
            None => {
                self.widgets.remove(id);
                None
            }
        }
    }

    /// Route one event
    pub fn dispatch(
        &mut self,
        event: &mut Event,
        dom: &mut dyn DomTree,
        anim: &mut dyn TweenEngine,
    ) {
        if event.event_type == event_types::KEY_DOWN && event.key() == Some(KeyCode::ESCAPE) {
            if let Some(top) = self.overlays.top() {
                debug!(widget = ?top, "escape dismisses top overlay");
                self.with_widget(top, dom, anim, |widget, ui| widget.dismiss(ui));
                event.stop_propagation();
                return;
            }
            // Nothing open: Escape falls through as an ordinary key event.
        }

        for id in self.order.clone() {
            if event.propagation_stopped {
                break;
            }
            self.with_widget(id, dom, anim, |widget, ui| widget.handle_event(event, ui));
        }
    }

    /// Advance the engine and route finished handles to every widget
    pub fn tick(&mut self, dt_ms: f32, dom: &mut dyn DomTree, anim: &mut dyn TweenEngine) {
        let finished = anim.tick(dt_ms, dom);
        if finished.is_empty() {
            return;
        }
        for id in self.order.clone() {
            for &tween in &finished {
                self.with_widget(id, dom, anim, |widget, ui| widget.tween_finished(tween, ui));
            }
        }
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    /// Number of logically open overlays
    pub fn open_overlays(&self) -> usize {
        self.overlays.len()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // The widget is lifted out of its slot for the duration of the call so
    // the registry can be borrowed alongside it.
    fn with_widget<F>(
        &mut self,
        id: WidgetId,
        dom: &mut dyn DomTree,
        anim: &mut dyn TweenEngine,
        f: F,
    ) where
        F: FnOnce(&mut dyn Widget, &mut Ui<'_>),
    {
        let Some(slot) = self.widgets.get_mut(id) else {
            return;
        };
        let Some(mut widget) = slot.take() else {
            return;
        };
        {
            let mut ui = Ui {
                dom,
                anim,
                overlays: &mut self.overlays,
            };
            f(widget.as_mut(), &mut ui);
        }
        if let Some(slot) = self.widgets.get_mut(id) {
            *slot = Some(widget);
        }
    }
}
