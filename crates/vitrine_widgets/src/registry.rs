//! Open-overlay registry
//!
//! A page-scoped stack of the widgets whose overlays are currently open,
//! ordered by when they opened. Escape dismisses whatever sits on top, so
//! nested overlays unwind most-recent-first instead of all at once.

use crate::page::WidgetId;

/// LIFO stack of logically open overlays
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    stack: Vec<WidgetId>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `widget` on top. A widget already in the stack is moved to the
    /// top rather than duplicated.
    pub fn push(&mut self, widget: WidgetId) {
        self.stack.retain(|w| *w != widget);
        self.stack.push(widget);
    }

    /// Drop `widget` from the stack, wherever it sits
    pub fn remove(&mut self, widget: WidgetId) {
        self.stack.retain(|w| *w != widget);
    }

    /// The most recently opened overlay
    pub fn top(&self) -> Option<WidgetId> {
        self.stack.last().copied()
    }

    pub fn contains(&self, widget: WidgetId) -> bool {
        self.stack.contains(&widget)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<WidgetId> {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn top_tracks_most_recent_open() {
        let ids = ids(3);
        let mut reg = OverlayRegistry::new();
        assert_eq!(reg.top(), None);

        reg.push(ids[0]);
        reg.push(ids[1]);
        reg.push(ids[2]);
        assert_eq!(reg.top(), Some(ids[2]));
        assert_eq!(reg.len(), 3);

        reg.remove(ids[2]);
        assert_eq!(reg.top(), Some(ids[1]));
    }

    #[test]
    fn reopening_moves_to_top_without_duplicating() {
        let ids = ids(2);
        let mut reg = OverlayRegistry::new();
        reg.push(ids[0]);
        reg.push(ids[1]);
        reg.push(ids[0]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.top(), Some(ids[0]));
    }

    #[test]
    fn removing_mid_stack_preserves_order() {
        let ids = ids(3);
        let mut reg = OverlayRegistry::new();
        reg.push(ids[0]);
        reg.push(ids[1]);
        reg.push(ids[2]);
        reg.remove(ids[1]);
        assert_eq!(reg.top(), Some(ids[2]));
        reg.remove(ids[2]);
        assert_eq!(reg.top(), Some(ids[0]));
        assert!(!reg.contains(ids[1]));
    }
}
