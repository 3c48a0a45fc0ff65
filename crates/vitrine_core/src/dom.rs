//! Element tree capability
//!
//! Widgets never own the document. They drive it through [`DomTree`], an
//! object-safe capability trait covering the handful of operations the
//! widget set needs: lookup, containment, classes, attributes, text, child
//! replacement from view-records, and visual property merges.
//!
//! [`MemoryDom`] is the in-process implementation used by unit tests and the
//! headless harness. A renderer-backed implementation plugs in the same way.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::warn;

use crate::visual::Visual;

new_key_type! {
    /// Stable handle to an element in a tree
    pub struct ElementId;
}

/// Rectangle of an element in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// View records
// ============================================================================

/// A pure description of an element subtree
///
/// Render functions return these; [`DomTree::replace_children`] turns them
/// into real elements. Keeping the records inert makes list rendering
/// testable without a tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 4]>,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder: set the document id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder: set text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: append a child record
    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }
}

// ============================================================================
// Tree capability
// ============================================================================

/// The document operations widgets are allowed to perform
///
/// All mutating methods are no-ops on stale handles and all getters return
/// their defaults, so a widget holding a handle to a removed element cannot
/// corrupt the tree.
pub trait DomTree {
    /// Look up an element by its document id
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Whether `node` is `ancestor` or a descendant of it
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Direct children, in document order
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn attr(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attr(&mut self, element: ElementId, name: &str, value: &str);
    fn remove_attr(&mut self, element: ElementId, name: &str);

    fn text(&self, element: ElementId) -> Option<String>;
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Drop all children and build new ones from view-records
    ///
    /// Returns the handles of the new top-level children, in order.
    fn replace_children(&mut self, element: ElementId, nodes: &[ViewNode]) -> Vec<ElementId>;

    /// Build one subtree from a view-record and append it
    fn append_child(&mut self, parent: ElementId, node: &ViewNode) -> ElementId;

    /// Remove an element and its subtree
    fn remove(&mut self, element: ElementId);

    /// Height the content wants when fully expanded
    fn natural_height(&self, element: ElementId) -> f32;

    /// Laid-out rectangle in page coordinates
    fn bounds(&self, element: ElementId) -> Bounds;

    /// Show or hide the element (`display: none` semantics)
    fn set_display(&mut self, element: ElementId, shown: bool);

    fn is_displayed(&self, element: ElementId) -> bool;

    /// Current animatable properties
    fn visual(&self, element: ElementId) -> Visual;

    /// Overwrite the visual fields `patch` sets
    fn merge_visual(&mut self, element: ElementId, patch: &Visual);
}

// ============================================================================
// In-memory implementation
// ============================================================================

struct ElementNode {
    tag: String,
    dom_id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    displayed: bool,
    visual: Visual,
    natural_height: f32,
    bounds: Bounds,
}

impl ElementNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            dom_id: None,
            classes: SmallVec::new(),
            attrs: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            displayed: true,
            visual: Visual::default(),
            natural_height: 0.0,
            bounds: Bounds::default(),
        }
    }
}

/// Slotmap-backed element tree
///
/// The reference [`DomTree`] implementation. Layout is not computed; tests
/// and the harness assign natural heights and bounds directly where a
/// widget needs them.
pub struct MemoryDom {
    nodes: SlotMap<ElementId, ElementNode>,
    ids: FxHashMap<String, ElementId>,
    root: ElementId,
}

impl MemoryDom {
    /// Create an empty tree with a `body` root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::new("body"));
        Self {
            nodes,
            ids: FxHashMap::default(),
            root,
        }
    }

    /// Create a tree with the given records mounted under the root
    pub fn build(records: &[ViewNode]) -> Self {
        let mut dom = Self::new();
        for record in records {
            dom.append_child(dom.root, record);
        }
        dom
    }

    /// The root element
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Element tag name
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    /// Assign the natural content height reported for an element
    pub fn set_natural_height(&mut self, element: ElementId, height: f32) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.natural_height = height;
        }
    }

    /// Assign the laid-out bounds reported for an element
    pub fn set_bounds(&mut self, element: ElementId, bounds: Bounds) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.bounds = bounds;
        }
    }

    fn insert_tree(&mut self, parent: ElementId, record: &ViewNode) -> ElementId {
        let mut node = ElementNode::new(&record.tag);
        node.dom_id = record.id.clone();
        node.classes = record.classes.clone();
        node.attrs = record.attrs.clone();
        node.text = record.text.clone();
        node.parent = Some(parent);
        let element = self.nodes.insert(node);

        if let Some(id) = &record.id {
            if self.ids.insert(id.clone(), element).is_some() {
                warn!(id, "duplicate element id, later element wins");
            }
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(element);
        }
        for child in &record.children {
            self.insert_tree(element, child);
        }
        element
    }

    fn remove_tree(&mut self, element: ElementId) {
        let Some(node) = self.nodes.remove(element) else {
            return;
        };
        if let Some(id) = &node.dom_id {
            if self.ids.get(id) == Some(&element) {
                self.ids.remove(id);
            }
        }
        for child in node.children {
            self.remove_tree(child);
        }
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree for MemoryDom {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent);
        }
        false
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn attr(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes.get(element).and_then(|n| {
            n.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    fn set_attr(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            if let Some(entry) = node.attrs.iter_mut().find(|(k, _)| k == name) {
                entry.1 = value.to_string();
            } else {
                node.attrs.push((name.to_string(), value.to_string()));
            }
        }
    }

    fn remove_attr(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.attrs.retain(|(k, _)| k != name);
        }
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.nodes.get(element).and_then(|n| n.text.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.text = Some(text.to_string());
        }
    }

    fn replace_children(&mut self, element: ElementId, nodes: &[ViewNode]) -> Vec<ElementId> {
        let old = self.children(element);
        for child in old {
            self.remove(child);
        }
        nodes
            .iter()
            .map(|record| self.insert_tree(element, record))
            .collect()
    }

    fn append_child(&mut self, parent: ElementId, node: &ViewNode) -> ElementId {
        self.insert_tree(parent, node)
    }

    fn remove(&mut self, element: ElementId) {
        let parent = self.nodes.get(element).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != element);
            }
        }
        self.remove_tree(element);
    }

    fn natural_height(&self, element: ElementId) -> f32 {
        self.nodes
            .get(element)
            .map(|n| n.natural_height)
            .unwrap_or(0.0)
    }

    fn bounds(&self, element: ElementId) -> Bounds {
        self.nodes
            .get(element)
            .map(|n| n.bounds)
            .unwrap_or_default()
    }

    fn set_display(&mut self, element: ElementId, shown: bool) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.displayed = shown;
        }
    }

    fn is_displayed(&self, element: ElementId) -> bool {
        self.nodes
            .get(element)
            .map(|n| n.displayed)
            .unwrap_or(false)
    }

    fn visual(&self, element: ElementId) -> Visual {
        self.nodes
            .get(element)
            .map(|n| n.visual.clone())
            .unwrap_or_default()
    }

    fn merge_visual(&mut self, element: ElementId, patch: &Visual) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.visual.merge(patch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDom {
        MemoryDom::build(&[ViewNode::new("div").id("card").child(
            ViewNode::new("ul").id("list").child(
                ViewNode::new("li")
                    .id("row-1")
                    .class("row")
                    .text("first"),
            ),
        )])
    }

    #[test]
    fn lookup_by_id() {
        let dom = sample();
        assert!(dom.element_by_id("card").is_some());
        assert!(dom.element_by_id("row-1").is_some());
        assert!(dom.element_by_id("missing").is_none());
    }

    #[test]
    fn containment_walks_ancestors() {
        let dom = sample();
        let card = dom.element_by_id("card").unwrap();
        let row = dom.element_by_id("row-1").unwrap();
        assert!(dom.contains(card, row));
        assert!(dom.contains(row, row));
        assert!(!dom.contains(row, card));
    }

    #[test]
    fn replace_children_swaps_subtree_and_index() {
        let mut dom = sample();
        let list = dom.element_by_id("list").unwrap();
        let new = dom.replace_children(
            list,
            &[
                ViewNode::new("li").id("row-2").text("second"),
                ViewNode::new("li").id("row-3").text("third"),
            ],
        );
        assert_eq!(new.len(), 2);
        assert!(dom.element_by_id("row-1").is_none());
        assert_eq!(dom.element_by_id("row-2"), Some(new[0]));
        assert_eq!(dom.children(list), new);
    }

    #[test]
    fn remove_detaches_and_unregisters() {
        let mut dom = sample();
        let list = dom.element_by_id("list").unwrap();
        let card = dom.element_by_id("card").unwrap();
        dom.remove(list);
        assert!(dom.element_by_id("list").is_none());
        assert!(dom.element_by_id("row-1").is_none());
        assert!(dom.children(card).is_empty());
    }

    #[test]
    fn class_list_is_a_set() {
        let mut dom = sample();
        let card = dom.element_by_id("card").unwrap();
        dom.add_class(card, "open");
        dom.add_class(card, "open");
        assert!(dom.has_class(card, "open"));
        dom.remove_class(card, "open");
        assert!(!dom.has_class(card, "open"));
    }

    #[test]
    fn visual_merges_accumulate() {
        let mut dom = sample();
        let card = dom.element_by_id("card").unwrap();
        dom.merge_visual(card, &Visual::opacity(0.5));
        dom.merge_visual(card, &Visual::translate(3.0, 4.0));
        let v = dom.visual(card);
        assert_eq!(v.opacity, Some(0.5));
        assert_eq!(v.resolved_translate(), (3.0, 4.0));
    }

    #[test]
    fn stale_handles_are_inert() {
        let mut dom = sample();
        let row = dom.element_by_id("row-1").unwrap();
        dom.remove(row);
        dom.set_text(row, "ghost");
        assert_eq!(dom.text(row), None);
        assert!(!dom.is_displayed(row));
    }
}
