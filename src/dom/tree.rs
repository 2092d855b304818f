//! Tree operations: insert, remove, walk, and scaffold lookups.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Axis, Control, NodeData, NodeId, NodeKind};
use crate::command::WidgetKind;
use crate::render::Handle;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The widget tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and finding the
/// container of a node is O(depth).
///
/// The root is always a page and is never removed.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
}

impl Document {
    /// Create a document holding only `root`.
    pub fn new(root: NodeData) -> Self {
        debug_assert!(root.is_page(), "document root must be a page");
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root);
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
        }
    }

    /// The root page.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert `data` as the `index`-th child of `parent`.
    ///
    /// The index is clamped to the number of children.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, data: NodeData) -> NodeId {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, id);
        }
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist or is the root.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if id == self.root || !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Position of `id` among its siblings.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `id` is `ancestor` or lies beneath it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == ancestor {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Whether `id` and every ancestor are enabled, with no unchecked
    /// checkable group box above it.
    pub fn is_effectively_enabled(&self, id: NodeId) -> bool {
        let Some(data) = self.get(id) else {
            return false;
        };
        data.enabled
            && self.ancestors(id).into_iter().all(|ancestor| {
                self.get(ancestor).is_some_and(|data| {
                    data.enabled
                        && !matches!(
                            data.as_control(),
                            Some(Control::GroupBox(group)) if group.checkable && !group.checked
                        )
                })
            })
    }

    /// Whether `id` and every ancestor are visible.
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|data| data.visible)
            && self
                .ancestors(id)
                .into_iter()
                .all(|ancestor| self.get(ancestor).is_some_and(|data| data.visible))
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The control stored at `id`, if it is one.
    pub fn control(&self, id: NodeId) -> Option<&Control> {
        self.get(id).and_then(NodeData::as_control)
    }

    pub fn control_mut(&mut self, id: NodeId) -> Option<&mut Control> {
        self.get_mut(id).and_then(NodeData::as_control_mut)
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(NodeData::name)
    }

    /// Widget kind of a node. The root page is the dialog; layouts and spacers
    /// have none.
    pub fn widget_kind(&self, id: NodeId) -> Option<WidgetKind> {
        match &self.get(id)?.kind {
            NodeKind::Page(_) if id == self.root => Some(WidgetKind::Dialog),
            NodeKind::Page(_) => Some(WidgetKind::Page),
            NodeKind::Control(control) => Some(control.kind()),
            NodeKind::Layout(_) | NodeKind::Spacer(_) => None,
        }
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root page cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node whose renderer handle is `handle`.
    pub fn find_by_handle(&self, handle: Handle) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.handle == Some(handle))
            .map(|(id, _)| id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Pages and scaffold
    // -----------------------------------------------------------------------

    /// The page `id` lives on (a page lives on itself).
    pub fn page_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            if self.get(current).is_some_and(NodeData::is_page) {
                return current;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return self.root,
            }
        }
    }

    /// Every page in document order, root first.
    pub fn pages(&self) -> Vec<NodeId> {
        self.walk_depth_first(self.root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(NodeData::is_page))
            .collect()
    }

    /// Pre-order walk of `page` that stops at nested tab pages.
    pub fn walk_page(&self, page: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![page];
        while let Some(current) = stack.pop() {
            let Some(data) = self.get(current) else {
                continue;
            };
            if current != page && data.is_page() {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// The tabs control owning a tab page. `None` for the root page.
    pub fn tabs_of(&self, page: NodeId) -> Option<NodeId> {
        if page == self.root {
            return None;
        }
        self.parent(page)
    }

    /// First column of the first row of `page`.
    pub fn first_column(&self, page: NodeId) -> Option<NodeId> {
        let row = *self.children(page).first()?;
        self.children(row).first().copied()
    }

    /// Last column of the last row of `page`.
    pub fn last_column(&self, page: NodeId) -> Option<NodeId> {
        let row = *self.children(page).last()?;
        self.children(row).last().copied()
    }

    /// Whether `id` is a scaffold row.
    pub fn is_row(&self, id: NodeId) -> bool {
        matches!(
            self.get(id).map(|data| &data.kind),
            Some(NodeKind::Layout(Axis::Horizontal))
        )
    }

    /// Whether `id` is a scaffold column.
    pub fn is_column(&self, id: NodeId) -> bool {
        matches!(
            self.get(id).map(|data| &data.kind),
            Some(NodeKind::Layout(Axis::Vertical))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::{Label, LabelContent, Page};

    fn label(text: &str) -> NodeData {
        NodeData::control(Control::Label(Label {
            content: LabelContent::Text(text.to_owned()),
        }))
        .with_name(text)
    }

    /// Build a small test tree:
    /// ```text
    ///   root page
    ///      |
    ///     row
    ///    /   \
    ///  col1   col2
    ///  / \
    /// a   b
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(NodeData::page(Page::default()));
        let root = doc.root();
        let row = doc.insert_child(root, 0, NodeData::layout(Axis::Horizontal));
        let col1 = doc.insert_child(row, 0, NodeData::layout(Axis::Vertical));
        let col2 = doc.insert_child(row, 1, NodeData::layout(Axis::Vertical));
        let a = doc.insert_child(col1, 0, label("a"));
        let b = doc.insert_child(col1, 1, label("b"));
        (doc, row, col1, col2, a, b)
    }

    #[test]
    fn insert_child_parent_relationship() {
        let (doc, row, col1, _col2, a, _b) = build_tree();
        assert_eq!(doc.parent(a), Some(col1));
        assert_eq!(doc.parent(col1), Some(row));
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn insert_at_index() {
        let (mut doc, _row, col1, _col2, a, b) = build_tree();
        let c = doc.insert_child(col1, 1, label("c"));
        assert_eq!(doc.children(col1), &[a, c, b]);
        assert_eq!(doc.index_of(b), Some(2));
    }

    #[test]
    fn insert_index_is_clamped() {
        let (mut doc, _row, col1, _col2, a, b) = build_tree();
        let c = doc.insert_child(col1, 99, label("c"));
        assert_eq!(doc.children(col1), &[a, b, c]);
    }

    #[test]
    fn ancestors_and_within() {
        let (doc, row, col1, col2, a, _b) = build_tree();
        assert_eq!(doc.ancestors(a), vec![col1, row, doc.root()]);
        assert!(doc.is_within(a, row));
        assert!(doc.is_within(a, a));
        assert!(!doc.is_within(a, col2));
        assert!(!doc.is_within(row, a));
    }

    #[test]
    fn remove_subtree() {
        let (mut doc, row, col1, col2, a, b) = build_tree();
        let removed = doc.remove(col1);
        assert!(removed.is_some_and(|data| data.is_layout()));
        assert!(!doc.contains(a));
        assert!(!doc.contains(b));
        assert_eq!(doc.children(row), &[col2]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn root_cannot_be_removed() {
        let (mut doc, ..) = build_tree();
        let root = doc.root();
        assert!(doc.remove(root).is_none());
        assert!(doc.contains(root));
    }

    #[test]
    fn remove_stale_id() {
        let (mut doc, _row, _col1, _col2, a, _b) = build_tree();
        doc.remove(a);
        assert!(doc.remove(a).is_none());
        assert_eq!(doc.index_of(a), None);
    }

    #[test]
    fn walk_depth_first() {
        let (doc, row, col1, col2, a, b) = build_tree();
        assert_eq!(
            doc.walk_depth_first(doc.root()),
            vec![doc.root(), row, col1, a, b, col2]
        );
    }

    #[test]
    fn walk_page_stops_at_nested_pages() {
        let (mut doc, row, col1, col2, a, b) = build_tree();
        let page = doc.insert_child(col2, 0, NodeData::page(Page::default()));
        let c = doc.insert_child(page, 0, label("c"));
        assert_eq!(
            doc.walk_page(doc.root()),
            vec![doc.root(), row, col1, a, b, col2]
        );
        assert_eq!(doc.walk_page(page), vec![page, c]);
        assert_eq!(doc.pages(), vec![doc.root(), page]);
    }

    #[test]
    fn scaffold_lookups() {
        let (doc, row, col1, col2, a, _b) = build_tree();
        assert!(doc.is_row(row));
        assert!(doc.is_column(col1));
        assert!(!doc.is_column(a));
        assert_eq!(doc.first_column(doc.root()), Some(col1));
        assert_eq!(doc.last_column(doc.root()), Some(col2));
        assert_eq!(doc.page_of(a), doc.root());
        assert_eq!(doc.pages(), vec![doc.root()]);
        assert_eq!(doc.tabs_of(doc.root()), None);
    }

    #[test]
    fn effective_state_follows_ancestors() {
        let (mut doc, row, col1, _col2, a, b) = build_tree();
        assert!(doc.is_effectively_enabled(a));
        if let Some(data) = doc.get_mut(col1) {
            data.enabled = false;
        }
        assert!(!doc.is_effectively_enabled(b));
        assert!(doc.is_effectively_enabled(row));
        if let Some(data) = doc.get_mut(row) {
            data.visible = false;
        }
        assert!(!doc.is_effectively_visible(a));
        assert!(doc.is_effectively_visible(doc.root()));
    }

    #[test]
    fn unchecked_checkable_group_disables_contents() {
        use crate::dom::node::GroupBox;
        let (mut doc, _row, col1, ..) = build_tree();
        let group = doc.insert_child(
            col1,
            0,
            NodeData::control(Control::GroupBox(GroupBox {
                checkable: true,
                ..GroupBox::default()
            })),
        );
        let inner = doc.insert_child(group, 0, label("inner"));
        assert!(doc.is_effectively_enabled(group));
        assert!(!doc.is_effectively_enabled(inner));
    }

    #[test]
    fn widget_kinds() {
        let (doc, row, _col1, _col2, a, _b) = build_tree();
        assert_eq!(doc.widget_kind(doc.root()), Some(WidgetKind::Dialog));
        assert_eq!(doc.widget_kind(a), Some(WidgetKind::Label));
        assert_eq!(doc.widget_kind(row), None);
        assert_eq!(doc.name(a), Some("a"));
    }
}
