//! Tab order.
//!
//! Each page keeps its own [`FocusChain`]. The order is the page's rows, then
//! each row's columns, then each column's children, descending one level into
//! group box and frame contents. Tab pages are not entered: they have chains
//! of their own.

use crate::dom::{Control, Document, NodeId};

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Ordered focusable nodes of one page and the focused one among them.
///
/// The chain is rebuilt after every command. Focus cycles through the chain
/// in forward (Tab) or backward (Shift+Tab) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChain {
    /// Focusable nodes in tab order.
    nodes: Vec<NodeId>,
    /// Index of the currently focused node, or `None` if no focus.
    current: Option<usize>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            current: None,
        }
    }

    /// Rebuild the chain of `page`.
    ///
    /// If the previously focused node is still in the new chain, focus is
    /// preserved; otherwise focus is cleared. Returns `true` when the order
    /// changed.
    pub fn rebuild(&mut self, doc: &Document, page: NodeId) -> bool {
        let old_focused = self.current_node();
        let nodes = linearize(doc, page);
        let changed = nodes != self.nodes;
        self.nodes = nodes;
        self.current = old_focused.and_then(|old| self.nodes.iter().position(|&n| n == old));
        changed
    }

    /// Nodes in tab order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The currently focused node, if any.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Move focus to the next node in the chain. Wraps around.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Move focus to the previous node in the chain. Wraps around.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    /// Focus a specific node. Returns `true` if the node is in the chain.
    pub fn focus_node(&mut self, id: NodeId) -> bool {
        match self.nodes.iter().position(|&n| n == id) {
            Some(pos) => {
                self.current = Some(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for FocusChain {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Linearization
// ---------------------------------------------------------------------------

/// Whether a control takes keyboard focus at all.
fn takes_focus(control: &Control) -> bool {
    match control {
        Control::PushButton(_)
        | Control::RadioButton(_)
        | Control::CheckBox(_)
        | Control::TextBox(_)
        | Control::ListBox(_)
        | Control::ComboBox(_)
        | Control::Slider(_)
        | Control::TextView(_)
        | Control::Tabs(_) => true,
        Control::GroupBox(group) => group.checkable,
        _ => false,
    }
}

fn reachable(doc: &Document, id: NodeId) -> bool {
    doc.control(id).is_some_and(takes_focus)
        && doc.is_effectively_enabled(id)
        && doc.is_effectively_visible(id)
}

/// Focusable nodes of `page` in tab order.
pub fn linearize(doc: &Document, page: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    for &row in doc.children(page) {
        for &column in doc.children(row) {
            for &child in doc.children(column) {
                if reachable(doc, child) {
                    order.push(child);
                }
                if doc.get(child).is_some_and(|data| data.is_group()) {
                    order.extend(
                        doc.children(child)
                            .iter()
                            .copied()
                            .filter(|&inner| reachable(doc, inner)),
                    );
                }
            }
        }
    }
    order
}
