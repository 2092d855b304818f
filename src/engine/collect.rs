//! Collection of empty scaffold rows and columns.

use super::Session;
use crate::dom::NodeId;
use crate::render::{Renderer, Reporter};

impl<R: Renderer, P: Reporter> Session<R, P> {
    /// Whether `node` holds nothing but spacers and empty scaffolding.
    ///
    /// A container a cursor points into is never empty.
    pub(super) fn is_empty(&self, node: NodeId) -> bool {
        if self.cursors.primary.container == node
            || self.cursors.group.is_some_and(|group| group.container == node)
        {
            return false;
        }
        self.doc.children(node).iter().all(|&child| {
            self.doc.get(child).is_some_and(|data| {
                data.is_spacer() || (data.is_layout() && self.is_empty(child))
            })
        })
    }

    /// Drop the leftover spacers of an emptied container, then collect it.
    pub(super) fn sanitize(&mut self, container: NodeId) {
        if !self.doc.contains(container) {
            return;
        }
        if self.is_empty(container) {
            let spacers: Vec<NodeId> = self
                .doc
                .children(container)
                .iter()
                .copied()
                .filter(|&child| self.doc.get(child).is_some_and(|data| data.is_spacer()))
                .collect();
            for spacer in spacers {
                self.detach(spacer);
            }
        }
        self.remove_if_empty(container);
    }

    /// Delete an empty row or column, and its row when that empties too.
    ///
    /// A page always keeps one row and a row one column. Returns `true` when
    /// something was deleted.
    pub(super) fn remove_if_empty(&mut self, node: NodeId) -> bool {
        let is_row = self.doc.is_row(node);
        let is_column = self.doc.is_column(node);
        if !(is_row || is_column) || !self.is_empty(node) {
            return false;
        }
        let Some(parent) = self.doc.parent(node) else {
            return false;
        };
        let has_siblings = self.doc.children(parent).len() > 1;
        let page_has_rows = is_column
            && self
                .doc
                .parent(parent)
                .is_some_and(|page| self.doc.children(page).len() > 1);
        if !(has_siblings || page_has_rows) {
            return false;
        }
        if !self.remove_if_empty(parent) {
            tracing::trace!(?node, "collecting empty scaffold");
            self.detach(node);
        }
        true
    }
}
