//! `remove` and `clear`.
//!
//! Cursors are moved out of a doomed subtree before it is deleted, then the
//! vacated container is collected.

use super::{CommandError, Cursor, Session};
use crate::command::WidgetKind;
use crate::dom::{Control, NodeData, NodeId};
use crate::render::{Renderer, Reporter};

impl<R: Renderer, P: Reporter> Session<R, P> {
    pub(super) fn remove(&mut self, address: &str) -> Result<(), CommandError> {
        if address.is_empty() {
            return Err(CommandError::MissingName("remove"));
        }
        let target = self
            .doc
            .resolve(address)
            .ok_or_else(|| CommandError::UnknownName(address.to_owned()))?;
        match target.row {
            Some(row) => self.remove_item(target.node, row),
            None if target.node == self.doc.root() => {
                return Err(CommandError::NotApplicable {
                    operation: "remove",
                    kind: WidgetKind::Dialog,
                })
            }
            None => self.remove_node(target.node),
        }
        Ok(())
    }

    fn remove_item(&mut self, node: NodeId, row: usize) {
        let Some(list) = self.doc.control_mut(node).and_then(Control::collection_mut) else {
            return;
        };
        if row >= list.items.len() {
            return;
        }
        let changed = list.remove(row);
        let report = (changed && list.selection).then(|| list.current_text().to_owned());
        if let Some(cursor) = self.cursors.list.as_mut() {
            if cursor.container == node && row < cursor.index {
                cursor.index -= 1;
            }
        }
        self.touch(node);
        if let Some(value) = report {
            self.emit(node, &value);
        }
    }

    /// Delete `node` and its subtree.
    pub(super) fn remove_node(&mut self, node: NodeId) {
        let (Some(container), Some(index)) = (self.doc.parent(node), self.doc.index_of(node))
        else {
            return;
        };
        let is_page = self.doc.get(node).is_some_and(NodeData::is_page);
        self.evacuate(node, is_page);

        let same_container = [self.cursors.group.as_mut(), Some(&mut self.cursors.primary)];
        for cursor in same_container.into_iter().flatten() {
            if cursor.container == container && index < cursor.index {
                cursor.index -= 1;
            }
        }

        if is_page {
            if let Some(tabs) = self.cursors.tabs.as_mut() {
                if tabs.container == container && index < tabs.index {
                    tabs.index -= 1;
                }
            }
            let remaining = self.doc.children(container).len() - 1;
            if let Some(Control::Tabs(tabs)) = self.doc.control_mut(container) {
                tabs.current = match tabs.current {
                    Some(current) if current > index => Some(current - 1),
                    Some(_) if remaining == 0 => None,
                    Some(current) if current == index => Some(current.min(remaining - 1)),
                    other => other,
                };
            }
        }

        tracing::trace!(?node, "removing subtree");
        self.detach(node);
        if is_page {
            self.touch(container);
        } else {
            self.sanitize(container);
        }
    }

    /// Move every cursor out of the subtree rooted at `node`.
    fn evacuate(&mut self, node: NodeId, is_page: bool) {
        let inside = |cursor: Option<Cursor>| {
            cursor.is_some_and(|cursor| self.doc.is_within(cursor.container, node))
        };
        if inside(self.cursors.list) {
            self.cursors.list = None;
        }
        if inside(self.cursors.group) {
            self.cursors.group = None;
        }
        let tabs_inside = inside(self.cursors.tabs);
        if self
            .cursors
            .default_button
            .is_some_and(|button| self.doc.is_within(button, node))
        {
            self.cursors.default_button = None;
        }

        if self.doc.is_within(self.cursors.primary.container, node) {
            self.cursors.group = None;
            if is_page {
                if let Some(tabs) = self.doc.tabs_of(node) {
                    self.place_at(tabs, 1);
                }
            } else {
                self.place_at(node, 0);
            }
        }
        if tabs_inside {
            self.cursors.tabs = self.derive_tabs();
        }
    }

    pub(super) fn clear(&mut self, address: &str) -> Result<(), CommandError> {
        if address.is_empty() {
            self.clear_dialog();
            return Ok(());
        }
        let target = self
            .doc
            .resolve(address)
            .ok_or_else(|| CommandError::UnknownName(address.to_owned()))?;
        if target.row.is_some() {
            return Err(CommandError::NotApplicable {
                operation: "clear",
                kind: WidgetKind::Item,
            });
        }
        let node = target.node;
        match self.doc.widget_kind(node) {
            Some(WidgetKind::ListBox | WidgetKind::ComboBox) => self.clear_items(node),
            Some(WidgetKind::Page) => self.clear_page(node),
            Some(WidgetKind::Dialog) => self.clear_dialog(),
            Some(WidgetKind::Tabs) => {
                let pages = self.doc.children(node).to_vec();
                for page in pages.into_iter().rev() {
                    self.remove_node(page);
                }
            }
            Some(kind) => {
                return Err(CommandError::NotApplicable {
                    operation: "clear",
                    kind,
                })
            }
            None => return Err(CommandError::StaleNode),
        }
        Ok(())
    }

    fn clear_items(&mut self, node: NodeId) {
        let Some(list) = self.doc.control_mut(node).and_then(Control::collection_mut) else {
            return;
        };
        let report = list.clear() && list.selection;
        if let Some(cursor) = self.cursors.list.as_mut() {
            if cursor.container == node {
                cursor.index = 0;
            }
        }
        self.touch(node);
        if report {
            self.emit(node, "");
        }
    }

    /// Empty a page down to one row holding one empty column.
    fn clear_page(&mut self, page: NodeId) {
        let inside = |cursor: Option<Cursor>| {
            cursor.is_some_and(|cursor| self.doc.is_within(cursor.container, page))
        };
        if inside(self.cursors.list) {
            self.cursors.list = None;
        }
        if inside(self.cursors.group) {
            self.cursors.group = None;
        }
        let tabs_inside = inside(self.cursors.tabs);
        if self
            .cursors
            .default_button
            .is_some_and(|button| self.doc.is_within(button, page))
        {
            self.cursors.default_button = None;
        }
        let primary_inside = self.doc.is_within(self.cursors.primary.container, page);

        let rows = self.doc.children(page).to_vec();
        for &row in rows.iter().skip(1) {
            self.detach(row);
        }
        if let Some(&first_row) = rows.first() {
            let columns = self.doc.children(first_row).to_vec();
            for &column in columns.iter().skip(1) {
                self.detach(column);
            }
            if let Some(&column) = columns.first() {
                for child in self.doc.children(column).to_vec() {
                    self.detach(child);
                }
                if primary_inside {
                    self.cursors.primary = Cursor::new(column, 0);
                    self.cursors.group = None;
                }
            }
        }
        if tabs_inside {
            self.cursors.tabs = self.derive_tabs();
        }
        self.touch(page);
    }

    fn clear_dialog(&mut self) {
        self.cursors.list = None;
        self.cursors.group = None;
        self.cursors.tabs = None;
        self.cursors.default_button = None;
        self.clear_page(self.doc.root());
    }
}
