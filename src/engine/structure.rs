//! `end`, `step` and `position`: moving the cursors around the tree.

use super::{CommandError, Cursor, Session};
use crate::command::{Command, CommandOptions, WidgetKind};
use crate::dom::{Control, NodeData, NodeId};
use crate::render::{Renderer, Reporter};

impl<R: Renderer, P: Reporter> Session<R, P> {
    pub(super) fn end(&mut self, widget: Option<WidgetKind>) -> Result<(), CommandError> {
        match widget {
            Some(WidgetKind::GroupBox | WidgetKind::Frame) => self
                .cursors
                .group
                .take()
                .map(drop)
                .ok_or(CommandError::NothingToEnd),
            Some(WidgetKind::ListBox | WidgetKind::ComboBox) => self
                .cursors
                .list
                .take()
                .map(drop)
                .ok_or(CommandError::NothingToEnd),
            Some(WidgetKind::Page) => {
                self.end_page();
                Ok(())
            }
            Some(WidgetKind::Tabs) => {
                self.end_tabs();
                Ok(())
            }
            Some(kind) => Err(CommandError::NotApplicable {
                operation: "end",
                kind,
            }),
            None => {
                if self.cursors.list.take().is_some() || self.cursors.group.take().is_some() {
                    return Ok(());
                }
                let tabs = self.cursors.tabs.ok_or(CommandError::NothingToEnd)?;
                let page = self.doc.page_of(self.cursors.primary.container);
                if self.doc.tabs_of(page) == Some(tabs.container) {
                    self.end_page();
                } else {
                    self.end_tabs();
                }
                Ok(())
            }
        }
    }

    /// Leave the current tab page: continue right after its tabs control.
    pub(super) fn end_page(&mut self) {
        let Some(tabs) = self.cursors.tabs else {
            return;
        };
        let page = self.doc.page_of(self.cursors.primary.container);
        if page == self.doc.root() || self.doc.tabs_of(page) != Some(tabs.container) {
            return;
        }
        self.cursors.group = None;
        self.place_at(tabs.container, 1);
    }

    /// Leave the tabs control, reopening the one enclosing the new position.
    pub(super) fn end_tabs(&mut self) {
        self.end_page();
        self.cursors.tabs = self.derive_tabs();
    }

    /// Tabs cursor for the page holding the primary cursor: after the last
    /// page of the owning tabs control, or none on the root page.
    pub(super) fn derive_tabs(&self) -> Option<Cursor> {
        let page = self.doc.page_of(self.cursors.primary.container);
        let tabs = self.doc.tabs_of(page)?;
        Some(Cursor::new(tabs, self.doc.children(tabs).len()))
    }

    /// Point the insertion cursors `offset` slots after `anchor`'s position in
    /// its container. Inside a group box or frame the group cursor takes the
    /// position and the primary cursor goes right after the group.
    pub(super) fn place_at(&mut self, anchor: NodeId, offset: usize) {
        let (Some(container), Some(index)) = (self.doc.parent(anchor), self.doc.index_of(anchor))
        else {
            return;
        };
        if self.doc.get(container).is_some_and(NodeData::is_group) {
            self.cursors.group = Some(Cursor::new(container, index + offset));
            if let (Some(column), Some(group_index)) =
                (self.doc.parent(container), self.doc.index_of(container))
            {
                self.cursors.primary = Cursor::new(column, group_index + 1);
            }
        } else {
            self.cursors.group = None;
            self.cursors.primary = Cursor::new(container, index + offset);
        }
    }

    pub(super) fn step(&mut self, vertical: bool) {
        let old = self.cursors.primary.container;
        let Some(row) = self.doc.parent(old) else {
            return;
        };
        let column = if vertical {
            let Some(page) = self.doc.parent(row) else {
                return;
            };
            let index = self.doc.index_of(row).map_or(0, |index| index + 1);
            self.add_row(page, index)
        } else {
            let index = self.doc.index_of(old).map_or(0, |index| index + 1);
            self.add_column(row, index)
        };
        self.cursors.primary = Cursor::new(column, 0);
        self.cursors.group = None;
        self.sanitize(old);
    }

    pub(super) fn position(&mut self, command: &Command) -> Result<(), CommandError> {
        let address = command.text.as_str();
        if address.is_empty() {
            return Err(CommandError::MissingName("position"));
        }
        let target = self
            .doc
            .resolve(address)
            .ok_or_else(|| CommandError::UnknownName(address.to_owned()))?;
        let mut behind = command.has_option(CommandOptions::BEHIND);
        let onto = command.has_option(CommandOptions::ONTO);
        let mut node = target.node;
        let mut row = target.row;
        let mut tabs_set = false;

        match self.doc.widget_kind(node) {
            Some(WidgetKind::Page) => {
                let (Some(tabs), Some(index)) = (self.doc.tabs_of(node), self.doc.index_of(node))
                else {
                    return Err(CommandError::StaleNode);
                };
                self.cursors.tabs = Some(Cursor::new(tabs, index + usize::from(behind)));
                behind = false;
                if onto {
                    if let Some(column) = self.doc.last_column(node) {
                        self.cursors.group = None;
                        self.cursors.primary =
                            Cursor::new(column, self.doc.children(column).len());
                    }
                    self.cursors.list = None;
                    return Ok(());
                }
                node = tabs;
                row = None;
                tabs_set = true;
            }
            Some(WidgetKind::Dialog) | None => {
                return Err(CommandError::NotApplicable {
                    operation: "position",
                    kind: WidgetKind::Dialog,
                })
            }
            Some(_) => {}
        }

        let collection_len = self
            .doc
            .control(node)
            .and_then(Control::collection)
            .map(|list| list.items.len());
        match (row, collection_len) {
            (Some(row), Some(_)) => {
                self.cursors.list = Some(Cursor::new(node, row + usize::from(behind)));
                behind = false;
            }
            (None, Some(len)) if onto => self.cursors.list = Some(Cursor::new(node, len)),
            _ => self.cursors.list = None,
        }

        let (Some(container), Some(index)) = (self.doc.parent(node), self.doc.index_of(node))
        else {
            return Err(CommandError::StaleNode);
        };
        let index = index + usize::from(behind);
        if self.doc.get(container).is_some_and(NodeData::is_group) {
            self.cursors.group = Some(Cursor::new(container, index));
            if let (Some(column), Some(group_index)) =
                (self.doc.parent(container), self.doc.index_of(container))
            {
                self.cursors.primary = Cursor::new(column, group_index + 1);
            }
        } else {
            self.cursors.group = None;
            self.cursors.primary = Cursor::new(container, index);
            if onto && self.doc.get(node).is_some_and(NodeData::is_group) {
                self.cursors.group = Some(Cursor::new(node, self.doc.children(node).len()));
            }
        }

        if !tabs_set {
            self.cursors.tabs = if onto && matches!(self.doc.control(node), Some(Control::Tabs(_)))
            {
                Some(Cursor::new(node, self.doc.children(node).len()))
            } else {
                let page = self.doc.page_of(self.cursors.primary.container);
                self.doc
                    .tabs_of(page)
                    .zip(self.doc.index_of(page))
                    .map(|(tabs, index)| Cursor::new(tabs, index))
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, session};
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(session: &Session<impl Renderer, impl Reporter>, name: &str) -> NodeId {
        session.document().find_named(name).expect("named node")
    }

    // ── end ──────────────────────────────────────────────────────────

    #[test]
    fn untyped_end_closes_list_then_group() {
        let mut session = session();
        run(&mut session, "add groupbox G g\nadd listbox L lb\n");
        assert!(session.cursors().list.is_some());
        run(&mut session, "end\n");
        assert!(session.cursors().list.is_none());
        assert!(session.cursors().group.is_some());
        run(&mut session, "end\n");
        assert!(session.cursors().group.is_none());
    }

    #[test]
    fn end_then_add_lands_after_group() {
        let mut session = session();
        run(&mut session, "add groupbox G g\nadd label In inner\nend\nadd label Out outer\n");
        let doc = session.document();
        let g = named(&session, "g");
        let outer = named(&session, "outer");
        assert_eq!(doc.parent(outer), doc.parent(g));
        assert_eq!(doc.index_of(outer), Some(1));
    }

    #[test]
    fn end_page_continues_after_tabs() {
        let mut session = session();
        run(
            &mut session,
            "add tabs t\nadd page One p1\nadd label In inner\nend page\nadd label After after\n",
        );
        let doc = session.document();
        let t = named(&session, "t");
        let after = named(&session, "after");
        assert_eq!(doc.parent(after), doc.parent(t));
        assert_eq!(doc.index_of(after), Some(1));
        assert_eq!(session.cursors().tabs, Some(Cursor::new(t, 1)));
    }

    #[test]
    fn untyped_end_walks_out_of_pages_then_tabs() {
        let mut session = session();
        run(&mut session, "add tabs t\nadd page One p1\nend\n");
        let t = named(&session, "t");
        assert_eq!(session.document().page_of(session.cursors().primary.container), session.document().root());
        assert_eq!(session.cursors().tabs, Some(Cursor::new(t, 1)));
        run(&mut session, "end\n");
        assert_eq!(session.cursors().tabs, None);
    }

    #[test]
    fn end_tabs_inside_group_reopens_group() {
        let mut session = session();
        run(&mut session, "add groupbox G g\nadd tabs t\nadd page P p\nend tabs\n");
        let g = named(&session, "g");
        assert_eq!(session.cursors().group, Some(Cursor::new(g, 1)));
        assert_eq!(session.cursors().primary.index, 1);
        assert_eq!(session.cursors().tabs, None);
    }

    #[test]
    fn nested_tabs_end_reopens_outer_tabs() {
        let mut session = session();
        run(
            &mut session,
            "add tabs outer\nadd page A a\nadd tabs inner\nadd page B b\nend tabs\n",
        );
        let outer = named(&session, "outer");
        let a = named(&session, "a");
        assert_eq!(session.document().page_of(session.cursors().primary.container), a);
        assert_eq!(session.cursors().tabs, Some(Cursor::new(outer, 1)));
    }

    // ── step ─────────────────────────────────────────────────────────

    #[test]
    fn step_horizontal_adds_column() {
        let mut session = session();
        run(&mut session, "add label A a\nstep\nadd label B b\n");
        let doc = session.document();
        let a = named(&session, "a");
        let b = named(&session, "b");
        let row = doc.children(doc.root())[0];
        assert_eq!(doc.children(row).len(), 2);
        assert_eq!(doc.parent(doc.parent(a).expect("column")), Some(row));
        assert_eq!(doc.parent(doc.parent(b).expect("column")), Some(row));
    }

    #[test]
    fn step_vertical_adds_row() {
        let mut session = session();
        run(&mut session, "add label A a\nstep vertical\nadd label B b\n");
        let doc = session.document();
        assert_eq!(doc.children(doc.root()).len(), 2);
    }

    #[test]
    fn step_closes_group() {
        let mut session = session();
        run(&mut session, "add groupbox G g\nstep\n");
        assert_eq!(session.cursors().group, None);
    }

    #[test]
    fn stepping_twice_leaves_one_empty_column() {
        let mut session = session();
        run(&mut session, "step vertical\nstep vertical\n");
        let doc = session.document();
        assert_eq!(doc.children(doc.root()).len(), 1);
        assert_eq!(doc.len(), 3);
    }

    // ── position ─────────────────────────────────────────────────────

    #[test]
    fn position_before_and_behind() {
        let mut session = session();
        run(&mut session, "add label A a\nadd label C c\nposition c\nadd label B b\n");
        let doc = session.document();
        assert_eq!(doc.index_of(named(&session, "b")), Some(1));
        run(&mut session, "position behind c\nadd label D d\n");
        let doc = session.document();
        let column = doc.first_column(doc.root()).expect("column");
        let names: Vec<_> = doc.children(column).iter().filter_map(|&id| doc.name(id)).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn position_onto_group_opens_it() {
        let mut session = session();
        run(
            &mut session,
            "add groupbox G g\nadd label X x\nend\nadd label Y y\nposition onto g\nadd label Z z\n",
        );
        let doc = session.document();
        let g = named(&session, "g");
        let z = named(&session, "z");
        assert_eq!(doc.parent(z), Some(g));
        assert_eq!(doc.index_of(z), Some(1));
    }

    #[test]
    fn position_inside_group() {
        let mut session = session();
        run(&mut session, "add groupbox G g\nadd label X x\nend\nposition x\n");
        let g = named(&session, "g");
        assert_eq!(session.cursors().group, Some(Cursor::new(g, 0)));
        assert_eq!(session.cursors().primary.index, 1);
    }

    #[test]
    fn position_on_item_targets_list() {
        let mut session = session();
        run(
            &mut session,
            "add listbox L lb\nadd item a\nadd item c\nend\nposition behind lb#0\nadd item b\n",
        );
        let doc = session.document();
        let lb = named(&session, "lb");
        let titles: Vec<_> = doc
            .control(lb)
            .and_then(Control::collection)
            .map(|list| list.items.iter().map(|item| item.title.clone()).collect())
            .unwrap_or_default();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn position_closes_unrelated_list() {
        let mut session = session();
        run(&mut session, "add listbox L lb\nadd label X x\nposition x\n");
        assert_eq!(session.cursors().list, None);
    }

    #[test]
    fn position_onto_page() {
        let mut session = session();
        run(
            &mut session,
            "add tabs t\nadd page A a\nadd label One one\nend tabs\nposition onto a\nadd label Two two\n",
        );
        let doc = session.document();
        let one = named(&session, "one");
        let two = named(&session, "two");
        assert_eq!(doc.parent(one), doc.parent(two));
        assert_eq!(doc.index_of(two), Some(1));
        let t = named(&session, "t");
        assert_eq!(session.cursors().tabs, Some(Cursor::new(t, 0)));
    }

    #[test]
    fn position_behind_page_adds_page_after_it() {
        let mut session = session();
        run(
            &mut session,
            "add tabs t\nadd page A a\nadd page C c\nend tabs\nposition behind a\nadd page B b\n",
        );
        let doc = session.document();
        let t = named(&session, "t");
        let names: Vec<_> = doc.children(t).iter().filter_map(|&id| doc.name(id)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn position_unknown_name_changes_nothing() {
        let mut session = session();
        run(&mut session, "add label A a\n");
        let before = session.cursors().clone();
        run(&mut session, "position ghost\n");
        assert_eq!(session.cursors(), &before);
    }
}
