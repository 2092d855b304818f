//! Insertion cursors.
//!
//! A cursor names a container and a child index inside it. The engine keeps
//! one mandatory cursor (`primary`, always a scaffold column) and three
//! optional ones that are opened by `add` and closed by `end`.

use crate::dom::NodeId;

/// A position among the children of `container`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub container: NodeId,
    pub index: usize,
}

impl Cursor {
    pub fn new(container: NodeId, index: usize) -> Self {
        Self { container, index }
    }

    /// Return the current position and move past it.
    fn advance(&mut self) -> Cursor {
        let at = *self;
        self.index += 1;
        at
    }
}

/// Every cursor of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursors {
    /// Scaffold column receiving new controls.
    pub primary: Cursor,
    /// Open group box or frame.
    pub group: Option<Cursor>,
    /// Open list box or combo box; the index is an item row.
    pub list: Option<Cursor>,
    /// Open tabs control; the index is a page position.
    pub tabs: Option<Cursor>,
    /// Push button carrying the default marker.
    pub default_button: Option<NodeId>,
}

impl Cursors {
    /// Cursors at the start of `column`, everything else closed.
    pub fn new(column: NodeId) -> Self {
        Self {
            primary: Cursor::new(column, 0),
            group: None,
            list: None,
            tabs: None,
            default_button: None,
        }
    }

    /// Where the next control goes: the open group, else the primary cursor.
    pub fn insertion(&self) -> Cursor {
        self.group.unwrap_or(self.primary)
    }

    /// Take the insertion point and advance the cursor it came from.
    pub(crate) fn advance_insertion(&mut self) -> Cursor {
        match self.group.as_mut() {
            Some(group) => group.advance(),
            None => self.primary.advance(),
        }
    }

    /// Take the primary position and advance it, bypassing an open group.
    pub(crate) fn advance_primary(&mut self) -> Cursor {
        self.primary.advance()
    }
}
