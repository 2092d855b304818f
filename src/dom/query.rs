//! Addressing: resolve `name`, `name#row` and `name:title` to nodes.

use super::node::NodeId;
use super::tree::Document;
use crate::command::WidgetKind;

/// Row selector suffix of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `#K`: the K-th row, zero-based.
    Row(usize),
    /// `:T`: the first row titled T.
    Title(&'a str),
}

/// A parsed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address<'a> {
    pub name: &'a str,
    pub selector: Option<Selector<'a>>,
}

impl<'a> Address<'a> {
    /// Split an address at the first `#` or `:`.
    ///
    /// A `#` suffix that does not start with a non-negative decimal number
    /// selects nothing.
    pub fn parse(text: &'a str) -> Self {
        let Some(split) = text.find(['#', ':']) else {
            return Self {
                name: text,
                selector: None,
            };
        };
        let (name, rest) = text.split_at(split);
        let selector = match rest.split_at(1) {
            ("#", digits) => leading_number(digits).map(Selector::Row),
            (_, title) => Some(Selector::Title(title)),
        };
        Self { name, selector }
    }
}

/// Parse the decimal number at the start of `text`, like `%d` would.
fn leading_number(text: &str) -> Option<usize> {
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// A resolved address: a node and, for list and combo boxes addressed with a
/// selector, the chosen row.
///
/// The row is clamped to one past the last item, which callers that append
/// treat as "at the end" and everyone else as "no such item".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub node: NodeId,
    pub row: Option<usize>,
}

impl Document {
    /// First node in document order named `name`. Pages match by their own
    /// name; tab pages are searched through their tabs control.
    pub fn find_named(&self, name: &str) -> Option<NodeId> {
        if name.is_empty() {
            return None;
        }
        self.walk_depth_first(self.root())
            .into_iter()
            .find(|&id| self.name(id) == Some(name))
    }

    /// Resolve an address. `None` when the name is unknown.
    pub fn resolve(&self, address: &str) -> Option<Target> {
        let address = Address::parse(address);
        let node = self.find_named(address.name)?;
        let collection = self.control(node).and_then(|control| control.collection());
        let row = match (address.selector, collection) {
            (Some(Selector::Row(row)), Some(list)) => Some(row.min(list.items.len())),
            (Some(Selector::Title(title)), Some(list)) => {
                Some(list.position(title).unwrap_or(list.items.len()))
            }
            _ => None,
        };
        Some(Target { node, row })
    }

    /// Widget kind of a target: `Item` when a row was chosen.
    pub fn target_kind(&self, target: Target) -> Option<WidgetKind> {
        if target.row.is_some() {
            return Some(WidgetKind::Item);
        }
        self.widget_kind(target.node)
    }
}
