//! Snapshot helpers.
//!
//! [`outline`] turns a [`Document`] into indented plain text suitable for
//! snapshot assertions: one line per node, two spaces per level.

use std::fmt::Write;

use crate::dom::node::{NodeKind, Spacer};
use crate::dom::{Axis, Control, Document, NodeId};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the whole document as an indented outline.
///
/// Each line reads `kind "caption" #name [flags]`, leaving out the parts that
/// do not apply. Rows of list and combo boxes appear as `item` lines below
/// their control, the current one marked with `*`. The final line has no
/// trailing newline.
///
/// # Examples
///
/// ```
/// use dialogbox::testing::{outline, Pilot};
///
/// let mut pilot = Pilot::new();
/// pilot.run("add label Hi greeting\n");
/// assert_eq!(
///     outline(pilot.document()),
///     "dialog \"dialogbox\"\n  row\n    column\n      label \"Hi\" #greeting",
/// );
/// ```
pub fn outline(doc: &Document) -> String {
    let mut lines = Vec::new();
    outline_node(doc, doc.root(), 0, &mut lines);
    lines.join("\n")
}

/// One-line description of a single node, without indentation.
pub fn describe(doc: &Document, id: NodeId) -> String {
    let Some(data) = doc.get(id) else {
        return "<stale>".to_owned();
    };
    let mut line = match &data.kind {
        NodeKind::Page(page) => {
            let kind = if id == doc.root() { "dialog" } else { "page" };
            format!("{kind} {:?}", page.title)
        }
        NodeKind::Layout(Axis::Horizontal) => "row".to_owned(),
        NodeKind::Layout(Axis::Vertical) => "column".to_owned(),
        NodeKind::Spacer(Spacer::Stretch) => "stretch".to_owned(),
        NodeKind::Spacer(Spacer::Fixed(size)) => format!("spacing {size}"),
        NodeKind::Control(control) => match control.caption() {
            "" => control.kind().to_string(),
            caption => format!("{} {caption:?}", control.kind()),
        },
    };
    if let Some(name) = data.name() {
        let _ = write!(line, " #{name}");
    }

    let mut flags = Vec::new();
    if let Some(control) = data.as_control() {
        if control.checked() == Some(true) {
            flags.push("checked");
        }
        if matches!(control, Control::PushButton(button) if button.default) {
            flags.push("default");
        }
    }
    if !data.enabled {
        flags.push("disabled");
    }
    if !data.visible {
        flags.push("hidden");
    }
    if !flags.is_empty() {
        let _ = write!(line, " [{}]", flags.join(" "));
    }
    line
}

fn outline_node(doc: &Document, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    lines.push(format!("{indent}{}", describe(doc, id)));

    if let Some(list) = doc.control(id).and_then(Control::collection) {
        for (row, item) in list.items.iter().enumerate() {
            let marker = if list.current == Some(row) { " *" } else { "" };
            lines.push(format!("{indent}  item {:?}{marker}", item.title));
        }
    }
    for &child in doc.children(id) {
        outline_node(doc, child, depth + 1, lines);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Pilot;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_dialog_outline() {
        let pilot = Pilot::new();
        assert_eq!(
            outline(pilot.document()),
            "dialog \"dialogbox\"\n  row\n    column"
        );
    }

    #[test]
    fn describe_lists_flags() {
        let mut pilot = Pilot::new();
        pilot.run("add checkbox Go cb checked\ndisable cb\nhide cb\n");
        let cb = pilot.named("cb");
        assert_eq!(
            describe(pilot.document(), cb),
            "checkbox \"Go\" #cb [checked disabled hidden]"
        );
    }

    #[test]
    fn items_are_listed_under_their_control() {
        let mut pilot = Pilot::new();
        pilot.run("add combobox Pick c\nadd item a\nadd item b current\nend\n");
        let text = outline(pilot.document());
        assert!(text.ends_with(
            "      combobox \"Pick\" #c\n        item \"a\"\n        item \"b\" *"
        ));
    }

    #[test]
    fn spacers_and_untitled_controls() {
        let mut pilot = Pilot::new();
        pilot.run("add stretch\nadd space 8\nadd separator\n");
        let text = outline(pilot.document());
        assert!(text.ends_with("      stretch\n      spacing 8\n      separator"));
    }
}
