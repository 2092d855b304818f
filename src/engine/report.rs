//! Report lines: `query` and the user interactions a renderer feeds back.

use super::{CommandError, Session};
use crate::command::WidgetKind;
use crate::dom::node::LabelContent;
use crate::dom::{Control, NodeId};
use crate::render::{Renderer, Reporter};

/// How the dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An `exit` button that also applies.
    Accepted,
    /// An `exit` button without `apply`, or the window was closed.
    Rejected,
}

impl Outcome {
    /// Process exit status: 1 when accepted, 0 otherwise.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Accepted => 1,
            Outcome::Rejected => 0,
        }
    }
}

impl<R: Renderer, P: Reporter> Session<R, P> {
    /// Report every enabled, named control that carries a value, page by
    /// page: the root page first, then each tab page in document order.
    pub fn query(&mut self) {
        let lines: Vec<(NodeId, String)> = self
            .doc
            .pages()
            .into_iter()
            .flat_map(|page| self.doc.walk_page(page))
            .filter(|&id| self.doc.name(id).is_some() && self.doc.is_effectively_enabled(id))
            .filter_map(|id| {
                let value = self.doc.control(id).and_then(report_value)?;
                Some((id, value))
            })
            .collect();
        for (id, value) in lines {
            self.emit(id, &value);
        }
    }

    // -----------------------------------------------------------------------
    // Interactions
    // -----------------------------------------------------------------------

    /// Kind of a node the user can interact with.
    fn interactive(&self, node: NodeId) -> Result<WidgetKind, CommandError> {
        let kind = self.doc.widget_kind(node).ok_or(CommandError::StaleNode)?;
        if !self.doc.is_effectively_enabled(node) {
            return Err(CommandError::Disabled(kind));
        }
        Ok(kind)
    }

    /// The user clicked a button or a checkable group box title.
    pub fn click(&mut self, node: NodeId) -> Result<(), CommandError> {
        let kind = self.interactive(node)?;
        let Some(control) = self.doc.control_mut(node) else {
            return Err(CommandError::StaleNode);
        };
        match control {
            Control::PushButton(button) => {
                let report = if button.checkable {
                    button.checked = !button.checked;
                    if button.checked {
                        "pressed"
                    } else {
                        "released"
                    }
                } else {
                    "clicked"
                };
                let (apply, exit) = (button.apply, button.exit);
                self.touch(node);
                self.emit(node, report);
                if apply {
                    self.query();
                }
                if exit {
                    let outcome = if apply {
                        Outcome::Accepted
                    } else {
                        Outcome::Rejected
                    };
                    tracing::debug!(?outcome, "dialog closed");
                    self.outcome = Some(outcome);
                }
            }
            Control::CheckBox(toggle) => {
                toggle.checked = !toggle.checked;
                self.touch(node);
            }
            Control::RadioButton(radio) => {
                if !radio.checked {
                    radio.checked = true;
                    self.exclusive_check(node);
                    self.touch(node);
                }
            }
            Control::GroupBox(group) if group.checkable => {
                group.checked = !group.checked;
                self.touch(node);
            }
            _ => {
                return Err(CommandError::NotApplicable {
                    operation: "click",
                    kind,
                })
            }
        }
        self.refresh_focus();
        Ok(())
    }

    /// The user made `row` the current row of a list or combo box.
    pub fn select_item(&mut self, node: NodeId, row: usize) -> Result<(), CommandError> {
        let kind = self.interactive(node)?;
        let Some(list) = self.doc.control_mut(node).and_then(Control::collection_mut) else {
            return Err(CommandError::NotApplicable {
                operation: "select",
                kind,
            });
        };
        if row >= list.items.len() {
            return Err(CommandError::NotApplicable {
                operation: "select",
                kind: WidgetKind::Item,
            });
        }
        let changed = list.select(Some(row));
        let report = (changed && list.selection).then(|| list.current_text().to_owned());
        self.touch(node);
        if let Some(value) = report {
            self.emit(node, &value);
        }
        Ok(())
    }

    /// The user activated (double-clicked or entered) a list box row.
    pub fn activate_item(&mut self, node: NodeId, row: usize) -> Result<(), CommandError> {
        let kind = self.interactive(node)?;
        let Some(Control::ListBox(list)) = self.doc.control(node) else {
            return Err(CommandError::NotApplicable {
                operation: "activate",
                kind,
            });
        };
        let Some(item) = list.items.get(row) else {
            return Err(CommandError::NotApplicable {
                operation: "activate",
                kind: WidgetKind::Item,
            });
        };
        if list.activation {
            let title = item.title.clone();
            self.emit(node, &title);
        }
        Ok(())
    }

    /// The user dragged a slider. The value is clamped to the range.
    pub fn move_slider(&mut self, node: NodeId, value: i32) -> Result<(), CommandError> {
        let kind = self.interactive(node)?;
        let Some(Control::Slider(slider)) = self.doc.control_mut(node) else {
            return Err(CommandError::NotApplicable {
                operation: "move",
                kind,
            });
        };
        let value = slider.clamp(value);
        if value == slider.value {
            return Ok(());
        }
        slider.value = value;
        self.touch(node);
        self.emit(node, &value.to_string());
        Ok(())
    }

    /// The user typed into a text box or an editable combo box.
    pub fn edit_text(&mut self, node: NodeId, text: &str) -> Result<(), CommandError> {
        let kind = self.interactive(node)?;
        match self.doc.control_mut(node) {
            Some(Control::TextBox(text_box)) => text_box.text = text.to_owned(),
            Some(Control::ComboBox(list)) if list.editable => {
                list.edit_text = Some(text.to_owned());
            }
            _ => {
                return Err(CommandError::NotApplicable {
                    operation: "edit",
                    kind,
                })
            }
        }
        self.touch(node);
        Ok(())
    }

    /// The window was closed without an exit button.
    pub fn close(&mut self) {
        self.outcome.get_or_insert(Outcome::Rejected);
    }
}

/// Value a control reports on `query`; `None` for controls without one.
fn report_value(control: &Control) -> Option<String> {
    if let Some(checked) = control.checked() {
        return Some(if checked { "1" } else { "0" }.to_owned());
    }
    match control {
        Control::Slider(slider) => Some(slider.value.to_string()),
        Control::TextBox(text_box) => Some(text_box.text.clone()),
        Control::ListBox(list) | Control::ComboBox(list) => Some(list.current_text().to_owned()),
        Control::Label(label) => match &label.content {
            LabelContent::Text(text) => Some(text.clone()),
            LabelContent::Picture(_) | LabelContent::Animation(_) => None,
        },
        _ => None,
    }
}
