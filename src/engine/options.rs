//! `set` and `unset`: change options of existing nodes.

use super::add::{frame_shape, shadow, tab_position};
use super::{non_empty, parse_int, CommandError, Session};
use crate::command::{Command, CommandOptions, Properties, WidgetKind};
use crate::dom::node::{FrameShape, LabelContent, Shadow, Toggle};
use crate::dom::{Control, NodeData, NodeId, Target};
use crate::render::{Renderer, Reporter};

/// Follow-ups of a control change that need the whole session.
#[derive(Debug, Default)]
struct Effects {
    reports: Vec<String>,
    /// A radio button got checked.
    exclusive: bool,
    /// The default marker was switched on or off.
    default: Option<bool>,
}

impl<R: Renderer, P: Reporter> Session<R, P> {
    pub(super) fn set_options(&mut self, command: &Command, on: bool) -> Result<(), CommandError> {
        let operation = if on { "set" } else { "unset" };
        let target = if command.name.is_empty() {
            Target {
                node: self.doc.root(),
                row: None,
            }
        } else {
            self.doc
                .resolve(&command.name)
                .ok_or_else(|| CommandError::UnknownName(command.name.clone()))?
        };
        let node = target.node;
        let kind = self.doc.target_kind(target).ok_or(CommandError::StaleNode)?;

        if let Some(data) = self.doc.get_mut(node) {
            if command.has_option(CommandOptions::ENABLED) {
                data.enabled = on;
            }
            if command.has_option(CommandOptions::VISIBLE) {
                data.visible = on;
            }
            if command.has_option(CommandOptions::STYLESHEET) {
                data.style_sheet = if on { non_empty(&command.text) } else { None };
            }
        }

        if !command.properties.is_empty() {
            if !command.targets(kind) {
                self.touch(node);
                return Err(CommandError::NotApplicable { operation, kind });
            }
            match (target.row, kind) {
                (Some(row), _) => self.set_item(node, row, command, on)?,
                (None, WidgetKind::Dialog | WidgetKind::Page) => self.set_page(node, command, on),
                (None, _) => self.set_control(node, command, on),
            }
        }
        self.touch(node);

        if on && command.has_option(CommandOptions::FOCUS) {
            self.focus_on(node);
        }
        Ok(())
    }

    fn set_item(
        &mut self,
        node: NodeId,
        row: usize,
        command: &Command,
        on: bool,
    ) -> Result<(), CommandError> {
        let Some(list) = self.doc.control_mut(node).and_then(Control::collection_mut) else {
            return Err(CommandError::StaleNode);
        };
        let Some(item) = list.items.get_mut(row) else {
            return Err(CommandError::UnknownName(command.name.clone()));
        };
        if command.has(Properties::TITLE) || command.has(Properties::TEXT) {
            item.title = text_or_empty(command, on);
        }
        if command.has(Properties::ICON) {
            item.icon = path(command, on);
        }
        let selected = on && command.has(Properties::CURRENT) && list.select(Some(row));
        let report = (selected && list.selection).then(|| list.current_text().to_owned());
        if let Some(value) = report {
            self.emit(node, &value);
        }
        Ok(())
    }

    fn set_page(&mut self, node: NodeId, command: &Command, on: bool) {
        if let Some(page) = self.doc.get_mut(node).and_then(NodeData::as_page_mut) {
            if command.has(Properties::TITLE) || command.has(Properties::TEXT) {
                page.title = text_or_empty(command, on);
            }
            if command.has(Properties::ICON) {
                page.icon = path(command, on);
            }
        }
        if !(on && command.has(Properties::CURRENT)) {
            return;
        }
        let (Some(tabs), Some(index)) = (self.doc.tabs_of(node), self.doc.index_of(node)) else {
            return;
        };
        if let Some(Control::Tabs(control)) = self.doc.control_mut(tabs) {
            control.current = Some(index);
        }
        self.touch(tabs);
    }

    fn set_control(&mut self, node: NodeId, command: &Command, on: bool) {
        let Some(control) = self.doc.control_mut(node) else {
            return;
        };
        let effects = change_control(control, command, on);

        for value in &effects.reports {
            self.emit(node, value);
        }
        if effects.exclusive {
            self.exclusive_check(node);
        }
        match effects.default {
            Some(true) => self.move_default(node),
            Some(false) if self.cursors.default_button == Some(node) => {
                self.cursors.default_button = None;
            }
            _ => {}
        }
    }

    /// Focus `node` within its page, if it can take focus.
    fn focus_on(&mut self, node: NodeId) {
        self.refresh_focus();
        let page = self.doc.page_of(node);
        let focused = self
            .focus
            .get_mut(page)
            .is_some_and(|chain| chain.focus_node(node));
        match self.handle(node) {
            Some(handle) if focused => self.renderer.focus(handle),
            _ => tracing::debug!(?node, "node cannot take focus"),
        }
    }

    /// Uncheck every other radio button sharing `node`'s scope.
    pub(super) fn exclusive_check(&mut self, node: NodeId) {
        let scope = self.exclusive_scope(node);
        let others: Vec<NodeId> = self
            .doc
            .walk_depth_first(scope)
            .into_iter()
            .filter(|&other| other != node)
            .filter(|&other| {
                matches!(
                    self.doc.control(other),
                    Some(Control::RadioButton(Toggle { checked: true, .. }))
                )
            })
            .filter(|&other| self.exclusive_scope(other) == scope)
            .collect();
        for other in others {
            if let Some(Control::RadioButton(radio)) = self.doc.control_mut(other) {
                radio.checked = false;
            }
            self.touch(other);
        }
    }

    /// Nearest group box, frame or page above `node`.
    fn exclusive_scope(&self, node: NodeId) -> NodeId {
        self.doc
            .ancestors(node)
            .into_iter()
            .find(|&ancestor| {
                self.doc
                    .get(ancestor)
                    .is_some_and(|data| data.is_group() || data.is_page())
            })
            .unwrap_or_else(|| self.doc.root())
    }
}

/// Apply the properties of `command` to one control.
fn change_control(control: &mut Control, command: &Command, on: bool) -> Effects {
    let mut effects = Effects::default();
    let has = |property: Properties| command.has(property);
    let caption = has(Properties::TITLE) || has(Properties::TEXT);
    let text = command.text.as_str();

    match control {
        Control::Label(label) => {
            if caption {
                label.content = LabelContent::Text(text_or_empty(command, on));
            }
            if has(Properties::PICTURE) {
                label.content = if on {
                    LabelContent::Picture(text.to_owned())
                } else {
                    LabelContent::Text(String::new())
                };
            }
            if has(Properties::ANIMATION) {
                label.content = if on {
                    LabelContent::Animation(text.to_owned())
                } else {
                    LabelContent::Text(String::new())
                };
            }
        }
        Control::PushButton(button) => {
            if caption {
                button.title = text_or_empty(command, on);
            }
            if has(Properties::ICON) {
                button.icon = path(command, on);
            }
            if has(Properties::ICON_SIZE) {
                change_icon_size(&mut button.icon_size, command, on);
            }
            if has(Properties::CHECKABLE) {
                button.checkable = on;
                if !on {
                    button.checked = false;
                }
            }
            if has(Properties::CHECKED) && button.checkable && button.checked != on {
                button.checked = on;
                let value = if on { "pressed" } else { "released" };
                effects.reports.push(value.to_owned());
            }
            if has(Properties::APPLY) {
                button.apply = on;
            }
            if has(Properties::EXIT) {
                button.exit = on;
            }
            if has(Properties::DEFAULT) {
                button.default = on;
                effects.default = Some(on);
            }
        }
        Control::RadioButton(toggle) | Control::CheckBox(toggle) => {
            if caption {
                toggle.title = text_or_empty(command, on);
            }
            if has(Properties::ICON) {
                toggle.icon = path(command, on);
            }
            if has(Properties::ICON_SIZE) {
                change_icon_size(&mut toggle.icon_size, command, on);
            }
            if has(Properties::CHECKED) {
                toggle.checked = on;
            }
        }
        Control::GroupBox(group) => {
            if caption {
                group.title = text_or_empty(command, on);
            }
            if has(Properties::CHECKABLE) {
                group.checkable = on;
                if !on {
                    group.checked = false;
                }
            }
            if has(Properties::CHECKED) && group.checkable {
                group.checked = on;
            }
        }
        Control::Frame(frame) => {
            if on {
                if let Some(shadow) = explicit_shadow(command) {
                    frame.shadow = shadow;
                }
                if has(Properties::NO_FRAME) {
                    frame.shape = FrameShape::NoFrame;
                }
            }
            if has(Properties::BOX) || has(Properties::PANEL) || has(Properties::STYLED) {
                frame.shape = if on {
                    frame_shape(command)
                } else {
                    FrameShape::NoFrame
                };
            }
        }
        Control::Separator(separator) => {
            if let Some(shadow) = explicit_shadow(command).filter(|_| on) {
                separator.shadow = shadow;
            }
        }
        Control::TextBox(text_box) => {
            if has(Properties::TITLE) {
                text_box.title = text_or_empty(command, on);
            }
            if has(Properties::TEXT) {
                text_box.text = text_or_empty(command, on);
            }
            if has(Properties::PASSWORD) {
                text_box.password = on;
            }
            if has(Properties::PLACEHOLDER) {
                text_box.placeholder = path(command, on);
            }
        }
        Control::ListBox(list) | Control::ComboBox(list) => {
            if has(Properties::TITLE) {
                list.title = text_or_empty(command, on);
            }
            if has(Properties::TEXT) {
                if list.editable {
                    list.edit_text = Some(text_or_empty(command, on));
                } else {
                    list.title = text_or_empty(command, on);
                }
            }
            if has(Properties::ICON_SIZE) {
                change_icon_size(&mut list.icon_size, command, on);
            }
            if has(Properties::ACTIVATION) {
                list.activation = on;
            }
            if has(Properties::SELECTION) {
                list.selection = on;
            }
        }
        Control::ProgressBar(bar) => {
            change_range(&mut bar.minimum, &mut bar.maximum, command, on);
            if bar
                .value
                .is_some_and(|value| value < bar.minimum || value > bar.maximum)
            {
                bar.value = None;
            }
            if has(Properties::VALUE) {
                if !on {
                    bar.value = None;
                } else if let Some(value) = parse_int(text)
                    .filter(|value| (bar.minimum..=bar.maximum).contains(value))
                {
                    bar.value = Some(value);
                }
            }
            if has(Properties::BUSY) {
                bar.busy = on;
            }
        }
        Control::Slider(slider) => {
            let before = slider.value;
            change_range(&mut slider.minimum, &mut slider.maximum, command, on);
            if on && has(Properties::VALUE) {
                if let Some(value) = parse_int(text) {
                    slider.value = value;
                }
            }
            slider.value = slider.clamp(slider.value);
            if slider.value != before {
                effects.reports.push(slider.value.to_string());
            }
        }
        Control::TextView(view) => {
            if has(Properties::FILE) {
                view.file = path(command, on);
            }
        }
        Control::Tabs(tabs) => {
            if has(Properties::ICON_SIZE) {
                change_icon_size(&mut tabs.icon_size, command, on);
            }
            if let Some(position) = tab_position(command).filter(|_| on) {
                tabs.position = position;
            }
        }
    }

    effects.exclusive = on && has(Properties::CHECKED) && matches!(control, Control::RadioButton(_));
    effects
}

fn text_or_empty(command: &Command, on: bool) -> String {
    if on {
        command.text.clone()
    } else {
        String::new()
    }
}

fn path(command: &Command, on: bool) -> Option<String> {
    if on {
        non_empty(&command.text)
    } else {
        None
    }
}

/// A shadow keyword given on the command, if any.
fn explicit_shadow(command: &Command) -> Option<Shadow> {
    let named = Properties::PLAIN | Properties::RAISED | Properties::SUNKEN;
    command
        .properties
        .intersects(named)
        .then(|| shadow(command, Shadow::Plain))
}

/// Set: parse the size from the text, leaving it alone when there is none.
/// Unset: back to the default size.
fn change_icon_size(size: &mut Option<u32>, command: &Command, on: bool) {
    if !on {
        *size = None;
    } else if let Some(parsed) = parse_int(&command.text).and_then(|value| u32::try_from(value).ok())
    {
        *size = Some(parsed);
    }
}

/// Move a range bound. Raising the minimum drags the maximum along and
/// lowering the maximum drags the minimum along.
fn change_range(minimum: &mut i32, maximum: &mut i32, command: &Command, on: bool) {
    if command.has(Properties::MINIMUM) {
        let value = if on { parse_int(&command.text).unwrap_or(0) } else { 0 };
        *minimum = value;
        *maximum = (*maximum).max(value);
    }
    if command.has(Properties::MAXIMUM) {
        let value = if on { parse_int(&command.text).unwrap_or(100) } else { 100 };
        *maximum = value;
        *minimum = (*minimum).min(value);
    }
}
