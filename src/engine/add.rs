//! `add`: create controls at the insertion point.

use super::{non_empty, parse_int, CommandError, Cursor, Session};
use crate::command::{Command, CommandOptions, Properties, WidgetKind};
use crate::dom::node::{
    Button, Collection, Frame, FrameShape, GroupBox, Item, Label, LabelContent, Page,
    ProgressBar, Separator, Shadow, Slider, TabPosition, Tabs, TextBox, TextView, Toggle,
};
use crate::dom::{Control, NodeData, NodeId, Spacer};
use crate::render::{Renderer, Reporter};

impl<R: Renderer, P: Reporter> Session<R, P> {
    pub(super) fn add(&mut self, command: &Command) -> Result<(), CommandError> {
        if command.has_option(CommandOptions::STRETCH) {
            self.insert(NodeData::spacer(Spacer::Stretch));
            return Ok(());
        }
        if command.has_option(CommandOptions::SPACE) {
            let size = parse_int(&command.text)
                .and_then(|size| u32::try_from(size).ok())
                .unwrap_or(1);
            self.insert(NodeData::spacer(Spacer::Fixed(size)));
            return Ok(());
        }

        let kind = command.widget.ok_or(CommandError::MissingType("add"))?;
        let has = |property| command.has(property);
        let title = command.title.as_str();
        let name = command.name.as_str();

        match kind {
            WidgetKind::Label => {
                let content = if has(Properties::PICTURE) {
                    LabelContent::Picture(title.to_owned())
                } else if has(Properties::ANIMATION) {
                    LabelContent::Animation(title.to_owned())
                } else {
                    LabelContent::Text(title.to_owned())
                };
                self.insert(NodeData::control(Control::Label(Label { content })).with_name(name));
            }
            WidgetKind::GroupBox => {
                let checkable = has(Properties::CHECKABLE);
                let group = GroupBox {
                    title: title.to_owned(),
                    vertical: has(Properties::VERTICAL),
                    checkable,
                    checked: checkable && has(Properties::CHECKED),
                };
                self.open_group(NodeData::control(Control::GroupBox(group)).with_name(name));
            }
            WidgetKind::Frame => {
                let frame = Frame {
                    vertical: has(Properties::VERTICAL),
                    shape: frame_shape(command),
                    shadow: shadow(command, Shadow::Plain),
                };
                self.open_group(NodeData::control(Control::Frame(frame)).with_name(title));
            }
            WidgetKind::PushButton => {
                let checkable = has(Properties::CHECKABLE);
                let button = Button {
                    title: title.to_owned(),
                    checkable,
                    checked: checkable && has(Properties::CHECKED),
                    apply: has(Properties::APPLY),
                    exit: has(Properties::EXIT),
                    default: has(Properties::DEFAULT),
                    ..Button::default()
                };
                let node =
                    self.insert(NodeData::control(Control::PushButton(button)).with_name(name));
                if has(Properties::DEFAULT) {
                    self.move_default(node);
                }
            }
            WidgetKind::CheckBox => {
                let toggle = toggle(title, has(Properties::CHECKED));
                self.insert(NodeData::control(Control::CheckBox(toggle)).with_name(name));
            }
            WidgetKind::RadioButton => {
                let checked = has(Properties::CHECKED);
                let node = self.insert(
                    NodeData::control(Control::RadioButton(toggle(title, checked))).with_name(name),
                );
                if checked {
                    self.exclusive_check(node);
                }
            }
            WidgetKind::TextBox => {
                let text_box = TextBox {
                    title: title.to_owned(),
                    text: command.text.clone(),
                    placeholder: non_empty(&command.aux_text),
                    password: has(Properties::PASSWORD),
                };
                self.insert(NodeData::control(Control::TextBox(text_box)).with_name(name));
            }
            WidgetKind::ListBox | WidgetKind::ComboBox => {
                let list = Collection {
                    title: title.to_owned(),
                    activation: kind == WidgetKind::ListBox && has(Properties::ACTIVATION),
                    selection: has(Properties::SELECTION),
                    editable: kind == WidgetKind::ComboBox && has(Properties::EDITABLE),
                    ..Collection::default()
                };
                let control = if kind == WidgetKind::ListBox {
                    Control::ListBox(list)
                } else {
                    Control::ComboBox(list)
                };
                let node = self.insert(NodeData::control(control).with_name(name));
                self.cursors.list = Some(Cursor::new(node, 0));
            }
            WidgetKind::Item => return self.add_item(command),
            WidgetKind::Separator => {
                let separator = Separator {
                    vertical: has(Properties::VERTICAL),
                    shadow: shadow(command, Shadow::Sunken),
                };
                self.insert(NodeData::control(Control::Separator(separator)).with_name(title));
            }
            WidgetKind::ProgressBar => {
                let bar = ProgressBar {
                    vertical: has(Properties::VERTICAL),
                    busy: has(Properties::BUSY),
                    ..ProgressBar::default()
                };
                self.insert(NodeData::control(Control::ProgressBar(bar)).with_name(title));
            }
            WidgetKind::Slider => self.add_slider(command),
            WidgetKind::TextView => {
                let view = TextView {
                    file: non_empty(name),
                };
                self.insert(NodeData::control(Control::TextView(view)).with_name(title));
            }
            WidgetKind::Tabs => {
                let tabs = Tabs {
                    position: tab_position(command).unwrap_or_default(),
                    ..Tabs::default()
                };
                let node = self.insert(NodeData::control(Control::Tabs(tabs)).with_name(title));
                self.cursors.tabs = Some(Cursor::new(node, 0));
            }
            WidgetKind::Page => return self.add_page(command),
            WidgetKind::Dialog => {
                return Err(CommandError::NotApplicable {
                    operation: "add",
                    kind,
                })
            }
        }
        Ok(())
    }

    /// Insert a group box or frame at the primary cursor and open it.
    fn open_group(&mut self, data: NodeData) {
        let at = self.cursors.advance_primary();
        let node = self.attach(at.container, at.index, data);
        self.cursors.group = Some(Cursor::new(node, 0));
    }

    /// The value starts at 0 clamped into `[minimum, maximum]`.
    fn add_slider(&mut self, command: &Command) {
        let minimum = parse_int(&command.name).unwrap_or(0);
        let maximum = parse_int(&command.text).unwrap_or(100).max(minimum);
        let slider = Slider {
            vertical: command.has(Properties::VERTICAL),
            minimum,
            maximum,
            value: 0,
        };
        let value = slider.clamp(0);
        let node = self.insert(
            NodeData::control(Control::Slider(Slider { value, ..slider }))
                .with_name(&command.title),
        );
        if value != 0 {
            self.emit(node, &value.to_string());
        }
    }

    fn add_item(&mut self, command: &Command) -> Result<(), CommandError> {
        let cursor = self.cursors.list.ok_or(CommandError::NoOpenList)?;
        let Some(list) = self
            .doc
            .control_mut(cursor.container)
            .and_then(Control::collection_mut)
        else {
            self.cursors.list = None;
            return Err(CommandError::NoOpenList);
        };
        let item = Item {
            title: command.title.clone(),
            icon: non_empty(&command.name),
            payload: non_empty(&command.text),
        };
        let row = list.insert(cursor.index, item);
        let changed = if command.has(Properties::CURRENT) || list.items.len() == 1 {
            list.select(Some(row))
        } else {
            false
        };
        let report = (changed && list.selection).then(|| list.current_text().to_owned());

        self.cursors.list = Some(Cursor::new(cursor.container, row + 1));
        self.touch(cursor.container);
        if let Some(text) = report {
            self.emit(cursor.container, &text);
        }
        Ok(())
    }

    fn add_page(&mut self, command: &Command) -> Result<(), CommandError> {
        let cursor = self.cursors.tabs.ok_or(CommandError::NoOpenTabs)?;
        if !matches!(self.doc.control(cursor.container), Some(Control::Tabs(_))) {
            self.cursors.tabs = None;
            return Err(CommandError::NoOpenTabs);
        }
        self.cursors.group = None;

        let page = Page {
            title: command.title.clone(),
            icon: non_empty(&command.text),
        };
        let node = self.attach(
            cursor.container,
            cursor.index,
            NodeData::page(page).with_name(&command.name),
        );
        let column = self.add_row(node, 0);
        self.cursors.primary = Cursor::new(column, 0);

        let index = self.doc.index_of(node).unwrap_or(cursor.index);
        self.cursors.tabs = Some(Cursor::new(cursor.container, index + 1));
        if let Some(Control::Tabs(tabs)) = self.doc.control_mut(cursor.container) {
            tabs.current = match tabs.current {
                Some(current) if index <= current => Some(current + 1),
                None => Some(index),
                other => other,
            };
            if command.has(Properties::CURRENT) {
                tabs.current = Some(index);
            }
        }
        self.touch(cursor.container);
        Ok(())
    }

    /// Give the default marker to `node`, taking it from the previous holder.
    pub(super) fn move_default(&mut self, node: NodeId) {
        if let Some(previous) = self.cursors.default_button.filter(|&id| id != node) {
            if let Some(Control::PushButton(button)) = self.doc.control_mut(previous) {
                button.default = false;
            }
            self.touch(previous);
        }
        self.cursors.default_button = Some(node);
    }
}

fn toggle(title: &str, checked: bool) -> Toggle {
    Toggle {
        title: title.to_owned(),
        checked,
        ..Toggle::default()
    }
}

/// Frame shape named by the command; no shape keyword means no frame.
pub(super) fn frame_shape(command: &Command) -> FrameShape {
    if command.has(Properties::BOX) {
        FrameShape::Box
    } else if command.has(Properties::PANEL) {
        FrameShape::Panel
    } else if command.has(Properties::STYLED) {
        FrameShape::StyledPanel
    } else {
        FrameShape::NoFrame
    }
}

pub(super) fn shadow(command: &Command, fallback: Shadow) -> Shadow {
    if command.has(Properties::RAISED) {
        Shadow::Raised
    } else if command.has(Properties::SUNKEN) {
        Shadow::Sunken
    } else if command.has(Properties::PLAIN) {
        Shadow::Plain
    } else {
        fallback
    }
}

pub(super) fn tab_position(command: &Command) -> Option<TabPosition> {
    if command.has(Properties::TOP) {
        Some(TabPosition::Top)
    } else if command.has(Properties::BOTTOM) {
        Some(TabPosition::Bottom)
    } else if command.has(Properties::LEFT) {
        Some(TabPosition::Left)
    } else if command.has(Properties::RIGHT) {
        Some(TabPosition::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, session};
    use super::*;
    use pretty_assertions::assert_eq;

    fn collection<'a, R: Renderer, P: Reporter>(
        session: &'a Session<R, P>,
        name: &str,
    ) -> &'a Collection {
        let node = session.document().find_named(name).expect("named node");
        session
            .document()
            .control(node)
            .and_then(Control::collection)
            .expect("collection")
    }

    #[test]
    fn controls_go_in_order_and_cursor_advances() {
        let mut session = session();
        run(&mut session, "add label A a\nadd checkbox B b checked\n");
        let doc = session.document();
        let column = doc.first_column(doc.root()).expect("column");
        let names: Vec<_> = doc.children(column).iter().map(|&id| doc.name(id)).collect();
        assert_eq!(names, vec![Some("a"), Some("b")]);
        assert_eq!(session.cursors().primary, Cursor::new(column, 2));
        let b = doc.find_named("b").expect("b");
        assert_eq!(doc.control(b).and_then(Control::checked), Some(true));
    }

    #[test]
    fn groupbox_opens_group_and_receives_controls() {
        let mut session = session();
        run(&mut session, "add groupbox G g vertical\nadd radiobutton R r\n");
        let doc = session.document();
        let group = doc.find_named("g").expect("g");
        let radio = doc.find_named("r").expect("r");
        assert_eq!(doc.parent(radio), Some(group));
        assert_eq!(session.cursors().group, Some(Cursor::new(group, 1)));
        assert_eq!(session.cursors().primary.index, 1);
    }

    #[test]
    fn groups_do_not_nest() {
        let mut session = session();
        run(&mut session, "add groupbox A a\nadd frame f\n");
        let doc = session.document();
        let a = doc.find_named("a").expect("a");
        let f = doc.find_named("f").expect("f");
        assert_eq!(doc.parent(a), doc.parent(f));
        assert_eq!(session.cursors().group, Some(Cursor::new(f, 0)));
    }

    #[test]
    fn frame_style_keywords() {
        let mut session = session();
        run(&mut session, "add frame f raised panel\n");
        let doc = session.document();
        let f = doc.find_named("f").expect("f");
        assert_eq!(
            doc.control(f),
            Some(&Control::Frame(Frame {
                vertical: false,
                shape: FrameShape::Panel,
                shadow: Shadow::Raised,
            }))
        );
    }

    #[test]
    fn checked_radio_unchecks_siblings_in_scope() {
        let mut session = session();
        run(
            &mut session,
            "add radiobutton A a checked\nadd radiobutton B b checked\n\
             add groupbox G g\nadd radiobutton C c checked\n",
        );
        let doc = session.document();
        let checked = |name| {
            doc.find_named(name)
                .and_then(|id| doc.control(id))
                .and_then(Control::checked)
        };
        assert_eq!(checked("a"), Some(false));
        assert_eq!(checked("b"), Some(true));
        assert_eq!(checked("c"), Some(true));
    }

    #[test]
    fn default_marker_moves() {
        let mut session = session();
        run(&mut session, "add pushbutton A a default\nadd pushbutton B b default\n");
        let doc = session.document();
        let a = doc.find_named("a").expect("a");
        let b = doc.find_named("b").expect("b");
        assert!(matches!(doc.control(a), Some(Control::PushButton(button)) if !button.default));
        assert!(matches!(doc.control(b), Some(Control::PushButton(button)) if button.default));
        assert_eq!(session.cursors().default_button, Some(b));
    }

    #[test]
    fn textbox_slots() {
        let mut session = session();
        run(&mut session, "add textbox Name tb \"initial\" \"hint\" password\n");
        let doc = session.document();
        let tb = doc.find_named("tb").expect("tb");
        assert_eq!(
            doc.control(tb),
            Some(&Control::TextBox(TextBox {
                title: "Name".into(),
                text: "initial".into(),
                placeholder: Some("hint".into()),
                password: true,
            }))
        );
    }

    #[test]
    fn items_fill_open_list() {
        let mut session = session();
        run(
            &mut session,
            "add listbox L lb selection\nadd item x\nadd item y icon.png payload current\n",
        );
        let list = collection(&session, "lb");
        let titles: Vec<_> = list.items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "y"]);
        assert_eq!(list.current, Some(1));
        assert_eq!(list.items[1].icon.as_deref(), Some("icon.png"));
        assert_eq!(list.items[1].payload.as_deref(), Some("payload"));
        assert_eq!(session.reporter().lines(), &["lb=x".to_owned(), "lb=y".to_owned()]);
        let lb = session.document().find_named("lb").expect("lb");
        assert_eq!(session.cursors().list, Some(Cursor::new(lb, 2)));
    }

    #[test]
    fn item_without_list_is_rejected() {
        let mut session = session();
        run(&mut session, "add item x\n");
        assert_eq!(session.document().len(), 3);
    }

    #[test]
    fn combobox_is_editable_dropdownlist_is_not() {
        let mut session = session();
        run(&mut session, "add combobox C c\nadd dropdownlist D d\n");
        assert!(collection(&session, "c").editable);
        assert!(!collection(&session, "d").editable);
    }

    #[test]
    fn slider_range_from_slots() {
        let mut session = session();
        run(&mut session, "add slider s 10 20\n");
        let doc = session.document();
        let s = doc.find_named("s").expect("s");
        assert_eq!(
            doc.control(s),
            Some(&Control::Slider(Slider {
                vertical: false,
                minimum: 10,
                maximum: 20,
                value: 10,
            }))
        );
        assert_eq!(session.reporter().lines(), &["s=10".to_owned()]);
    }

    #[test]
    fn slider_value_starts_at_zero_when_in_range() {
        let mut session = session();
        run(&mut session, "add slider s -5 5
add slider t -20 -10
");
        let doc = session.document();
        let value = |name: &str| match doc.find_named(name).and_then(|id| doc.control(id)) {
            Some(Control::Slider(slider)) => slider.value,
            other => panic!("not a slider: {other:?}"),
        };
        assert_eq!(value("s"), 0);
        assert_eq!(value("t"), -10);
        assert_eq!(session.reporter().lines(), &["t=-10".to_owned()]);
    }

    #[test]
    fn spacers() {
        let mut session = session();
        run(&mut session, "add space 12\nadd stretch\nadd space\n");
        let doc = session.document();
        let column = doc.first_column(doc.root()).expect("column");
        let spacers: Vec<_> = doc
            .children(column)
            .iter()
            .filter_map(|&id| match doc.get(id).map(|data| &data.kind) {
                Some(crate::dom::NodeKind::Spacer(spacer)) => Some(*spacer),
                _ => None,
            })
            .collect();
        assert_eq!(
            spacers,
            vec![Spacer::Fixed(12), Spacer::Stretch, Spacer::Fixed(1)]
        );
    }

    #[test]
    fn pages_need_tabs_and_retarget_primary() {
        let mut session = session();
        run(&mut session, "add page Lost lost\n");
        assert!(session.document().find_named("lost").is_none());

        run(&mut session, "add tabs t bottom\nadd page One p1\nadd label In inside\n");
        let doc = session.document();
        let tabs = doc.find_named("t").expect("t");
        let page = doc.find_named("p1").expect("p1");
        let inside = doc.find_named("inside").expect("inside");
        assert_eq!(doc.parent(page), Some(tabs));
        assert_eq!(doc.page_of(inside), page);
        assert_eq!(session.cursors().tabs, Some(Cursor::new(tabs, 1)));
        assert!(matches!(
            doc.control(tabs),
            Some(Control::Tabs(Tabs { position: TabPosition::Bottom, current: Some(0), .. }))
        ));
    }

    #[test]
    fn current_page_flag() {
        let mut session = session();
        run(&mut session, "add tabs t\nadd page A a\nadd page B b current\n");
        let doc = session.document();
        let tabs = doc.find_named("t").expect("t");
        assert!(matches!(
            doc.control(tabs),
            Some(Control::Tabs(Tabs { current: Some(1), .. }))
        ));
    }
}
