//! Node types: NodeId, NodeData, and the closed set of controls.

use slotmap::new_key_type;

use crate::command::WidgetKind;
use crate::render::Handle;

new_key_type! {
    /// Unique identifier for a node of the widget tree. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Structural pieces
// ---------------------------------------------------------------------------

/// Direction of a scaffold layout.
///
/// Scaffold rows are horizontal, scaffold columns vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Blank space between controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacer {
    /// Fixed spacing in pixels.
    Fixed(u32),
    /// Expanding space.
    Stretch,
}

/// The root dialog or one tab page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub icon: Option<String>,
}

/// One row of a list or combo box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub icon: Option<String>,
    /// Extra text carried alongside the row and never displayed.
    pub payload: Option<String>,
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// What a label displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelContent {
    Text(String),
    /// Path of a still image.
    Picture(String),
    /// Path of an animation.
    Animation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub content: LabelContent,
}

impl Label {
    /// The text, or the media path for pictures and animations.
    pub fn text(&self) -> &str {
        match &self.content {
            LabelContent::Text(text)
            | LabelContent::Picture(text)
            | LabelContent::Animation(text) => text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    pub title: String,
    pub icon: Option<String>,
    pub icon_size: Option<u32>,
    pub checkable: bool,
    pub checked: bool,
    /// Clicking reports every control.
    pub apply: bool,
    /// Clicking closes the dialog.
    pub exit: bool,
    pub default: bool,
}

/// Check box or radio button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toggle {
    pub title: String,
    pub icon: Option<String>,
    pub icon_size: Option<u32>,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBox {
    pub title: String,
    pub vertical: bool,
    pub checkable: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameShape {
    NoFrame,
    #[default]
    Box,
    Panel,
    StyledPanel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shadow {
    #[default]
    Plain,
    Raised,
    Sunken,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub vertical: bool,
    pub shape: FrameShape,
    pub shadow: Shadow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBox {
    pub title: String,
    pub text: String,
    pub placeholder: Option<String>,
    pub password: bool,
}

/// Items of a list box or combo box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub title: String,
    pub items: Vec<Item>,
    pub current: Option<usize>,
    pub icon_size: Option<u32>,
    /// Report activated rows (list boxes).
    pub activation: bool,
    /// Report the current row whenever it changes.
    pub selection: bool,
    /// Free text can be typed (combo boxes).
    pub editable: bool,
    /// Typed text of an editable combo box, until the current row changes.
    pub edit_text: Option<String>,
}

impl Collection {
    /// Row of the first item titled `title`.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    /// Title of the current item, or the typed text of an editable combo box.
    pub fn current_text(&self) -> &str {
        if let Some(text) = &self.edit_text {
            return text;
        }
        self.current
            .and_then(|row| self.items.get(row))
            .map(|item| item.title.as_str())
            .unwrap_or("")
    }

    /// Make `row` current. Returns `true` when the current row changed.
    pub fn select(&mut self, row: Option<usize>) -> bool {
        let row = row.filter(|&row| row < self.items.len());
        if row == self.current {
            return false;
        }
        self.current = row;
        self.edit_text = None;
        true
    }

    /// Insert an item, keeping the current row on the same item.
    pub fn insert(&mut self, row: usize, item: Item) -> usize {
        let row = row.min(self.items.len());
        self.items.insert(row, item);
        if let Some(current) = self.current.as_mut() {
            if row <= *current {
                *current += 1;
            }
        }
        row
    }

    /// Remove the item at `row`. Returns `true` when the current row changed
    /// to a different item.
    ///
    /// Removing the current item makes its successor (or, at the end, its
    /// predecessor) current.
    pub fn remove(&mut self, row: usize) -> bool {
        if row >= self.items.len() {
            return false;
        }
        self.items.remove(row);
        match self.current {
            Some(current) if current == row => {
                self.current = if self.items.is_empty() {
                    None
                } else {
                    Some(row.min(self.items.len() - 1))
                };
                self.edit_text = None;
                true
            }
            Some(current) if current > row => {
                self.current = Some(current - 1);
                false
            }
            _ => false,
        }
    }

    /// Remove every item. Returns `true` when something was current.
    pub fn clear(&mut self) -> bool {
        self.items.clear();
        self.edit_text = None;
        self.current.take().is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Separator {
    pub vertical: bool,
    pub shadow: Shadow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    pub vertical: bool,
    pub minimum: i32,
    pub maximum: i32,
    /// `None` until a value is set, and after a reset.
    pub value: Option<i32>,
    pub busy: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            vertical: false,
            minimum: 0,
            maximum: 100,
            value: None,
            busy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    pub vertical: bool,
    pub minimum: i32,
    pub maximum: i32,
    pub value: i32,
}

impl Slider {
    /// Keyboard page step: a tenth of the range, at least one.
    pub fn page_step(&self) -> i32 {
        ((self.maximum - self.minimum) / 10).max(1)
    }

    /// Clamp `value` into the range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.minimum, self.maximum.max(self.minimum))
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            vertical: false,
            minimum: 0,
            maximum: 100,
            value: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextView {
    /// Path of the displayed document; loading it is the renderer's job.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TabPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabs {
    pub position: TabPosition,
    /// Index of the shown page.
    pub current: Option<usize>,
    pub icon_size: Option<u32>,
}

/// Every control the command language can create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Label(Label),
    PushButton(Button),
    RadioButton(Toggle),
    CheckBox(Toggle),
    GroupBox(GroupBox),
    Frame(Frame),
    TextBox(TextBox),
    ListBox(Collection),
    ComboBox(Collection),
    Separator(Separator),
    ProgressBar(ProgressBar),
    Slider(Slider),
    TextView(TextView),
    Tabs(Tabs),
}

impl Control {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Control::Label(_) => WidgetKind::Label,
            Control::PushButton(_) => WidgetKind::PushButton,
            Control::RadioButton(_) => WidgetKind::RadioButton,
            Control::CheckBox(_) => WidgetKind::CheckBox,
            Control::GroupBox(_) => WidgetKind::GroupBox,
            Control::Frame(_) => WidgetKind::Frame,
            Control::TextBox(_) => WidgetKind::TextBox,
            Control::ListBox(_) => WidgetKind::ListBox,
            Control::ComboBox(_) => WidgetKind::ComboBox,
            Control::Separator(_) => WidgetKind::Separator,
            Control::ProgressBar(_) => WidgetKind::ProgressBar,
            Control::Slider(_) => WidgetKind::Slider,
            Control::TextView(_) => WidgetKind::TextView,
            Control::Tabs(_) => WidgetKind::Tabs,
        }
    }

    /// The visible caption, empty for controls without one.
    pub fn caption(&self) -> &str {
        match self {
            Control::Label(label) => label.text(),
            Control::PushButton(button) => &button.title,
            Control::RadioButton(toggle) | Control::CheckBox(toggle) => &toggle.title,
            Control::GroupBox(group) => &group.title,
            Control::TextBox(text_box) => &text_box.title,
            Control::ListBox(list) | Control::ComboBox(list) => &list.title,
            _ => "",
        }
    }

    pub fn collection(&self) -> Option<&Collection> {
        match self {
            Control::ListBox(list) | Control::ComboBox(list) => Some(list),
            _ => None,
        }
    }

    pub fn collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Control::ListBox(list) | Control::ComboBox(list) => Some(list),
            _ => None,
        }
    }

    /// Checked state of controls that can be checked right now.
    pub fn checked(&self) -> Option<bool> {
        match self {
            Control::RadioButton(toggle) | Control::CheckBox(toggle) => Some(toggle.checked),
            Control::PushButton(button) if button.checkable => Some(button.checked),
            Control::GroupBox(group) if group.checkable => Some(group.checked),
            _ => None,
        }
    }

    /// Whether the control holds other controls through the group cursor.
    pub fn is_group(&self) -> bool {
        matches!(self, Control::GroupBox(_) | Control::Frame(_))
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Page(Page),
    /// Scaffold row or column.
    Layout(Axis),
    Control(Control),
    Spacer(Spacer),
}

/// Data associated with a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Address of the node. Never empty.
    pub name: Option<String>,
    pub enabled: bool,
    pub visible: bool,
    /// Opaque style sheet forwarded to the renderer.
    pub style_sheet: Option<String>,
    /// Renderer handle, once created.
    pub handle: Option<Handle>,
}

impl NodeData {
    /// Create a new `NodeData` of the given kind, enabled and visible.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            enabled: true,
            visible: true,
            style_sheet: None,
            handle: None,
        }
    }

    pub fn page(page: Page) -> Self {
        Self::new(NodeKind::Page(page))
    }

    pub fn layout(axis: Axis) -> Self {
        Self::new(NodeKind::Layout(axis))
    }

    pub fn control(control: Control) -> Self {
        Self::new(NodeKind::Control(control))
    }

    pub fn spacer(spacer: Spacer) -> Self {
        Self::new(NodeKind::Spacer(spacer))
    }

    /// Set the name (builder). An empty name leaves the node unnamed.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = (!name.is_empty()).then(|| name.to_owned());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn as_control(&self) -> Option<&Control> {
        match &self.kind {
            NodeKind::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut Control> {
        match &mut self.kind {
            NodeKind::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_page(&self) -> Option<&Page> {
        match &self.kind {
            NodeKind::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_page_mut(&mut self) -> Option<&mut Page> {
        match &mut self.kind {
            NodeKind::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self.kind, NodeKind::Page(_))
    }

    pub fn is_layout(&self) -> bool {
        matches!(self.kind, NodeKind::Layout(_))
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self.kind, NodeKind::Spacer(_))
    }

    /// Whether this node is a GroupBox or Frame.
    pub fn is_group(&self) -> bool {
        self.as_control().is_some_and(Control::is_group)
    }
}
