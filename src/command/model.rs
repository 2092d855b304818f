//! Command values: kinds, widget kinds, option and property bitfields.

use std::fmt;

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// CommandKind
// ---------------------------------------------------------------------------

/// The structural command a [`Command`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommandKind {
    /// No command keyword seen yet.
    #[default]
    Noop,
    Add,
    End,
    Position,
    Remove,
    Clear,
    Step,
    Set,
    Unset,
    Query,
}

impl CommandKind {
    /// The command options this command accepts.
    pub fn accepted_options(self) -> CommandOptions {
        match self {
            CommandKind::Add => CommandOptions::SPACE | CommandOptions::STRETCH,
            CommandKind::Position => CommandOptions::BEHIND | CommandOptions::ONTO,
            CommandKind::Step => CommandOptions::VERTICAL,
            CommandKind::Set => {
                CommandOptions::ENABLED
                    | CommandOptions::FOCUS
                    | CommandOptions::STYLESHEET
                    | CommandOptions::VISIBLE
            }
            CommandKind::Unset => {
                CommandOptions::ENABLED | CommandOptions::STYLESHEET | CommandOptions::VISIBLE
            }
            _ => CommandOptions::empty(),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Noop => "noop",
            CommandKind::Add => "add",
            CommandKind::End => "end",
            CommandKind::Position => "position",
            CommandKind::Remove => "remove",
            CommandKind::Clear => "clear",
            CommandKind::Step => "step",
            CommandKind::Set => "set",
            CommandKind::Unset => "unset",
            CommandKind::Query => "query",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// WidgetKind / WidgetSet
// ---------------------------------------------------------------------------

/// Every kind of node a command can create or target.
///
/// `Dialog` is the root page, `Item` a row of a list or combo box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Dialog,
    Label,
    GroupBox,
    Frame,
    PushButton,
    RadioButton,
    CheckBox,
    TextBox,
    ListBox,
    ComboBox,
    Item,
    Separator,
    ProgressBar,
    Slider,
    TextView,
    Tabs,
    Page,
}

impl WidgetKind {
    /// The single-kind set for this kind.
    pub fn bit(self) -> WidgetSet {
        match self {
            WidgetKind::Dialog => WidgetSet::DIALOG,
            WidgetKind::Label => WidgetSet::LABEL,
            WidgetKind::GroupBox => WidgetSet::GROUP_BOX,
            WidgetKind::Frame => WidgetSet::FRAME,
            WidgetKind::PushButton => WidgetSet::PUSH_BUTTON,
            WidgetKind::RadioButton => WidgetSet::RADIO_BUTTON,
            WidgetKind::CheckBox => WidgetSet::CHECK_BOX,
            WidgetKind::TextBox => WidgetSet::TEXT_BOX,
            WidgetKind::ListBox => WidgetSet::LIST_BOX,
            WidgetKind::ComboBox => WidgetSet::COMBO_BOX,
            WidgetKind::Item => WidgetSet::ITEM,
            WidgetKind::Separator => WidgetSet::SEPARATOR,
            WidgetKind::ProgressBar => WidgetSet::PROGRESS_BAR,
            WidgetKind::Slider => WidgetSet::SLIDER,
            WidgetKind::TextView => WidgetSet::TEXT_VIEW,
            WidgetKind::Tabs => WidgetSet::TABS,
            WidgetKind::Page => WidgetSet::PAGE,
        }
    }

    /// Whether this kind holds other widgets through the group cursor.
    pub fn is_group(self) -> bool {
        matches!(self, WidgetKind::GroupBox | WidgetKind::Frame)
    }

    /// Whether this kind is backed by an item collection.
    pub fn is_collection(self) -> bool {
        matches!(self, WidgetKind::ListBox | WidgetKind::ComboBox)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetKind::Dialog => "dialog",
            WidgetKind::Label => "label",
            WidgetKind::GroupBox => "groupbox",
            WidgetKind::Frame => "frame",
            WidgetKind::PushButton => "pushbutton",
            WidgetKind::RadioButton => "radiobutton",
            WidgetKind::CheckBox => "checkbox",
            WidgetKind::TextBox => "textbox",
            WidgetKind::ListBox => "listbox",
            WidgetKind::ComboBox => "combobox",
            WidgetKind::Item => "item",
            WidgetKind::Separator => "separator",
            WidgetKind::ProgressBar => "progressbar",
            WidgetKind::Slider => "slider",
            WidgetKind::TextView => "textview",
            WidgetKind::Tabs => "tabs",
            WidgetKind::Page => "page",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// A set of widget kinds. Property keywords narrow a command's candidate
    /// set to the kinds that carry the property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WidgetSet: u32 {
        const DIALOG = 1 << 0;
        const LABEL = 1 << 1;
        const GROUP_BOX = 1 << 2;
        const FRAME = 1 << 3;
        const PUSH_BUTTON = 1 << 4;
        const RADIO_BUTTON = 1 << 5;
        const CHECK_BOX = 1 << 6;
        const TEXT_BOX = 1 << 7;
        const LIST_BOX = 1 << 8;
        const COMBO_BOX = 1 << 9;
        const ITEM = 1 << 10;
        const SEPARATOR = 1 << 11;
        const PROGRESS_BAR = 1 << 12;
        const SLIDER = 1 << 13;
        const TEXT_VIEW = 1 << 14;
        const TABS = 1 << 15;
        const PAGE = 1 << 16;

        /// Widgets showing a caption.
        const CAPTIONED = Self::LABEL.bits()
            | Self::GROUP_BOX.bits()
            | Self::PUSH_BUTTON.bits()
            | Self::RADIO_BUTTON.bits()
            | Self::CHECK_BOX.bits()
            | Self::TEXT_BOX.bits()
            | Self::LIST_BOX.bits()
            | Self::COMBO_BOX.bits();
        /// Buttons of every flavour.
        const BUTTONS = Self::PUSH_BUTTON.bits()
            | Self::RADIO_BUTTON.bits()
            | Self::CHECK_BOX.bits();
        /// Widgets with a horizontal/vertical orientation.
        const ORIENTED = Self::GROUP_BOX.bits()
            | Self::FRAME.bits()
            | Self::SEPARATOR.bits()
            | Self::PROGRESS_BAR.bits()
            | Self::SLIDER.bits();
        /// Widgets with a numeric range.
        const RANGED = Self::PROGRESS_BAR.bits() | Self::SLIDER.bits();
    }
}

impl Default for WidgetSet {
    fn default() -> Self {
        Self::all()
    }
}

// ---------------------------------------------------------------------------
// CommandOptions / Properties
// ---------------------------------------------------------------------------

bitflags! {
    /// Options that modify a command rather than a widget.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CommandOptions: u16 {
        const SPACE = 1 << 0;
        const STRETCH = 1 << 1;
        const VERTICAL = 1 << 2;
        const BEHIND = 1 << 3;
        const ONTO = 1 << 4;
        const ENABLED = 1 << 5;
        const FOCUS = 1 << 6;
        const STYLESHEET = 1 << 7;
        const VISIBLE = 1 << 8;
    }
}

bitflags! {
    /// Widget properties named by option keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Properties: u64 {
        const CHECKABLE = 1 << 0;
        const CHECKED = 1 << 1;
        const TEXT = 1 << 2;
        const TITLE = 1 << 3;
        const PASSWORD = 1 << 4;
        const PLACEHOLDER = 1 << 5;
        const ICON = 1 << 6;
        const ICON_SIZE = 1 << 7;
        const ANIMATION = 1 << 8;
        const PICTURE = 1 << 9;
        const APPLY = 1 << 10;
        const EXIT = 1 << 11;
        const DEFAULT = 1 << 12;
        const VERTICAL = 1 << 13;
        const PLAIN = 1 << 14;
        const RAISED = 1 << 15;
        const SUNKEN = 1 << 16;
        const NO_FRAME = 1 << 17;
        const BOX = 1 << 18;
        const PANEL = 1 << 19;
        const STYLED = 1 << 20;
        const CURRENT = 1 << 21;
        const EDITABLE = 1 << 22;
        const ACTIVATION = 1 << 23;
        const SELECTION = 1 << 24;
        const MINIMUM = 1 << 25;
        const MAXIMUM = 1 << 26;
        const VALUE = 1 << 27;
        const BUSY = 1 << 28;
        const FILE = 1 << 29;
        const TOP = 1 << 30;
        const BOTTOM = 1 << 31;
        const LEFT = 1 << 32;
        const RIGHT = 1 << 33;
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One fully assembled command.
///
/// Free-text slots are empty strings when absent; an empty name therefore
/// means "no name".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// Widget type keyword, if one was given.
    pub widget: Option<WidgetKind>,
    /// Candidate widget kinds the properties apply to.
    pub widgets: WidgetSet,
    pub options: CommandOptions,
    /// Properties switched on. `horizontal` clears `VERTICAL`.
    pub properties: Properties,
    pub title: String,
    pub name: String,
    pub text: String,
    pub aux_text: String,
}

impl Command {
    /// An empty command of the given kind.
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            widget: None,
            widgets: WidgetSet::all(),
            options: CommandOptions::empty(),
            properties: Properties::empty(),
            title: String::new(),
            name: String::new(),
            text: String::new(),
            aux_text: String::new(),
        }
    }

    /// Whether every flag in `property` is set.
    pub fn has(&self, property: Properties) -> bool {
        self.properties.contains(property)
    }

    /// Whether the command option is set.
    pub fn has_option(&self, option: CommandOptions) -> bool {
        self.options.contains(option)
    }

    /// Whether properties apply to a target of this kind.
    pub fn targets(&self, kind: WidgetKind) -> bool {
        self.widgets.contains(kind.bit())
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new(CommandKind::Noop)
    }
}
