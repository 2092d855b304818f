//! Stage-machine command assembler.
//!
//! The assembler keeps the set of fields the current command still awaits.
//! Each token is tried, in order, as a command keyword, a widget type, an
//! option keyword, and finally as the value of the first awaited free-text
//! slot (title, name, text, aux-text). A token matching nothing is dropped.
//!
//! Recognizing any option keyword removes the title and name slots for the
//! rest of the command, whether or not the option later has an effect. That is
//! how `add label "text" name checked` and `add label checked "text"` parse
//! differently without lookahead.

use bitflags::bitflags;

use super::keyword::Keyword;
use super::model::{Command, CommandKind, CommandOptions, Properties, WidgetKind, WidgetSet};
use super::tokenizer::{Lexeme, Tokenizer};

bitflags! {
    /// Fields of the in-progress command still awaiting a token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Stage: u8 {
        const COMMAND = 1 << 0;
        const TYPE = 1 << 1;
        const TITLE = 1 << 2;
        const NAME = 1 << 3;
        const TEXT = 1 << 4;
        const AUX_TEXT = 1 << 5;
        const OPTIONS = 1 << 6;
    }
}

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

struct CommandEntry {
    kind: CommandKind,
    stages: Stage,
    preset: CommandOptions,
}

fn command_entry(keyword: Keyword) -> Option<CommandEntry> {
    let entry = |kind, stages, preset| CommandEntry {
        kind,
        stages: stages | Stage::COMMAND,
        preset,
    };
    let none = CommandOptions::empty();
    Some(match keyword {
        Keyword::Add => entry(
            CommandKind::Add,
            Stage::TYPE
                | Stage::TITLE
                | Stage::NAME
                | Stage::OPTIONS
                | Stage::TEXT
                | Stage::AUX_TEXT,
            none,
        ),
        Keyword::End => entry(CommandKind::End, Stage::TYPE, none),
        Keyword::Position => entry(CommandKind::Position, Stage::OPTIONS | Stage::TEXT, none),
        Keyword::Remove => entry(CommandKind::Remove, Stage::NAME, none),
        Keyword::Clear => entry(CommandKind::Clear, Stage::NAME, none),
        Keyword::Step => entry(CommandKind::Step, Stage::OPTIONS, none),
        Keyword::Set => entry(
            CommandKind::Set,
            Stage::NAME | Stage::OPTIONS | Stage::TEXT,
            none,
        ),
        Keyword::Unset => entry(CommandKind::Unset, Stage::NAME | Stage::OPTIONS, none),
        Keyword::Enable => entry(CommandKind::Set, Stage::NAME, CommandOptions::ENABLED),
        Keyword::Disable => entry(CommandKind::Unset, Stage::NAME, CommandOptions::ENABLED),
        Keyword::Show => entry(CommandKind::Set, Stage::NAME, CommandOptions::VISIBLE),
        Keyword::Hide => entry(CommandKind::Unset, Stage::NAME, CommandOptions::VISIBLE),
        Keyword::Query => entry(CommandKind::Query, Stage::empty(), none),
        _ => return None,
    })
}

fn widget_entry(keyword: Keyword) -> Option<(WidgetKind, Properties)> {
    let plain = |kind| Some((kind, Properties::empty()));
    match keyword {
        Keyword::CheckBox => plain(WidgetKind::CheckBox),
        Keyword::Frame => plain(WidgetKind::Frame),
        Keyword::GroupBox => plain(WidgetKind::GroupBox),
        Keyword::Label => plain(WidgetKind::Label),
        Keyword::PushButton => plain(WidgetKind::PushButton),
        Keyword::RadioButton => plain(WidgetKind::RadioButton),
        Keyword::Separator => plain(WidgetKind::Separator),
        Keyword::TextBox => plain(WidgetKind::TextBox),
        Keyword::ListBox => plain(WidgetKind::ListBox),
        Keyword::DropDownList => plain(WidgetKind::ComboBox),
        Keyword::ComboBox => Some((WidgetKind::ComboBox, Properties::EDITABLE)),
        Keyword::Item => plain(WidgetKind::Item),
        Keyword::ProgressBar => plain(WidgetKind::ProgressBar),
        Keyword::Slider => plain(WidgetKind::Slider),
        Keyword::TextView => plain(WidgetKind::TextView),
        Keyword::Tabs => plain(WidgetKind::Tabs),
        Keyword::Page => plain(WidgetKind::Page),
        _ => None,
    }
}

#[derive(Clone, Copy)]
enum OptionEffect {
    Command {
        option: CommandOptions,
        on: bool,
    },
    Property {
        property: Properties,
        widgets: WidgetSet,
        on: bool,
    },
}

const fn command_option(option: CommandOptions, on: bool) -> OptionEffect {
    OptionEffect::Command { option, on }
}

const fn property(property: Properties, widgets: WidgetSet, on: bool) -> OptionEffect {
    OptionEffect::Property {
        property,
        widgets,
        on,
    }
}

const TITLED: WidgetSet = WidgetSet::CAPTIONED
    .union(WidgetSet::DIALOG)
    .union(WidgetSet::PAGE)
    .union(WidgetSet::ITEM);
const ICONIC: WidgetSet = WidgetSet::BUTTONS
    .union(WidgetSet::DIALOG)
    .union(WidgetSet::PAGE)
    .union(WidgetSet::ITEM);
const ICON_SIZED: WidgetSet = WidgetSet::BUTTONS
    .union(WidgetSet::LIST_BOX)
    .union(WidgetSet::COMBO_BOX)
    .union(WidgetSet::TABS);
const CHECKABLE: WidgetSet = WidgetSet::GROUP_BOX
    .union(WidgetSet::PUSH_BUTTON)
    .union(WidgetSet::RADIO_BUTTON)
    .union(WidgetSet::CHECK_BOX);
const CHECKED: WidgetSet = WidgetSet::GROUP_BOX.union(WidgetSet::BUTTONS);
const SHADOWED: WidgetSet = WidgetSet::FRAME.union(WidgetSet::SEPARATOR);
const CURRENT: WidgetSet = WidgetSet::ITEM.union(WidgetSet::PAGE);
const SELECTABLE: WidgetSet = WidgetSet::LIST_BOX.union(WidgetSet::COMBO_BOX);

/// Option keywords in match order. A keyword may appear more than once; the
/// first entry valid for the command wins.
const OPTION_TABLE: &[(Keyword, OptionEffect)] = &[
    (Keyword::Space, command_option(CommandOptions::SPACE, true)),
    (Keyword::Stretch, command_option(CommandOptions::STRETCH, true)),
    (Keyword::Behind, command_option(CommandOptions::BEHIND, true)),
    (Keyword::Onto, command_option(CommandOptions::ONTO, true)),
    (Keyword::Enabled, command_option(CommandOptions::ENABLED, true)),
    (Keyword::Focus, command_option(CommandOptions::FOCUS, true)),
    (Keyword::StyleSheet, command_option(CommandOptions::STYLESHEET, true)),
    (Keyword::Visible, command_option(CommandOptions::VISIBLE, true)),
    (Keyword::Horizontal, command_option(CommandOptions::VERTICAL, false)),
    (Keyword::Vertical, command_option(CommandOptions::VERTICAL, true)),
    (Keyword::Checkable, property(Properties::CHECKABLE, CHECKABLE, true)),
    (Keyword::Checked, property(Properties::CHECKED, CHECKED, true)),
    (Keyword::Text, property(Properties::TEXT, TITLED, true)),
    (Keyword::Title, property(Properties::TITLE, TITLED, true)),
    (Keyword::Password, property(Properties::PASSWORD, WidgetSet::TEXT_BOX, true)),
    (Keyword::Placeholder, property(Properties::PLACEHOLDER, WidgetSet::TEXT_BOX, true)),
    (Keyword::Icon, property(Properties::ICON, ICONIC, true)),
    (Keyword::IconSize, property(Properties::ICON_SIZE, ICON_SIZED, true)),
    (Keyword::Animation, property(Properties::ANIMATION, WidgetSet::LABEL, true)),
    (Keyword::Picture, property(Properties::PICTURE, WidgetSet::LABEL, true)),
    (Keyword::Apply, property(Properties::APPLY, WidgetSet::PUSH_BUTTON, true)),
    (Keyword::Exit, property(Properties::EXIT, WidgetSet::PUSH_BUTTON, true)),
    (Keyword::DefaultButton, property(Properties::DEFAULT, WidgetSet::PUSH_BUTTON, true)),
    (Keyword::Horizontal, property(Properties::VERTICAL, WidgetSet::ORIENTED, false)),
    (Keyword::Vertical, property(Properties::VERTICAL, WidgetSet::ORIENTED, true)),
    (Keyword::Plain, property(Properties::PLAIN, SHADOWED, true)),
    (Keyword::Raised, property(Properties::RAISED, SHADOWED, true)),
    (Keyword::Sunken, property(Properties::SUNKEN, SHADOWED, true)),
    (Keyword::NoFrame, property(Properties::NO_FRAME, WidgetSet::FRAME, true)),
    (Keyword::BoxShape, property(Properties::BOX, WidgetSet::FRAME, true)),
    (Keyword::Panel, property(Properties::PANEL, WidgetSet::FRAME, true)),
    (Keyword::Styled, property(Properties::STYLED, WidgetSet::FRAME, true)),
    (Keyword::Current, property(Properties::CURRENT, CURRENT, true)),
    (Keyword::Activation, property(Properties::ACTIVATION, WidgetSet::LIST_BOX, true)),
    (Keyword::Selection, property(Properties::SELECTION, SELECTABLE, true)),
    (Keyword::Minimum, property(Properties::MINIMUM, WidgetSet::RANGED, true)),
    (Keyword::Maximum, property(Properties::MAXIMUM, WidgetSet::RANGED, true)),
    (Keyword::Value, property(Properties::VALUE, WidgetSet::RANGED, true)),
    (Keyword::Busy, property(Properties::BUSY, WidgetSet::PROGRESS_BAR, true)),
    (Keyword::File, property(Properties::FILE, WidgetSet::TEXT_VIEW, true)),
    (Keyword::Top, property(Properties::TOP, WidgetSet::TABS, true)),
    (Keyword::Bottom, property(Properties::BOTTOM, WidgetSet::TABS, true)),
    (Keyword::Left, property(Properties::LEFT, WidgetSet::TABS, true)),
    (Keyword::Right, property(Properties::RIGHT, WidgetSet::TABS, true)),
];

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Builds [`Command`]s from a token stream.
///
/// The free-text slots of one command share a byte budget; slots are filled
/// oldest first and later text is truncated once the budget is spent.
#[derive(Debug)]
pub struct Assembler {
    command: Command,
    stages: Stage,
    budget: usize,
    remaining: usize,
}

impl Assembler {
    /// Create an assembler with the given free-text budget in bytes.
    pub fn new(budget: usize) -> Self {
        Self {
            command: Command::default(),
            stages: Stage::COMMAND,
            budget,
            remaining: budget,
        }
    }

    /// Feed one lexeme. Returns a command when one was completed.
    pub fn push(&mut self, lexeme: Lexeme) -> Option<Command> {
        match lexeme {
            Lexeme::Token(token) => self.token(token),
            Lexeme::EndOfLine => self.issue(),
        }
    }

    /// Feed one token.
    ///
    /// A command keyword completes the previous command, which is returned.
    pub fn token(&mut self, token: String) -> Option<Command> {
        let keyword = Keyword::classify(&token);

        if self.stages.contains(Stage::COMMAND) {
            if let Some(entry) = keyword.and_then(command_entry) {
                let flushed = self.issue();
                self.begin(entry);
                return flushed;
            }
        }

        if self.stages.contains(Stage::TYPE) {
            if let Some((kind, preset)) = keyword.and_then(widget_entry) {
                self.command.widget = Some(kind);
                self.command.widgets = kind.bit();
                self.command.properties = preset;
                self.stages.remove(Stage::TYPE);
                return None;
            }
        }

        if self.stages.contains(Stage::OPTIONS) {
            if let Some(keyword) = keyword {
                if self.apply_option(keyword) {
                    self.stages.remove(Stage::TITLE | Stage::NAME);
                    return None;
                }
            }
        }

        self.fill_slot(token);
        None
    }

    /// Complete the in-progress command, if any.
    pub fn issue(&mut self) -> Option<Command> {
        self.stages = Stage::COMMAND;
        self.remaining = self.budget;
        let command = std::mem::take(&mut self.command);
        if command.kind == CommandKind::Noop {
            return None;
        }
        tracing::trace!(kind = %command.kind, "command assembled");
        Some(command)
    }

    fn begin(&mut self, entry: CommandEntry) {
        self.command = Command::new(entry.kind);
        self.command.options = entry.preset;
        self.stages = entry.stages;
        self.remaining = self.budget;
    }

    fn apply_option(&mut self, keyword: Keyword) -> bool {
        let accepted = self.command.kind.accepted_options();
        for (_, effect) in OPTION_TABLE.iter().filter(|(k, _)| *k == keyword) {
            match *effect {
                OptionEffect::Command { option, on } if accepted.contains(option) => {
                    self.command.options.set(option, on);
                    return true;
                }
                OptionEffect::Property {
                    property,
                    widgets,
                    on,
                } if self.command.widgets.intersects(widgets) => {
                    self.command.widgets &= widgets;
                    self.command.properties.set(property, on);
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    fn fill_slot(&mut self, token: String) {
        let stage = [Stage::TITLE, Stage::NAME, Stage::TEXT, Stage::AUX_TEXT]
            .into_iter()
            .find(|stage| self.stages.contains(*stage));
        let Some(stage) = stage else {
            tracing::trace!(token = %token, "token dropped");
            return;
        };
        self.stages.remove(stage);
        let value = self.charge(token);
        let slot = if stage == Stage::TITLE {
            &mut self.command.title
        } else if stage == Stage::NAME {
            &mut self.command.name
        } else if stage == Stage::TEXT {
            &mut self.command.text
        } else {
            &mut self.command.aux_text
        };
        *slot = value;
    }

    /// Take the token's bytes out of the budget, truncating on a char boundary.
    fn charge(&mut self, mut token: String) -> String {
        if token.len() > self.remaining {
            let mut end = self.remaining;
            while !token.is_char_boundary(end) {
                end -= 1;
            }
            token.truncate(end);
        }
        self.remaining -= token.len();
        token
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(crate::app::DEFAULT_BUFFER_SIZE)
    }
}

// ---------------------------------------------------------------------------
// CommandParser
// ---------------------------------------------------------------------------

/// Tokenizer and assembler glued together: bytes in, commands out.
#[derive(Debug)]
pub struct CommandParser {
    tokenizer: Tokenizer,
    assembler: Assembler,
    lexemes: Vec<Lexeme>,
}

impl CommandParser {
    /// Create a parser whose token and slot budgets are `buffer_size` bytes.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(buffer_size),
            assembler: Assembler::new(buffer_size),
            lexemes: Vec::new(),
        }
    }

    /// Feed a chunk of input and return the commands it completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Command> {
        self.tokenizer.feed(bytes, &mut self.lexemes);
        self.drain()
    }

    /// End of input: return whatever command was still in progress.
    pub fn finish(&mut self) -> Vec<Command> {
        self.tokenizer.finish(&mut self.lexemes);
        self.drain()
    }

    fn drain(&mut self) -> Vec<Command> {
        let assembler = &mut self.assembler;
        self.lexemes
            .drain(..)
            .filter_map(|lexeme| assembler.push(lexeme))
            .collect()
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(crate::app::DEFAULT_BUFFER_SIZE)
    }
}

/// Parse a complete script.
pub fn parse_script(script: &str) -> Vec<Command> {
    let mut parser = CommandParser::default();
    let mut commands = parser.feed(script.as_bytes());
    commands.extend(parser.finish());
    commands
}
