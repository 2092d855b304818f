//! logos-based keyword classifier.
//!
//! Every token the tokenizer produces is offered to this lexer as a whole. A
//! token is a keyword only when a single keyword spans all of it, so `addx`,
//! `add label` (a quoted token) or `Label` stay free text.
//!
//! Longest match wins, which keeps `checkbox` from lexing as `check` + `box`
//! and `textbox` from lexing as `text` + `box`.

use logos::Logos;

/// A reserved word of the command language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // ── Commands ─────────────────────────────────────────────────────
    #[token("add")]
    Add,
    #[token("end")]
    End,
    #[token("position")]
    Position,
    #[token("remove")]
    Remove,
    #[token("clear")]
    Clear,
    #[token("step")]
    Step,
    #[token("set")]
    Set,
    #[token("unset")]
    Unset,
    #[token("enable")]
    Enable,
    #[token("disable")]
    Disable,
    #[token("show")]
    Show,
    #[token("hide")]
    Hide,
    #[token("query")]
    Query,

    // ── Widget types ─────────────────────────────────────────────────
    #[token("checkbox")]
    CheckBox,
    #[token("frame")]
    Frame,
    #[token("groupbox")]
    GroupBox,
    #[token("label")]
    Label,
    #[token("pushbutton")]
    PushButton,
    #[token("radiobutton")]
    RadioButton,
    #[token("separator")]
    Separator,
    #[token("textbox")]
    TextBox,
    #[token("listbox")]
    ListBox,
    #[token("dropdownlist")]
    DropDownList,
    #[token("combobox")]
    ComboBox,
    #[token("item")]
    Item,
    #[token("progressbar")]
    ProgressBar,
    #[token("slider")]
    Slider,
    #[token("textview")]
    TextView,
    #[token("tabs")]
    Tabs,
    #[token("page")]
    Page,

    // ── Command options ──────────────────────────────────────────────
    #[token("space")]
    Space,
    #[token("stretch")]
    Stretch,
    #[token("behind")]
    Behind,
    #[token("onto")]
    Onto,
    #[token("enabled")]
    Enabled,
    #[token("focus")]
    Focus,
    #[token("stylesheet")]
    StyleSheet,
    #[token("visible")]
    Visible,

    // ── Properties ───────────────────────────────────────────────────
    #[token("horizontal")]
    Horizontal,
    #[token("vertical")]
    Vertical,
    #[token("checkable")]
    Checkable,
    #[token("checked")]
    Checked,
    #[token("text")]
    Text,
    #[token("title")]
    Title,
    #[token("password")]
    Password,
    #[token("placeholder")]
    Placeholder,
    #[token("icon")]
    Icon,
    #[token("iconsize")]
    IconSize,
    #[token("animation")]
    Animation,
    #[token("picture")]
    Picture,
    #[token("apply")]
    Apply,
    #[token("exit")]
    Exit,
    #[token("default")]
    DefaultButton,
    #[token("plain")]
    Plain,
    #[token("raised")]
    Raised,
    #[token("sunken")]
    Sunken,
    #[token("noframe")]
    NoFrame,
    #[token("box")]
    BoxShape,
    #[token("panel")]
    Panel,
    #[token("styled")]
    Styled,
    #[token("current")]
    Current,
    #[token("activation")]
    Activation,
    #[token("selection")]
    Selection,
    #[token("minimum")]
    Minimum,
    #[token("maximum")]
    Maximum,
    #[token("value")]
    Value,
    #[token("busy")]
    Busy,
    #[token("file")]
    File,
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("left")]
    Left,
    #[token("right")]
    Right,
}

impl Keyword {
    /// Classify a complete token, or `None` when it is free text.
    pub fn classify(token: &str) -> Option<Self> {
        let mut lexer = Keyword::lexer(token);
        match lexer.next() {
            Some(Ok(keyword)) if lexer.span().end == token.len() => Some(keyword),
            _ => None,
        }
    }
}
