//! The mutation engine.
//!
//! A [`Session`] owns the widget tree, the insertion cursors and the focus
//! chains, and applies one [`Command`] at a time. Every mutation is mirrored to
//! the [`Renderer`]; every report line goes to the [`Reporter`].
//!
//! Destructive operations always run in the same order: cursors pointing into
//! the doomed subtree are relocated, the subtree is deleted, then the vacated
//! container is collected. Dangling cursors are therefore impossible.

mod add;
mod collect;
pub mod cursor;
mod options;
mod remove;
mod report;
mod structure;

pub use cursor::{Cursor, Cursors};
pub use report::Outcome;

use slotmap::SecondaryMap;
use thiserror::Error;

use crate::app::DialogConfig;
use crate::command::{Command, CommandKind, CommandOptions, WidgetKind};
use crate::dom::node::{Label, LabelContent, Page};
use crate::dom::{Axis, Control, Document, NodeData, NodeId, NodeKind};
use crate::focus::FocusChain;
use crate::render::{ContainerKind, Handle, Renderer, Reporter};

/// Name of the start-up label removed by the first command.
pub const ABOUT_LABEL: &str = "_dbabout_";

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Why a command or interaction had no effect.
///
/// The wire protocol has no error channel: [`Session::apply`] logs these and
/// moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no widget named `{0}`")]
    UnknownName(String),
    #[error("node no longer exists")]
    StaleNode,
    #[error("`{0}` needs a name")]
    MissingName(&'static str),
    #[error("`{0}` needs a widget type")]
    MissingType(&'static str),
    #[error("no list box or combo box is open")]
    NoOpenList,
    #[error("no tabs control is open")]
    NoOpenTabs,
    #[error("`{operation}` does not apply to a {kind}")]
    NotApplicable {
        operation: &'static str,
        kind: WidgetKind,
    },
    #[error("`{0}` is disabled")]
    Disabled(WidgetKind),
    #[error("nothing to end")]
    NothingToEnd,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A dialog being built and driven by commands.
pub struct Session<R, P> {
    doc: Document,
    cursors: Cursors,
    focus: SecondaryMap<NodeId, FocusChain>,
    renderer: R,
    reporter: P,
    config: DialogConfig,
    /// No command applied yet.
    pristine: bool,
    outcome: Option<Outcome>,
}

impl<R: Renderer, P: Reporter> Session<R, P> {
    /// A session with the default configuration.
    pub fn new(renderer: R, reporter: P) -> Self {
        Self::with_config(renderer, reporter, DialogConfig::default())
    }

    pub fn with_config(mut renderer: R, reporter: P, config: DialogConfig) -> Self {
        let mut root = NodeData::page(Page {
            title: config.title.clone(),
            icon: None,
        });
        root.visible = !config.hidden;
        root.handle = Some(renderer.create_container(ContainerKind::Dialog {
            resizable: config.resizable,
        }));
        let doc = Document::new(root);
        let root = doc.root();

        let mut session = Self {
            doc,
            cursors: Cursors::new(root),
            focus: SecondaryMap::new(),
            renderer,
            reporter,
            config,
            pristine: true,
            outcome: None,
        };
        let column = session.add_row(root, 0);
        session.cursors = Cursors::new(column);
        session.touch(root);

        if let Some(about) = session.config.about.clone() {
            let label = Control::Label(Label {
                content: LabelContent::Text(about),
            });
            session.insert(NodeData::control(label).with_name(ABOUT_LABEL));
        }
        session.refresh_focus();
        session
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply a command, ignoring (and logging) anything that does not fit.
    pub fn apply(&mut self, command: &Command) {
        if let Err(error) = self.try_apply(command) {
            tracing::debug!(command = %command.kind, %error, "command ignored");
        }
    }

    /// Apply a command and say why it had no effect.
    pub fn try_apply(&mut self, command: &Command) -> Result<(), CommandError> {
        if std::mem::take(&mut self.pristine) {
            self.drop_about_label();
        }
        tracing::debug!(
            command = %command.kind,
            widget = ?command.widget,
            name = %command.name,
            "applying command"
        );
        let result = match command.kind {
            CommandKind::Noop => Ok(()),
            CommandKind::Add => self.add(command),
            CommandKind::End => self.end(command.widget),
            CommandKind::Position => self.position(command),
            CommandKind::Remove => self.remove(&command.name),
            CommandKind::Clear => self.clear(&command.name),
            CommandKind::Step => {
                self.step(command.has_option(CommandOptions::VERTICAL));
                Ok(())
            }
            CommandKind::Set => self.set_options(command, true),
            CommandKind::Unset => self.set_options(command, false),
            CommandKind::Query => {
                self.query();
                Ok(())
            }
        };
        self.refresh_focus();
        result
    }

    fn drop_about_label(&mut self) {
        if let Some(about) = self.doc.find_named(ABOUT_LABEL) {
            self.remove_node(about);
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursors(&self) -> &Cursors {
        &self.cursors
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut P {
        &mut self.reporter
    }

    /// How the dialog was closed, once it was.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Map a renderer handle back to its node.
    pub fn node_by_handle(&self, handle: Handle) -> Option<NodeId> {
        self.doc.find_by_handle(handle)
    }

    /// Focus chain of a page.
    pub fn focus_chain(&self, page: NodeId) -> Option<&FocusChain> {
        self.focus.get(page)
    }

    // -----------------------------------------------------------------------
    // Tree plumbing shared by the operations
    // -----------------------------------------------------------------------

    fn handle(&self, id: NodeId) -> Option<Handle> {
        self.doc.get(id).and_then(|data| data.handle)
    }

    fn create_handle(&mut self, data: &NodeData) -> Handle {
        match &data.kind {
            NodeKind::Page(_) => self.renderer.create_container(ContainerKind::Page),
            NodeKind::Layout(Axis::Horizontal) => self.renderer.create_container(ContainerKind::Row),
            NodeKind::Layout(Axis::Vertical) => {
                self.renderer.create_container(ContainerKind::Column)
            }
            NodeKind::Spacer(spacer) => self.renderer.create_spacer(*spacer),
            NodeKind::Control(Control::GroupBox(_)) => {
                self.renderer.create_container(ContainerKind::GroupBox)
            }
            NodeKind::Control(Control::Frame(_)) => {
                self.renderer.create_container(ContainerKind::Frame)
            }
            NodeKind::Control(Control::Tabs(_)) => {
                self.renderer.create_container(ContainerKind::Tabs)
            }
            NodeKind::Control(control) => {
                self.renderer.create_leaf(control.kind(), control.caption())
            }
        }
    }

    /// Insert `data` under `parent` and mount it in the renderer.
    fn attach(&mut self, parent: NodeId, index: usize, mut data: NodeData) -> NodeId {
        let handle = self.create_handle(&data);
        data.handle = Some(handle);
        let id = self.doc.insert_child(parent, index, data);
        let index = self.doc.index_of(id).unwrap_or(index);
        if let Some(parent) = self.handle(parent) {
            self.renderer.mount(parent, handle, index);
        }
        id
    }

    /// Unmount and delete `id` with its subtree. Cursors must already be out.
    fn detach(&mut self, id: NodeId) {
        if let (Some(parent), Some(handle)) =
            (self.doc.parent(id).and_then(|p| self.handle(p)), self.handle(id))
        {
            self.renderer.unmount(parent, handle);
        }
        for page in self.doc.walk_depth_first(id) {
            self.focus.remove(page);
        }
        self.doc.remove(id);
    }

    /// Tell the renderer a node's state changed.
    fn touch(&mut self, id: NodeId) {
        if let Some(data) = self.doc.get(id) {
            if let Some(handle) = data.handle {
                self.renderer.update(handle, data);
            }
        }
    }

    /// Emit a report line for `id` if it is named.
    fn emit(&mut self, id: NodeId, value: &str) {
        if let Some(name) = self.doc.name(id) {
            self.reporter.emit(name, value);
        }
    }

    /// Add a scaffold row holding one column; returns the column.
    fn add_row(&mut self, page: NodeId, index: usize) -> NodeId {
        let row = self.attach(page, index, NodeData::layout(Axis::Horizontal));
        self.attach(row, 0, NodeData::layout(Axis::Vertical))
    }

    fn add_column(&mut self, row: NodeId, index: usize) -> NodeId {
        self.attach(row, index, NodeData::layout(Axis::Vertical))
    }

    /// Insert at the insertion point and advance it.
    fn insert(&mut self, data: NodeData) -> NodeId {
        let at = self.cursors.advance_insertion();
        self.attach(at.container, at.index, data)
    }

    /// Rebuild every page's focus chain and push changed orders.
    fn refresh_focus(&mut self) {
        let doc = &self.doc;
        self.focus.retain(|page, _| doc.contains(page));
        for page in self.doc.pages() {
            let Some(chain) = self.focus.entry(page).map(|entry| entry.or_default()) else {
                continue;
            };
            if chain.rebuild(&self.doc, page) {
                let handles: Vec<Handle> = chain
                    .nodes()
                    .iter()
                    .filter_map(|&id| self.doc.get(id).and_then(|data| data.handle))
                    .collect();
                self.renderer.set_focus_order(&handles);
            }
        }
    }
}

impl<R, P> std::fmt::Debug for Session<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("nodes", &self.doc.len())
            .field("cursors", &self.cursors)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Parse the integer at the start of `text` the way `%d` does: optional
/// leading blanks and sign, then digits. `None` when there are no digits;
/// out-of-range values saturate.
pub(crate) fn parse_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// `Some(text)` unless it is empty.
fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}
