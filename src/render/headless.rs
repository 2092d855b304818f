//! Headless collaborators: a recording renderer, a discarding renderer, and
//! reporters writing to memory or to any `io::Write`.

use std::io::Write;

use super::{ContainerKind, Handle, Renderer, Reporter};
use crate::command::WidgetKind;
use crate::dom::node::{NodeData, Spacer};

// ---------------------------------------------------------------------------
// HeadlessRenderer
// ---------------------------------------------------------------------------

/// A renderer call, as recorded by [`HeadlessRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    CreateLeaf {
        handle: Handle,
        kind: WidgetKind,
        title: String,
    },
    CreateContainer {
        handle: Handle,
        kind: ContainerKind,
    },
    CreateSpacer {
        handle: Handle,
        spacer: Spacer,
    },
    Mount {
        parent: Handle,
        child: Handle,
        index: usize,
    },
    Unmount {
        parent: Handle,
        child: Handle,
    },
    FocusOrder(Vec<Handle>),
    Update(Handle),
    Focus(Handle),
}

/// Renderer that records every call and hands out sequential handles.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next: u64,
    ops: Vec<RenderOp>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    fn allocate(&mut self) -> Handle {
        self.next += 1;
        Handle(self.next)
    }
}

impl Renderer for HeadlessRenderer {
    fn create_leaf(&mut self, kind: WidgetKind, title: &str) -> Handle {
        let handle = self.allocate();
        self.ops.push(RenderOp::CreateLeaf {
            handle,
            kind,
            title: title.to_owned(),
        });
        handle
    }

    fn create_container(&mut self, kind: ContainerKind) -> Handle {
        let handle = self.allocate();
        self.ops.push(RenderOp::CreateContainer { handle, kind });
        handle
    }

    fn create_spacer(&mut self, spacer: Spacer) -> Handle {
        let handle = self.allocate();
        self.ops.push(RenderOp::CreateSpacer { handle, spacer });
        handle
    }

    fn mount(&mut self, parent: Handle, child: Handle, index: usize) {
        self.ops.push(RenderOp::Mount {
            parent,
            child,
            index,
        });
    }

    fn unmount(&mut self, parent: Handle, child: Handle) {
        self.ops.push(RenderOp::Unmount { parent, child });
    }

    fn set_focus_order(&mut self, order: &[Handle]) {
        self.ops.push(RenderOp::FocusOrder(order.to_vec()));
    }

    fn update(&mut self, handle: Handle, _node: &NodeData) {
        self.ops.push(RenderOp::Update(handle));
    }

    fn focus(&mut self, handle: Handle) {
        self.ops.push(RenderOp::Focus(handle));
    }
}

/// Renderer that only hands out handles.
#[derive(Debug, Default)]
pub struct NullRenderer {
    next: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> Handle {
        self.next += 1;
        Handle(self.next)
    }
}

impl Renderer for NullRenderer {
    fn create_leaf(&mut self, _kind: WidgetKind, _title: &str) -> Handle {
        self.allocate()
    }

    fn create_container(&mut self, _kind: ContainerKind) -> Handle {
        self.allocate()
    }

    fn create_spacer(&mut self, _spacer: Spacer) -> Handle {
        self.allocate()
    }

    fn mount(&mut self, _parent: Handle, _child: Handle, _index: usize) {}

    fn unmount(&mut self, _parent: Handle, _child: Handle) {}

    fn set_focus_order(&mut self, _order: &[Handle]) {}
}

// ---------------------------------------------------------------------------
// Reporters
// ---------------------------------------------------------------------------

/// Reporter collecting `name=value` lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLog {
    lines: Vec<String>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drain the collected lines.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Reporter for ReportLog {
    fn emit(&mut self, name: &str, value: &str) {
        self.lines.push(format!("{name}={value}"));
    }
}

/// Reporter writing one flushed line per event.
///
/// Write failures are logged and otherwise ignored: the report channel has no
/// way to signal errors back.
#[derive(Debug)]
pub struct WriteReporter<W> {
    writer: W,
}

impl<W: Write> WriteReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn emit(&mut self, name: &str, value: &str) {
        let result = writeln!(self.writer, "{name}={value}").and_then(|()| self.writer.flush());
        if let Err(err) = result {
            tracing::warn!(name, error = %err, "failed to write report line");
        }
    }
}
