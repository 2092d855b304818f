//! Collaborator interfaces: the renderer that shows the tree and the reporter
//! that receives `name=value` lines.
//!
//! The engine calls these after every mutation; it never reads anything back
//! except the handles the renderer hands out.

pub mod headless;

pub use headless::{HeadlessRenderer, NullRenderer, RenderOp, ReportLog, WriteReporter};

use crate::command::WidgetKind;
use crate::dom::node::{NodeData, Spacer};

/// Opaque renderer-side identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

/// Containers the renderer is asked to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// The top-level window.
    Dialog { resizable: bool },
    /// A tab page.
    Page,
    /// Scaffold row.
    Row,
    /// Scaffold column.
    Column,
    GroupBox,
    Frame,
    Tabs,
}

/// Rendering substrate.
pub trait Renderer {
    /// Create a control without children.
    fn create_leaf(&mut self, kind: WidgetKind, title: &str) -> Handle;

    /// Create a node that holds other nodes.
    fn create_container(&mut self, kind: ContainerKind) -> Handle;

    fn create_spacer(&mut self, spacer: Spacer) -> Handle;

    /// Place `child` at `index` among `parent`'s children.
    fn mount(&mut self, parent: Handle, child: Handle, index: usize);

    /// Detach and drop `child` together with everything below it.
    fn unmount(&mut self, parent: Handle, child: Handle);

    /// Focus traversal order of one page.
    fn set_focus_order(&mut self, order: &[Handle]);

    /// A node's state changed.
    fn update(&mut self, _handle: Handle, _node: &NodeData) {}

    /// Give keyboard focus to a node.
    fn focus(&mut self, _handle: Handle) {}
}

/// Sink of report lines.
pub trait Reporter {
    fn emit(&mut self, name: &str, value: &str);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn create_leaf(&mut self, kind: WidgetKind, title: &str) -> Handle {
        (**self).create_leaf(kind, title)
    }

    fn create_container(&mut self, kind: ContainerKind) -> Handle {
        (**self).create_container(kind)
    }

    fn create_spacer(&mut self, spacer: Spacer) -> Handle {
        (**self).create_spacer(spacer)
    }

    fn mount(&mut self, parent: Handle, child: Handle, index: usize) {
        (**self).mount(parent, child, index)
    }

    fn unmount(&mut self, parent: Handle, child: Handle) {
        (**self).unmount(parent, child)
    }

    fn set_focus_order(&mut self, order: &[Handle]) {
        (**self).set_focus_order(order)
    }

    fn update(&mut self, handle: Handle, node: &NodeData) {
        (**self).update(handle, node)
    }

    fn focus(&mut self, handle: Handle) {
        (**self).focus(handle)
    }
}

impl<P: Reporter + ?Sized> Reporter for Box<P> {
    fn emit(&mut self, name: &str, value: &str) {
        (**self).emit(name, value)
    }
}
