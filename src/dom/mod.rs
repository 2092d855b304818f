//! Widget tree: slotmap-backed arena of pages, scaffold layouts and controls.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{Axis, Control, NodeData, NodeId, NodeKind, Spacer};
pub use query::{Address, Selector, Target};
pub use tree::Document;
