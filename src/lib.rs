//! # dialogbox
//!
//! A dialog built from a stream of text commands.
//!
//! A host program writes commands such as `add pushbutton Ok ok apply exit`
//! to the dialog's input; the dialog grows a widget tree, keeps insertion
//! cursors into it, and answers with `name=value` report lines.
//!
//! ## Core Systems
//!
//! - **[`command`]**: Tokenizer, keyword table, command assembler, input readers
//! - **[`dom`]**: Slotmap-backed widget tree with name and selector addressing
//! - **[`engine`]**: Session, cursors, structural edits, empty-branch collection
//! - **[`focus`]**: Per-page tab order
//! - **[`render`]**: Renderer and reporter interfaces plus headless versions
//! - **[`app`]**: Configuration and the command loop
//! - **[`logging`]**: Tracing subscriber for the binary
//! - **[`testing`]**: Headless pilot and outline snapshots

// Command language
pub mod command;

// Widget tree
pub mod dom;
pub mod engine;
pub mod focus;

// Output
pub mod render;

// Application
pub mod app;
pub mod logging;

// Test helpers
pub mod testing;
