//! Headless testing helpers: Pilot, outline snapshots.
//!
//! Use the [`Pilot`] to drive a [`Session`](crate::engine::Session) from
//! command scripts without a window. Use [`outline`] to capture the widget
//! tree as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{describe, outline};
