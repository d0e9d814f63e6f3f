//! Session history with snapshot-based undo/redo.
//!
//! The store is an ordered list of rows. Every mutation is preceded by a
//! deep snapshot pushed onto the undo stack, so any edit can be reversed
//! and replayed.

mod store;
mod undo;

pub use store::{HistorySnapshot, HistoryStore};
pub use undo::UndoRedo;
