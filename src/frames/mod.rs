//! Per-area frame sequences and the isolated frame editor.

pub mod editor;
pub mod store;
