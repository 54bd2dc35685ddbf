//! Gesture-level editing state tying grid, areas and frames together.

pub mod editor;
