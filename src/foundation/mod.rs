//! Shared primitives: colors, dimensions, configuration and errors.

pub mod color;
pub mod core;
pub mod error;
