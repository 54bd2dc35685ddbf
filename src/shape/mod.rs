//! Parametric shape stamps rasterized to cell indices.

pub mod rasterize;
