//! Matrix cell storage and mirroring.

pub mod mirror;
pub mod pixel_grid;
