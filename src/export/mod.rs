//! `canvas_data.json` documents and raster downloads.

/// JSON document model, export and restore.
pub mod json;
/// PNG / JPEG / BMP encoding.
pub mod raster;
