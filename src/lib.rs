//! Matrix Creator is an in-memory editor model for a 128x32 LED pixel matrix.
//!
//! The crate owns everything below the pointer events of an editing UI:
//!
//! 1. **Grid**: a raster-ordered [`PixelGrid`] of `(color, brightness)` cells, with optional
//!    horizontal mirroring of every write.
//! 2. **Areas**: named, non-overlapping rectangles defined through a two-click selection
//!    ([`AreaManager`]). Membership and edge flags are derived from the rectangles.
//! 3. **Frames**: per-area sequences of independent pixel buffers ([`FrameStore`]) edited in
//!    isolation through a [`FrameEditor`].
//! 4. **Shapes**: parametric circle, rectangle, triangle and star stamps ([`rasterize`]).
//! 5. **IO**: `canvas_data.json` export/restore, raster downloads (PNG, JPEG, BMP) and
//!    image import.
//!
//! [`EditorSession`] ties these together behind discrete gesture calls.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod area;
mod export;
mod foundation;
mod frames;
mod grid;
mod import;
mod session;
mod shape;

pub use area::manager::{Area, AreaBounds, AreaManager, AreaMembership, SelectionState};
pub use export::json::{
    CanvasDocument, FrameRecord, JSON_FILE_NAME, PixelRecord, RestoredCanvas, from_document,
    from_json_str, to_document, to_json_pretty,
};
pub use export::raster::{RasterFormat, RasterStyle, encode_raster, to_raster};
pub use foundation::color::{Color, Rgb8};
pub use foundation::core::{
    BrushConfig, Dimensions, Edges, MATRIX_COLS, MATRIX_ROWS, MAX_MATRIX_CELLS, MatrixConfig,
};
pub use foundation::error::{MatrixError, MatrixResult};
pub use frames::editor::FrameEditor;
pub use frames::store::{Frame, FrameStore};
pub use grid::mirror::mirror_index;
pub use grid::pixel_grid::{Cell, PixelGrid};
pub use import::decode::decode_import;
pub use session::editor::{EditorSession, GestureOutcome, Tool};
pub use shape::rasterize::{ShapeKind, ShapeOptions, TriangleKind, rasterize};
