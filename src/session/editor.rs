use crate::area::manager::{AreaManager, SelectionState};
use crate::export::json::{self, CanvasDocument};
use crate::export::raster::{self, RasterFormat, RasterStyle};
use crate::foundation::color::Color;
use crate::foundation::core::{BrushConfig, MatrixConfig, validate_brightness};
use crate::foundation::error::{MatrixError, MatrixResult};
use crate::frames::editor::FrameEditor;
use crate::frames::store::{Frame, FrameStore};
use crate::grid::pixel_grid::{Cell, PixelGrid};
use crate::import::decode::decode_import;
use crate::shape::rasterize::{ShapeKind, ShapeOptions, rasterize};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Active editing tool.
pub enum Tool {
    /// Paint with the brush color and brightness.
    Paint,
    /// Paint black at full brightness.
    Erase,
    /// Stamp a parametric shape at the clicked cell.
    Shape {
        /// Shape to stamp.
        kind: ShapeKind,
        /// Shape parameters.
        options: ShapeOptions,
    },
    /// Two-click area definition.
    SelectArea,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DragState {
    origin: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What a pointer gesture did.
pub enum GestureOutcome {
    /// These cells were written, in write order.
    Painted(Vec<usize>),
    /// The first corner of an area selection was recorded.
    TopLeftSelected(usize),
    /// An area with this name was committed.
    AreaCreated(String),
    /// The gesture had no effect (e.g. pointer moved without a drag).
    Ignored,
}

/// One in-memory editing session: matrix, areas, frames and tool state.
///
/// All mutation goes through here in response to discrete gestures. While an area
/// selection waits for its bottom-right click, every unrelated operation fails with
/// [`MatrixError::SelectionInProgress`] until [`EditorSession::cancel_selection`].
#[derive(Clone, Debug)]
pub struct EditorSession {
    grid: PixelGrid,
    areas: AreaManager,
    frames: FrameStore,
    tool: Tool,
    brush: BrushConfig,
    mirror: bool,
    drag: Option<DragState>,
}

impl Default for EditorSession {
    fn default() -> Self {
        let grid = PixelGrid::matrix();
        Self {
            areas: AreaManager::new(grid.dims()),
            grid,
            frames: FrameStore::new(),
            tool: Tool::Paint,
            brush: BrushConfig::default(),
            mirror: false,
            drag: None,
        }
    }
}

impl EditorSession {
    /// Session over a matrix of the configured size.
    pub fn new(config: &MatrixConfig) -> MatrixResult<Self> {
        let grid = PixelGrid::new(config.dimensions()?);
        Ok(Self {
            areas: AreaManager::new(grid.dims()),
            grid,
            ..Self::default()
        })
    }

    /// Matrix cells.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Area definitions and selection state.
    pub fn areas(&self) -> &AreaManager {
        &self.areas
    }

    /// Frames per area.
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Current brush.
    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    /// True when paint strokes are mirrored.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// True while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Switch tools. Choosing [`Tool::SelectArea`] starts a selection.
    pub fn set_tool(&mut self, tool: Tool) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        self.drag = None;
        if tool == Tool::SelectArea {
            self.areas.begin_selection()?;
        } else if self.areas.selection().in_progress() {
            self.areas.cancel();
        }
        self.tool = tool;
        Ok(())
    }

    /// Toggle between erasing and painting; returns true when erase mode is on.
    pub fn toggle_erase(&mut self) -> MatrixResult<bool> {
        let next = if self.tool == Tool::Erase {
            Tool::Paint
        } else {
            Tool::Erase
        };
        self.set_tool(next)?;
        Ok(next == Tool::Erase)
    }

    /// Pick a new brush color. Leaves erase mode.
    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
        if self.tool == Tool::Erase {
            self.tool = Tool::Paint;
        }
    }

    /// Set brush brightness; must be within `[0, 1]`.
    pub fn set_brightness(&mut self, brightness: f64) -> MatrixResult<()> {
        validate_brightness(brightness)?;
        self.brush.brightness = brightness;
        Ok(())
    }

    /// Enable or disable mirrored painting.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Abandon an in-progress area selection and return to painting.
    pub fn cancel_selection(&mut self) {
        self.areas.cancel();
        if self.tool == Tool::SelectArea {
            self.tool = Tool::Paint;
        }
    }

    /// Pointer pressed on `index`.
    pub fn drag_start(&mut self, index: usize) -> MatrixResult<GestureOutcome> {
        match self.tool {
            Tool::Paint | Tool::Erase => {
                let painted = self.apply_brush(index)?;
                self.drag = Some(DragState { origin: index });
                Ok(GestureOutcome::Painted(painted))
            }
            Tool::Shape { kind, options } => self.draw_shape(kind, index, &options),
            Tool::SelectArea => self.select_corner(index),
        }
    }

    /// Pointer entered `index`; paints only during a paint/erase drag.
    pub fn drag_move(&mut self, index: usize) -> MatrixResult<GestureOutcome> {
        if self.drag.is_none() || !matches!(self.tool, Tool::Paint | Tool::Erase) {
            return Ok(GestureOutcome::Ignored);
        }
        Ok(GestureOutcome::Painted(self.apply_brush(index)?))
    }

    /// Pointer released.
    pub fn drag_end(&mut self) {
        if let Some(drag) = self.drag.take() {
            tracing::trace!(origin = drag.origin, "drag ended");
        }
    }

    /// Stamp `kind` at `anchor` with the brush color at full brightness.
    ///
    /// Area membership of the stamped cells is unchanged.
    pub fn draw_shape(
        &mut self,
        kind: ShapeKind,
        anchor: usize,
        options: &ShapeOptions,
    ) -> MatrixResult<GestureOutcome> {
        self.ensure_no_pending_selection()?;
        let cells = rasterize(self.grid.dims(), kind, anchor, options)?;
        self.grid.paint_all(&cells, &self.brush.color, 1.0)?;
        Ok(GestureOutcome::Painted(cells))
    }

    /// Rename the area at `position` and re-key its frames.
    #[tracing::instrument(skip(self))]
    pub fn rename_area(&mut self, position: usize, new_name: &str) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        let old = self.areas.rename(position, new_name)?;
        let new_name = new_name.trim();
        if old != new_name && self.frames.contains_area(&old) {
            self.frames.rename_area(&old, new_name)?;
        }
        Ok(())
    }

    /// Delete the area at `position` together with its frames. Cell colors are kept.
    #[tracing::instrument(skip(self))]
    pub fn delete_area(&mut self, position: usize) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        let area = self.areas.delete(position)?;
        self.frames.remove_area(&area.name);
        Ok(())
    }

    /// Toggle the single-area highlight.
    pub fn toggle_highlight(&mut self, name: &str) -> MatrixResult<Option<&str>> {
        self.areas.toggle_highlight(name)
    }

    /// Append a blank frame to `area`.
    pub fn add_frame(&mut self, area: &str) -> MatrixResult<&Frame> {
        self.ensure_no_pending_selection()?;
        self.frames.add_frame(area)
    }

    /// Remove the frame at `index` of `area`.
    pub fn delete_frame(&mut self, area: &str, index: usize) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        self.frames.delete_frame(area, index).map(|_| ())
    }

    /// Open an isolated editor on a frame, seeded with the session brush and mirror mode.
    pub fn edit_frame(&self, area: &str, index: usize) -> MatrixResult<FrameEditor> {
        Ok(self
            .frames
            .edit_frame(area, index)?
            .with_brush(self.brush.clone(), self.mirror))
    }

    /// Save an edited frame back into the store.
    pub fn commit_frame(&mut self, editor: FrameEditor) -> MatrixResult<()> {
        let area = editor.area().to_owned();
        let index = editor.frame_index();
        self.save_frame(&area, index, editor.into_pixels())
    }

    /// Replace a frame's cells wholesale.
    pub fn save_frame(&mut self, area: &str, index: usize, pixels: Vec<Cell>) -> MatrixResult<()> {
        self.frames.save_frame(area, index, pixels)
    }

    /// Reset canvas, areas and frames.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.areas.reset();
        self.frames.reset();
        self.drag = None;
        if self.tool == Tool::SelectArea {
            self.tool = Tool::Paint;
        }
    }

    /// Overwrite the canvas from an import buffer of exactly rows*cols cells.
    #[tracing::instrument(skip(self, cells), fields(len = cells.len()))]
    pub fn import_cells(&mut self, cells: &[Cell]) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        self.grid.from_import(cells)
    }

    /// Decode an uploaded image and import it.
    pub fn import_image(&mut self, bytes: &[u8]) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        let cells = decode_import(bytes, self.grid.dims())?;
        self.grid.from_import(&cells)
    }

    /// Snapshot the session as a `canvas_data.json` document.
    pub fn export_document(&self) -> CanvasDocument {
        json::to_document(&self.grid, &self.areas, &self.frames)
    }

    /// Pretty-printed `canvas_data.json` text.
    pub fn export_json(&self) -> MatrixResult<String> {
        json::to_json_pretty(&self.export_document())
    }

    /// Replace canvas, areas and frames from an exported document.
    #[tracing::instrument(skip_all)]
    pub fn load_document(&mut self, doc: &CanvasDocument) -> MatrixResult<()> {
        self.ensure_no_pending_selection()?;
        let restored = json::from_document(doc, self.grid.dims())?;
        self.grid = restored.grid;
        self.areas = restored.areas;
        self.frames = restored.frames;
        self.drag = None;
        if self.tool == Tool::SelectArea {
            self.tool = Tool::Paint;
        }
        Ok(())
    }

    /// Parse and load `canvas_data.json` text.
    pub fn load_json(&mut self, text: &str) -> MatrixResult<()> {
        let doc = json::from_json_str(text)?;
        self.load_document(&doc)
    }

    /// Encode the canvas for download as `format.file_name()`.
    pub fn export_raster(&self, format: RasterFormat, style: RasterStyle) -> MatrixResult<Vec<u8>> {
        raster::encode_raster(&self.grid, format, style)
    }

    fn ensure_no_pending_selection(&self) -> MatrixResult<()> {
        match self.areas.selection() {
            SelectionState::AwaitingBottomRight { .. } => Err(MatrixError::SelectionInProgress),
            _ => Ok(()),
        }
    }

    fn apply_brush(&mut self, index: usize) -> MatrixResult<Vec<usize>> {
        if self.tool == Tool::Erase {
            self.grid.paint_mirrored(index, &Color::black(), 1.0, self.mirror)
        } else {
            self.grid
                .paint_mirrored(index, &self.brush.color, self.brush.brightness, self.mirror)
        }
    }

    #[tracing::instrument(skip(self))]
    fn select_corner(&mut self, index: usize) -> MatrixResult<GestureOutcome> {
        if self.areas.selection() == SelectionState::Idle {
            self.areas.begin_selection()?;
        }
        match self.areas.selection() {
            SelectionState::AwaitingBottomRight { .. } => {
                let area = self.areas.select_bottom_right(index)?;
                let name = area.name.clone();
                let dims = area.bounds().dims();
                self.frames.init_area(&name, dims);
                self.tool = Tool::Paint;
                Ok(GestureOutcome::AreaCreated(name))
            }
            _ => {
                self.areas.select_top_left(index)?;
                Ok(GestureOutcome::TopLeftSelected(index))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
