use crate::foundation::color::Color;
use crate::foundation::core::{BrushConfig, Dimensions};
use crate::foundation::error::MatrixResult;
use crate::grid::pixel_grid::{Cell, PixelGrid};

/// Isolated paint session over one frame's buffer.
///
/// Edits never touch the main canvas or the stored frame; hand the result back with
/// [`crate::FrameStore::save_frame`] (or [`crate::EditorSession::commit_frame`]).
/// Mirroring reflects across the frame's own width.
#[derive(Clone, Debug)]
pub struct FrameEditor {
    area: String,
    index: usize,
    grid: PixelGrid,
    brush: BrushConfig,
    erase_mode: bool,
    mirror: bool,
    dragging: bool,
}

impl FrameEditor {
    pub(crate) fn new(area: &str, index: usize, grid: PixelGrid) -> Self {
        Self {
            area: area.to_owned(),
            index,
            grid,
            brush: BrushConfig::default(),
            erase_mode: false,
            mirror: false,
            dragging: false,
        }
    }

    /// Seed brush and mirror mode, typically from the main editor.
    pub fn with_brush(mut self, brush: BrushConfig, mirror: bool) -> Self {
        self.brush = brush;
        self.mirror = mirror;
        self
    }

    /// Name of the area owning the frame.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Position of the frame in the area's list.
    pub fn frame_index(&self) -> usize {
        self.index
    }

    /// Frame buffer size.
    pub fn dims(&self) -> Dimensions {
        self.grid.dims()
    }

    /// Buffer being edited.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Pick a new paint color; leaves erase mode.
    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
        self.erase_mode = false;
    }

    /// Toggle erase mode.
    pub fn toggle_erase(&mut self) -> bool {
        self.erase_mode = !self.erase_mode;
        self.erase_mode
    }

    /// Enable or disable mirror painting.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Paint `index` with `color`/`brightness`, mirrored when mirror mode is on.
    pub fn paint(&mut self, index: usize, color: &Color, brightness: f64) -> MatrixResult<()> {
        self.grid
            .paint_mirrored(index, color, brightness, self.mirror)
            .map(|_| ())
    }

    /// Erase `index`, mirrored when mirror mode is on.
    pub fn erase(&mut self, index: usize) -> MatrixResult<()> {
        self.paint(index, &Color::black(), 1.0)
    }

    /// Begin a drag and apply the brush once.
    pub fn drag_start(&mut self, index: usize) -> MatrixResult<()> {
        self.apply_brush(index)?;
        self.dragging = true;
        Ok(())
    }

    /// Apply the brush while a drag is active; ignored otherwise.
    pub fn drag_move(&mut self, index: usize) -> MatrixResult<()> {
        if self.dragging {
            self.apply_brush(index)?;
        }
        Ok(())
    }

    /// End the drag.
    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    /// Reset the frame buffer to black.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Edited cells, ready for saving.
    pub fn into_pixels(self) -> Vec<Cell> {
        self.grid.into_cells()
    }

    fn apply_brush(&mut self, index: usize) -> MatrixResult<()> {
        if self.erase_mode {
            self.erase(index)
        } else {
            let BrushConfig { color, brightness } = self.brush.clone();
            self.paint(index, &color, brightness)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/editor.rs"]
mod tests;
