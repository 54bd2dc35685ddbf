use std::collections::BTreeMap;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{MatrixError, MatrixResult};
use crate::frames::editor::FrameEditor;
use crate::grid::pixel_grid::{Cell, PixelGrid};

#[derive(Clone, Debug, PartialEq)]
/// One animation frame of an area: an independent cell buffer sized to the area.
pub struct Frame {
    id: u32,
    grid: PixelGrid,
}

impl Frame {
    /// Frame id, unique within its area.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Frame cells in raster order over the area's own width.
    pub fn pixels(&self) -> &[Cell] {
        self.grid.cells()
    }

    /// Underlying buffer.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AreaFrames {
    dims: Dimensions,
    next_id: u32,
    frames: Vec<Frame>,
}

impl AreaFrames {
    fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            next_id: 1,
            frames: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Per-area ordered frame lists, keyed by area name.
///
/// Frame ids come from a per-area counter that never goes backwards, so deleting a frame
/// and adding another cannot produce duplicate ids.
pub struct FrameStore {
    entries: BTreeMap<String, AreaFrames>,
}

impl FrameStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame list for `area` sized to `dims`. Existing lists are kept.
    pub fn init_area(&mut self, area: &str, dims: Dimensions) {
        self.entries
            .entry(area.to_owned())
            .or_insert_with(|| AreaFrames::new(dims));
    }

    /// Drop `area` and all of its frames.
    pub fn remove_area(&mut self, area: &str) -> bool {
        self.entries.remove(area).is_some()
    }

    /// Re-key the frame list of `old` under `new`.
    pub fn rename_area(&mut self, old: &str, new: &str) -> MatrixResult<()> {
        if old == new {
            return Ok(());
        }
        if self.entries.contains_key(new) {
            return Err(MatrixError::DuplicateAreaName(new.to_owned()));
        }
        let entry = self
            .entries
            .remove(old)
            .ok_or_else(|| MatrixError::unknown_area(old))?;
        self.entries.insert(new.to_owned(), entry);
        Ok(())
    }

    /// True when `area` has a frame list.
    pub fn contains_area(&self, area: &str) -> bool {
        self.entries.contains_key(area)
    }

    /// Area names with frame lists, sorted.
    pub fn area_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Frame buffer size for `area`.
    pub fn area_dims(&self, area: &str) -> MatrixResult<Dimensions> {
        Ok(self.entry(area)?.dims)
    }

    /// Frames of `area` in order.
    pub fn frames(&self, area: &str) -> MatrixResult<&[Frame]> {
        Ok(&self.entry(area)?.frames)
    }

    /// Frame at `index` of `area`.
    pub fn frame(&self, area: &str, index: usize) -> MatrixResult<&Frame> {
        let entry = self.entry(area)?;
        entry
            .frames
            .get(index)
            .ok_or_else(|| frame_out_of_range(area, index, entry.frames.len()))
    }

    /// Append a blank frame to `area`.
    pub fn add_frame(&mut self, area: &str) -> MatrixResult<&Frame> {
        let entry = self.entry_mut(area)?;
        let id = entry.next_id;
        entry.next_id = id.checked_add(1).ok_or_else(|| {
            MatrixError::validation(format!("area '{area}' has exhausted its frame ids"))
        })?;
        entry.frames.push(Frame {
            id,
            grid: PixelGrid::new(entry.dims),
        });
        tracing::debug!(area, id, "frame added");
        Ok(&entry.frames[entry.frames.len() - 1])
    }

    /// Remove the frame at `index`; remaining ids are left as they are.
    pub fn delete_frame(&mut self, area: &str, index: usize) -> MatrixResult<Frame> {
        let entry = self.entry_mut(area)?;
        if index >= entry.frames.len() {
            return Err(frame_out_of_range(area, index, entry.frames.len()));
        }
        let frame = entry.frames.remove(index);
        tracing::debug!(area, id = frame.id, "frame deleted");
        Ok(frame)
    }

    /// Open an isolated editing session on a copy of the frame's buffer.
    pub fn edit_frame(&self, area: &str, index: usize) -> MatrixResult<FrameEditor> {
        let frame = self.frame(area, index)?;
        Ok(FrameEditor::new(area, index, frame.grid.clone()))
    }

    /// Replace the frame's buffer wholesale.
    #[tracing::instrument(skip(self, pixels), fields(len = pixels.len()))]
    pub fn save_frame(&mut self, area: &str, index: usize, pixels: Vec<Cell>) -> MatrixResult<()> {
        let entry = self.entry_mut(area)?;
        let len = entry.frames.len();
        if index >= len {
            return Err(frame_out_of_range(area, index, len));
        }
        if pixels.len() != entry.dims.len() {
            return Err(MatrixError::size_mismatch(
                "frame save",
                entry.dims.len(),
                pixels.len(),
            ));
        }
        entry.frames[index].grid = PixelGrid::from_cells(entry.dims, pixels)?;
        Ok(())
    }

    /// Append a frame with a known id, as read back from an exported document.
    pub fn restore_frame(&mut self, area: &str, id: u32, pixels: Vec<Cell>) -> MatrixResult<()> {
        let entry = self.entry_mut(area)?;
        if id == u32::MAX {
            return Err(MatrixError::validation(format!(
                "area '{area}' frame id {id} is out of range"
            )));
        }
        if entry.frames.iter().any(|f| f.id == id) {
            return Err(MatrixError::validation(format!(
                "area '{area}' has duplicate frame id {id}"
            )));
        }
        if pixels.len() != entry.dims.len() {
            return Err(MatrixError::size_mismatch(
                "frame pixels",
                entry.dims.len(),
                pixels.len(),
            ));
        }
        let grid = PixelGrid::from_cells(entry.dims, pixels)?;
        entry.frames.push(Frame { id, grid });
        entry.next_id = entry.next_id.max(id.saturating_add(1));
        Ok(())
    }

    /// Drop every area and frame.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    fn entry(&self, area: &str) -> MatrixResult<&AreaFrames> {
        self.entries
            .get(area)
            .ok_or_else(|| MatrixError::unknown_area(area))
    }

    fn entry_mut(&mut self, area: &str) -> MatrixResult<&mut AreaFrames> {
        self.entries
            .get_mut(area)
            .ok_or_else(|| MatrixError::unknown_area(area))
    }
}

fn frame_out_of_range(area: &str, index: usize, len: usize) -> MatrixError {
    MatrixError::FrameOutOfRange {
        area: area.to_owned(),
        index,
        len,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/store.rs"]
mod tests;
