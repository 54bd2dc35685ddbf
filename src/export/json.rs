use std::collections::BTreeMap;

use crate::area::manager::AreaManager;
use crate::foundation::color::Color;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{MatrixError, MatrixResult};
use crate::frames::store::FrameStore;
use crate::grid::pixel_grid::{Cell, PixelGrid};

/// Download name of the JSON export.
pub const JSON_FILE_NAME: &str = "canvas_data.json";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One exported cell.
pub struct PixelRecord {
    /// Authored color text.
    pub color: Color,
    /// Brightness in `[0, 1]`.
    pub brightness: f64,
    /// Owning area name, empty when the cell belongs to no area.
    #[serde(default)]
    pub area: String,
    /// Column within the owning buffer.
    pub x: usize,
    /// Row within the owning buffer.
    pub y: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One exported animation frame.
pub struct FrameRecord {
    /// Frame id.
    pub id: u32,
    /// Frame cells in raster order over the area's width.
    pub pixels: Vec<PixelRecord>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The `canvas_data.json` document.
pub struct CanvasDocument {
    /// Every matrix cell in raster order.
    pub canvas: Vec<PixelRecord>,
    /// Frames per area name.
    #[serde(default)]
    pub frames: BTreeMap<String, Vec<FrameRecord>>,
}

#[derive(Clone, Debug)]
/// Editor state rebuilt from a [`CanvasDocument`].
pub struct RestoredCanvas {
    /// Matrix cells.
    pub grid: PixelGrid,
    /// Areas recovered from cell tags.
    pub areas: AreaManager,
    /// Frames per area.
    pub frames: FrameStore,
}

/// Snapshot grid, area tags and frames into the export document.
#[tracing::instrument(skip_all)]
pub fn to_document(grid: &PixelGrid, areas: &AreaManager, frames: &FrameStore) -> CanvasDocument {
    let dims = grid.dims();
    let canvas = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let area = areas
                .membership(index)
                .map(|m| m.area.name.clone())
                .unwrap_or_default();
            record(dims, index, cell, area)
        })
        .collect();

    let frame_lists = frames
        .area_names()
        .map(|name| {
            let list: Vec<FrameRecord> = frames
                .frames(name)
                .unwrap_or_default()
                .iter()
                .map(|frame| FrameRecord {
                    id: frame.id(),
                    pixels: frame
                        .pixels()
                        .iter()
                        .enumerate()
                        .map(|(i, cell)| record(frame.grid().dims(), i, cell, name.to_owned()))
                        .collect(),
                })
                .collect();
            (name.to_owned(), list)
        })
        .collect();

    CanvasDocument {
        canvas,
        frames: frame_lists,
    }
}

/// Pretty-printed UTF-8 JSON.
pub fn to_json_pretty(doc: &CanvasDocument) -> MatrixResult<String> {
    serde_json::to_string_pretty(doc).map_err(|e| MatrixError::serde(e.to_string()))
}

/// Parse a `canvas_data.json` document.
pub fn from_json_str(s: &str) -> MatrixResult<CanvasDocument> {
    serde_json::from_str(s).map_err(|e| MatrixError::serde(e.to_string()))
}

/// Rebuild grid, areas and frames from an exported document.
///
/// Areas are recovered as the bounding box of each `area` name, in order of first
/// appearance, and must be solid rectangles. Highlight colors are reassigned in that order.
#[tracing::instrument(skip(doc), fields(cells = doc.canvas.len()))]
pub fn from_document(doc: &CanvasDocument, dims: Dimensions) -> MatrixResult<RestoredCanvas> {
    if doc.canvas.len() != dims.len() {
        return Err(MatrixError::size_mismatch(
            "canvas",
            dims.len(),
            doc.canvas.len(),
        ));
    }

    let mut cells = Vec::with_capacity(dims.len());
    let mut boxes: Vec<(String, [usize; 4])> = Vec::new();
    for (index, rec) in doc.canvas.iter().enumerate() {
        check_coordinates(dims, index, rec, "canvas")?;
        cells.push(Cell::new(rec.color.clone(), rec.brightness));
        if rec.area.is_empty() {
            continue;
        }
        let (x, y) = (rec.x, rec.y);
        match boxes.iter_mut().find(|(name, _)| *name == rec.area) {
            Some((_, b)) => {
                b[0] = b[0].min(x);
                b[1] = b[1].min(y);
                b[2] = b[2].max(x);
                b[3] = b[3].max(y);
            }
            None => boxes.push((rec.area.clone(), [x, y, x, y])),
        }
    }
    let grid = PixelGrid::from_cells(dims, cells)?;

    let mut areas = AreaManager::new(dims);
    let mut frames = FrameStore::new();
    for (name, [left, top, right, bottom]) in boxes {
        for y in top..=bottom {
            for x in left..=right {
                if doc.canvas[dims.to_index(x, y)].area != name {
                    return Err(MatrixError::validation(format!(
                        "area '{name}' is not a solid rectangle at ({x},{y})"
                    )));
                }
            }
        }
        let area = areas.define(name, dims.to_index(left, top), dims.to_index(right, bottom))?;
        frames.init_area(&area.name, area.bounds().dims());
    }

    for (name, list) in &doc.frames {
        let frame_dims = frames
            .area_dims(name)
            .map_err(|_| MatrixError::unknown_area(name.clone()))?;
        for frame in list {
            if frame.pixels.len() != frame_dims.len() {
                return Err(MatrixError::size_mismatch(
                    "frame pixels",
                    frame_dims.len(),
                    frame.pixels.len(),
                ));
            }
            let mut pixels = Vec::with_capacity(frame.pixels.len());
            for (i, rec) in frame.pixels.iter().enumerate() {
                check_coordinates(frame_dims, i, rec, "frame")?;
                if !rec.area.is_empty() && rec.area != *name {
                    return Err(MatrixError::validation(format!(
                        "frame {} of '{name}' has a cell tagged '{}'",
                        frame.id, rec.area
                    )));
                }
                pixels.push(Cell::new(rec.color.clone(), rec.brightness));
            }
            frames.restore_frame(name, frame.id, pixels)?;
        }
    }

    Ok(RestoredCanvas {
        grid,
        areas,
        frames,
    })
}

fn record(dims: Dimensions, index: usize, cell: &Cell, area: String) -> PixelRecord {
    let (x, y) = dims.to_xy(index);
    PixelRecord {
        color: cell.color.clone(),
        brightness: cell.brightness,
        area,
        x,
        y,
    }
}

fn check_coordinates(
    dims: Dimensions,
    index: usize,
    rec: &PixelRecord,
    what: &str,
) -> MatrixResult<()> {
    if dims.to_xy(index) != (rec.x, rec.y) {
        return Err(MatrixError::validation(format!(
            "{what} cell {index} has coordinates ({},{}), expected {:?}",
            rec.x,
            rec.y,
            dims.to_xy(index)
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/json.rs"]
mod tests;
