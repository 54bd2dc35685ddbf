use crate::foundation::color::Color;
use crate::foundation::core::{Dimensions, validate_brightness};
use crate::foundation::error::{MatrixError, MatrixResult};
use crate::grid::mirror::mirror_index;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Color and brightness of one LED.
///
/// Area membership and coordinates are not stored per cell; they are derived from the
/// cell's index and the area layer when needed.
pub struct Cell {
    /// Authored color.
    pub color: Color,
    /// Brightness in `[0, 1]`.
    #[serde(default = "full_brightness")]
    pub brightness: f64,
}

fn full_brightness() -> f64 {
    1.0
}

impl Cell {
    /// Build a cell.
    pub fn new(color: Color, brightness: f64) -> Self {
        Self { color, brightness }
    }

    /// Black at full brightness; the state of a cleared or erased cell.
    pub fn blank() -> Self {
        Self::new(Color::black(), 1.0)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Fixed-size, raster-ordered cell buffer.
///
/// Used both for the full matrix and for per-area animation frames; the buffer is never
/// resized after construction. Every mutating operation validates its inputs before
/// touching any cell.
pub struct PixelGrid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// A blank buffer of `dims`.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::blank(); dims.len()],
        }
    }

    /// A blank 128x32 matrix.
    pub fn matrix() -> Self {
        Self::new(Dimensions::MATRIX)
    }

    /// Wrap existing cells; fails unless `cells.len() == dims.len()`.
    pub fn from_cells(dims: Dimensions, cells: Vec<Cell>) -> MatrixResult<Self> {
        if cells.len() != dims.len() {
            return Err(MatrixError::size_mismatch("grid cells", dims.len(), cells.len()));
        }
        for cell in &cells {
            validate_brightness(cell.brightness)?;
        }
        Ok(Self { dims, cells })
    }

    /// Buffer dimensions.
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized buffer.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in raster order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the grid, returning its cells in raster order.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Cell at `index`.
    pub fn cell(&self, index: usize) -> MatrixResult<&Cell> {
        self.cells
            .get(index)
            .ok_or_else(|| MatrixError::index_out_of_range(index, self.cells.len()))
    }

    /// Cell at `(x, y)`.
    pub fn cell_at(&self, x: usize, y: usize) -> MatrixResult<&Cell> {
        if x >= self.dims.cols || y >= self.dims.rows {
            return Err(MatrixError::index_out_of_range(
                y.saturating_mul(self.dims.cols).saturating_add(x),
                self.len(),
            ));
        }
        self.cell(self.dims.to_index(x, y))
    }

    /// `(index % cols, index / cols)`.
    pub fn to_xy(&self, index: usize) -> (usize, usize) {
        self.dims.to_xy(index)
    }

    /// `y * cols + x`.
    pub fn to_index(&self, x: usize, y: usize) -> usize {
        self.dims.to_index(x, y)
    }

    /// Replace the color and brightness at `index`.
    pub fn paint(&mut self, index: usize, color: &Color, brightness: f64) -> MatrixResult<()> {
        self.dims.check(index)?;
        validate_brightness(brightness)?;
        self.cells[index] = Cell::new(color.clone(), brightness);
        Ok(())
    }

    /// Reset `index` to black at full brightness.
    pub fn erase(&mut self, index: usize) -> MatrixResult<()> {
        self.paint(index, &Color::black(), 1.0)
    }

    /// Paint `index` and, when `mirror` is set, its horizontal reflection.
    ///
    /// Returns the indices actually written.
    pub fn paint_mirrored(
        &mut self,
        index: usize,
        color: &Color,
        brightness: f64,
        mirror: bool,
    ) -> MatrixResult<Vec<usize>> {
        let mut targets = vec![index];
        if mirror {
            let m = mirror_index(self.dims, index)?;
            if m != index {
                targets.push(m);
            }
        }
        self.paint_all(&targets, color, brightness)?;
        Ok(targets)
    }

    /// Paint every index in `indices`; nothing is written if any index is invalid.
    pub fn paint_all(
        &mut self,
        indices: &[usize],
        color: &Color,
        brightness: f64,
    ) -> MatrixResult<()> {
        validate_brightness(brightness)?;
        for &index in indices {
            self.dims.check(index)?;
        }
        for &index in indices {
            self.cells[index] = Cell::new(color.clone(), brightness);
        }
        Ok(())
    }

    /// Reset every cell to black at full brightness.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    /// Overwrite every cell from a raster-ordered buffer of exactly `len()` cells.
    pub fn from_import(&mut self, buffer: &[Cell]) -> MatrixResult<()> {
        if buffer.len() != self.cells.len() {
            return Err(MatrixError::size_mismatch(
                "import buffer",
                self.cells.len(),
                buffer.len(),
            ));
        }
        for cell in buffer {
            validate_brightness(cell.brightness)?;
        }
        self.cells.clone_from_slice(buffer);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/pixel_grid.rs"]
mod tests;
