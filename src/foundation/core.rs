use crate::foundation::color::Color;
use crate::foundation::error::{MatrixError, MatrixResult};

/// Column count of the LED matrix.
pub const MATRIX_COLS: usize = 128;
/// Row count of the LED matrix.
pub const MATRIX_ROWS: usize = 32;
/// Largest cell count a configured matrix may have.
pub const MAX_MATRIX_CELLS: usize = 1 << 20;

/// Width/height of a raster-ordered cell buffer.
///
/// Index math is row-major: `index = y * cols + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Number of columns (width).
    pub cols: usize,
    /// Number of rows (height).
    pub rows: usize,
}

impl Dimensions {
    /// The full 128x32 matrix.
    pub const MATRIX: Self = Self {
        cols: MATRIX_COLS,
        rows: MATRIX_ROWS,
    };

    /// Build validated dimensions; both sides must be non-zero.
    pub fn new(cols: usize, rows: usize) -> MatrixResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(MatrixError::validation("dimensions must be > 0"));
        }
        Ok(Self { cols, rows })
    }

    /// Number of addressable cells.
    pub fn len(self) -> usize {
        self.cols * self.rows
    }

    /// True when no cell is addressable.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when `index` addresses a cell.
    pub fn contains(self, index: usize) -> bool {
        index < self.len()
    }

    /// Fail with [`MatrixError::IndexOutOfRange`] unless `index` addresses a cell.
    pub fn check(self, index: usize) -> MatrixResult<()> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(MatrixError::index_out_of_range(index, self.len()))
        }
    }

    /// `(index % cols, index / cols)`.
    pub fn to_xy(self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// `y * cols + x`.
    pub fn to_index(self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Index for signed coordinates, or `None` when they fall outside the buffer.
    pub fn index_of(self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.cols && y < self.rows).then(|| self.to_index(x, y))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::MATRIX
    }
}

/// Serializable matrix configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatrixConfig {
    /// Matrix width in LEDs.
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// Matrix height in LEDs.
    #[serde(default = "default_rows")]
    pub rows: u32,
}

fn default_cols() -> u32 {
    MATRIX_COLS as u32
}

fn default_rows() -> u32 {
    MATRIX_ROWS as u32
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

impl MatrixConfig {
    /// Reject zero-sized matrices and ones above [`MAX_MATRIX_CELLS`].
    pub fn validate(&self) -> MatrixResult<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(MatrixError::validation("matrix cols/rows must be > 0"));
        }
        match (self.cols as usize).checked_mul(self.rows as usize) {
            Some(cells) if cells <= MAX_MATRIX_CELLS => Ok(()),
            _ => Err(MatrixError::validation(format!(
                "matrix {}x{} exceeds {MAX_MATRIX_CELLS} cells",
                self.cols, self.rows
            ))),
        }
    }

    /// Validated grid dimensions.
    pub fn dimensions(&self) -> MatrixResult<Dimensions> {
        self.validate()?;
        Dimensions::new(self.cols as usize, self.rows as usize)
    }
}

/// Current paint color and brightness.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BrushConfig {
    /// Paint color.
    #[serde(default = "Color::white")]
    pub color: Color,
    /// Brightness in `[0, 1]`.
    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

fn default_brightness() -> f64 {
    1.0
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Color::white(),
            brightness: default_brightness(),
        }
    }
}

impl BrushConfig {
    /// Brightness must be finite and within `[0, 1]`.
    pub fn validate(&self) -> MatrixResult<()> {
        validate_brightness(self.brightness)
    }
}

pub(crate) fn validate_brightness(brightness: f64) -> MatrixResult<()> {
    if !brightness.is_finite() || !(0.0..=1.0).contains(&brightness) {
        return Err(MatrixError::validation(format!(
            "brightness must be within [0, 1], got {brightness}"
        )));
    }
    Ok(())
}

/// Which sides of an area rectangle a cell sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Cell is on the rectangle's top row.
    pub top: bool,
    /// Cell is on the rectangle's bottom row.
    pub bottom: bool,
    /// Cell is on the rectangle's left column.
    pub left: bool,
    /// Cell is on the rectangle's right column.
    pub right: bool,
}

impl Edges {
    /// True when the cell is on at least one boundary.
    pub fn any(self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
