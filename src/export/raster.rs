use std::io::Cursor;
use std::str::FromStr;

use anyhow::Context;

use crate::foundation::error::{MatrixError, MatrixResult};
use crate::grid::pixel_grid::PixelGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Raster download formats.
pub enum RasterFormat {
    /// Lossless PNG.
    Png,
    /// Baseline JPEG.
    Jpeg,
    /// Uncompressed BMP.
    Bmp,
}

impl RasterFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
        }
    }

    /// Download name, `matrix_image.<ext>`.
    pub fn file_name(self) -> String {
        format!("matrix_image.{}", self.extension())
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl FromStr for RasterFormat {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            other => Err(MatrixError::validation(format!(
                "unsupported raster format \"{other}\" (expected png, jpeg or bmp)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How brightness is reflected in raster output.
pub enum RasterStyle {
    /// Write each cell's color as-is; brightness is ignored.
    #[default]
    Raw,
    /// Scale each channel by the cell's brightness (brightness as alpha over black).
    Dimmed,
}

/// One opaque RGB sample per cell, `cols x rows`.
pub fn to_raster(grid: &PixelGrid, style: RasterStyle) -> image::RgbImage {
    let dims = grid.dims();
    let mut img = image::RgbImage::new(dims.cols as u32, dims.rows as u32);
    for (index, cell) in grid.cells().iter().enumerate() {
        let (x, y) = dims.to_xy(index);
        let rgb = match style {
            RasterStyle::Raw => cell.color.rgb(),
            RasterStyle::Dimmed => cell.color.rgb().scaled(cell.brightness),
        };
        img.put_pixel(x as u32, y as u32, image::Rgb([rgb.r, rgb.g, rgb.b]));
    }
    img
}

/// Encode the grid as `format` bytes ready for download.
#[tracing::instrument(skip(grid))]
pub fn encode_raster(
    grid: &PixelGrid,
    format: RasterFormat,
    style: RasterStyle,
) -> MatrixResult<Vec<u8>> {
    let img = to_raster(grid, style);
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format.image_format())
        .with_context(|| format!("encode {}", format.extension()))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
