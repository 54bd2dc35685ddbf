use anyhow::Context;

use crate::foundation::color::Color;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{MatrixError, MatrixResult};
use crate::grid::pixel_grid::Cell;

/// Decode an uploaded PNG, JPEG or BMP into a raster-ordered import buffer.
///
/// The image must be exactly `dims.cols x dims.rows`. Each pixel becomes
/// `rgb(r, g, b)` with brightness `alpha / 255`.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_import(bytes: &[u8], dims: Dimensions) -> MatrixResult<Vec<Cell>> {
    let format = image::guess_format(bytes).context("detect import image format")?;
    if !matches!(
        format,
        image::ImageFormat::Png | image::ImageFormat::Jpeg | image::ImageFormat::Bmp
    ) {
        return Err(MatrixError::validation(format!(
            "import image must be PNG, JPEG or BMP, got {format:?}"
        )));
    }

    let dyn_img =
        image::load_from_memory_with_format(bytes, format).context("decode import image")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width as usize != dims.cols {
        return Err(MatrixError::size_mismatch(
            "import image width",
            dims.cols,
            width as usize,
        ));
    }
    if height as usize != dims.rows {
        return Err(MatrixError::size_mismatch(
            "import image height",
            dims.rows,
            height as usize,
        ));
    }

    Ok(rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            Cell::new(Color::css_rgb(r, g, b), f64::from(a) / 255.0)
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/import/decode.rs"]
mod tests;
