use crate::foundation::core::Dimensions;
use crate::foundation::error::MatrixResult;

/// Reflect `index` across the vertical centerline of a `dims`-sized buffer.
///
/// `mirror_x = cols - 1 - x`, same row. Involutive over every valid index.
pub fn mirror_index(dims: Dimensions, index: usize) -> MatrixResult<usize> {
    dims.check(index)?;
    let (x, y) = dims.to_xy(index);
    Ok(dims.to_index(dims.cols - 1 - x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/grid/mirror.rs"]
mod tests;
