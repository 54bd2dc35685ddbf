use std::collections::BTreeSet;

use crate::foundation::core::Dimensions;
use crate::foundation::error::MatrixResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Parametric shape kinds.
pub enum ShapeKind {
    /// Circle centered on the anchor.
    Circle,
    /// Axis-aligned rectangle with the anchor as top-left.
    Rectangle,
    /// Triangle with its apex on the anchor, widening downwards.
    Triangle,
    /// Fixed 10-cell star centered on the anchor.
    Star,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Triangle silhouette.
pub enum TriangleKind {
    /// Sides close to 60 degrees: row `y` spans `round(y / sqrt(3))` either side of the apex.
    Equilateral,
    /// Row `y` spans `[-y, y]` around the apex.
    #[default]
    Isosceles,
    /// Right triangle: row `y` spans `[0, y]` from the apex.
    Scalene,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-draw shape parameters.
pub struct ShapeOptions {
    /// Fill the interior instead of drawing an outline.
    #[serde(default = "default_filled")]
    pub is_filled: bool,
    /// Rectangle width in cells.
    #[serde(default = "default_extent")]
    pub width: u32,
    /// Rectangle/triangle height in cells.
    #[serde(default = "default_extent")]
    pub height: u32,
    /// Circle radius in cells.
    #[serde(default = "default_radius")]
    pub radius: u32,
    /// Triangle silhouette.
    #[serde(default, rename = "triangleType")]
    pub triangle_kind: TriangleKind,
}

fn default_filled() -> bool {
    true
}

fn default_extent() -> u32 {
    10
}

fn default_radius() -> u32 {
    5
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            is_filled: default_filled(),
            width: default_extent(),
            height: default_extent(),
            radius: default_radius(),
            triangle_kind: TriangleKind::default(),
        }
    }
}

const STAR_OFFSETS: [(i64, i64); 10] = [
    (0, -2),
    (-1, -1),
    (0, -1),
    (1, -1),
    (-2, 0),
    (0, 0),
    (2, 0),
    (0, 1),
    (-1, 2),
    (1, 2),
];

/// Cells covered by `shape` drawn at `anchor`, clipped to `dims`, in raster order.
///
/// Pure: nothing is painted. Work is bounded by the clipped bounding box, so oversized
/// parameters cost no more than a full-grid scan.
pub fn rasterize(
    dims: Dimensions,
    shape: ShapeKind,
    anchor: usize,
    options: &ShapeOptions,
) -> MatrixResult<Vec<usize>> {
    dims.check(anchor)?;
    let (ax, ay) = dims.to_xy(anchor);
    let (ax, ay) = (ax as i64, ay as i64);
    let mut out = BTreeSet::new();

    match shape {
        ShapeKind::Circle => {
            // Every in-grid cell is closer than cols + rows to the anchor.
            let r = i64::from(options.radius).min((dims.cols + dims.rows) as i64);
            let outer = r * r;
            let inner = (r - 1).max(0).pow(2);
            for y in clip(ay - r, ay + r, dims.rows) {
                for x in clip(ax - r, ax + r, dims.cols) {
                    let (dx, dy) = (x - ax, y - ay);
                    let d2 = dx * dx + dy * dy;
                    if d2 > outer {
                        continue;
                    }
                    if !options.is_filled && r > 0 && d2 < inner {
                        continue;
                    }
                    out.extend(dims.index_of(x, y));
                }
            }
        }
        ShapeKind::Rectangle => {
            let (w, h) = (i64::from(options.width), i64::from(options.height));
            for y in clip(ay, ay + h - 1, dims.rows) {
                for x in clip(ax, ax + w - 1, dims.cols) {
                    let (dx, dy) = (x - ax, y - ay);
                    let border = dx == 0 || dx == w - 1 || dy == 0 || dy == h - 1;
                    if options.is_filled || border {
                        out.extend(dims.index_of(x, y));
                    }
                }
            }
        }
        ShapeKind::Triangle => {
            let h = i64::from(options.height);
            for y in clip(ay, ay + h - 1, dims.rows) {
                let dy = y - ay;
                let (lo, hi) = triangle_row_span(options.triangle_kind, dy);
                for x in clip(ax + lo, ax + hi, dims.cols) {
                    let dx = x - ax;
                    let outline = dy == h - 1 || dx == lo || dx == hi;
                    if options.is_filled || outline {
                        out.extend(dims.index_of(x, y));
                    }
                }
            }
        }
        ShapeKind::Star => {
            for (dx, dy) in STAR_OFFSETS {
                out.extend(dims.index_of(ax + dx, ay + dy));
            }
        }
    }

    Ok(out.into_iter().collect())
}

/// Column offsets `[lo, hi]` covered by triangle row `dy` relative to the apex.
fn triangle_row_span(kind: TriangleKind, dy: i64) -> (i64, i64) {
    match kind {
        TriangleKind::Isosceles => (-dy, dy),
        TriangleKind::Equilateral => {
            let half = (dy as f64 / 3f64.sqrt()).round() as i64;
            (-half, half)
        }
        TriangleKind::Scalene => (0, dy),
    }
}

/// Inclusive `[lo, hi]` clipped to `[0, len)`.
fn clip(lo: i64, hi: i64, len: usize) -> std::ops::RangeInclusive<i64> {
    let max = len as i64 - 1;
    lo.max(0)..=hi.min(max)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/rasterize.rs"]
mod tests;
