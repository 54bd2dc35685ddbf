use crate::foundation::color::Color;
use crate::foundation::core::{Dimensions, Edges};
use crate::foundation::error::{MatrixError, MatrixResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Inclusive cell rectangle `[left, right] x [top, bottom]`.
pub struct AreaBounds {
    /// Leftmost column.
    pub left: usize,
    /// Topmost row.
    pub top: usize,
    /// Rightmost column (inclusive).
    pub right: usize,
    /// Bottom row (inclusive).
    pub bottom: usize,
}

impl AreaBounds {
    /// Rectangle spanned by two corner indices; fails when the rectangle is inverted.
    pub fn from_corners(
        dims: Dimensions,
        top_left: usize,
        bottom_right: usize,
    ) -> MatrixResult<Self> {
        dims.check(top_left)?;
        dims.check(bottom_right)?;
        let (left, top) = dims.to_xy(top_left);
        let (right, bottom) = dims.to_xy(bottom_right);
        if right < left || bottom < top {
            return Err(MatrixError::invalid_selection(format!(
                "bottom-right ({right},{bottom}) is above or left of top-left ({left},{top})"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Column count.
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Row count.
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Size of a frame buffer covering this rectangle.
    pub fn dims(&self) -> Dimensions {
        Dimensions {
            cols: self.width(),
            rows: self.height(),
        }
    }

    /// True when `(x, y)` lies inside the rectangle.
    pub fn contains_xy(&self, x: usize, y: usize) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// Boundary sides the cell `(x, y)` sits on; all false for interior or outside cells.
    pub fn edges_at(&self, x: usize, y: usize) -> Edges {
        if !self.contains_xy(x, y) {
            return Edges::default();
        }
        Edges {
            top: y == self.top,
            bottom: y == self.bottom,
            left: x == self.left,
            right: x == self.right,
        }
    }

    /// True when the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Grid indices covered by the rectangle, in raster order.
    pub fn indices(&self, dims: Dimensions) -> impl Iterator<Item = usize> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |y| (self.left..=self.right).map(move |x| dims.to_index(x, y)))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A named rectangular sub-region of the matrix.
pub struct Area {
    /// Unique name; also the key of the area's frame list.
    pub name: String,
    /// Grid index of the top-left corner.
    pub top_left: usize,
    /// Grid index of the bottom-right corner.
    pub bottom_right: usize,
    /// Highlight color (`hsl(...)`).
    pub color: Color,
    bounds: AreaBounds,
}

impl Area {
    /// Inclusive rectangle covered by the area.
    pub fn bounds(&self) -> AreaBounds {
        self.bounds
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Area annotation of one grid cell.
pub struct AreaMembership<'a> {
    /// The owning area.
    pub area: &'a Area,
    /// Boundary sides the cell sits on.
    pub edges: Edges,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Progress of the two-click area selection.
pub enum SelectionState {
    /// No selection in progress.
    #[default]
    Idle,
    /// Waiting for the top-left click.
    AwaitingTopLeft,
    /// Top-left chosen; waiting for the bottom-right click.
    AwaitingBottomRight {
        /// Grid index of the chosen top-left corner.
        top_left: usize,
    },
}

impl SelectionState {
    /// True when a selection has been started and not yet committed or cancelled.
    pub fn in_progress(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Clone, Debug)]
/// Owns area definitions, the selection state machine and highlight state.
///
/// Areas never overlap, so each grid cell belongs to at most one area and membership is
/// answered from the area rectangles instead of being stored per cell.
pub struct AreaManager {
    dims: Dimensions,
    areas: Vec<Area>,
    selection: SelectionState,
    highlighted: Option<String>,
}

impl AreaManager {
    /// Empty manager over a grid of `dims`.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            areas: Vec::new(),
            selection: SelectionState::Idle,
            highlighted: None,
        }
    }

    /// Defined areas in creation order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Number of defined areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// True when no area is defined.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Area by name.
    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    /// Position of the area called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.areas.iter().position(|a| a.name == name)
    }

    /// Current selection state.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Name of the highlighted area, if any.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// `Idle -> AwaitingTopLeft`. Restarting before the top-left click is a no-op.
    pub fn begin_selection(&mut self) -> MatrixResult<()> {
        match self.selection {
            SelectionState::AwaitingBottomRight { .. } => Err(MatrixError::SelectionInProgress),
            _ => {
                self.selection = SelectionState::AwaitingTopLeft;
                Ok(())
            }
        }
    }

    /// Record the top-left corner; `AwaitingTopLeft -> AwaitingBottomRight`.
    pub fn select_top_left(&mut self, index: usize) -> MatrixResult<()> {
        if self.selection != SelectionState::AwaitingTopLeft {
            return Err(MatrixError::invalid_selection("not awaiting a top-left corner"));
        }
        self.dims.check(index)?;
        self.selection = SelectionState::AwaitingBottomRight { top_left: index };
        Ok(())
    }

    /// Record the bottom-right corner and commit the area.
    ///
    /// On an inverted or overlapping rectangle the state stays `AwaitingBottomRight` so the
    /// caller can re-prompt.
    #[tracing::instrument(skip(self))]
    pub fn select_bottom_right(&mut self, index: usize) -> MatrixResult<&Area> {
        let SelectionState::AwaitingBottomRight { top_left } = self.selection else {
            return Err(MatrixError::invalid_selection(
                "not awaiting a bottom-right corner",
            ));
        };
        let name = self.next_auto_name();
        match self.insert(name, top_left, index) {
            Ok(pos) => {
                self.selection = SelectionState::Idle;
                Ok(&self.areas[pos])
            }
            Err(err) => {
                tracing::warn!(%err, "area selection rejected");
                Err(err)
            }
        }
    }

    /// Abandon any in-progress selection.
    pub fn cancel(&mut self) {
        self.selection = SelectionState::Idle;
    }

    /// Define an area directly from its corners, bypassing the two-click protocol.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        top_left: usize,
        bottom_right: usize,
    ) -> MatrixResult<&Area> {
        let pos = self.insert(name.into(), top_left, bottom_right)?;
        Ok(&self.areas[pos])
    }

    /// Rename the area at `position`; returns the previous name.
    #[tracing::instrument(skip(self))]
    pub fn rename(&mut self, position: usize, new_name: &str) -> MatrixResult<String> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(MatrixError::validation("area name must be non-empty"));
        }
        let len = self.areas.len();
        let current = self
            .areas
            .get(position)
            .ok_or_else(|| MatrixError::unknown_area(format!("#{position} of {len}")))?;
        if current.name == new_name {
            return Ok(current.name.clone());
        }
        if self.area(new_name).is_some() {
            return Err(MatrixError::DuplicateAreaName(new_name.to_owned()));
        }

        let old = std::mem::replace(&mut self.areas[position].name, new_name.to_owned());
        if self.highlighted.as_deref() == Some(old.as_str()) {
            self.highlighted = Some(new_name.to_owned());
        }
        tracing::debug!(old = %old, new = %new_name, "area renamed");
        Ok(old)
    }

    /// Remove the area at `position`. Cell colors are untouched; only membership goes.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, position: usize) -> MatrixResult<Area> {
        if position >= self.areas.len() {
            return Err(MatrixError::unknown_area(format!(
                "#{position} of {}",
                self.areas.len()
            )));
        }
        let area = self.areas.remove(position);
        if self.highlighted.as_deref() == Some(area.name.as_str()) {
            self.highlighted = None;
        }
        tracing::debug!(name = %area.name, "area deleted");
        Ok(area)
    }

    /// Highlight `name`, or clear the highlight when `name` is already highlighted.
    pub fn toggle_highlight(&mut self, name: &str) -> MatrixResult<Option<&str>> {
        if self.area(name).is_none() {
            return Err(MatrixError::unknown_area(name));
        }
        if self.highlighted.as_deref() == Some(name) {
            self.highlighted = None;
        } else {
            self.highlighted = Some(name.to_owned());
        }
        Ok(self.highlighted.as_deref())
    }

    /// Area annotation of grid cell `index`.
    pub fn membership(&self, index: usize) -> Option<AreaMembership<'_>> {
        if !self.dims.contains(index) {
            return None;
        }
        let (x, y) = self.dims.to_xy(index);
        self.areas
            .iter()
            .find(|a| a.bounds.contains_xy(x, y))
            .map(|area| AreaMembership {
                area,
                edges: area.bounds.edges_at(x, y),
            })
    }

    /// Drop every area, the highlight and any in-progress selection.
    pub fn reset(&mut self) {
        self.areas.clear();
        self.selection = SelectionState::Idle;
        self.highlighted = None;
    }

    fn next_auto_name(&self) -> String {
        let mut n = self.areas.len() + 1;
        loop {
            let name = format!("area{n}");
            if self.area(&name).is_none() {
                return name;
            }
            n += 1;
        }
    }

    fn insert(
        &mut self,
        name: String,
        top_left: usize,
        bottom_right: usize,
    ) -> MatrixResult<usize> {
        let bounds = AreaBounds::from_corners(self.dims, top_left, bottom_right)?;
        if name.trim().is_empty() {
            return Err(MatrixError::validation("area name must be non-empty"));
        }
        if self.area(&name).is_some() {
            return Err(MatrixError::DuplicateAreaName(name));
        }
        if let Some(other) = self.areas.iter().find(|a| a.bounds.overlaps(&bounds)) {
            return Err(MatrixError::invalid_selection(format!(
                "rectangle overlaps area '{}'",
                other.name
            )));
        }

        let color = Color::area_hue(self.areas.len());
        tracing::debug!(
            name = %name,
            width = bounds.width(),
            height = bounds.height(),
            "area created"
        );
        self.areas.push(Area {
            name,
            top_left,
            bottom_right,
            color,
            bounds,
        });
        Ok(self.areas.len() - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/area/manager.rs"]
mod tests;
