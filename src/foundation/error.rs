/// Convenience result type used across the editor core.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Top-level error taxonomy used by canvas, area, frame and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    /// A grid or frame index outside `[0, len)`.
    #[error("index out of range: {index} (len {len})")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of addressable cells.
        len: usize,
    },

    /// A buffer whose length does not match the expected dimensions.
    #[error("size mismatch: {what} expected {expected}, got {actual}")]
    SizeMismatch {
        /// What was being sized (import buffer, frame save, ...).
        what: &'static str,
        /// Expected element count.
        expected: usize,
        /// Provided element count.
        actual: usize,
    },

    /// Bottom-right selected above/left of the top-left, or overlapping another area.
    #[error("invalid area selection: {0}")]
    InvalidAreaSelection(String),

    /// Rename collided with an existing area name.
    #[error("duplicate area name: {0}")]
    DuplicateAreaName(String),

    /// Lookup of an area name or position that does not exist.
    #[error("unknown area: {0}")]
    UnknownArea(String),

    /// Frame position outside the area's frame list.
    #[error("frame out of range: area '{area}' has {len} frames, got index {index}")]
    FrameOutOfRange {
        /// Area owning the frame list.
        area: String,
        /// Offending frame position.
        index: usize,
        /// Number of frames in the area.
        len: usize,
    },

    /// A gesture was attempted while an area selection awaits its bottom-right click.
    #[error("area selection in progress; cancel it first")]
    SelectionInProgress,

    /// Invalid user-provided data (colors, brightness, config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from image codecs or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatrixError {
    /// Build a [`MatrixError::IndexOutOfRange`] value.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`MatrixError::SizeMismatch`] value.
    pub fn size_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Build a [`MatrixError::InvalidAreaSelection`] value.
    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidAreaSelection(msg.into())
    }

    /// Build a [`MatrixError::UnknownArea`] value.
    pub fn unknown_area(name: impl Into<String>) -> Self {
        Self::UnknownArea(name.into())
    }

    /// Build a [`MatrixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MatrixError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the error kinds a caller can recover from by retrying with corrected input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
