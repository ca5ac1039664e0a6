//! Error types for layout and selection contract violations.

use thiserror::Error;

/// Palette geometry errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("Cannot anchor palette to nonstandard edge: {0}")]
    InvalidEdge(String),
    #[error("Invalid bounding range: min {min} is greater than max {max}")]
    InvalidBounds { min: f64, max: f64 },
    #[error("Cannot fit palette of extent {required} within bounding range of extent {available}")]
    LayoutImpossible { required: f64, available: f64 },
}

/// Result type for palette operations.
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Selection controller errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Element {index} is not toggleable and cannot join a radio group")]
    InvalidCapability { index: usize },
    #[error("Initial active index {index} is out of range for a group of {len}")]
    InitialIndexOutOfRange { index: usize, len: usize },
}

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;
