//! Error types for the census engine.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A grid or placement request that cannot be honoured.
///
/// These are fatal at startup: the simulation never begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions {width} x {height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    /// A single cell lies outside the grid.
    #[error("cell ({row}, {col}) is outside the {width} x {height} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// A template placed at `(row, col)` would run off the grid.
    #[error(
        "template `{name}` ({h} x {w}) at ({row}, {col}) does not fit the {width} x {height} grid"
    )]
    PlacementOutOfBounds {
        name: String,
        row: usize,
        col: usize,
        h: usize,
        w: usize,
        width: usize,
        height: usize,
    },

    /// A catalog template is larger than the grid it is matched against.
    #[error("template `{name}` ({h} x {w}) is larger than the {width} x {height} grid")]
    TemplateExceedsGrid {
        name: String,
        h: usize,
        w: usize,
        width: usize,
        height: usize,
    },

    /// A placement names a template the catalog does not have.
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
}

/// A template that fails its shape or value invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("template `{0}` has no cells")]
    Empty(String),

    #[error("template `{name}` row {row} has width {got}, expected {expected}")]
    RaggedRow {
        name: String,
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("template `{name}` contains invalid cell {found:?} (expected 'o' or '.')")]
    InvalidCell { name: String, found: char },

    #[error("template name `{0}` is defined more than once")]
    DuplicateName(String),
}

/// The report sink could not be opened or written.
///
/// Statistics are diagnostic: callers log this and keep simulating.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to append report to {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}
