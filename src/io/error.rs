//! Error types and context management for board operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::board::availability::BlockReason;
use crate::board::registry::TileId;
use crate::spatial::coordinate::Coordinate;

/// What a failed lookup was looking for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A grid cell
    Cell(Coordinate),
    /// A registered tile
    Tile(TileId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(coordinate) => write!(f, "cell {coordinate}"),
            Self::Tile(tile) => write!(f, "tile {tile}"),
        }
    }
}

/// Main error type for all board operations
///
/// The first five variants are the rejection reasons of placement and
/// removal. They are frequent and harmless: a rejected mutation leaves the
/// board exactly as it was.
#[derive(Debug)]
pub enum BoardError {
    /// Footprint extends past the grid
    OutOfBounds {
        /// Requested anchor
        anchor: Coordinate,
        /// Footprint edge length
        size: i32,
    },

    /// Footprint overlaps an existing tile
    Occupied {
        /// First occupied cell found
        coordinate: Coordinate,
    },

    /// Layer below is not completely filled under the footprint
    Unsupported {
        /// Requested anchor
        anchor: Coordinate,
    },

    /// Removal denied by the blocking rule
    Blocked {
        /// Tile that may not be removed
        tile: TileId,
        /// Which rule denied it
        reason: BlockReason,
    },

    /// Nothing at the requested cell, or no such tile
    NotFound {
        /// What was looked up
        target: Target,
    },

    /// Construction or runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Persisted layout is malformed
    InvalidLayout {
        /// Description of the inconsistency
        reason: String,
    },

    /// Tiles are matched in pairs, so a layout needs an even count
    OddTileCount {
        /// Number of tiles found
        count: usize,
    },

    /// Every pairing attempt ran into a dead end
    PairingFailed {
        /// Attempts made
        attempts: usize,
        /// Tiles left unpaired by the last attempt
        remaining: usize,
    },

    /// A cached fact disagrees with the data it is derived from
    InvariantViolation {
        /// Description of the mismatch
        reason: String,
    },

    /// Layout JSON could not be decoded or encoded
    LayoutFormat {
        /// Path to the layout file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { anchor, size } => {
                write!(f, "Footprint {size}x{size} at {anchor} exceeds the grid")
            }
            Self::Occupied { coordinate } => {
                write!(f, "Cell {coordinate} is already occupied")
            }
            Self::Unsupported { anchor } => {
                write!(f, "Footprint at {anchor} is not fully supported from below")
            }
            Self::Blocked { tile, reason } => {
                write!(f, "Tile {tile} cannot be removed: {reason}")
            }
            Self::NotFound { target } => write!(f, "Nothing found at {target}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidLayout { reason } => write!(f, "Invalid layout: {reason}"),
            Self::OddTileCount { count } => {
                write!(f, "Layout holds {count} tiles; tiles are matched in pairs")
            }
            Self::PairingFailed {
                attempts,
                remaining,
            } => {
                write!(
                    f,
                    "No pairing found after {attempts} attempts ({remaining} tiles left unpaired)"
                )
            }
            Self::InvariantViolation { reason } => {
                write!(f, "Board invariant violated: {reason}")
            }
            Self::LayoutFormat { path, source } => {
                write!(f, "Layout JSON error in '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LayoutFormat { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl BoardError {
    /// Whether this is one of the ordinary placement or removal rejections
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. }
                | Self::Occupied { .. }
                | Self::Unsupported { .. }
                | Self::Blocked { .. }
                | Self::NotFound { .. }
        )
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

const UNKNOWN_PATH: &str = "<unknown>";

/// Additional context to enrich file errors
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the operation touched
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches file errors with the path and operation involved
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add the path and operation context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<BoardError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file errors carry a path worth filling in
            match &mut error {
                BoardError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                BoardError::LayoutFormat { path, .. } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            operation: Some(operation),
        })
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::LayoutFormat {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid layout error
pub fn invalid_layout(reason: &impl ToString) -> BoardError {
    BoardError::InvalidLayout {
        reason: reason.to_string(),
    }
}
