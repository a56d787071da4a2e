//! Spatial data structures for the layered cell grid
//!
//! This module contains spatial-related functionality including:
//! - Integer cell coordinates
//! - Square tile footprints and their neighbourhoods
//! - Grid storage with cached blocking flags

/// Integer cell coordinates
pub mod coordinate;
/// Square footprints covered by a single tile
pub mod footprint;
/// Cell grid and blocking flag maintenance
pub mod grid;

pub use coordinate::Coordinate;
pub use grid::{Grid, GridDimensions};
