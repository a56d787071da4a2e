//! Board-state engine for layered mahjong solitaire
//!
//! Tiles cover square footprints of cells in a layered grid. The engine
//! validates placements and removals, keeps per-cell blocking flags
//! consistent with occupancy, and maintains the set of removable tiles
//! incrementally. Layouts persist as anchor lists and can be paired into
//! solvable boards.

#![forbid(unsafe_code)]

/// Tile registry, placement engine, availability and pairing
pub mod board;
/// Input/output operations and error handling
pub mod io;
/// Coordinates, footprints and the cell grid
pub mod spatial;

pub use io::error::{BoardError, Result};
