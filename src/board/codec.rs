//! Flatten/reconstruct contract used by layout persistence

use log::debug;

use crate::board::engine::Board;
use crate::board::hooks::BoardObserver;
use crate::board::registry::Tile;
use crate::spatial::coordinate::Coordinate;

/// Anchor of a tile together with its footprint edge length
pub type SizedAnchor = (Coordinate, usize);

impl<O: BoardObserver> Board<O> {
    /// Anchors of every tile in layer-major scan order
    ///
    /// Replaying the result with [`Board::reconstruct`] on an empty board
    /// of the same dimensions reproduces the occupied cells exactly as long
    /// as every tile uses the board's piece size. Boards holding tiles from
    /// [`Board::place_sized`] round-trip through [`Board::flatten_sized`].
    pub fn flatten(&self) -> Vec<Coordinate> {
        self.flatten_sized()
            .into_iter()
            .map(|(anchor, _)| anchor)
            .collect()
    }

    /// Anchors and footprint sizes of every tile in layer-major scan order
    pub fn flatten_sized(&self) -> Vec<SizedAnchor> {
        let mut tiles: Vec<&Tile> = self.registry().iter().collect();
        tiles.sort_unstable_by_key(|tile| tile.anchor().scan_key());
        tiles
            .into_iter()
            .map(|tile| (tile.anchor(), tile.size()))
            .collect()
    }

    /// Clear the board and replay a default-size placement for every anchor
    ///
    /// Anchors that fail to place are skipped; each successful placement
    /// upholds every board invariant on its own, so a partial replay is
    /// still a consistent board. Returns the number of tiles placed.
    pub fn reconstruct(&mut self, anchors: &[Coordinate]) -> usize {
        let size = self.piece_size();
        let tiles: Vec<SizedAnchor> = anchors.iter().map(|&anchor| (anchor, size)).collect();
        self.reconstruct_sized(&tiles)
    }

    /// Clear the board and replay every tile at its own footprint size
    ///
    /// Same skipping rules as [`Board::reconstruct`].
    pub fn reconstruct_sized(&mut self, tiles: &[SizedAnchor]) -> usize {
        self.clear();

        let mut placed = 0;
        for &(anchor, size) in tiles {
            match self.place_sized(anchor, size) {
                Ok(_) => placed += 1,
                Err(error) => debug!("Skipped replay of anchor {anchor}: {error}"),
            }
        }

        // Redundant after incremental placement, kept as the load-time check
        self.rebuild_availability();
        placed
    }
}
