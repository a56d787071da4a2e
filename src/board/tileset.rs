use bitvec::prelude::*;
use std::fmt;

use crate::board::registry::TileId;

/// Growable bitset of tile ids
///
/// Collects the tiles afflicted by a mutation. Ids index bits directly, so
/// membership testing is O(1) and iteration yields ids in ascending order.
#[derive(Clone, Debug, Default)]
pub struct TileSet {
    bits: BitVec,
}

impl TileSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tile id, growing the set when needed
    ///
    /// Returns whether the id was newly inserted.
    pub fn insert(&mut self, tile: TileId) -> bool {
        let index = tile.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        !self.bits.replace(index, true)
    }

    /// Remove a tile id, returning whether it was present
    pub fn remove(&mut self, tile: TileId) -> bool {
        let index = tile.index();
        index < self.bits.len() && self.bits.replace(index, false)
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Members in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TileId> {
        self.bits
            .iter_ones()
            .map(|index| TileId::new(index as u32))
    }
}

impl FromIterator<TileId> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut set = Self::new();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl Extend<TileId> for TileSet {
    fn extend<I: IntoIterator<Item = TileId>>(&mut self, iter: I) {
        for tile in iter {
            self.insert(tile);
        }
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<TileId> = self.iter().collect();
        write!(f, "TileSet({} tiles: {members:?})", self.count())
    }
}
