//! Tile identities and the id → anchor registry
//!
//! Tiles never reference each other or their cells directly. Cells store a
//! [`TileId`], and the registry resolves an id to the tile's footprint, so
//! every "where is this tile" query is a map lookup and every "what is at
//! this cell" query goes through the grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::spatial::coordinate::Coordinate;
use crate::spatial::footprint::Footprint;

/// Opaque identity of a placed tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u32);

impl TileId {
    /// Wrap a raw id value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Raw id as a bit position
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Face type of a tile; two tiles match when their variants are equal
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variant(pub u16);

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant {}", self.0)
    }
}

/// Registered tile record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    footprint: Footprint,
    variant: Option<Variant>,
}

impl Tile {
    /// Identity of the tile
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Anchor (lead index) of the footprint
    pub const fn anchor(&self) -> Coordinate {
        self.footprint.anchor()
    }

    /// Cells covered by the tile
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Edge length of the footprint in cells
    pub const fn size(&self) -> usize {
        self.footprint.size() as usize
    }

    /// Assigned face type, if pairing has run
    pub const fn variant(&self) -> Option<Variant> {
        self.variant
    }
}

/// Mapping from tile identity to placement
///
/// Ids are handed out monotonically and never reused, even after the tile
/// they named has been removed.
#[derive(Debug, Clone, Default)]
pub struct TileRegistry {
    tiles: BTreeMap<TileId, Tile>,
    next_id: u32,
}

impl TileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a tile covering `footprint`
    pub(crate) fn register(&mut self, footprint: Footprint) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.tiles.insert(
            id,
            Tile {
                id,
                footprint,
                variant: None,
            },
        );
        id
    }

    pub(crate) fn deregister(&mut self, id: TileId) -> Option<Tile> {
        self.tiles.remove(&id)
    }

    pub(crate) fn set_variant(&mut self, id: TileId, variant: Variant) -> Option<Tile> {
        let tile = self.tiles.get_mut(&id)?;
        tile.variant = Some(variant);
        Some(*tile)
    }

    /// Drop every tile; the id counter keeps running
    pub(crate) fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Look up a tile record
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Anchor of a registered tile
    pub fn anchor_of(&self, id: TileId) -> Option<Coordinate> {
        self.get(id).map(Tile::anchor)
    }

    /// Whether the id names a registered tile
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// Registered tiles in id order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Number of registered tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is registered
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Id the next registration will receive
    pub const fn next_id(&self) -> TileId {
        TileId(self.next_id)
    }
}
