//! Incrementally maintained index of removable tiles
//!
//! A tile is removable when nothing rests on any of its cells and, with side
//! blocking enabled, it is not hemmed in on both its left and right edges.
//! The index caches that predicate for every registered tile under the
//! default rule (side blocking on). It is updated from the afflicted set of
//! each mutation; a full rebuild exists only for reconstruction.

use std::collections::BTreeMap;
use std::fmt;

use crate::board::registry::{Tile, TileId, TileRegistry};
use crate::board::tileset::TileSet;
use crate::spatial::coordinate::Coordinate;
use crate::spatial::footprint::Footprint;
use crate::spatial::grid::{Cell, Grid};

/// Why a removal was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// Another tile rests on at least one cell of the footprint
    Covered,
    /// Both the left and the right edge touch other tiles
    BothSides,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Covered => write!(f, "covered from above"),
            Self::BothSides => write!(f, "blocked on both sides"),
        }
    }
}

/// Blocking state of a whole footprint, folded from its cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocking {
    /// Some cell has `top_covered` set
    pub covered: bool,
    /// Some cell on the left edge has `left_blocked` set
    pub left: bool,
    /// Some cell on the right edge has `right_blocked` set
    pub right: bool,
}

impl Blocking {
    /// Read the cached flags of the footprint's cells
    pub fn evaluate(grid: &Grid, footprint: Footprint) -> Self {
        Self {
            covered: any_flag(grid, footprint.cells(), Cell::top_covered),
            left: any_flag(grid, footprint.left_edge(), Cell::left_blocked),
            right: any_flag(grid, footprint.right_edge(), Cell::right_blocked),
        }
    }

    /// Reason the tile may not be removed under the given rule
    pub const fn reason(self, side_blocking_enabled: bool) -> Option<BlockReason> {
        if self.covered {
            Some(BlockReason::Covered)
        } else if side_blocking_enabled && self.left && self.right {
            Some(BlockReason::BothSides)
        } else {
            None
        }
    }

    /// Whether the tile may be removed under the given rule
    pub const fn permits_removal(self, side_blocking_enabled: bool) -> bool {
        self.reason(side_blocking_enabled).is_none()
    }
}

fn any_flag(
    grid: &Grid,
    mut cells: impl Iterator<Item = Coordinate>,
    read: fn(&Cell) -> bool,
) -> bool {
    cells.any(|cell| grid.cell(cell).is_some_and(read))
}

/// Whether a tile is available under the default rule
pub fn is_available(grid: &Grid, tile: &Tile) -> bool {
    Blocking::evaluate(grid, tile.footprint()).permits_removal(true)
}

/// A tile entering or leaving the index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvailabilityChange {
    /// Affected tile
    pub tile: TileId,
    /// New membership
    pub available: bool,
}

/// Map from available tile id to its anchor
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    available: BTreeMap<TileId, Coordinate>,
}

impl AvailabilityIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate the afflicted tiles against the current grid
    ///
    /// Tiles no longer in the registry are dropped. Returns the membership
    /// changes in id order.
    pub(crate) fn recompute(
        &mut self,
        afflicted: &TileSet,
        grid: &Grid,
        registry: &TileRegistry,
    ) -> Vec<AvailabilityChange> {
        let mut changes = Vec::new();

        for id in afflicted.iter() {
            let now_available = registry.get(id).filter(|tile| is_available(grid, tile));

            let changed = match now_available {
                Some(tile) => self.available.insert(id, tile.anchor()).is_none(),
                None => self.available.remove(&id).is_some(),
            };

            if changed {
                changes.push(AvailabilityChange {
                    tile: id,
                    available: now_available.is_some(),
                });
            }
        }

        changes
    }

    /// Re-evaluate every registered tile and purge stale entries
    pub(crate) fn rebuild_full(
        &mut self,
        grid: &Grid,
        registry: &TileRegistry,
    ) -> Vec<AvailabilityChange> {
        let mut everything: TileSet = registry.iter().map(Tile::id).collect();
        everything.extend(self.available.keys().copied());
        self.recompute(&everything, grid, registry)
    }

    pub(crate) fn forget(&mut self, id: TileId) -> bool {
        self.available.remove(&id).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.available.clear();
    }

    /// Whether the tile is currently removable
    pub fn contains(&self, id: TileId) -> bool {
        self.available.contains_key(&id)
    }

    /// Anchor of an available tile
    pub fn anchor_of(&self, id: TileId) -> Option<Coordinate> {
        self.available.get(&id).copied()
    }

    /// Available tiles with their anchors, in id order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, Coordinate)> {
        self.available.iter().map(|(&id, &anchor)| (id, anchor))
    }

    /// Available tile ids in id order
    pub fn tiles(&self) -> Vec<TileId> {
        self.available.keys().copied().collect()
    }

    /// Number of available tiles
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Whether no tile is available
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}
