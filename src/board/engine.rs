//! Placement and removal engine owning the grid, registry and index
//!
//! [`Board`] is the only writer of cell state. Both mutators funnel into the
//! same neighbourhood refresh: after the footprint's occupancy changes, every
//! cell whose flags could depend on it (the footprint itself, the columns
//! flanking it in `x`, and the block one layer below) re-derives its flags
//! from its neighbours. The tiles owning those cells form the afflicted set,
//! and only they are re-evaluated by the availability index.

use log::{debug, trace};
use num_traits::ToPrimitive;

use crate::board::availability::{AvailabilityChange, AvailabilityIndex, Blocking, is_available};
use crate::board::hooks::{BoardObserver, NoopObserver};
use crate::board::registry::{Tile, TileId, TileRegistry, Variant};
use crate::board::tileset::TileSet;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{BoardError, Result, Target, invalid_parameter};
use crate::spatial::coordinate::Coordinate;
use crate::spatial::footprint::Footprint;
use crate::spatial::grid::{Grid, GridDimensions};

/// Board state engine for one layout
///
/// Owns the cell grid, the tile registry and the availability index as a
/// single unit. All mutation goes through [`Board::place`],
/// [`Board::remove`] and the codec functions; every rejected call leaves the
/// board untouched.
#[derive(Debug, Clone)]
pub struct Board<O = NoopObserver> {
    grid: Grid,
    registry: TileRegistry,
    availability: AvailabilityIndex,
    piece_size: i32,
    observer: O,
}

impl Board<NoopObserver> {
    /// Create an empty board without an observer
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`, or if the piece size is zero or larger than the
    /// horizontal extents
    pub fn new(dimensions: GridDimensions, piece_size: usize) -> Result<Self> {
        Self::with_observer(dimensions, piece_size, NoopObserver)
    }
}

impl<O: BoardObserver> Board<O> {
    /// Create an empty board reporting to `observer`
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`, or if the piece size is zero or larger than the
    /// horizontal extents
    pub fn with_observer(dimensions: GridDimensions, piece_size: usize, observer: O) -> Result<Self> {
        for (parameter, extent) in [
            ("horizontal_size", dimensions.horizontal),
            ("vertical_size", dimensions.vertical),
            ("height_size", dimensions.height),
        ] {
            if extent == 0 || extent > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &extent,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if piece_size > dimensions.horizontal.min(dimensions.vertical) {
            return Err(invalid_parameter(
                "piece_size",
                &piece_size,
                &"footprint does not fit the grid",
            ));
        }

        Ok(Self {
            grid: Grid::new(dimensions),
            registry: TileRegistry::new(),
            availability: AvailabilityIndex::new(),
            piece_size: footprint_size(piece_size)?,
            observer,
        })
    }

    /// Cell storage
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile id → placement mapping
    pub const fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Currently removable tiles
    pub const fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }

    /// Extent of the grid
    pub const fn dimensions(&self) -> GridDimensions {
        self.grid.dimensions()
    }

    /// Default footprint edge length
    pub const fn piece_size(&self) -> usize {
        self.piece_size as usize
    }

    /// Attached observer
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Attached observer, mutably
    pub const fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether the board holds no tiles
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Whether a tile covers the cell
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.grid.is_occupied(coordinate)
    }

    /// Tile covering the cell
    pub fn occupant_at(&self, coordinate: Coordinate) -> Option<TileId> {
        self.grid.occupant_at(coordinate)
    }

    /// Anchor of a tile
    pub fn anchor_of(&self, tile: TileId) -> Option<Coordinate> {
        self.registry.anchor_of(tile)
    }

    /// Registered record of a tile
    pub fn tile(&self, tile: TileId) -> Option<&Tile> {
        self.registry.get(tile)
    }

    /// Whether the tile is removable under the default rule
    pub fn is_available(&self, tile: TileId) -> bool {
        self.availability.contains(tile)
    }

    /// Removable tiles with their anchors, in id order
    pub fn available_tiles(&self) -> impl Iterator<Item = (TileId, Coordinate)> {
        self.availability.iter()
    }

    /// Blocking state of a tile's footprint
    pub fn blocking_of(&self, tile: TileId) -> Option<Blocking> {
        self.registry
            .get(tile)
            .map(|record| Blocking::evaluate(&self.grid, record.footprint()))
    }

    /// Validate a placement of the default size without applying it
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, `Occupied` or `Unsupported` when the
    /// placement would be rejected
    pub fn check_placement(&self, anchor: Coordinate) -> Result<Footprint> {
        let footprint = Footprint::new(anchor, self.piece_size);
        self.validate_placement(footprint)?;
        Ok(footprint)
    }

    fn validate_placement(&self, footprint: Footprint) -> Result<()> {
        if !self.grid.contains_footprint(footprint) {
            return Err(BoardError::OutOfBounds {
                anchor: footprint.anchor(),
                size: footprint.size(),
            });
        }

        if let Some(coordinate) = footprint.cells().find(|&cell| self.grid.is_occupied(cell)) {
            return Err(BoardError::Occupied { coordinate });
        }

        // Tiles rest on a full layer or on the table, never across a gap
        if footprint
            .below()
            .is_some_and(|below| !self.grid.is_fully_occupied(below))
        {
            return Err(BoardError::Unsupported {
                anchor: footprint.anchor(),
            });
        }

        Ok(())
    }

    /// Place a tile of the default size
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, `Occupied` or `Unsupported`; the board is left
    /// unchanged in every error case
    pub fn place(&mut self, anchor: Coordinate) -> Result<TileId> {
        self.place_footprint(Footprint::new(anchor, self.piece_size))
    }

    /// Place a tile with its own footprint size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero size, otherwise the same
    /// rejections as [`Board::place`]
    pub fn place_sized(&mut self, anchor: Coordinate, size: usize) -> Result<TileId> {
        let footprint = Footprint::new(anchor, footprint_size(size)?);
        self.place_footprint(footprint)
    }

    /// Place a tile, reporting only success
    pub fn try_place(&mut self, anchor: Coordinate) -> bool {
        self.place(anchor).is_ok()
    }

    fn place_footprint(&mut self, footprint: Footprint) -> Result<TileId> {
        self.validate_placement(footprint).inspect_err(|error| {
            debug!("Placement at {} rejected: {error}", footprint.anchor());
        })?;

        let anchor = footprint.anchor();
        let tile = self.registry.register(footprint);
        for cell in footprint.cells() {
            if let Some(target) = self.grid.cell_mut(cell) {
                target.occupy(tile, anchor);
            }
        }
        trace!("Placed tile {tile} at {anchor}");
        self.observer.tile_placed(tile, anchor);

        let mut afflicted = self.refresh_neighbourhood(footprint);
        afflicted.insert(tile);
        self.recompute_availability(&afflicted);

        Ok(tile)
    }

    /// Lowest anchor a footprint dropped onto column `(x, y)` would land on
    ///
    /// Fully occupied layers are stacked upon; a partially occupied layer
    /// stops the search since nothing above it can ever be supported.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` when the column leaves the grid or every layer
    /// is full, `Occupied` when the topmost layer is only partly filled
    pub fn landing_for(&self, x: i32, y: i32) -> Result<Coordinate> {
        let mut anchor = Coordinate::new(x, y, 0);
        loop {
            let footprint = Footprint::new(anchor, self.piece_size);
            if !self.grid.contains_footprint(footprint) || !self.grid.is_fully_occupied(footprint) {
                self.validate_placement(footprint)?;
                return Ok(anchor);
            }
            anchor = anchor.above();
        }
    }

    /// Place a tile of the default size on top of column `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns the rejection of [`Board::landing_for`]
    pub fn place_stacked(&mut self, x: i32, y: i32) -> Result<TileId> {
        let anchor = self.landing_for(x, y)?;
        self.place(anchor)
    }

    /// Validate a removal without applying it
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an empty cell and `Blocked` when the covering
    /// tile is not removable under the given rule
    pub fn check_removal(&self, coordinate: Coordinate, side_blocking_enabled: bool) -> Result<TileId> {
        let tile = self.grid.occupant_at(coordinate).ok_or(BoardError::NotFound {
            target: Target::Cell(coordinate),
        })?;
        let record = self.registry.get(tile).ok_or(BoardError::NotFound {
            target: Target::Tile(tile),
        })?;

        match Blocking::evaluate(&self.grid, record.footprint()).reason(side_blocking_enabled) {
            Some(reason) => Err(BoardError::Blocked { tile, reason }),
            None => Ok(tile),
        }
    }

    /// Remove the tile covering `coordinate`
    ///
    /// With side blocking disabled only the covered-from-above rule applies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Blocked`; the board is left unchanged in every
    /// error case
    pub fn remove(&mut self, coordinate: Coordinate, side_blocking_enabled: bool) -> Result<TileId> {
        let tile = self
            .check_removal(coordinate, side_blocking_enabled)
            .inspect_err(|error| debug!("Removal at {coordinate} rejected: {error}"))?;
        self.commit_removal(tile);
        Ok(tile)
    }

    /// Remove a tile by id, returning its former anchor
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, otherwise the rejections of
    /// [`Board::remove`]
    pub fn remove_tile(&mut self, tile: TileId, side_blocking_enabled: bool) -> Result<Coordinate> {
        let anchor = self.registry.anchor_of(tile).ok_or(BoardError::NotFound {
            target: Target::Tile(tile),
        })?;
        self.remove(anchor, side_blocking_enabled)?;
        Ok(anchor)
    }

    /// Remove the tile covering `coordinate`, reporting only success
    pub fn try_remove(&mut self, coordinate: Coordinate, side_blocking_enabled: bool) -> bool {
        self.remove(coordinate, side_blocking_enabled).is_ok()
    }

    fn commit_removal(&mut self, tile: TileId) {
        let Some(record) = self.registry.deregister(tile) else {
            return;
        };
        let footprint = record.footprint();

        for cell in footprint.cells() {
            if let Some(target) = self.grid.cell_mut(cell) {
                target.vacate();
            }
        }
        let afflicted = self.refresh_neighbourhood(footprint);

        if self.availability.forget(tile) {
            self.observer.availability_changed(tile, false);
        }
        trace!("Removed tile {tile} from {}", footprint.anchor());
        self.observer.tile_removed(tile, footprint.anchor());

        self.recompute_availability(&afflicted);
    }

    /// Re-derive the flags around a footprint whose occupancy just changed
    ///
    /// Returns the tiles owning any of the refreshed cells.
    fn refresh_neighbourhood(&mut self, footprint: Footprint) -> TileSet {
        let touched = footprint
            .cells()
            .chain(footprint.left_flank())
            .chain(footprint.right_flank())
            .chain(footprint.below().into_iter().flat_map(Footprint::cells));

        touched
            .filter_map(|cell| self.grid.refresh_flags(cell))
            .collect()
    }

    fn recompute_availability(&mut self, afflicted: &TileSet) {
        trace!("Recomputing availability of {afflicted}");
        let changes = self
            .availability
            .recompute(afflicted, &self.grid, &self.registry);
        self.notify_availability(&changes);
    }

    fn notify_availability(&mut self, changes: &[AvailabilityChange]) {
        for change in changes {
            self.observer
                .availability_changed(change.tile, change.available);
        }
    }

    /// Re-evaluate availability of every tile from scratch
    pub fn rebuild_availability(&mut self) {
        let changes = self.availability.rebuild_full(&self.grid, &self.registry);
        self.notify_availability(&changes);
    }

    /// Assign a face type to a tile
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id
    pub fn set_variant(&mut self, tile: TileId, variant: Variant) -> Result<()> {
        self.registry
            .set_variant(tile, variant)
            .ok_or(BoardError::NotFound {
                target: Target::Tile(tile),
            })?;
        self.observer.variant_changed(tile, variant);
        Ok(())
    }

    /// Remove every tile, notifying the observer of each removal
    pub fn clear(&mut self) {
        let removed: Vec<(TileId, Coordinate)> = self
            .registry
            .iter()
            .map(|tile| (tile.id(), tile.anchor()))
            .collect();

        for (tile, anchor) in removed {
            if self.availability.forget(tile) {
                self.observer.availability_changed(tile, false);
            }
            self.observer.tile_removed(tile, anchor);
        }

        self.grid.clear();
        self.registry.clear();
        self.availability.clear();
    }

    /// Copy of the board state without the observer
    pub(crate) fn detached(&self) -> Board<NoopObserver> {
        Board {
            grid: self.grid.clone(),
            registry: self.registry.clone(),
            availability: self.availability.clone(),
            piece_size: self.piece_size,
            observer: NoopObserver,
        }
    }

    /// Re-derive every cached fact and compare it with the stored one
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the first mismatch found
    pub fn verify_invariants(&self) -> Result<()> {
        let violation = |reason: String| Err(BoardError::InvariantViolation { reason });

        let mut covered_cells = 0;
        for tile in self.registry.iter() {
            let footprint = tile.footprint();
            for cell in footprint.cells() {
                if self.grid.occupant_at(cell) != Some(tile.id())
                    || self.grid.anchor_at(cell) != Some(tile.anchor())
                {
                    return violation(format!("cell {cell} does not belong to tile {}", tile.id()));
                }
            }
            covered_cells += footprint.area();

            if footprint
                .below()
                .is_some_and(|below| !self.grid.is_fully_occupied(below))
            {
                return violation(format!("tile {} is not fully supported", tile.id()));
            }

            if is_available(&self.grid, tile) != self.availability.contains(tile.id()) {
                return violation(format!("availability of tile {} is stale", tile.id()));
            }
        }

        let occupied_cells = self.grid.occupied_cells().count();
        if occupied_cells != covered_cells {
            return violation(format!(
                "{occupied_cells} occupied cells but tiles cover {covered_cells}"
            ));
        }

        if let Some(cell) = self.grid.first_inconsistent_cell() {
            return violation(format!("flags of cell {cell} are stale"));
        }

        for (tile, anchor) in self.availability.iter() {
            if self.registry.anchor_of(tile) != Some(anchor) {
                return violation(format!("index entry for tile {tile} is stale"));
            }
        }

        Ok(())
    }
}

/// Convert a footprint edge length to the signed coordinate space
fn footprint_size(size: usize) -> Result<i32> {
    size.to_i32()
        .filter(|&size| size > 0)
        .ok_or_else(|| invalid_parameter("piece_size", &size, &"must be a positive cell count"))
}
