//! Fixed-size layered cell grid with cached blocking flags
//!
//! Each cell records which tile covers it, the anchor of that tile's
//! footprint, and three derived flags describing its neighbourhood. The
//! flags are a cache over the occupancy data: they are only ever rewritten
//! by [`Grid::refresh_flags`], which re-reads the neighbouring cells, so
//! they cannot drift from the occupants they describe.

use ndarray::Array3;
use num_traits::ToPrimitive;

use crate::board::registry::TileId;
use crate::spatial::coordinate::Coordinate;
use crate::spatial::footprint::Footprint;

/// Extent of a grid in cells along each axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Cells along `x`
    pub horizontal: usize,
    /// Cells along `y`
    pub vertical: usize,
    /// Number of layers along `z`
    pub height: usize,
}

impl GridDimensions {
    /// Create dimensions from the three extents
    pub const fn new(horizontal: usize, vertical: usize, height: usize) -> Self {
        Self {
            horizontal,
            vertical,
            height,
        }
    }

    /// Total number of cells
    pub const fn cell_count(self) -> usize {
        self.horizontal * self.vertical * self.height
    }

    /// Smallest dimensions holding every footprint anchored at `anchors`
    ///
    /// Anchors with negative components are ignored since they can never be
    /// placed. The result is never smaller than one footprint on one layer.
    pub fn enclosing(anchors: &[Coordinate], piece_size: usize) -> Self {
        Self::enclosing_sized(anchors.iter().map(|&anchor| (anchor, piece_size)), piece_size)
    }

    /// Smallest dimensions holding footprints of individual sizes
    ///
    /// Extents saturate instead of overflowing; oversized results are left
    /// for board construction to reject.
    pub fn enclosing_sized(
        tiles: impl IntoIterator<Item = (Coordinate, usize)>,
        min_size: usize,
    ) -> Self {
        let mut dimensions = Self::new(min_size.max(1), min_size.max(1), 1);

        for (anchor, size) in tiles {
            let (Some(x), Some(y), Some(z)) =
                (anchor.x.to_usize(), anchor.y.to_usize(), anchor.z.to_usize())
            else {
                continue;
            };
            dimensions.horizontal = dimensions.horizontal.max(x.saturating_add(size));
            dimensions.vertical = dimensions.vertical.max(y.saturating_add(size));
            dimensions.height = dimensions.height.max(z.saturating_add(1));
        }

        dimensions
    }
}

/// Occupancy and blocking state of a single grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    occupant: Option<TileId>,
    anchor: Coordinate,
    left_blocked: bool,
    right_blocked: bool,
    top_covered: bool,
}

impl Cell {
    /// Tile covering this cell
    pub const fn occupant(&self) -> Option<TileId> {
        self.occupant
    }

    /// Anchor of the covering tile's footprint, `None` when empty
    pub const fn anchor(&self) -> Option<Coordinate> {
        if self.occupant.is_some() {
            Some(self.anchor)
        } else {
            None
        }
    }

    /// Whether any tile covers this cell
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// A different tile sits directly to the left in `x`
    pub const fn left_blocked(&self) -> bool {
        self.left_blocked
    }

    /// A different tile sits directly to the right in `x`
    pub const fn right_blocked(&self) -> bool {
        self.right_blocked
    }

    /// A tile sits directly on top, one layer higher
    pub const fn top_covered(&self) -> bool {
        self.top_covered
    }

    pub(crate) const fn occupy(&mut self, tile: TileId, anchor: Coordinate) {
        self.occupant = Some(tile);
        self.anchor = anchor;
    }

    pub(crate) fn vacate(&mut self) {
        *self = Self::default();
    }

    const fn set_flags(&mut self, flags: CellFlags) {
        self.left_blocked = flags.left_blocked;
        self.right_blocked = flags.right_blocked;
        self.top_covered = flags.top_covered;
    }

    const fn flags(&self) -> CellFlags {
        CellFlags {
            left_blocked: self.left_blocked,
            right_blocked: self.right_blocked,
            top_covered: self.top_covered,
        }
    }
}

/// The three derived flags of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellFlags {
    /// See [`Cell::left_blocked`]
    pub left_blocked: bool,
    /// See [`Cell::right_blocked`]
    pub right_blocked: bool,
    /// See [`Cell::top_covered`]
    pub top_covered: bool,
}

/// Layered grid of cells, indexed `[x, y, z]`
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array3<Cell>,
    dimensions: GridDimensions,
}

impl Grid {
    /// Create an empty grid with every flag cleared
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            cells: Array3::from_elem(
                (
                    dimensions.horizontal,
                    dimensions.vertical,
                    dimensions.height,
                ),
                Cell::default(),
            ),
            dimensions,
        }
    }

    /// Extent of the grid
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn index(&self, coordinate: Coordinate) -> Option<[usize; 3]> {
        let x = coordinate.x.to_usize()?;
        let y = coordinate.y.to_usize()?;
        let z = coordinate.z.to_usize()?;
        (x < self.dimensions.horizontal
            && y < self.dimensions.vertical
            && z < self.dimensions.height)
            .then_some([x, y, z])
    }

    /// Whether the coordinate addresses a cell of this grid
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.index(coordinate).is_some()
    }

    /// Whether every cell of the footprint lies inside the grid
    pub fn contains_footprint(&self, footprint: Footprint) -> bool {
        footprint.size() > 0
            && self.contains(footprint.anchor())
            && self.contains(
                footprint
                    .anchor()
                    .offset(footprint.size() - 1, footprint.size() - 1, 0),
            )
    }

    /// Cell at the coordinate, `None` when out of bounds
    pub fn cell(&self, coordinate: Coordinate) -> Option<&Cell> {
        self.index(coordinate)
            .and_then(|index| self.cells.get(index))
    }

    pub(crate) fn cell_mut(&mut self, coordinate: Coordinate) -> Option<&mut Cell> {
        self.index(coordinate)
            .and_then(move |index| self.cells.get_mut(index))
    }

    /// Whether a tile covers the cell; out-of-bounds cells are empty
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.cell(coordinate).is_some_and(Cell::is_occupied)
    }

    /// Tile covering the cell
    pub fn occupant_at(&self, coordinate: Coordinate) -> Option<TileId> {
        self.cell(coordinate).and_then(Cell::occupant)
    }

    /// Anchor of the tile covering the cell
    pub fn anchor_at(&self, coordinate: Coordinate) -> Option<Coordinate> {
        self.cell(coordinate).and_then(Cell::anchor)
    }

    /// Whether every cell of the footprint is occupied
    pub fn is_fully_occupied(&self, footprint: Footprint) -> bool {
        footprint.cells().all(|cell| self.is_occupied(cell))
    }

    /// All occupied cells with their coordinates
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coordinate, &Cell)> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_occupied())
            .map(|((x, y, z), cell)| (Coordinate::new(x as i32, y as i32, z as i32), cell))
    }

    /// Flags the cell should carry given its current neighbours
    ///
    /// A side flag is set only when the neighbouring cell belongs to another
    /// tile, so cells inside a footprint never block each other. Empty cells
    /// carry no flags.
    pub fn expected_flags(&self, coordinate: Coordinate) -> CellFlags {
        let Some(own) = self.occupant_at(coordinate) else {
            return CellFlags::default();
        };

        let blocked_by = |neighbour: Coordinate| {
            self.occupant_at(neighbour)
                .is_some_and(|occupant| occupant != own)
        };

        CellFlags {
            left_blocked: blocked_by(coordinate.offset(-1, 0, 0)),
            right_blocked: blocked_by(coordinate.offset(1, 0, 0)),
            top_covered: self.is_occupied(coordinate.above()),
        }
    }

    /// Whether the cached flags of the cell match its neighbourhood
    pub fn flags_consistent(&self, coordinate: Coordinate) -> bool {
        self.cell(coordinate)
            .is_none_or(|cell| cell.flags() == self.expected_flags(coordinate))
    }

    /// First cell, in storage order, whose cached flags are stale
    pub fn first_inconsistent_cell(&self) -> Option<Coordinate> {
        self.cells
            .indexed_iter()
            .map(|((x, y, z), _)| Coordinate::new(x as i32, y as i32, z as i32))
            .find(|&coordinate| !self.flags_consistent(coordinate))
    }

    /// Recompute the flags of one cell and return its occupant
    pub(crate) fn refresh_flags(&mut self, coordinate: Coordinate) -> Option<TileId> {
        let flags = self.expected_flags(coordinate);
        let cell = self.cell_mut(coordinate)?;
        cell.set_flags(flags);
        cell.occupant()
    }

    /// Empty every cell
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
