//! Square tile footprints and the cell sets derived from them
//!
//! A footprint is the `size × size` block of cells a tile covers on a single
//! layer. Placement and removal only ever look at a handful of cell sets
//! around it: the block itself, the column to either side in `x`, and the
//! block one layer below.

use crate::spatial::coordinate::Coordinate;

/// `size × size` block of cells anchored at its minimum corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    anchor: Coordinate,
    size: i32,
}

impl Footprint {
    /// Create a footprint from its anchor and edge length
    pub const fn new(anchor: Coordinate, size: i32) -> Self {
        Self { anchor, size }
    }

    /// Minimum corner of the block
    pub const fn anchor(self) -> Coordinate {
        self.anchor
    }

    /// Edge length in cells
    pub const fn size(self) -> i32 {
        self.size
    }

    /// Layer the footprint lies on
    pub const fn layer(self) -> i32 {
        self.anchor.z
    }

    /// Whether the footprint covers the given cell
    pub const fn contains(self, cell: Coordinate) -> bool {
        cell.z == self.anchor.z
            && cell.x >= self.anchor.x
            && cell.x < self.anchor.x + self.size
            && cell.y >= self.anchor.y
            && cell.y < self.anchor.y + self.size
    }

    /// Every covered cell, `x` outermost
    pub fn cells(self) -> impl Iterator<Item = Coordinate> {
        let Self { anchor, size } = self;
        (0..size).flat_map(move |dx| (0..size).map(move |dy| anchor.offset(dx, dy, 0)))
    }

    /// Cells along the left edge (relative `x` offset 0)
    pub fn left_edge(self) -> impl Iterator<Item = Coordinate> {
        let anchor = self.anchor;
        (0..self.size).map(move |dy| anchor.offset(0, dy, 0))
    }

    /// Cells along the right edge (relative `x` offset `size - 1`)
    pub fn right_edge(self) -> impl Iterator<Item = Coordinate> {
        let anchor = self.anchor;
        let dx = self.size - 1;
        (0..self.size).map(move |dy| anchor.offset(dx, dy, 0))
    }

    /// Column of outside cells immediately left of the block
    pub fn left_flank(self) -> impl Iterator<Item = Coordinate> {
        self.left_edge().map(|cell| cell.offset(-1, 0, 0))
    }

    /// Column of outside cells immediately right of the block
    pub fn right_flank(self) -> impl Iterator<Item = Coordinate> {
        self.right_edge().map(|cell| cell.offset(1, 0, 0))
    }

    /// Same block one layer lower, or `None` on the ground layer
    pub const fn below(self) -> Option<Self> {
        if self.anchor.z > 0 {
            Some(Self::new(self.anchor.below(), self.size))
        } else {
            None
        }
    }

    /// Same block one layer higher
    #[must_use]
    pub const fn above(self) -> Self {
        Self::new(self.anchor.above(), self.size)
    }

    /// Number of covered cells
    pub const fn area(self) -> usize {
        (self.size * self.size) as usize
    }
}
