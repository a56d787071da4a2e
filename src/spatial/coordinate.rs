//! Integer grid coordinates addressing single cells or footprint anchors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell address in the layered grid
///
/// `x` runs horizontally, `y` runs in depth and `z` selects the layer, with
/// layer 0 resting on the table. When used as an anchor the coordinate names
/// the minimum corner of a tile footprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position
    pub x: i32,
    /// Depth position
    pub y: i32,
    /// Layer, 0 being the ground layer
    pub z: i32,
}

impl Coordinate {
    /// Create a coordinate from its three components
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shift the coordinate by the given deltas
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Cell directly beneath this one
    #[must_use]
    pub const fn below(self) -> Self {
        self.offset(0, 0, -1)
    }

    /// Cell directly on top of this one
    #[must_use]
    pub const fn above(self) -> Self {
        self.offset(0, 0, 1)
    }

    /// Key used when flattening a board: layer first, then `x`, then `y`
    ///
    /// Replaying anchors in this order always places supporting tiles before
    /// the tiles resting on them.
    pub const fn scan_key(self) -> (i32, i32, i32) {
        (self.z, self.x, self.y)
    }
}

impl From<[i32; 3]> for Coordinate {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Coordinate> for [i32; 3] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.x, coordinate.y, coordinate.z]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
