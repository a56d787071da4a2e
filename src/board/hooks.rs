//! Notification hooks for collaborators that mirror the board
//!
//! The engine owns no visuals. Whatever draws tiles, plays sounds or swaps
//! meshes implements [`BoardObserver`] and is told about every committed
//! change, after the board has reached a consistent state again.

use crate::board::registry::{TileId, Variant};
use crate::spatial::coordinate::Coordinate;

/// Receiver of committed board changes
///
/// Every method defaults to doing nothing.
pub trait BoardObserver {
    /// A tile was placed with its footprint anchored at `anchor`
    fn tile_placed(&mut self, _tile: TileId, _anchor: Coordinate) {}

    /// A tile was removed from `anchor`
    fn tile_removed(&mut self, _tile: TileId, _anchor: Coordinate) {}

    /// A tile received a new face type
    fn variant_changed(&mut self, _tile: TileId, _variant: Variant) {}

    /// A tile entered or left the set of removable tiles
    fn availability_changed(&mut self, _tile: TileId, _available: bool) {}
}

/// Observer that ignores every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BoardObserver for NoopObserver {}

/// Single recorded notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// See [`BoardObserver::tile_placed`]
    Placed {
        /// Placed tile
        tile: TileId,
        /// Its anchor
        anchor: Coordinate,
    },
    /// See [`BoardObserver::tile_removed`]
    Removed {
        /// Removed tile
        tile: TileId,
        /// Its former anchor
        anchor: Coordinate,
    },
    /// See [`BoardObserver::variant_changed`]
    VariantChanged {
        /// Affected tile
        tile: TileId,
        /// Newly assigned variant
        variant: Variant,
    },
    /// See [`BoardObserver::availability_changed`]
    AvailabilityChanged {
        /// Affected tile
        tile: TileId,
        /// New membership in the available set
        available: bool,
    },
}

/// Observer recording every notification in order
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

impl BoardObserver for EventLog {
    fn tile_placed(&mut self, tile: TileId, anchor: Coordinate) {
        self.events.push(BoardEvent::Placed { tile, anchor });
    }

    fn tile_removed(&mut self, tile: TileId, anchor: Coordinate) {
        self.events.push(BoardEvent::Removed { tile, anchor });
    }

    fn variant_changed(&mut self, tile: TileId, variant: Variant) {
        self.events
            .push(BoardEvent::VariantChanged { tile, variant });
    }

    fn availability_changed(&mut self, tile: TileId, available: bool) {
        self.events
            .push(BoardEvent::AvailabilityChanged { tile, available });
    }
}
