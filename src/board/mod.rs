//! Board state: tiles, placement and removal, availability
//!
//! This module contains the engine and everything it keeps consistent:
//! - Tile identity and records
//! - Placement and removal with blocking rules
//! - The incrementally maintained set of removable tiles
//! - Layout flattening, replay and solvable pairing

/// Side and cover blocking evaluation and the availability index
pub mod availability;
/// Flatten and reconstruct for layout persistence
pub mod codec;
/// Placement and removal engine
pub mod engine;
/// Observer hooks for external collaborators
pub mod hooks;
/// Solvable face-type assignment
pub mod pairing;
/// Tile ids and registered tile records
pub mod registry;
/// Bitset of tile ids
pub mod tileset;

pub use engine::Board;
