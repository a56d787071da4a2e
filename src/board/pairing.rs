//! Solvable face-type assignment by reverse play
//!
//! Pairs are drawn the way a player would clear the board: two tiles that
//! are available right now are given the same variant and taken off a
//! scratch copy, which may free further tiles. When the copy empties, the
//! recorded pair order is a guaranteed solution of the real board. A draw
//! can still paint itself into a corner (one available tile left while
//! others remain), so the whole draw is retried with the same seeded
//! generator until it succeeds or the attempt budget runs out.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::engine::Board;
use crate::board::hooks::BoardObserver;
use crate::board::registry::{TileId, Variant};
use crate::io::configuration::{DEFAULT_PAIRING_ATTEMPTS, DEFAULT_SEED, DEFAULT_VARIANT_COUNT};
use crate::io::error::{BoardError, Result, invalid_parameter};

/// Parameters of a pairing run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingConfig {
    /// Number of distinct variants to hand out
    pub variant_count: u16,
    /// Draws to try before giving up
    pub max_attempts: usize,
    /// Seed for the draw order
    pub seed: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            variant_count: DEFAULT_VARIANT_COUNT,
            max_attempts: DEFAULT_PAIRING_ATTEMPTS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Two tiles sharing a variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePair {
    /// Tile drawn first
    pub first: TileId,
    /// Tile drawn second
    pub second: TileId,
    /// Shared face type
    pub variant: Variant,
}

/// Outcome of a single draw
enum Draw {
    Paired(Vec<TilePair>),
    Stalled { remaining: usize },
}

/// Shuffled cycle through all variants, reshuffled once exhausted
struct VariantCycle {
    order: Vec<Variant>,
    position: usize,
}

impl VariantCycle {
    fn new(variant_count: u16) -> Self {
        let order: Vec<Variant> = (0..variant_count).map(Variant).collect();
        Self {
            position: order.len(),
            order,
        }
    }

    fn next(&mut self, rng: &mut StdRng) -> Variant {
        if self.position >= self.order.len() {
            self.order.shuffle(rng);
            self.position = 0;
        }
        let variant = self.order.get(self.position).copied().unwrap_or(Variant(0));
        self.position += 1;
        variant
    }
}

/// Give every tile on the board a variant so that the board is solvable
///
/// Returns the pairs in a valid removal order. Variants are written to the
/// board through [`Board::set_variant`], so the observer sees each one.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration asks for zero variants or zero attempts
/// - The board holds an odd number of tiles
/// - Every draw stalls before the board is cleared
pub fn assign_pairs<O: BoardObserver>(
    board: &mut Board<O>,
    config: &PairingConfig,
) -> Result<Vec<TilePair>> {
    if config.variant_count == 0 {
        return Err(invalid_parameter(
            "variant_count",
            &config.variant_count,
            &"at least one variant is needed",
        ));
    }
    if config.max_attempts == 0 {
        return Err(invalid_parameter(
            "max_attempts",
            &config.max_attempts,
            &"at least one attempt is needed",
        ));
    }

    let count = board.tile_count();
    if count % 2 != 0 {
        return Err(BoardError::OddTileCount { count });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut remaining = count;

    for attempt in 1..=config.max_attempts {
        match draw_pairs(board, config.variant_count, &mut rng) {
            Draw::Paired(pairs) => {
                for pair in &pairs {
                    board.set_variant(pair.first, pair.variant)?;
                    board.set_variant(pair.second, pair.variant)?;
                }
                debug!("Paired {count} tiles on attempt {attempt}");
                return Ok(pairs);
            }
            Draw::Stalled { remaining: left } => {
                debug!("Pairing attempt {attempt} stalled with {left} tiles left");
                remaining = left;
            }
        }
    }

    warn!("Giving up pairing after {} attempts", config.max_attempts);
    Err(BoardError::PairingFailed {
        attempts: config.max_attempts,
        remaining,
    })
}

/// Clear a scratch copy of the board two available tiles at a time
fn draw_pairs<O: BoardObserver>(board: &Board<O>, variant_count: u16, rng: &mut StdRng) -> Draw {
    let mut scratch = board.detached();
    let mut variants = VariantCycle::new(variant_count);
    let mut pairs = Vec::with_capacity(board.tile_count() / 2);

    while !scratch.is_empty() {
        let available = scratch.availability().tiles();
        let stalled = Draw::Stalled {
            remaining: scratch.tile_count(),
        };
        if available.len() < 2 {
            return stalled;
        }

        // Two distinct indices without rejection sampling
        let first_index = rng.random_range(0..available.len());
        let mut second_index = rng.random_range(0..available.len() - 1);
        if second_index >= first_index {
            second_index += 1;
        }

        let (Some(&first), Some(&second)) = (available.get(first_index), available.get(second_index))
        else {
            return stalled;
        };

        // Removing a tile only ever clears flags, so the second stays available
        if scratch.remove_tile(first, true).is_err() || scratch.remove_tile(second, true).is_err() {
            return stalled;
        }

        pairs.push(TilePair {
            first,
            second,
            variant: variants.next(rng),
        });
    }

    Draw::Paired(pairs)
}
