//! Tests for solvable variant pairing by reverse play

#[cfg(test)]
mod tests {
    use mahjong_board::BoardError;
    use mahjong_board::board::Board;
    use mahjong_board::board::pairing::{PairingConfig, TilePair, assign_pairs};
    use mahjong_board::io::configuration::{DEFAULT_PAIRING_ATTEMPTS, DEFAULT_VARIANT_COUNT};
    use mahjong_board::spatial::coordinate::Coordinate;
    use mahjong_board::spatial::grid::GridDimensions;

    fn board_with(dimensions: GridDimensions, anchors: &[Coordinate]) -> Board {
        let mut board = Board::new(dimensions, 2).expect("valid board");
        for &anchor in anchors {
            board.place(anchor).expect("valid anchor");
        }
        board
    }

    /// Two layers over a row of four, eight tiles in total
    fn terraced() -> Board {
        board_with(
            GridDimensions::new(8, 4, 2),
            &[
                Coordinate::new(0, 0, 0),
                Coordinate::new(2, 0, 0),
                Coordinate::new(4, 0, 0),
                Coordinate::new(6, 0, 0),
                Coordinate::new(0, 2, 0),
                Coordinate::new(2, 2, 0),
                Coordinate::new(2, 0, 1),
                Coordinate::new(4, 0, 1),
            ],
        )
    }

    /// Removing the pairs in order must always be legal
    fn assert_solution(board: &Board, pairs: &[TilePair]) {
        let mut replay = board.clone();
        for pair in pairs {
            assert!(replay.is_available(pair.first), "{} not free", pair.first);
            assert!(replay.is_available(pair.second), "{} not free", pair.second);
            replay.remove_tile(pair.first, true).expect("first removable");
            replay.remove_tile(pair.second, true).expect("second removable");
        }
        assert!(replay.is_empty());
    }

    // Tests every tile receives a variant shared with exactly its partner
    // Verified by giving the second tile of a pair the next variant
    #[test]
    fn test_assign_pairs_covers_board() {
        let mut board = terraced();
        let pairs = assign_pairs(&mut board, &PairingConfig::default()).expect("solvable board");

        assert_eq!(pairs.len(), 4);
        for pair in &pairs {
            let first = board.tile(pair.first).and_then(|tile| tile.variant());
            let second = board.tile(pair.second).and_then(|tile| tile.variant());
            assert_eq!(first, Some(pair.variant));
            assert_eq!(second, Some(pair.variant));
            assert_ne!(pair.first, pair.second);
        }
        assert!(board.registry().iter().all(|tile| tile.variant().is_some()));
    }

    // Tests the pair order is a legal clearing sequence
    // Verified by picking tiles from the registry instead of the index
    #[test]
    fn test_pairs_form_solution() {
        let mut board = terraced();
        let pairs = assign_pairs(&mut board, &PairingConfig::default()).expect("solvable board");
        assert_solution(&board, &pairs);
    }

    // Tests pairing leaves the board itself in place
    // Verified by drawing on the real board instead of a scratch copy
    #[test]
    fn test_board_keeps_tiles() {
        let mut board = terraced();
        let before = board.flatten();
        assign_pairs(&mut board, &PairingConfig::default()).expect("solvable board");

        assert_eq!(board.flatten(), before);
        board.verify_invariants().expect("consistent board");
    }

    // Tests the same seed reproduces the same pairing
    // Verified by seeding from entropy
    #[test]
    fn test_seed_is_reproducible() {
        let config = PairingConfig {
            seed: 7,
            ..PairingConfig::default()
        };
        let mut first = terraced();
        let mut second = terraced();

        assert_eq!(
            assign_pairs(&mut first, &config).expect("solvable board"),
            assign_pairs(&mut second, &config).expect("solvable board")
        );
    }

    // Tests variants are spread until the cycle is exhausted
    // Verified by always returning the first variant of the cycle
    #[test]
    fn test_variants_distinct_within_cycle() {
        let mut board = terraced();
        let pairs = assign_pairs(&mut board, &PairingConfig::default()).expect("solvable board");

        let mut variants: Vec<u16> = pairs.iter().map(|pair| pair.variant.0).collect();
        variants.sort_unstable();
        variants.dedup();
        assert_eq!(variants.len(), pairs.len());
        assert!(variants.iter().all(|&variant| variant < DEFAULT_VARIANT_COUNT));
    }

    // Tests a single variant is reused for every pair
    // Verified by failing when the cycle wraps
    #[test]
    fn test_single_variant() {
        let mut board = terraced();
        let config = PairingConfig {
            variant_count: 1,
            ..PairingConfig::default()
        };
        let pairs = assign_pairs(&mut board, &config).expect("solvable board");
        assert!(pairs.iter().all(|pair| pair.variant.0 == 0));
    }

    // Tests odd tile counts are refused
    // Verified by removing the parity check
    #[test]
    fn test_odd_count() {
        let mut board = board_with(GridDimensions::new(4, 4, 1), &[Coordinate::new(0, 0, 0)]);
        assert!(matches!(
            assign_pairs(&mut board, &PairingConfig::default()),
            Err(BoardError::OddTileCount { count: 1 })
        ));
    }

    // Tests a stack of two can never be paired
    // Verified by pairing covered tiles
    #[test]
    fn test_unsolvable_stack() {
        let mut board = board_with(
            GridDimensions::new(2, 2, 2),
            &[Coordinate::new(0, 0, 0), Coordinate::new(0, 0, 1)],
        );
        let config = PairingConfig {
            max_attempts: 3,
            ..PairingConfig::default()
        };

        assert!(matches!(
            assign_pairs(&mut board, &config),
            Err(BoardError::PairingFailed {
                attempts: 3,
                remaining: 2
            })
        ));
        assert!(board.registry().iter().all(|tile| tile.variant().is_none()));
    }

    // Tests degenerate configurations are rejected
    // Verified by removing the parameter validation
    #[test]
    fn test_invalid_config() {
        let mut board = terraced();
        let no_variants = PairingConfig {
            variant_count: 0,
            ..PairingConfig::default()
        };
        let no_attempts = PairingConfig {
            max_attempts: 0,
            ..PairingConfig::default()
        };

        assert!(matches!(
            assign_pairs(&mut board, &no_variants),
            Err(BoardError::InvalidParameter { .. })
        ));
        assert!(matches!(
            assign_pairs(&mut board, &no_attempts),
            Err(BoardError::InvalidParameter { .. })
        ));
        assert_eq!(PairingConfig::default().max_attempts, DEFAULT_PAIRING_ATTEMPTS);
    }

    // Tests an empty board pairs trivially
    // Verified by treating an empty board as a stalled draw
    #[test]
    fn test_empty_board() {
        let mut board = Board::new(GridDimensions::new(4, 4, 1), 2).expect("valid board");
        let pairs = assign_pairs(&mut board, &PairingConfig::default()).expect("nothing to pair");
        assert!(pairs.is_empty());
    }
}
