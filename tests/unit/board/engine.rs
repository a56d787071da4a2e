//! Tests for placement and removal validation, stacking and invariants

#[cfg(test)]
mod tests {
    use mahjong_board::BoardError;
    use mahjong_board::board::Board;
    use mahjong_board::board::availability::BlockReason;
    use mahjong_board::board::registry::{TileId, Variant};
    use mahjong_board::io::error::Target;
    use mahjong_board::spatial::coordinate::Coordinate;
    use mahjong_board::spatial::grid::GridDimensions;

    fn board(horizontal: usize, vertical: usize, height: usize) -> Board {
        Board::new(GridDimensions::new(horizontal, vertical, height), 2).expect("valid board")
    }

    // Tests construction rejects zero and oversized dimensions
    // Verified by removing the dimension range check
    #[test]
    fn test_new_validates_dimensions() {
        let zero = Board::new(GridDimensions::new(0, 4, 1), 2);
        assert!(matches!(
            zero,
            Err(BoardError::InvalidParameter {
                parameter: "horizontal_size",
                ..
            })
        ));

        let huge = Board::new(GridDimensions::new(4, 4, 100_000), 2);
        assert!(matches!(
            huge,
            Err(BoardError::InvalidParameter {
                parameter: "height_size",
                ..
            })
        ));
    }

    // Tests construction rejects piece sizes that cannot fit
    // Verified by comparing against the height instead of the vertical extent
    #[test]
    fn test_new_validates_piece_size() {
        let too_big = Board::new(GridDimensions::new(4, 1, 4), 2);
        assert!(matches!(
            too_big,
            Err(BoardError::InvalidParameter {
                parameter: "piece_size",
                ..
            })
        ));

        let zero = Board::new(GridDimensions::new(4, 4, 1), 0);
        assert!(matches!(
            zero,
            Err(BoardError::InvalidParameter {
                parameter: "piece_size",
                ..
            })
        ));
    }

    // Tests out-of-bounds placement is rejected before anything else
    // Verified by checking occupancy before bounds
    #[test]
    fn test_place_out_of_bounds() {
        let mut board = board(4, 4, 1);
        let result = board.place(Coordinate::new(3, 0, 0));
        assert!(matches!(
            result,
            Err(BoardError::OutOfBounds { size: 2, .. })
        ));
        assert!(board.place(Coordinate::new(0, 0, -1)).is_err());
        assert!(board.place(Coordinate::new(0, 0, 1)).is_err());
        assert!(board.is_empty());
    }

    // Tests overlapping placement reports the first occupied cell
    // Verified by skipping the overlap check entirely
    #[test]
    fn test_place_overlap() {
        let mut board = board(4, 4, 1);
        board.place(Coordinate::new(0, 0, 0)).expect("first tile");

        let result = board.place(Coordinate::new(1, 1, 0));
        assert!(matches!(
            result,
            Err(BoardError::Occupied { coordinate }) if coordinate == Coordinate::new(1, 1, 0)
        ));
        assert_eq!(board.tile_count(), 1);
    }

    // Tests partial support is never accepted
    // Verified by accepting any occupied cell below as support
    #[test]
    fn test_place_requires_full_support() {
        let mut board = board(4, 4, 2);
        board.place(Coordinate::new(0, 0, 0)).expect("ground tile");

        let overhang = board.place(Coordinate::new(1, 0, 1));
        assert!(matches!(overhang, Err(BoardError::Unsupported { .. })));

        let floating = board.place(Coordinate::new(2, 2, 1));
        assert!(matches!(floating, Err(BoardError::Unsupported { .. })));

        assert!(board.place(Coordinate::new(0, 0, 1)).is_ok());
    }

    // Tests support may span several tiles below
    // Verified by requiring a single supporting tile
    #[test]
    fn test_bridging_support() {
        let mut board = board(4, 2, 2);
        board.place(Coordinate::new(0, 0, 0)).expect("left");
        board.place(Coordinate::new(2, 0, 0)).expect("right");

        let bridge = board.place(Coordinate::new(1, 0, 1)).expect("bridge");
        assert!(board.is_available(bridge));
        assert_eq!(board.available_tiles().count(), 1);
        board.verify_invariants().expect("consistent board");
    }

    // Tests check_placement never mutates
    // Verified by calling place from check_placement
    #[test]
    fn test_check_placement_is_pure() {
        let board = board(4, 4, 1);
        let footprint = board
            .check_placement(Coordinate::new(2, 2, 0))
            .expect("valid anchor");
        assert_eq!(footprint.anchor(), Coordinate::new(2, 2, 0));
        assert!(board.is_empty());
    }

    // Tests the landing search stacks on full layers and stops at partial ones
    // Verified by continuing the search past partially occupied layers
    #[test]
    fn test_landing_for() {
        let mut board = board(4, 4, 3);
        assert_eq!(board.landing_for(0, 0).ok(), Some(Coordinate::new(0, 0, 0)));

        board.place_stacked(0, 0).expect("ground");
        board.place_stacked(0, 0).expect("second layer");
        assert_eq!(board.landing_for(0, 0).ok(), Some(Coordinate::new(0, 0, 2)));

        assert!(matches!(
            board.landing_for(1, 0),
            Err(BoardError::Occupied { .. })
        ));

        board.place_stacked(0, 0).expect("third layer");
        assert!(matches!(
            board.landing_for(0, 0),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert!(matches!(
            board.landing_for(3, 0),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    // Tests sized placement with mixed footprints
    // Verified by ignoring the explicit size
    #[test]
    fn test_place_sized() {
        let mut board = board(4, 4, 2);
        let big = board
            .place_sized(Coordinate::new(0, 0, 0), 3)
            .expect("large tile");
        let small = board
            .place_sized(Coordinate::new(1, 1, 1), 1)
            .expect("small tile on top");

        assert_eq!(board.occupant_at(Coordinate::new(2, 2, 0)), Some(big));
        assert!(!board.is_available(big));
        assert!(board.is_available(small));
        assert!(matches!(
            board.place_sized(Coordinate::new(3, 3, 0), 0),
            Err(BoardError::InvalidParameter { .. })
        ));
        board.verify_invariants().expect("consistent board");
    }

    // Tests removal of an empty cell
    // Verified by returning a default tile for empty cells
    #[test]
    fn test_remove_empty_cell() {
        let mut board = board(4, 4, 1);
        let result = board.remove(Coordinate::new(0, 0, 0), true);
        assert!(matches!(
            result,
            Err(BoardError::NotFound {
                target: Target::Cell(_)
            })
        ));
        assert!(!board.try_remove(Coordinate::new(9, 9, 9), true));
    }

    // Tests removal through any cell of the footprint
    // Verified by requiring the anchor cell
    #[test]
    fn test_remove_via_any_cell() {
        let mut board = board(4, 4, 1);
        let tile = board.place(Coordinate::new(2, 2, 0)).expect("tile");

        assert_eq!(board.remove(Coordinate::new(3, 3, 0), true).ok(), Some(tile));
        assert!(!board.is_occupied(Coordinate::new(2, 2, 0)));
        assert_eq!(board.anchor_of(tile), None);
        assert!(!board.is_available(tile));
    }

    // Tests covered tiles report the cover reason
    // Verified by checking side blocking before cover
    #[test]
    fn test_remove_covered() {
        let mut board = board(2, 2, 2);
        let ground = board.place(Coordinate::new(0, 0, 0)).expect("ground");
        board.place(Coordinate::new(0, 0, 1)).expect("top");

        for side_blocking_enabled in [true, false] {
            let result = board.remove(Coordinate::new(0, 0, 0), side_blocking_enabled);
            assert!(matches!(
                result,
                Err(BoardError::Blocked {
                    tile,
                    reason: BlockReason::Covered
                }) if tile == ground
            ));
        }
        assert_eq!(board.tile_count(), 2);
    }

    // Tests removal by id and unknown ids
    // Verified by resolving ids through the availability index
    #[test]
    fn test_remove_tile() {
        let mut board = board(4, 4, 1);
        let tile = board.place(Coordinate::new(0, 2, 0)).expect("tile");

        assert_eq!(board.remove_tile(tile, true).ok(), Some(Coordinate::new(0, 2, 0)));
        assert!(matches!(
            board.remove_tile(tile, true),
            Err(BoardError::NotFound {
                target: Target::Tile(_)
            })
        ));
    }

    // Tests variants are stored on the tile
    // Verified by dropping the registry write in set_variant
    #[test]
    fn test_set_variant() {
        let mut board = board(4, 4, 1);
        let tile = board.place(Coordinate::new(0, 0, 0)).expect("tile");

        board.set_variant(tile, Variant(5)).expect("known tile");
        assert_eq!(board.tile(tile).and_then(|record| record.variant()), Some(Variant(5)));
        assert!(board.set_variant(TileId::new(99), Variant(1)).is_err());
    }

    // Tests a rejected mutation leaves the board unchanged
    // Verified by registering the tile before validation
    #[test]
    fn test_rejection_leaves_state() {
        let mut board = board(4, 4, 2);
        board.place(Coordinate::new(0, 0, 0)).expect("ground");
        let before = board.flatten();
        let available_before = board.availability().tiles();
        let next_before = board.registry().next_id();

        assert!(!board.try_place(Coordinate::new(0, 0, 0)));
        assert!(!board.try_place(Coordinate::new(2, 2, 1)));

        assert_eq!(board.flatten(), before);
        assert_eq!(board.availability().tiles(), available_before);
        assert_eq!(board.registry().next_id(), next_before);
        board.verify_invariants().expect("consistent board");
    }

    // Tests clear empties grid, registry and index
    // Verified by clearing the registry only
    #[test]
    fn test_clear() {
        let mut board = board(4, 4, 2);
        board.place(Coordinate::new(0, 0, 0)).expect("ground");
        board.place(Coordinate::new(0, 0, 1)).expect("top");
        board.clear();

        assert!(board.is_empty());
        assert!(board.availability().is_empty());
        assert_eq!(board.grid().occupied_cells().count(), 0);
        board.verify_invariants().expect("consistent board");
    }

    // Tests accessors report construction parameters
    // Verified by storing the piece size in cells squared
    #[test]
    fn test_accessors() {
        let board = board(6, 4, 3);
        assert_eq!(board.piece_size(), 2);
        assert_eq!(board.dimensions(), GridDimensions::new(6, 4, 3));
        assert!(board.blocking_of(TileId::new(0)).is_none());
    }
}
