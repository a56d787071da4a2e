//! Tests for tile identity allocation and registry lookups

#[cfg(test)]
mod tests {
    use mahjong_board::board::Board;
    use mahjong_board::board::registry::{TileId, TileRegistry, Variant};
    use mahjong_board::spatial::coordinate::Coordinate;
    use mahjong_board::spatial::grid::GridDimensions;

    fn board() -> Board {
        Board::new(GridDimensions::new(6, 2, 2), 2).expect("valid board")
    }

    // Tests ids are handed out in placement order
    // Verified by registering every tile under id 0
    #[test]
    fn test_ids_are_sequential() {
        let mut board = board();
        let first = board.place(Coordinate::new(0, 0, 0)).expect("first tile");
        let second = board.place(Coordinate::new(2, 0, 0)).expect("second tile");

        assert_eq!(first, TileId::new(0));
        assert_eq!(second, TileId::new(1));
        assert_eq!(board.registry().next_id(), TileId::new(2));
        assert_eq!(board.registry().len(), 2);
    }

    // Tests removed ids are never handed out again
    // Verified by resetting next_id on deregistration
    #[test]
    fn test_ids_are_not_reused() {
        let mut board = board();
        let first = board.place(Coordinate::new(0, 0, 0)).expect("first tile");
        board.remove_tile(first, true).expect("free tile");

        let replacement = board.place(Coordinate::new(0, 0, 0)).expect("replacement");
        assert_ne!(replacement, first);
        assert!(!board.registry().contains(first));
        assert!(board.registry().contains(replacement));
    }

    // Tests clearing the board keeps the id counter running
    // Verified by resetting next_id in clear
    #[test]
    fn test_clear_keeps_counter() {
        let mut board = board();
        board.place(Coordinate::new(0, 0, 0)).expect("tile");
        board.clear();

        assert!(board.registry().is_empty());
        assert_eq!(board.registry().next_id(), TileId::new(1));
    }

    // Tests records expose anchor, footprint and variant
    // Verified by storing the footprint's far corner as the anchor
    #[test]
    fn test_tile_record() {
        let mut board = board();
        let id = board.place(Coordinate::new(2, 0, 0)).expect("tile");
        board.set_variant(id, Variant(7)).expect("known tile");

        let tile = board.registry().get(id).expect("registered");
        assert_eq!(tile.id(), id);
        assert_eq!(tile.anchor(), Coordinate::new(2, 0, 0));
        assert_eq!(tile.footprint().size(), 2);
        assert_eq!(tile.variant(), Some(Variant(7)));
        assert_eq!(board.registry().anchor_of(id), Some(Coordinate::new(2, 0, 0)));
    }

    // Tests an empty registry
    // Verified by seeding the registry with a placeholder tile
    #[test]
    fn test_empty_registry() {
        let registry = TileRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
        assert_eq!(registry.anchor_of(TileId::new(0)), None);
    }

    // Tests id and variant display
    // Verified by removing the id prefix
    #[test]
    fn test_display() {
        assert_eq!(TileId::new(12).to_string(), "#12");
        assert_eq!(TileId::new(12).get(), 12);
        assert_eq!(Variant(3).to_string(), "variant 3");
    }
}
