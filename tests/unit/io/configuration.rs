//! Tests for board constants and runtime defaults

#[cfg(test)]
mod tests {
    use mahjong_board::io::configuration::{
        DEFAULT_PAIRING_ATTEMPTS, DEFAULT_PIECE_SIZE, DEFAULT_SEED, DEFAULT_VARIANT_COUNT,
        LAYOUT_EXTENSION, MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS, OUTPUT_SUFFIX,
    };

    // Tests the default footprint is two cells wide
    // Verified by changing the piece size
    #[test]
    fn test_piece_size_value() {
        assert_eq!(DEFAULT_PIECE_SIZE, 2);
    }

    // Tests the grid limit leaves room for the default footprint
    // Verified by reducing the dimension limit below the piece size
    #[test]
    fn test_max_grid_dimension() {
        assert_eq!(MAX_GRID_DIMENSION, 1024);
        assert!(MAX_GRID_DIMENSION >= DEFAULT_PIECE_SIZE);
    }

    // Tests pairing defaults
    // Verified by changing constant values
    #[test]
    fn test_pairing_defaults() {
        assert_eq!(DEFAULT_VARIANT_COUNT, 36);
        assert_eq!(DEFAULT_PAIRING_ATTEMPTS, 64);
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests progress bar limit
    // Verified by increasing bar limit
    #[test]
    fn test_max_progress_bars_value() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
    }

    // Tests file naming constants
    // Verified by changing the output suffix
    #[test]
    fn test_file_constants() {
        assert_eq!(LAYOUT_EXTENSION, "json");
        assert_eq!(OUTPUT_SUFFIX, "_paired");
    }
}
