//! Board constants and runtime configuration defaults

/// Edge length of a tile footprint in grid cells
pub const DEFAULT_PIECE_SIZE: usize = 2;

// Prevents a corrupt layout from allocating an absurd grid
/// Maximum allowed extent along any grid axis
pub const MAX_GRID_DIMENSION: usize = 1024;

// Pairing settings
/// Number of distinct face types handed out when pairing tiles
pub const DEFAULT_VARIANT_COUNT: u16 = 36;
/// Pairing attempts before giving up on a layout
pub const DEFAULT_PAIRING_ATTEMPTS: usize = 64;
/// Fixed seed for reproducible pairing
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// File settings
/// Extension of persisted layout files
pub const LAYOUT_EXTENSION: &str = "json";
/// Suffix added to paired output filenames
pub const OUTPUT_SUFFIX: &str = "_paired";
