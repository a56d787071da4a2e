//! Input/output operations and error handling

/// Command-line interface and batch layout processing
pub mod cli;
/// Board constants and runtime defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// Persisted layout records and JSON files
pub mod layout;
/// Progress display for batch runs
pub mod progress;
