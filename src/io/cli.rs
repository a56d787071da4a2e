//! Command-line interface for batch pairing of layout files

use crate::board::engine::Board;
use crate::board::pairing::{PairingConfig, assign_pairs};
use crate::io::configuration::{
    DEFAULT_PAIRING_ATTEMPTS, DEFAULT_SEED, DEFAULT_VARIANT_COUNT, LAYOUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::layout::LayoutData;
use crate::io::progress::ProgressManager;
use crate::spatial::grid::GridDimensions;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mahjong-board")]
#[command(
    author,
    version,
    about = "Replay mahjong solitaire layouts and assign solvable tile pairs"
)]
/// Command-line arguments for the layout pairing tool
pub struct Cli {
    /// Layout JSON file or directory of layouts to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible pairing
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of distinct face types to hand out
    #[arg(short = 't', long, default_value_t = DEFAULT_VARIANT_COUNT)]
    pub variants: u16,

    /// Pairing attempts per layout before giving up
    #[arg(short, long, default_value_t = DEFAULT_PAIRING_ATTEMPTS)]
    pub attempts: usize,

    /// Grid cells along x (inferred from the layout if omitted)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Grid cells along y (inferred from the layout if omitted)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Grid layers (inferred from the layout if omitted)
    #[arg(short, long)]
    pub layers: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pairing parameters selected on the command line
    pub const fn pairing_config(&self) -> PairingConfig {
        PairingConfig {
            variant_count: self.variants,
            max_attempts: self.attempts,
            seed: self.seed,
        }
    }

    /// Grid extent for a layout, with explicit axes overriding inferred ones
    pub fn dimensions_for(&self, layout: &LayoutData) -> GridDimensions {
        let inferred = layout.dimensions();
        GridDimensions::new(
            self.width.unwrap_or(inferred.horizontal),
            self.depth.unwrap_or(inferred.vertical),
            self.layers.unwrap_or(inferred.height),
        )
    }
}

/// Orchestrates batch processing of layout files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Layout files selected by the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a layout file nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !Self::is_layout_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a .json layout",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory")?.path();
                if Self::is_layout_file(&path)
                    && !Self::is_output_file(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a layout file or directory",
            ))
        }
    }

    fn is_layout_file(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(LAYOUT_EXTENSION)
    }

    fn is_output_file(path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_layout(index, input_path);
        }

        let layout = LayoutData::load(input_path)?;
        layout.validate()?;
        self.advance(index, &format!("{} anchors", layout.piece_count));

        let mut board = Board::new(self.cli.dimensions_for(&layout), layout.piece_size)?;
        let placed = layout.apply_to(&mut board)?;
        info!(
            "{}: placed {placed} of {} tiles, {} available",
            input_path.display(),
            layout.piece_count,
            board.availability().len()
        );
        self.advance(index, &format!("{placed} placed"));

        let pairs = assign_pairs(&mut board, &self.cli.pairing_config())?;
        self.advance(index, &format!("{} pairs", pairs.len()));

        LayoutData::capture(&board).save(&output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_layout(
                index,
                &format!("{} pairs in {:.2?}", pairs.len(), start_time.elapsed()),
            );
        }

        Ok(())
    }

    fn advance(&mut self, index: usize, note: &str) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, note);
        }
    }

    /// Path of the paired layout written for `input_path`
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            LAYOUT_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
