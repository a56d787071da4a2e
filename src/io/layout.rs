//! Persisted layout records and their JSON files
//!
//! A layout stores one anchor (lead index) per tile as three parallel
//! integer arrays plus the footprint size in use when it was captured.
//! Tiles placed at another size carry a per-tile size array. Loading
//! replays the anchors through [`Board::reconstruct_sized`], so a layout
//! edited by hand can only ever produce a valid, if partial, board.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::board::codec::SizedAnchor;
use crate::board::engine::Board;
use crate::board::hooks::BoardObserver;
use crate::board::registry::Variant;
use crate::io::configuration::{DEFAULT_PIECE_SIZE, MAX_GRID_DIMENSION};
use crate::io::error::{BoardError, Result, WithContext, invalid_layout};
use crate::spatial::coordinate::Coordinate;
use crate::spatial::grid::GridDimensions;

const fn default_piece_size() -> usize {
    DEFAULT_PIECE_SIZE
}

/// Serialized board layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    /// Number of tiles in the layout
    pub piece_count: usize,
    /// Footprint edge length the anchors were captured with
    #[serde(default = "default_piece_size")]
    pub piece_size: usize,
    /// `x` of each anchor
    #[serde(alias = "horizontalIndex")]
    pub piece_horizontal_index: Vec<i32>,
    /// `y` of each anchor
    #[serde(alias = "verticalIndex")]
    pub piece_vertical_index: Vec<i32>,
    /// `z` of each anchor
    #[serde(alias = "heightIndex")]
    pub piece_height_index: Vec<i32>,
    /// Footprint size of each tile, present when any differs from `piece_size`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_sizes: Option<Vec<usize>>,
    /// Face type of each tile, present once the layout has been paired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_variant: Option<Vec<u16>>,
}

impl LayoutData {
    /// Build a record from anchors in replay order
    pub fn from_anchors(anchors: &[Coordinate], piece_size: usize) -> Self {
        Self {
            piece_count: anchors.len(),
            piece_size,
            piece_horizontal_index: anchors.iter().map(|anchor| anchor.x).collect(),
            piece_vertical_index: anchors.iter().map(|anchor| anchor.y).collect(),
            piece_height_index: anchors.iter().map(|anchor| anchor.z).collect(),
            piece_sizes: None,
            piece_variant: None,
        }
    }

    /// Build a record from anchors with individual footprint sizes
    ///
    /// The size array is only kept when some tile differs from `piece_size`.
    pub fn from_sized_anchors(tiles: &[SizedAnchor], piece_size: usize) -> Self {
        let anchors: Vec<Coordinate> = tiles.iter().map(|&(anchor, _)| anchor).collect();
        let mut layout = Self::from_anchors(&anchors, piece_size);

        if tiles.iter().any(|&(_, size)| size != piece_size) {
            layout.piece_sizes = Some(tiles.iter().map(|&(_, size)| size).collect());
        }

        layout
    }

    /// Capture the current board, including variants once every tile has one
    pub fn capture<O: BoardObserver>(board: &Board<O>) -> Self {
        let tiles = board.flatten_sized();
        let mut layout = Self::from_sized_anchors(&tiles, board.piece_size());

        layout.piece_variant = tiles
            .iter()
            .map(|&(anchor, _)| {
                board
                    .occupant_at(anchor)
                    .and_then(|tile| board.tile(tile))
                    .and_then(|tile| tile.variant())
                    .map(|variant| variant.0)
            })
            .collect();

        layout
    }

    /// Check the record for internal consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayout` if the arrays disagree with `piece_count` or
    /// a footprint size is zero or exceeds `MAX_GRID_DIMENSION`, and
    /// `OddTileCount` for an unpaired tile count
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            self.piece_horizontal_index.len(),
            self.piece_vertical_index.len(),
            self.piece_height_index.len(),
        ];
        if lengths.iter().any(|&length| length != self.piece_count) {
            return Err(invalid_layout(&format!(
                "pieceCount is {} but index arrays hold {lengths:?} entries",
                self.piece_count
            )));
        }

        if let Some(variants) = self
            .piece_variant
            .as_ref()
            .filter(|variants| variants.len() != self.piece_count)
        {
            return Err(invalid_layout(&format!(
                "pieceCount is {} but {} variants are listed",
                self.piece_count,
                variants.len()
            )));
        }

        if let Some(sizes) = self
            .piece_sizes
            .as_ref()
            .filter(|sizes| sizes.len() != self.piece_count)
        {
            return Err(invalid_layout(&format!(
                "pieceCount is {} but {} sizes are listed",
                self.piece_count,
                sizes.len()
            )));
        }

        let sizes = self.piece_sizes.iter().flatten();
        if let Some(size) = std::iter::once(&self.piece_size)
            .chain(sizes)
            .find(|&&candidate| candidate == 0 || candidate > MAX_GRID_DIMENSION)
        {
            return Err(invalid_layout(&format!(
                "piece size {size} must be between 1 and {MAX_GRID_DIMENSION}"
            )));
        }

        if self.piece_count % 2 != 0 {
            warn!("Layout holds an odd number of tiles ({})", self.piece_count);
            return Err(BoardError::OddTileCount {
                count: self.piece_count,
            });
        }

        Ok(())
    }

    /// Anchors in stored order
    pub fn anchors(&self) -> Vec<Coordinate> {
        self.piece_horizontal_index
            .iter()
            .zip(&self.piece_vertical_index)
            .zip(&self.piece_height_index)
            .map(|((&x, &y), &z)| Coordinate::new(x, y, z))
            .collect()
    }

    /// Anchors paired with the footprint size each tile is replayed at
    pub fn sized_anchors(&self) -> Vec<SizedAnchor> {
        let anchors = self.anchors();
        match &self.piece_sizes {
            Some(sizes) => anchors.into_iter().zip(sizes.iter().copied()).collect(),
            None => anchors
                .into_iter()
                .map(|anchor| (anchor, self.piece_size))
                .collect(),
        }
    }

    /// Smallest grid holding every footprint of the layout
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions::enclosing_sized(self.sized_anchors(), self.piece_size)
    }

    /// Validate the record and replay it onto `board`
    ///
    /// Stored variants are restored on the tiles that were placed. Returns
    /// the number of tiles placed; anchors that fail to place are skipped.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`LayoutData::validate`], or
    /// `InvalidLayout` if the board uses a different piece size
    pub fn apply_to<O: BoardObserver>(&self, board: &mut Board<O>) -> Result<usize> {
        self.validate()?;

        if self.piece_size != board.piece_size() {
            return Err(invalid_layout(&format!(
                "layout uses pieceSize {} but the board uses {}",
                self.piece_size,
                board.piece_size()
            )));
        }

        let tiles = self.sized_anchors();
        let placed = board.reconstruct_sized(&tiles);

        if let Some(variants) = &self.piece_variant {
            for (&(anchor, _), &variant) in tiles.iter().zip(variants) {
                let Some(tile) = board
                    .occupant_at(anchor)
                    .filter(|&tile| board.anchor_of(tile) == Some(anchor))
                else {
                    continue;
                };
                board.set_variant(tile, Variant(variant))?;
            }
        }

        Ok(placed)
    }

    /// Read a layout from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid
    /// layout record
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_path(path, "open")?;
        serde_json::from_reader(BufReader::new(file)).with_path(path, "parse")
    }

    /// Write the layout as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_path(path, "create")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).with_path(path, "write")?;
        writer.flush().with_path(path, "flush")
    }
}
