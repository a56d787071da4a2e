//! Multi-layout progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Stages every layout passes through, in order
pub const LAYOUT_STAGES: [&str; 4] = ["load", "replay", "pair", "write"];

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:20.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Layouts: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Per-layout display state
#[derive(Clone, Debug, Default)]
struct LayoutState {
    name: String,
    stage: usize,
    note: String,
}

/// Coordinates progress display for batch layout processing
///
/// Small batches get one bar per layout; past the threshold a batch bar is
/// added and the per-layout bars show a rolling window of the latest files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    layout_bars: Vec<ProgressBar>,
    states: Vec<LayoutState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            layout_bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create bars for `layout_count` layouts
    pub fn initialize(&mut self, layout_count: usize) {
        if layout_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(layout_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..layout_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(LAYOUT_STAGES.len() as u64);
            bar.set_style(STAGE_STYLE.clone());
            self.layout_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking a layout file
    pub fn start_layout(&mut self, index: usize, path: &Path) {
        if index >= self.states.len() {
            self.states.resize(index + 1, LayoutState::default());
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = LayoutState {
                name: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
                stage: 0,
                note: String::new(),
            };
        }
        self.update_bars();
    }

    /// Report that a layout finished one more stage
    pub fn advance(&mut self, index: usize, note: &str) {
        if let Some(state) = self.states.get_mut(index) {
            state.stage = (state.stage + 1).min(LAYOUT_STAGES.len());
            state.note = note.to_string();
        }
        self.update_bars();
    }

    /// Mark a layout as done and update batch progress
    pub fn complete_layout(&mut self, index: usize, summary: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.stage = LAYOUT_STAGES.len();
            state.name = format!("✓ {}", state.name);
            state.note = summary.to_string();
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All layouts processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started layouts on the available bars
    fn update_bars(&self) {
        let active: Vec<&LayoutState> = self
            .states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let first_visible = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(first_visible..).unwrap_or(&[]);

        for (bar_index, bar) in self.layout_bars.iter().enumerate() {
            if let Some(state) = visible.get(bar_index) {
                bar.set_position(state.stage as u64);
                bar.set_prefix(state.name.clone());
                let next_stage = LAYOUT_STAGES.get(state.stage).copied().unwrap_or("done");
                if state.note.is_empty() {
                    bar.set_message(next_stage.to_string());
                } else {
                    bar.set_message(format!("{next_stage} ({})", state.note));
                }
            } else {
                bar.set_position(0);
                bar.set_prefix(String::new());
                bar.set_message(String::new());
            }
        }
    }
}
