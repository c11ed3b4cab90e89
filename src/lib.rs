//! Perceptual duplicate detection for a directory of images.
//!
//! The pipeline runs in four stages: list candidate files, fingerprint them
//! concurrently, cluster the fingerprints, and build a keep/delete report.
//! [`find_duplicates`] runs the first three; [`core::report::build_report`]
//! renders the result.

pub mod core;

use crate::core::duplicate::cluster;
use crate::core::extract::{ExtractError, extract_all_with_progress};
use crate::core::scanner::{ScanError, scan_directory};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

pub use crate::core::duplicate::DuplicateGroup;
pub use crate::core::image::{Fingerprint, ImageRecord};
pub use crate::core::report::{Report, build_report};

pub const DEFAULT_MAX_DISTANCE: u32 = 10;
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Error)]
pub enum DedupeError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Clone)]
pub struct DedupeOptions {
    /// Largest Hamming distance at which two images count as duplicates.
    pub max_distance: u32,
    /// Number of concurrent fingerprint workers.
    pub workers: usize,
    /// Draw a spinner while scanning and a progress bar while hashing, on stderr.
    pub show_progress: bool,
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            workers: DEFAULT_WORKERS,
            show_progress: false,
        }
    }
}

/// Outcome of one pass over a directory.
#[derive(Debug, Clone)]
pub struct DedupeRun {
    /// Files that matched an image extension.
    pub candidates: usize,
    /// Successfully fingerprinted images, sorted by path.
    pub records: Vec<ImageRecord>,
    pub groups: Vec<DuplicateGroup>,
}

impl DedupeRun {
    pub fn images_processed(&self) -> usize {
        self.records.len()
    }

    /// Candidates that could not be opened, decoded or hashed.
    pub fn skipped(&self) -> usize {
        self.candidates - self.records.len()
    }
}

/// Scan `dir`, fingerprint its images and group the duplicates.
///
/// Records are sorted by path before clustering, so the same directory
/// always yields the same groups regardless of worker completion order.
pub fn find_duplicates(dir: &Path, options: &DedupeOptions) -> Result<DedupeRun, DedupeError> {
    let spinner = scanning_spinner(options.show_progress);
    let scanned = benchmark("scanning directory", || scan_directory(dir));
    spinner.finish_and_clear();
    let candidates = scanned?;
    log::info!(
        "Found {} candidate image(s) in {}",
        candidates.len(),
        dir.display()
    );

    let progress = if options.show_progress {
        hashing_progress(candidates.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let mut records = benchmark("hashing all images", || {
        extract_all_with_progress(&candidates, options.workers, &progress)
    })?;
    progress.finish_and_clear();

    records.sort_by(|a, b| a.path.cmp(&b.path));
    let skipped = candidates.len() - records.len();
    if skipped > 0 {
        log::info!("Skipped {} file(s) that could not be fingerprinted", skipped);
    }

    let groups = benchmark("clustering", || cluster(&records, options.max_distance));

    Ok(DedupeRun {
        candidates: candidates.len(),
        records,
        groups,
    })
}

fn scanning_spinner(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("Scanning for images…");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn hashing_progress(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message("hashing");
    bar
}

/// Run `f()`, log how long it took (with `label`), and return its result.
fn benchmark<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    log::info!("⏱ {} took {:.2?}", label, start.elapsed());
    result
}
