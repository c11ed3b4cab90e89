//! Concurrent fingerprint extraction.
//!
//! Paths are queued up front on a bounded channel that is closed once every
//! path is in it. A fixed-size pool of workers drains the queue, and
//! finished records come back over a second channel after the pool's scope
//! has joined. Records therefore arrive in completion order, which differs
//! from run to run.

use crate::core::hash::PerceptualHasher;
use crate::core::image::ImageRecord;
use indicatif::ProgressBar;
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to start fingerprint workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Fingerprint every path on `worker_count` workers.
///
/// Files that cannot be opened, decoded or hashed are logged and left out
/// of the result. A `worker_count` of zero runs a single worker.
pub fn extract_all(
    paths: &[PathBuf],
    worker_count: usize,
) -> Result<Vec<ImageRecord>, ExtractError> {
    extract_all_with_progress(paths, worker_count, &ProgressBar::hidden())
}

/// Same as [`extract_all`], advancing `progress` once per processed path.
pub fn extract_all_with_progress(
    paths: &[PathBuf],
    worker_count: usize,
    progress: &ProgressBar,
) -> Result<Vec<ImageRecord>, ExtractError> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }
    let workers = worker_count.max(1);

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("fingerprint-{}", i))
        .build()?;

    let (work_tx, work_rx) = crossbeam_channel::bounded::<&Path>(paths.len());
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<ImageRecord>();

    // Capacity covers every path and `work_rx` is still held, so neither
    // blocking nor a disconnect can happen here.
    for path in paths {
        let _ = work_tx.send(path.as_path());
    }
    drop(work_tx);

    pool.scope(|scope| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move |_| {
                let hasher = PerceptualHasher::new();
                for path in work_rx.iter() {
                    match hasher.fingerprint_file(path) {
                        Ok(record) => {
                            log::debug!(
                                "Hashed {} ({}x{}) -> {}",
                                path.display(),
                                record.width,
                                record.height,
                                record.fingerprint
                            );
                            // The receiver outlives the pool, so this cannot fail.
                            let _ = result_tx.send(record);
                        }
                        Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
                    }
                    progress.inc(1);
                }
            });
        }
    });
    drop(result_tx);

    Ok(result_rx.into_iter().collect())
}
