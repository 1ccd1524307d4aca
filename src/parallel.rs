//! Worker-per-file fan-out.
//!
//! Files are independent, so they are split into chunks and each chunk runs
//! on its own `std::thread`. Completion order is arbitrary; outcomes are
//! re-sorted by input position before reporting. A failed file never stops
//! its siblings.

use crate::error::Result;
use indicatif::ProgressBar;
use log::{error, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self { num_threads: cpus }
    }
}

/// Result of processing one file.
#[derive(Debug)]
pub struct FileOutcome<T> {
    /// Position in the input list
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<T>,
}

/// Run `work` over every file and return outcomes in input order.
pub fn process_files<T, F>(
    files: &[PathBuf],
    config: &ParallelConfig,
    progress: &ProgressBar,
    work: F,
) -> Vec<FileOutcome<T>>
where
    T: Send + 'static,
    F: Fn(&Path) -> Result<T> + Send + Sync + 'static,
{
    if files.is_empty() {
        return vec![];
    }

    let num_threads = config.num_threads.min(files.len()).max(1);
    let chunk_size = files.len().div_ceil(num_threads);
    let work = Arc::new(work);

    let chunks: Vec<Vec<(usize, PathBuf)>> = files
        .iter()
        .cloned()
        .enumerate()
        .collect::<Vec<_>>()
        .chunks(chunk_size)
        .map(|c| c.to_vec())
        .collect();

    let handles: Vec<JoinHandle<Vec<FileOutcome<T>>>> = chunks
        .into_iter()
        .map(|chunk| {
            let work = Arc::clone(&work);
            let progress = progress.clone();
            thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|(index, path)| {
                        let result = work(&path);
                        progress.inc(1);
                        FileOutcome { index, path, result }
                    })
                    .collect()
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(files.len());
    for handle in handles {
        match handle.join() {
            Ok(chunk_outcomes) => outcomes.extend(chunk_outcomes),
            Err(_) => error!("worker thread panicked; its files are missing from the report"),
        }
    }

    outcomes.sort_by_key(|o| o.index);
    outcomes
}

#[derive(Debug, Default)]
pub struct Stats {
    pub files_processed: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    /// Records (or history files) written across all files
    pub records_written: usize,
    pub failures: Vec<(PathBuf, String)>,
    pub elapsed: Duration,
}

impl Stats {
    /// Tally per-file outcomes where `Ok(n)` is the number of records the
    /// file produced.
    pub fn from_outcomes(outcomes: Vec<FileOutcome<usize>>) -> Self {
        let mut stats = Stats::default();
        for outcome in outcomes {
            stats.files_processed += 1;
            match outcome.result {
                Ok(count) => {
                    stats.files_succeeded += 1;
                    stats.records_written += count;
                }
                Err(e) => {
                    warn!("{}: {}", outcome.path.display(), e);
                    stats.files_failed += 1;
                    stats.failures.push((outcome.path, e.to_string()));
                }
            }
        }
        stats
    }
}
