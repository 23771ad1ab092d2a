//! Parallel showdown driver.
//!
//! Boards are split into chunks (about 10 per worker so stragglers even
//! out), each chunk is evaluated into a private tally on a rayon pool,
//! and the tallies are summed at the end. Summation of non-negative
//! counters commutes, so the result is bit-identical for any worker
//! count or chunk order.
//!
//! Cancellation is cooperative: the flag is read once per chunk, chunks
//! already running finish, unstarted chunks contribute nothing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::evaluator::evaluate_seven;

/// Progress callback: completed fraction in [0, 1] plus a status string.
pub type ProgressFn<'a> = dyn Fn(f64, &str) + Send + Sync + 'a;

/// Chunks-per-worker target. More chunks than workers keeps the pool busy
/// when chunks finish at different speeds.
const CHUNKS_PER_WORKER: usize = 10;

/// Progress updates are coalesced to roughly this interval so the
/// reporting never starves the workers.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Per-query win/tie counters. One seat per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub wins: Vec<u64>,
    pub ties: Vec<u64>,
    pub boards_counted: u64,
}

impl Tally {
    pub fn new(seats: usize) -> Self {
        Tally {
            wins: vec![0; seats],
            ties: vec![0; seats],
            boards_counted: 0,
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        for (w, o) in self.wins.iter_mut().zip(&other.wins) {
            *w += o;
        }
        for (t, o) in self.ties.iter_mut().zip(&other.ties) {
            *t += o;
        }
        self.boards_counted += other.boards_counted;
    }
}

/// Driver knobs for one run.
pub struct RunConfig<'a> {
    pub workers: usize,
    pub progress: Option<&'a ProgressFn<'a>>,
    pub cancel: Option<&'a AtomicBool>,
}

/// Default worker count: all available cores but one, at least one.
pub fn default_worker_count() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    cores.saturating_sub(1).max(1)
}

/// Evaluate one board's showdown and record the outcome.
///
/// Exactly one outcome per board: a single best seat gets a win, two or
/// more seats tied at the best value each get a tie.
fn record_showdown(seats: &[[u8; 2]], board: &[u8; 5], tally: &mut Tally) {
    let mut cards = [0u8; 7];
    cards[2..].copy_from_slice(board);

    let mut best_score = 0u32;
    let mut best_mask = 0u16;
    let mut best_len = 0u32;
    for (i, hole) in seats.iter().enumerate() {
        cards[0] = hole[0];
        cards[1] = hole[1];
        let score = evaluate_seven(&cards);
        if score > best_score {
            best_score = score;
            best_mask = 1 << i;
            best_len = 1;
        } else if score == best_score {
            best_mask |= 1 << i;
            best_len += 1;
        }
    }

    if best_len == 1 {
        tally.wins[best_mask.trailing_zeros() as usize] += 1;
    } else {
        let mut mask = best_mask;
        while mask != 0 {
            let i = mask.trailing_zeros() as usize;
            tally.ties[i] += 1;
            mask &= mask - 1;
        }
    }
    tally.boards_counted += 1;
}

struct ProgressReporter<'a> {
    sink: Option<&'a ProgressFn<'a>>,
    total_chunks: usize,
    last_report: Mutex<Instant>,
}

impl<'a> ProgressReporter<'a> {
    fn new(sink: Option<&'a ProgressFn<'a>>, total_chunks: usize) -> Self {
        ProgressReporter {
            sink,
            total_chunks,
            last_report: Mutex::new(Instant::now()),
        }
    }

    /// Report `done` completed chunks, coalesced to the update interval.
    /// The final chunk always reports so consumers see 1.0.
    fn report(&self, done: usize) {
        let Some(sink) = self.sink else { return };

        if done < self.total_chunks {
            let Ok(mut last) = self.last_report.try_lock() else {
                return;
            };
            if last.elapsed() < PROGRESS_INTERVAL {
                return;
            }
            *last = Instant::now();
        }

        let fraction = done as f64 / self.total_chunks as f64;
        sink(fraction, &format!("{}/{} chunks", done, self.total_chunks));
    }
}

/// Run every board's showdown and reduce the per-chunk tallies.
///
/// Returns a partial tally if cancellation was observed; the caller
/// decides what partial means (the odds layer compares `boards_counted`
/// against the scheduled count).
pub fn run_showdowns(seats: &[[u8; 2]], boards: &[[u8; 5]], cfg: &RunConfig) -> Tally {
    let n = seats.len();
    if boards.is_empty() {
        return Tally::new(n);
    }

    let workers = cfg.workers.max(1);
    let chunk_size = boards.len().div_ceil(workers * CHUNKS_PER_WORKER).max(1);
    let chunks: Vec<&[[u8; 5]]> = boards.chunks(chunk_size).collect();
    let total_chunks = chunks.len();

    let completed = AtomicUsize::new(0);
    let reporter = ProgressReporter::new(cfg.progress, total_chunks);

    // Worker-pool construction only fails on OS thread-spawn failure,
    // which the error policy treats as fatal.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("worker pool construction failed");

    let tallies: Vec<Tally> = pool.install(|| {
        chunks
            .into_par_iter()
            .map(|chunk| {
                let mut tally = Tally::new(n);
                if let Some(flag) = cfg.cancel {
                    if flag.load(Ordering::Relaxed) {
                        return tally;
                    }
                }
                for board in chunk {
                    record_showdown(seats, board, &mut tally);
                }
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                reporter.report(done);
                tally
            })
            .collect()
    });

    let mut total = Tally::new(n);
    for tally in &tallies {
        total.merge(tally);
    }
    total
}
