//! Progressive refinement over board strata.
//!
//! With division D, pass k consumes a doubling batch of strata: {0}, {1},
//! {2,3}, {4..7}, ... until all D are done. Every pass runs the full
//! parallel driver over just its strata, so the first estimate lands fast
//! and each later pass only adds new boards; nothing is recomputed.
//!
//! The running percentages shown between passes follow the weighted mean
//!
//!   pct := (pct · w_before + pct_new · w_new) / (w_before + w_new)
//!
//! with stratum counts as weights. The final record derives its
//! percentages from the exact cumulative counts, so a fully-consumed
//! schedule reproduces the single-pass answer bit for bit.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::driver::{self, ProgressFn, RunConfig, Tally};
use crate::enumerator::BoardEnumerator;
use crate::odds::{Odds, RefreshFn};

/// Number of passes needed to cover `division` strata with the doubling
/// schedule (1, 1, 2, 4, ...).
pub fn pass_count(division: u64) -> usize {
    let mut next = 0u64;
    let mut width = 1u64;
    let mut passes = 0usize;
    while next < division {
        next += width.min(division - next);
        if passes >= 1 {
            width *= 2;
        }
        passes += 1;
    }
    passes
}

fn cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.map(|f| f.load(Ordering::Relaxed)).unwrap_or(false)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_refinement<'a>(
    enumerator: &BoardEnumerator,
    seats: &[[u8; 2]],
    division: u64,
    workers: usize,
    progress: Option<&'a ProgressFn<'a>>,
    refresh: Option<&RefreshFn>,
    cancel: Option<&AtomicBool>,
) -> Odds {
    let n = seats.len();
    let scheduled_total = enumerator.board_count();
    let total_passes = pass_count(division);

    let mut cumulative = Tally::new(n);
    let mut win_pct = vec![0.0f64; n];
    let mut tie_pct = vec![0.0f64; n];
    let mut strata_done = 0u64;

    let mut next = 0u64;
    let mut width = 1u64;
    let mut pass = 0usize;

    while next < division && !cancelled(cancel) {
        let batch: Vec<u64> = (next..(next + width).min(division)).collect();
        let w_new = batch.len() as u64;
        let pass_scheduled = enumerator.stratum_board_count(division, &batch);

        let boards = enumerator.collect_boards(division, &batch);

        // Scale the driver's per-pass fraction into overall schedule
        // progress, and tag the status with the pass number.
        let overall = |fraction: f64, status: &str| {
            if let Some(sink) = progress {
                let f = (strata_done as f64 + fraction * w_new as f64) / division as f64;
                sink(
                    f,
                    &format!("pass {}/{}: {}", pass + 1, total_passes, status),
                );
            }
        };
        let cfg = RunConfig {
            workers,
            progress: if progress.is_some() {
                Some(&overall)
            } else {
                None
            },
            cancel,
        };

        let pass_tally = driver::run_showdowns(seats, &boards, &cfg);
        let pass_complete = pass_tally.boards_counted == pass_scheduled;

        // Raw counts always sum; the running percentages take the
        // stratum-weighted mean of per-pass percentages.
        if pass_tally.boards_counted > 0 {
            for i in 0..n {
                let pw = pass_tally.wins[i] as f64 * 100.0 / pass_tally.boards_counted as f64;
                let pt = pass_tally.ties[i] as f64 * 100.0 / pass_tally.boards_counted as f64;
                if strata_done == 0 {
                    win_pct[i] = pw;
                    tie_pct[i] = pt;
                } else {
                    let w_before = strata_done as f64;
                    win_pct[i] =
                        (win_pct[i] * w_before + pw * w_new as f64) / (w_before + w_new as f64);
                    tie_pct[i] =
                        (tie_pct[i] * w_before + pt * w_new as f64) / (w_before + w_new as f64);
                }
            }
        }
        cumulative.merge(&pass_tally);
        strata_done += w_new;

        if let Some(sink) = refresh {
            sink(&Odds {
                win_pct: win_pct.clone(),
                tie_pct: tie_pct.clone(),
                wins: cumulative.wins.clone(),
                ties: cumulative.ties.clone(),
                boards_counted: cumulative.boards_counted,
                completed: cumulative.boards_counted == scheduled_total,
            });
        }

        if !pass_complete {
            break;
        }

        next += w_new;
        if pass >= 1 {
            width *= 2;
        }
        pass += 1;
    }

    Odds::from_tally(&cumulative, scheduled_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_counts() {
        assert_eq!(pass_count(1), 1);
        assert_eq!(pass_count(2), 2);
        assert_eq!(pass_count(4), 3);
        assert_eq!(pass_count(32), 6);
        assert_eq!(pass_count(64), 7);
        // Non-power-of-two divisions still terminate with a short last pass.
        assert_eq!(pass_count(5), 4);
    }

    #[test]
    fn doubling_schedule_covers_each_stratum_once() {
        let division = 32u64;
        let mut seen = vec![0u32; division as usize];
        let mut next = 0u64;
        let mut width = 1u64;
        let mut pass = 0usize;
        while next < division {
            for s in next..(next + width).min(division) {
                seen[s as usize] += 1;
            }
            next += width.min(division - next);
            if pass >= 1 {
                width *= 2;
            }
            pass += 1;
        }
        assert!(seen.iter().all(|&c| c == 1));
    }
}
