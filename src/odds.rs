//! The odds façade: input validation, orchestration, and the equity record.
//!
//! `compute_odds` is the single entry point. It validates the seats and
//! table, builds the board enumerator over the unused deck, and either
//! runs one exact pass (division 1) or hands off to the progressive
//! refinement loop (division > 1, the zero-board default).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde::Serialize;

use crate::cards::Card;
use crate::driver::{self, ProgressFn, RunConfig, Tally};
use crate::enumerator::{live_deck, BoardEnumerator};
use crate::error::{OddsError, OddsResult};
use crate::refine;

/// Default stratification for the zero-board query. Preflop heads-up has
/// 1,712,304 completions; 32 strata put the first estimate well under a
/// second on commodity hardware.
pub const DEFAULT_DIVISION: u64 = 32;

const MAX_SEATS: usize = 10;

/// Callback receiving each running estimate during refinement.
pub type RefreshFn = dyn Fn(&Odds) + Send + Sync;

/// Per-seat equity breakdown. All arrays are indexed by seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Odds {
    pub win_pct: Vec<f64>,
    pub tie_pct: Vec<f64>,
    pub wins: Vec<u64>,
    pub ties: Vec<u64>,
    pub boards_counted: u64,
    /// True iff every scheduled board was consumed (no cancellation).
    pub completed: bool,
}

impl Odds {
    pub fn seats(&self) -> usize {
        self.wins.len()
    }

    /// Total equity: win% plus an equal share of the tie%.
    pub fn equity_pct(&self, seat: usize) -> f64 {
        self.win_pct[seat] + self.tie_pct[seat] / self.seats() as f64
    }

    /// Build a record with percentages derived from the raw counts.
    pub(crate) fn from_tally(tally: &Tally, scheduled: u64) -> Odds {
        let pct = |count: u64| {
            if tally.boards_counted == 0 {
                0.0
            } else {
                count as f64 * 100.0 / tally.boards_counted as f64
            }
        };
        Odds {
            win_pct: tally.wins.iter().map(|&w| pct(w)).collect(),
            tie_pct: tally.ties.iter().map(|&t| pct(t)).collect(),
            wins: tally.wins.clone(),
            ties: tally.ties.clone(),
            boards_counted: tally.boards_counted,
            completed: tally.boards_counted == scheduled,
        }
    }
}

/// Optional knobs for `compute_odds`. `Default` leaves everything at the
/// documented defaults and attaches no callbacks.
#[derive(Default)]
pub struct OddsOptions {
    /// Stratification divisor; defaults to 32 for an empty table, else 1.
    pub division: Option<u64>,
    /// Worker threads; defaults to all cores but one.
    pub worker_count: Option<usize>,
    /// Progress sink: completed fraction in [0, 1] and a status string,
    /// coalesced to ~10 Hz.
    pub progress: Option<Box<ProgressFn<'static>>>,
    /// Running-estimate sink, called after every refinement pass.
    pub refresh: Option<Box<RefreshFn>>,
    /// Cooperative cancellation flag, polled at chunk boundaries.
    pub cancel: Option<Arc<AtomicBool>>,
}

fn validate(seats: &[Vec<Card>], table: &[Card]) -> OddsResult<()> {
    if seats.len() < 2 {
        return Err(OddsError::InsufficientSeats(seats.len()));
    }
    if seats.len() > MAX_SEATS {
        return Err(OddsError::TooManySeats(seats.len()));
    }
    for (seat, hole) in seats.iter().enumerate() {
        if hole.len() != 2 {
            return Err(OddsError::WrongHoleCount {
                seat,
                count: hole.len(),
            });
        }
    }
    if !matches!(table.len(), 0 | 3 | 4 | 5) {
        return Err(OddsError::IllegalTableSize(table.len()));
    }

    let mut seen: u64 = 0;
    for card in seats.iter().flatten().chain(table.iter()) {
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Err(OddsError::DuplicateCard(*card));
        }
        seen |= bit;
    }
    Ok(())
}

/// Compute each seat's win/tie equity over all completions of the table.
///
/// Validation failures surface before any enumeration starts. A cancelled
/// query is not an error: the partial tally comes back with
/// `completed = false`.
pub fn compute_odds(
    seats: &[Vec<Card>],
    table: &[Card],
    options: &OddsOptions,
) -> OddsResult<Odds> {
    validate(seats, table)?;

    let seat_idx: Vec<[u8; 2]> = seats
        .iter()
        .map(|hole| [hole[0].index(), hole[1].index()])
        .collect();
    let table_idx: Vec<u8> = table.iter().map(|c| c.index()).collect();

    let mut dead: Vec<u8> = seat_idx.iter().flatten().copied().collect();
    dead.extend_from_slice(&table_idx);
    let unused = live_deck(&dead);

    let enumerator = BoardEnumerator::new(table_idx, unused);

    let division = options
        .division
        .unwrap_or(if table.is_empty() { DEFAULT_DIVISION } else { 1 })
        .max(1);
    let workers = options
        .worker_count
        .unwrap_or_else(driver::default_worker_count)
        .max(1);

    let progress = options.progress.as_deref();
    let refresh = options.refresh.as_deref();
    let cancel = options.cancel.as_deref();

    if division == 1 {
        let odds = single_pass(&enumerator, &seat_idx, workers, progress, cancel);
        if let Some(sink) = refresh {
            sink(&odds);
        }
        Ok(odds)
    } else {
        Ok(refine::run_refinement(
            &enumerator,
            &seat_idx,
            division,
            workers,
            progress,
            refresh,
            cancel,
        ))
    }
}

fn single_pass<'a>(
    enumerator: &BoardEnumerator,
    seats: &[[u8; 2]],
    workers: usize,
    progress: Option<&'a ProgressFn<'a>>,
    cancel: Option<&AtomicBool>,
) -> Odds {
    let scheduled = enumerator.board_count();
    if let Some(sink) = progress {
        sink(0.0, &format!("enumerating {} boards", scheduled));
    }

    let boards = enumerator.collect_boards(1, &[0]);
    let cfg = RunConfig {
        workers,
        progress,
        cancel,
    };
    let tally = driver::run_showdowns(seats, &boards, &cfg);
    Odds::from_tally(&tally, scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn seats(groups: &[&str]) -> Vec<Vec<Card>> {
        groups.iter().map(|g| parse_cards(g).unwrap()).collect()
    }

    #[test]
    fn rejects_duplicate_cards() {
        let err = compute_odds(
            &seats(&["AcAd", "AcKd"]),
            &[],
            &OddsOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OddsError::DuplicateCard(_)));

        let table = parse_cards("2h3s4d").unwrap();
        let err = compute_odds(
            &seats(&["AcAd", "2hKd"]),
            &table,
            &OddsOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OddsError::DuplicateCard(_)));
    }

    #[test]
    fn rejects_wrong_hole_count() {
        let err = compute_odds(
            &seats(&["AcAdKc", "KdKh"]),
            &[],
            &OddsOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, OddsError::WrongHoleCount { seat: 0, count: 3 });
    }

    #[test]
    fn rejects_illegal_table_size() {
        let table = parse_cards("2h3s").unwrap();
        let err = compute_odds(&seats(&["AcAd", "KcKd"]), &table, &OddsOptions::default())
            .unwrap_err();
        assert_eq!(err, OddsError::IllegalTableSize(2));
    }

    #[test]
    fn rejects_seat_count_out_of_range() {
        let err =
            compute_odds(&seats(&["AcAd"]), &[], &OddsOptions::default()).unwrap_err();
        assert_eq!(err, OddsError::InsufficientSeats(1));

        let eleven = [
            "2c2d", "3c3d", "4c4d", "5c5d", "6c6d", "7c7d", "8c8d", "9c9d", "TcTd",
            "JcJd", "QcQd",
        ];
        let err = compute_odds(&seats(&eleven), &[], &OddsOptions::default()).unwrap_err();
        assert_eq!(err, OddsError::TooManySeats(11));
    }

    #[test]
    fn completed_board_short_circuits() {
        // Quad twos beat the two-pair board for seat 1.
        let table = parse_cards("2h2s7dAhKh").unwrap();
        let odds = compute_odds(
            &seats(&["AsKs", "2c2d"]),
            &table,
            &OddsOptions::default(),
        )
        .unwrap();
        assert_eq!(odds.boards_counted, 1);
        assert_eq!(odds.wins, vec![0, 1]);
        assert_eq!(odds.ties, vec![0, 0]);
        assert!(odds.completed);
        assert_eq!(odds.win_pct, vec![0.0, 100.0]);
    }

    #[test]
    fn equity_shares_ties_evenly() {
        let odds = Odds {
            win_pct: vec![10.0, 30.0],
            tie_pct: vec![60.0, 60.0],
            wins: vec![1, 3],
            ties: vec![6, 6],
            boards_counted: 10,
            completed: true,
        };
        assert!((odds.equity_pct(0) - 40.0).abs() < 1e-9);
        assert!((odds.equity_pct(1) - 60.0).abs() < 1e-9);
    }
}
