//! Texas Hold'em equity engine.
//!
//! Given each seat's two hole cards and 0, 3, 4, or 5 community cards,
//! [`compute_odds`] enumerates every completion of the board (or a
//! deterministic stratified slice of them), evaluates every seven-card
//! showdown, and returns per-seat win/tie counts and percentages. For the
//! zero-board query the enumeration is consumed in doubling stratum
//! passes, so a usable estimate arrives quickly and refines toward the
//! exact answer without redoing work.
//!
//! ```no_run
//! use holdem_odds::{compute_odds, OddsOptions};
//! use holdem_odds::cards::parse_cards;
//!
//! let seats = vec![parse_cards("AcAd")?, parse_cards("KcKd")?];
//! let odds = compute_odds(&seats, &[], &OddsOptions::default())?;
//! println!("AA equity: {:.1}%", odds.equity_pct(0));
//! # Ok::<(), holdem_odds::OddsError>(())
//! ```

pub mod cards;
pub mod cli;
pub mod display;
pub mod driver;
pub mod enumerator;
pub mod error;
pub mod evaluator;
pub mod hand_rank;
pub mod odds;
pub mod refine;

pub use cards::{Card, Rank, Suit};
pub use error::{OddsError, OddsResult};
pub use evaluator::{evaluate_hand, evaluate_seven};
pub use hand_rank::{HandCategory, HandRank};
pub use odds::{compute_odds, Odds, OddsOptions};
