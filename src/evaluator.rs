//! Seven-card hand evaluator.
//!
//! Returns a packed u32 score where higher = better hand. Scores compare
//! directly with `>` / `<` / `==`; equality means a split pot. Use
//! `HandRank::from_score` when the category or kickers need inspecting.
//!
//! Encoding (24 bits used):
//!   bits 23-20: category (1=High Card .. 10=Royal Flush)
//!   bits 19-16: primary rank value (2-14)
//!   bits 15-12: secondary rank value
//!   bits 11-8:  kicker 1
//!   bits  7-4:  kicker 2
//!   bits  3-0:  kicker 3
//!
//! This is the innermost loop of a full enumeration (billions of calls for
//! a zero-board query), so everything runs on rank/suit histograms and a
//! precomputed straight table; no per-call allocation.

use once_cell::sync::Lazy;

use crate::cards::Card;
use crate::hand_rank::HandRank;

// -------------------------------------------------------------------------
// Precomputed straight detection table
// -------------------------------------------------------------------------

/// The wheel's rank set: bits for A, 5, 4, 3, 2. Its high card is Five.
const WHEEL_BITS: u16 = (1 << 12) | 0b1111;

/// For each 13-bit rank set (bit 0 = Two(2) ... bit 12 = Ace(14)), the
/// high card of the best straight within the set (rank value 5-14), or 0
/// when the set holds no straight.
static STRAIGHT_HIGHS: Lazy<[u8; 1 << 13]> = Lazy::new(|| {
    let mut highs = [0u8; 1 << 13];
    for (bits, high) in highs.iter_mut().enumerate() {
        let bits = bits as u16;
        // AND of four shifted copies leaves a bit wherever five
        // consecutive ranks start.
        let runs = bits & (bits >> 1) & (bits >> 2) & (bits >> 3) & (bits >> 4);
        if runs != 0 {
            let top_start = 15 - runs.leading_zeros() as u8;
            *high = top_start + 4 + 2; // run start → high-card rank value
        } else if bits & WHEEL_BITS == WHEEL_BITS {
            *high = 5;
        }
    }
    highs
});

// Category values, as packed into the score's top nibble.
const HIGH_CARD: u8 = 1;
const PAIR: u8 = 2;
const TWO_PAIR: u8 = 3;
const THREE_OF_A_KIND: u8 = 4;
const STRAIGHT: u8 = 5;
const FLUSH: u8 = 6;
const FULL_HOUSE: u8 = 7;
const FOUR_OF_A_KIND: u8 = 8;
const STRAIGHT_FLUSH: u8 = 9;
const ROYAL_FLUSH: u8 = 10;

// -------------------------------------------------------------------------
// Score packing
// -------------------------------------------------------------------------

/// Pack a category and up to five rank values into a single u32, nibble
/// by nibble from bit 16 down. Same layout `HandRank::score` rebuilds.
#[inline]
fn pack(category: u8, ranks: &[u8]) -> u32 {
    let mut score = (category as u32) << 20;
    let mut shift = 16i32;
    for &r in ranks.iter().take(5) {
        score |= (r as u32) << shift;
        shift -= 4;
    }
    score
}

/// The `n` highest ranks present in a 13-bit set, as rank values in
/// descending order. Peels the most significant bit off per step.
#[inline]
fn highest_ranks(mut bits: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    for slot in out.iter_mut().take(n) {
        if bits == 0 {
            break;
        }
        let top = 15 - bits.leading_zeros() as u8;
        *slot = top + 2; // bit position → rank value
        bits &= !(1 << top);
    }
    out
}

// -------------------------------------------------------------------------
// Core evaluator — works for 5, 6, or 7 cards
// -------------------------------------------------------------------------

/// Evaluate a hand of 5-7 distinct cards (encoded as u8 indices 0-51) and
/// return the packed score of the best five-card selection.
///
/// Pure function of the input multiset: card order never matters.
pub fn evaluate_seven(cards: &[u8]) -> u32 {
    debug_assert!(cards.len() >= 5 && cards.len() <= 7);

    let mut rank_counts = [0u8; 13]; // index 0=Two .. 12=Ace
    let mut suit_masks = [0u16; 4]; // 13-bit rank mask per suit
    let mut suit_counts = [0u8; 4];

    for &c in cards {
        let rank = (c >> 2) as usize; // c / 4
        let suit = (c & 0x3) as usize; // c % 4
        rank_counts[rank] += 1;
        suit_masks[suit] |= 1 << rank;
        suit_counts[suit] += 1;
    }

    // --- Flush path (5+ cards of one suit) ---
    // A flush always beats any non-flush hand that can coexist in the same
    // 7 cards (quads or a full house would need 8+ cards alongside one).
    if let Some(suit) = suit_counts.iter().position(|&c| c >= 5) {
        let fmask = suit_masks[suit];
        let sf_high = STRAIGHT_HIGHS[fmask as usize];
        if sf_high > 0 {
            if sf_high == 14 {
                return pack(ROYAL_FLUSH, &[]);
            }
            return pack(STRAIGHT_FLUSH, &[sf_high]);
        }
        let ranks = highest_ranks(fmask, 5);
        return pack(FLUSH, &ranks);
    }

    // --- Non-flush path ---
    evaluate_non_flush(&rank_counts)
}

/// Best five-card non-flush hand from rank frequency counts.
fn evaluate_non_flush(rc: &[u8; 13]) -> u32 {
    // Collect ranks by frequency, scanning high (Ace=12) to low (Two=0)
    // so each list is already sorted descending by rank value.

    // Max possible counts in 7 cards:
    //   quads: 1, trips: 2, pairs: 3, singles: 7
    let mut quad = [0u8; 1];
    let mut nq: usize = 0;
    let mut trip = [0u8; 2];
    let mut nt: usize = 0;
    let mut pair = [0u8; 3];
    let mut np: usize = 0;
    let mut sing = [0u8; 7];
    let mut ns: usize = 0;

    for idx in (0..13usize).rev() {
        let rv = idx as u8 + 2; // rank value 2-14
        match rc[idx] {
            4 => {
                quad[nq] = rv;
                nq += 1;
            }
            3 => {
                trip[nt] = rv;
                nt += 1;
            }
            2 => {
                pair[np] = rv;
                np += 1;
            }
            1 => {
                sing[ns] = rv;
                ns += 1;
            }
            _ => {}
        }
    }

    // Four of a Kind — kicker is the highest remaining rank, whatever
    // group it sits in (quads + a lone king beat quads + a pair of fives).
    if nq >= 1 {
        let kick = trip[0].max(pair[0]).max(sing[0]);
        return pack(FOUR_OF_A_KIND, &[quad[0], kick]);
    }

    // Full House — best trips + best pair; a second set of trips supplies
    // the pair. Three sets of trips cannot fit in 7 cards.
    if nt >= 1 && (np >= 1 || nt >= 2) {
        let pr = if nt >= 2 { trip[1] } else { pair[0] };
        return pack(FULL_HOUSE, &[trip[0], pr]);
    }

    // Straight — over the combined rank presence mask.
    let rank_mask: u16 = (0..13).fold(0u16, |m, i| if rc[i] > 0 { m | (1 << i) } else { m });
    let sh = STRAIGHT_HIGHS[rank_mask as usize];
    if sh > 0 {
        return pack(STRAIGHT, &[sh]);
    }

    // Three of a Kind — trips + 2 best kickers (only singles remain here).
    if nt >= 1 {
        return pack(THREE_OF_A_KIND, &[trip[0], sing[0], sing[1]]);
    }

    // Two Pair — best 2 pairs + best kicker. With three pairs, the third
    // pair's rank may out-kick the remaining singleton.
    if np >= 2 {
        let kick = if np >= 3 && pair[2] > sing[0] {
            pair[2]
        } else {
            sing[0]
        };
        return pack(TWO_PAIR, &[pair[0], pair[1], kick]);
    }

    // One Pair — pair + 3 best kickers.
    if np == 1 {
        return pack(PAIR, &[pair[0], sing[0], sing[1], sing[2]]);
    }

    // High Card — 5 best singles.
    pack(HIGH_CARD, &[sing[0], sing[1], sing[2], sing[3], sing[4]])
}

/// Structured evaluation of 5-7 `Card`s; convenience for consumers
/// outside the hot path.
pub fn evaluate_hand(cards: &[Card]) -> HandRank {
    let indices: Vec<u8> = cards.iter().map(|c| c.index()).collect();
    HandRank::from_score(evaluate_seven(&indices))
}
