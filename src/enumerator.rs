//! Board enumerator: completions of a partial board from the unused deck.
//!
//! Completions are unordered (5-T)-subsets of the unused cards, visited in
//! lexicographic order over the canonical card encoding. Each completion
//! has a positional index i in that order; stratified subsampling keeps
//! exactly the completions with `i % division ∈ strata`. Strata are
//! pairwise disjoint and their union over {0..division-1} reproduces the
//! full enumeration, which is what lets the refinement loop add strata
//! without redoing earlier work.

/// Deck indices (0-51) not claimed by `dead`, ascending. This is the
/// draw pool for board completions.
pub fn live_deck(dead: &[u8]) -> Vec<u8> {
    let mut used: u64 = 0;
    for &d in dead {
        used |= 1 << d;
    }
    (0..52u8).filter(|&c| used & (1 << c) == 0).collect()
}

/// Binomial coefficient C(n, k).
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

/// Enumerates completions of a partial board.
pub struct BoardEnumerator {
    table: Vec<u8>,
    unused: Vec<u8>,
}

impl BoardEnumerator {
    /// `table` is the fixed community cards (0, 3, 4, or 5 of them);
    /// `unused` is the live deck to draw from. The draw order is defined
    /// by the card encoding, so `unused` is sorted here once.
    pub fn new(table: Vec<u8>, mut unused: Vec<u8>) -> Self {
        debug_assert!(table.len() <= 5);
        unused.sort_unstable();
        BoardEnumerator { table, unused }
    }

    /// Community cards still to draw.
    pub fn draws_needed(&self) -> usize {
        5 - self.table.len()
    }

    /// Total number of completions, C(|unused|, 5-T).
    pub fn board_count(&self) -> u64 {
        binomial(self.unused.len(), self.draws_needed())
    }

    /// Number of completions in the given strata under `division`.
    ///
    /// Stratum s holds indices s, s+division, s+2·division, ... so its
    /// size is ceil((total - s) / division).
    pub fn stratum_board_count(&self, division: u64, strata: &[u64]) -> u64 {
        let total = self.board_count();
        strata
            .iter()
            .filter(|&&s| s < division)
            .map(|&s| (total.saturating_sub(s) + division - 1) / division)
            .sum()
    }

    /// Materialize every completion whose positional index i satisfies
    /// `i % division ∈ strata`, as full 5-card boards (fixed table cards
    /// first, then the drawn cards in ascending encoding order).
    ///
    /// `division = 1, strata = [0]` is the full enumeration. A full board
    /// (T = 5) yields the single fixed board with no draws.
    pub fn collect_boards(&self, division: u64, strata: &[u64]) -> Vec<[u8; 5]> {
        debug_assert!(division >= 1);

        let mut keep = vec![false; division as usize];
        for &s in strata {
            if s < division {
                keep[s as usize] = true;
            }
        }

        let t = self.table.len();
        let k = self.draws_needed();
        let mut board = [0u8; 5];
        board[..t].copy_from_slice(&self.table);

        if k == 0 {
            return if keep[0] { vec![board] } else { vec![] };
        }

        let n = self.unused.len();
        if n < k {
            return vec![];
        }

        let mut out = Vec::with_capacity(self.stratum_board_count(division, strata) as usize);

        // Iterative k-combination walk: `cursor` holds ascending positions
        // into the sorted unused deck, advanced odometer-style.
        let mut cursor: Vec<usize> = (0..k).collect();
        let mut i: u64 = 0;
        loop {
            if keep[(i % division) as usize] {
                for (j, &pos) in cursor.iter().enumerate() {
                    board[t + j] = self.unused[pos];
                }
                out.push(board);
            }
            i += 1;

            // Advance to the next combination in lexicographic order.
            let mut slot = k;
            loop {
                if slot == 0 {
                    return out;
                }
                slot -= 1;
                cursor[slot] += 1;
                if cursor[slot] <= n - k + slot {
                    break;
                }
            }
            for j in (slot + 1)..k {
                cursor[j] = cursor[j - 1] + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enumerator(table: &[u8], dead_extra: &[u8]) -> BoardEnumerator {
        let mut dead = table.to_vec();
        dead.extend_from_slice(dead_extra);
        BoardEnumerator::new(table.to_vec(), live_deck(&dead))
    }

    #[test]
    fn live_deck_excludes_dead_cards() {
        let deck = live_deck(&[0, 1, 2, 3]);
        assert_eq!(deck.len(), 48);
        assert!(!deck.contains(&0));
        assert!(!deck.contains(&3));
        assert!(deck.contains(&4));
        assert_eq!(live_deck(&[]).len(), 52);
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(45, 2), 990);
        assert_eq!(binomial(48, 5), 1_712_304);
        assert_eq!(binomial(45, 5), 1_221_759);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 5), 0);
    }

    #[test]
    fn full_board_emits_single_entry() {
        let e = enumerator(&[0, 1, 2, 3, 4], &[]);
        let boards = e.collect_boards(1, &[0]);
        assert_eq!(boards, vec![[0, 1, 2, 3, 4]]);
        assert_eq!(e.board_count(), 1);
    }

    #[test]
    fn flop_count_matches_binomial() {
        // Flop + 2 hole cards each for 2 seats → 45 unused, draw 2.
        let e = enumerator(&[0, 1, 2], &[10, 11, 20, 21]);
        assert_eq!(e.board_count(), 990);
        let boards = e.collect_boards(1, &[0]);
        assert_eq!(boards.len(), 990);
    }

    #[test]
    fn enumeration_is_lexicographic_and_unique() {
        let e = enumerator(&[0, 1, 2, 3], &[10, 11, 20, 21]);
        let boards = e.collect_boards(1, &[0]);
        assert_eq!(boards.len(), 44);
        for pair in boards.windows(2) {
            assert!(pair[0][4] < pair[1][4], "draws must ascend");
        }
    }

    #[test]
    fn strata_partition_the_enumeration() {
        let e = enumerator(&[0, 1, 2], &[10, 11, 20, 21]);
        let full = e.collect_boards(1, &[0]);

        let division = 4u64;
        let mut recombined = Vec::new();
        for s in 0..division {
            let boards = e.collect_boards(division, &[s]);
            assert_eq!(boards.len() as u64, e.stratum_board_count(division, &[s]));
            recombined.extend(boards);
        }

        // Disjoint strata with the right interleaving: stratum s holds the
        // completions at positions s, s+D, s+2D, ... of the full order.
        assert_eq!(recombined.len(), full.len());
        for (s, boards) in (0..division).map(|s| (s, e.collect_boards(division, &[s]))) {
            for (j, board) in boards.iter().enumerate() {
                assert_eq!(*board, full[s as usize + j * division as usize]);
            }
        }

        // Union of all strata at once equals the full enumeration in order.
        let all: Vec<u64> = (0..division).collect();
        assert_eq!(e.collect_boards(division, &all), full);
    }

    #[test]
    fn stratum_sizes_differ_by_at_most_one() {
        let e = enumerator(&[0, 1, 2], &[10, 11, 20, 21]);
        let division = 8u64;
        let sizes: Vec<u64> = (0..division)
            .map(|s| e.collect_boards(division, &[s]).len() as u64)
            .collect();
        let min = *sizes.iter().min().unwrap();
        let max = *sizes.iter().max().unwrap();
        assert!(max - min <= 1, "sizes {:?}", sizes);
        assert_eq!(sizes.iter().sum::<u64>(), e.board_count());
    }

    #[test]
    fn division_larger_than_space_still_covers() {
        // 44 completions, division 64: strata 44..63 are empty but the
        // union still reproduces everything.
        let e = enumerator(&[0, 1, 2, 3], &[10, 11, 20, 21]);
        let all: Vec<u64> = (0..64).collect();
        assert_eq!(e.collect_boards(64, &all).len(), 44);
        assert_eq!(e.collect_boards(64, &[60]).len(), 0);
    }
}
