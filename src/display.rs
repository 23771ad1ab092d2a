//! Terminal rendering of equity results.
//!
//! Presentation only: everything here derives from the `Odds` record and
//! the input cards, nothing feeds back into the engine.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use itertools::Itertools;

use crate::cards::Card;
use crate::odds::Odds;

/// "AcAd" style label for a card group.
pub fn cards_label(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).join("")
}

/// Seat index (by equity) that leads the field.
fn best_seat(odds: &Odds) -> usize {
    (0..odds.seats())
        .max_by(|&a, &b| {
            odds.equity_pct(a)
                .partial_cmp(&odds.equity_pct(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0)
}

/// Render the per-seat breakdown as a table; the leading seat is green.
pub fn odds_table(seats: &[Vec<Card>], odds: &Odds) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Seat", "Hand", "Win %", "Tie %", "Equity %", "Wins", "Ties",
    ]);

    let best = best_seat(odds);
    for i in 0..odds.seats() {
        let cells = vec![
            Cell::new(i + 1),
            Cell::new(cards_label(&seats[i])),
            Cell::new(format!("{:.2}", odds.win_pct[i])),
            Cell::new(format!("{:.2}", odds.tie_pct[i])),
            Cell::new(format!("{:.2}", odds.equity_pct(i))),
            Cell::new(odds.wins[i]),
            Cell::new(odds.ties[i]),
        ];
        if i == best {
            table.add_row(cells.into_iter().map(|c| c.fg(Color::Green)));
        } else {
            table.add_row(cells);
        }
    }
    table
}

/// One summary line per seat, in the classic calculator phrasing.
pub fn summary_lines(seats: &[Vec<Card>], odds: &Odds) -> Vec<String> {
    (0..odds.seats())
        .map(|i| {
            format!(
                "Seat {} ({}): wins {} ({:.2}%), ties {} ({:.2}%), total equity {:.2}%",
                i + 1,
                cards_label(&seats[i]),
                odds.wins[i],
                odds.win_pct[i],
                odds.ties[i],
                odds.tie_pct[i],
                odds.equity_pct(i),
            )
        })
        .collect()
}
