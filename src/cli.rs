//! Command-line front-end.
//!
//! Grammar: positional card groups, where every two-card token is a seat
//! and an optional trailing three-to-five-card token is the board:
//!
//!   holdem-odds AcAd KcKd
//!   holdem-odds AcAd KcKd 2h3s4d --division 1
//!
//! Exit codes: 0 on success, 2 on invalid input, 130 when the query was
//! cancelled before completing.

use clap::Parser;
use colored::Colorize;

use crate::cards::{parse_cards, Card};
use crate::display;
use crate::error::{OddsError, OddsResult};
use crate::odds::{compute_odds, OddsOptions};

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Exact and progressively-refined Texas Hold'em equity",
    after_help = "Cards are rank (2-9, T, J, Q, K, A) plus suit (c, d, h, s), \
                  e.g. `holdem-odds AcAd KcKd 2h3s4d`."
)]
struct Args {
    /// Card groups: each 2-card token is a seat, a trailing 3-5 card
    /// token is the board.
    #[arg(required = true)]
    groups: Vec<String>,

    /// Stratification divisor (default: 32 preflop, 1 otherwise).
    #[arg(long)]
    division: Option<u64>,

    /// Worker thread count (default: all cores but one).
    #[arg(long)]
    workers: Option<usize>,

    /// Suppress progress output on stderr.
    #[arg(long)]
    quiet: bool,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// Split the positional tokens into seats and the optional board.
fn parse_groups(groups: &[String]) -> OddsResult<(Vec<Vec<Card>>, Vec<Card>)> {
    let mut seats: Vec<Vec<Card>> = Vec::new();
    let mut table: Vec<Card> = Vec::new();

    for token in groups {
        let cards = parse_cards(token)?;
        match cards.len() {
            2 if table.is_empty() => seats.push(cards),
            3..=5 if table.is_empty() => table = cards,
            // Anything else, or any group after the board token.
            _ => return Err(OddsError::ParseCard(token.clone())),
        }
    }
    Ok((seats, table))
}

pub fn run() -> i32 {
    let args = Args::parse();
    match run_query(&args) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            2
        }
    }
}

fn run_query(args: &Args) -> OddsResult<i32> {
    let (seats, table) = parse_groups(&args.groups)?;

    let mut options = OddsOptions {
        division: args.division,
        worker_count: args.workers,
        ..Default::default()
    };
    if !args.quiet {
        options.progress = Some(Box::new(|fraction: f64, status: &str| {
            eprint!("\r{:>5.1}%  {:<40}", fraction * 100.0, status);
        }));
    }

    let odds = compute_odds(&seats, &table, &options)?;
    if !args.quiet {
        eprintln!();
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&odds).expect("equity record serializes")
        );
    } else {
        println!("{}", display::odds_table(&seats, &odds));
        for line in display::summary_lines(&seats, &odds) {
            println!("{}", line);
        }
        println!("Boards counted: {}", odds.boards_counted);
        if !odds.completed {
            println!("{}", "partial result (cancelled)".yellow());
        }
    }

    Ok(if odds.completed { 0 } else { 130 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn seats_only() {
        let (seats, table) = parse_groups(&groups(&["AcAd", "KcKd"])).unwrap();
        assert_eq!(seats.len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn seats_and_board() {
        let (seats, table) = parse_groups(&groups(&["AcAd", "KcKd", "2h3s4d"])).unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn board_must_be_last() {
        assert!(parse_groups(&groups(&["AcAd", "2h3s4d", "KcKd"])).is_err());
    }

    #[test]
    fn rejects_six_card_group() {
        assert!(parse_groups(&groups(&["AcAd", "2h3s4d5c6h7s"])).is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(parse_groups(&groups(&["AcAd", "KxKd"])).is_err());
    }

    #[test]
    fn cli_args_parse() {
        let args =
            Args::try_parse_from(["holdem-odds", "AcAd", "KcKd", "--division", "8", "--quiet"])
                .unwrap();
        assert_eq!(args.division, Some(8));
        assert!(args.quiet);
        assert!(!args.json);
        assert_eq!(args.groups.len(), 2);
    }
}
