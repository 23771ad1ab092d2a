//! Card model: ranks, suits, deck enumeration, and text parsing.
//!
//! Text format is rank letter (2-9, T, J, Q, K, A) followed by suit letter
//! (c, d, h, s), case-insensitive: "Ah", "td", "2C".

use std::fmt;

use crate::error::{OddsError, OddsResult};

/// Card ranks from Two (low) to Ace (high). Ace is always 14; the wheel
/// straight (A-2-3-4-5) is handled inside the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

/// The four suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

impl Rank {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Spelled-out name, for result display ("Full House, Aces over Kings").
    pub fn plural_name(self) -> &'static str {
        match self {
            Rank::Two => "Twos",
            Rank::Three => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Six => "Sixes",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }
}

impl Suit {
    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

/// A single playing card. Equality is on both fields; ordering is
/// lexicographic (rank, then suit), matching the deck's canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Canonical deck position, 0 (2s) through 51 (Ac): rank-major,
    /// suit-minor, so ascending indices are ascending cards. The hot
    /// paths (evaluator, enumerator) work on these indices directly.
    pub const fn index(self) -> u8 {
        (self.rank.value() - 2) * 4 + self.suit as u8
    }

    /// Inverse of [`Card::index`].
    pub const fn from_index(index: u8) -> Self {
        Card::new(ALL_RANKS[(index >> 2) as usize], ALL_SUITS[(index & 3) as usize])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// All 52 cards in stable (rank, suit) order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &rank in &ALL_RANKS {
        for &suit in &ALL_SUITS {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Parse a two-character card like "Ah" or "tD" (case-insensitive).
pub fn parse_card(notation: &str) -> OddsResult<Card> {
    let chars: Vec<char> = notation.trim().chars().collect();
    if chars.len() != 2 {
        return Err(OddsError::ParseCard(notation.to_string()));
    }

    let rank = match chars[0].to_ascii_uppercase() {
        '2' => Rank::Two,
        '3' => Rank::Three,
        '4' => Rank::Four,
        '5' => Rank::Five,
        '6' => Rank::Six,
        '7' => Rank::Seven,
        '8' => Rank::Eight,
        '9' => Rank::Nine,
        'T' => Rank::Ten,
        'J' => Rank::Jack,
        'Q' => Rank::Queen,
        'K' => Rank::King,
        'A' => Rank::Ace,
        _ => return Err(OddsError::ParseCard(notation.to_string())),
    };

    let suit = match chars[1].to_ascii_lowercase() {
        's' => Suit::Spades,
        'h' => Suit::Hearts,
        'd' => Suit::Diamonds,
        'c' => Suit::Clubs,
        _ => return Err(OddsError::ParseCard(notation.to_string())),
    };

    Ok(Card::new(rank, suit))
}

/// Parse a run of concatenated cards like "2h3s4d" into a list.
pub fn parse_cards(notation: &str) -> OddsResult<Vec<Card>> {
    let trimmed = notation.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(OddsError::ParseCard(trimmed.to_string()));
    }

    let mut cards = Vec::with_capacity(chars.len() / 2);
    for pair in chars.chunks(2) {
        let token: String = pair.iter().collect();
        cards.push(parse_card(&token)?);
    }
    Ok(cards)
}
