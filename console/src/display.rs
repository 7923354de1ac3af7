//! Console rendering of the board.
use std::fmt;

use codenames::{
    board::{Card, CellIdentity, Grid, Team},
    Game,
};

/// Display helper that prints a team's name.
pub struct TeamName(pub Team);

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            Team::Red => "Red",
            Team::Blue => "Blue",
        })
    }
}

/// Single-letter tag for an identity.
fn abbrev(identity: CellIdentity) -> &'static str {
    match identity {
        CellIdentity::Red => "R",
        CellIdentity::Blue => "B",
        CellIdentity::Assassin => "X",
        CellIdentity::Neutral => "N",
        CellIdentity::Unrevealed => "?",
    }
}

/// A card as shown to operatives: the word, tagged with its identity once revealed.
struct PublicCell<'a>(&'a Card);

impl fmt::Display for PublicCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_revealed() {
            f.pad(&format!("[{}] {}", abbrev(self.0.identity()), self.0.word()))
        } else {
            f.pad(self.0.word())
        }
    }
}

/// A card as shown to spymasters: every word carries its true identity, revealed cards
/// are bracketed.
struct KeyCell<'a>(&'a Card, CellIdentity);

impl fmt::Display for KeyCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_revealed() {
            f.pad(&format!("[{}] {}", abbrev(self.1), self.0.word()))
        } else {
            f.pad(&format!("({}) {}", abbrev(self.1), self.0.word()))
        }
    }
}

/// Print the cards as operatives see them.
pub fn show_words(words: &Grid<Card>) {
    let width = column_width(words);
    show_board(
        words.side(),
        width,
        words.rows().map(|row| row.iter().map(PublicCell)),
    );
}

/// Print the cards with the key overlaid, for spymasters.
pub fn show_key(game: &Game) {
    let words = game.board().cards();
    let key = game.key();
    let width = column_width(words);
    show_board(
        words.side(),
        width,
        words.rows().zip(key.rows()).map(|(cards, identities)| {
            cards
                .iter()
                .zip(identities.iter().copied())
                .map(|(card, identity)| KeyCell(card, identity))
        }),
    );
}

/// Width of a column wide enough for the longest word plus its tag.
fn column_width(words: &Grid<Card>) -> usize {
    words
        .iter()
        .map(|(_, card)| card.word().chars().count())
        .max()
        .unwrap_or(0)
        + 6
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items. Rows are numbered by `x`, columns by `y`.
fn show_board(
    side: usize,
    width: usize,
    rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>,
) {
    print!("   ");
    for y in 0..side {
        print!("{:^width$}", y, width = width);
    }
    println!();
    for (x, row) in rows.enumerate() {
        print!("{:>2} ", x);
        for cell in row {
            print!("{:^width$}", cell, width = width);
        }
        println!();
    }
}
