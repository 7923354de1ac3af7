//! Types that make up the game board.

use std::{collections::BTreeSet, convert::TryFrom};

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::EndStatus;

pub use self::{
    coordinate::Coordinate,
    errors::{BoardError, CannotRevealReason, PlacementError, RevealError},
    grid::{Grid, GridShapeError},
    identity::{CellIdentity, NotATeam, Team},
    placements::AgentPlacements,
};

mod coordinate;
mod errors;
mod grid;
mod identity;
mod placements;

/// Build the random number generator used for board generation. A seed gives a
/// reproducible sequence, otherwise the generator is seeded from the OS.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// A single word card on the board.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// The word printed on the card.
    word: String,

    /// The identity of the card as far as the players know. `Unrevealed` until guessed.
    identity: CellIdentity,
}

impl Card {
    /// Create an unrevealed card for the given word.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            identity: CellIdentity::Unrevealed,
        }
    }

    /// The word on this card.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The revealed identity of this card, `Unrevealed` if nobody has guessed it yet.
    pub fn identity(&self) -> CellIdentity {
        self.identity
    }

    /// Whether this card has been guessed.
    pub fn is_revealed(&self) -> bool {
        self.identity != CellIdentity::Unrevealed
    }
}

/// The board: a square grid of word cards, the hidden agent placements and the record
/// of which cells have been guessed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    /// The word cards, as currently revealed.
    cards: Grid<Card>,

    /// Guessed coordinates, in the order they were guessed.
    discovered: Vec<Coordinate>,

    /// The true identity of every cell.
    placements: AgentPlacements,
}

impl Board {
    /// Build a board from rows of words and an existing set of placements. All cards start
    /// unrevealed.
    pub fn new(words: Vec<Vec<String>>, placements: AgentPlacements) -> Result<Self, BoardError> {
        if words.is_empty() {
            return Err(BoardError::Empty);
        }
        let side = words.len();
        if words.iter().any(|row| row.len() != side) {
            return Err(BoardError::NotSquare);
        }
        if placements.side() != side {
            return Err(BoardError::DimensionMismatch {
                words: side,
                placements: placements.side(),
            });
        }
        let cards = words.into_iter().flatten().map(Card::new).collect();
        let cards = Grid::from_cells(side, cards).ok_or(BoardError::NotSquare)?;
        Ok(Self {
            cards,
            discovered: Vec::new(),
            placements,
        })
    }

    /// Build a board of the given side by shuffling a flat list of words onto it and
    /// generating fresh random placements. The list must hold exactly `side * side` words.
    pub fn random_with_words(
        words: Vec<String>,
        side: usize,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        Self::random_with_words_rng(words, side, &mut seeded_rng(seed))
    }

    /// Same as [`random_with_words`][Board::random_with_words] with an explicit source of
    /// randomness.
    pub fn random_with_words_rng<R: Rng + ?Sized>(
        mut words: Vec<String>,
        side: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let expected = side.saturating_mul(side);
        if words.len() != expected {
            return Err(BoardError::SizeMismatch {
                expected,
                actual: words.len(),
            });
        }
        words.shuffle(rng);
        // The length is already checked, so only a zero side is left to reject.
        let cards = Grid::from_cells(side, words.into_iter().map(Card::new).collect())
            .ok_or(BoardError::Empty)?;
        let placements = AgentPlacements::random_with_rng(side, rng)?;
        Ok(Self {
            cards,
            discovered: Vec::new(),
            placements,
        })
    }

    /// Length of one side of the board.
    pub fn side(&self) -> usize {
        self.cards.side()
    }

    /// The word cards, as currently revealed.
    pub fn cards(&self) -> &Grid<Card> {
        &self.cards
    }

    /// Get the card at the given coordinate, or `None` if it is out of bounds.
    pub fn card(&self, coord: &Coordinate) -> Option<&Card> {
        self.cards.get(coord)
    }

    /// Guessed coordinates, oldest first.
    pub fn discovered(&self) -> &[Coordinate] {
        &self.discovered
    }

    /// The hidden agent placements.
    pub fn placements(&self) -> &AgentPlacements {
        &self.placements
    }

    /// Number of the given team's agents that have not been guessed yet.
    pub fn remaining(&self, team: Team) -> usize {
        self.placements
            .positions(team.into())
            .filter(|coord| !self.discovered.contains(coord))
            .count()
    }

    /// Reveal the card at the given coordinate, returning its true identity.
    ///
    /// Each card can only be revealed once. Nothing is modified when the reveal fails.
    pub fn reveal_card(&mut self, coord: Coordinate) -> Result<CellIdentity, RevealError> {
        if !self.cards.contains(&coord) {
            return Err(RevealError::new(CannotRevealReason::OutOfBounds, coord));
        }
        // Placements always cover the same grid as the cards.
        let identity = self.placements.key()[coord];
        let card = &mut self.cards[coord];
        if card.is_revealed() {
            return Err(RevealError::new(CannotRevealReason::AlreadyRevealed, coord));
        }
        card.identity = identity;
        self.discovered.push(coord);
        debug!(%coord, word = %card.word, ?identity, "revealed card");
        Ok(identity)
    }

    /// Evaluate the win condition.
    ///
    /// A team whose agents have all been discovered gets its own victory status, red
    /// first. Otherwise the game is over if the assassin has been discovered.
    pub fn check_game_end(&self) -> EndStatus {
        if self.remaining(Team::Red) == 0 {
            EndStatus::RedVictory
        } else if self.remaining(Team::Blue) == 0 {
            EndStatus::BlueVictory
        } else if self
            .placements
            .positions(CellIdentity::Assassin)
            .any(|coord| self.discovered.contains(coord))
        {
            EndStatus::AssassinRevealed
        } else {
            EndStatus::Ongoing
        }
    }
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    cards: Grid<Card>,
    discovered: Vec<Coordinate>,
    placements: AgentPlacements,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        if repr.cards.side() != repr.placements.side() {
            return Err(BoardError::DimensionMismatch {
                words: repr.cards.side(),
                placements: repr.placements.side(),
            });
        }
        let revealed = repr.cards.iter().filter(|(_, card)| card.is_revealed()).count();
        let unique: BTreeSet<_> = repr.discovered.iter().collect();
        let consistent = revealed == repr.discovered.len()
            && unique.len() == repr.discovered.len()
            && repr.discovered.iter().all(|coord| {
                repr.cards.get(coord).map(Card::identity) == repr.placements.identity_at(coord)
            });
        if !consistent {
            return Err(BoardError::InconsistentDiscoveries);
        }
        Ok(Self {
            cards: repr.cards,
            discovered: repr.discovered,
            placements: repr.placements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(side: usize) -> Vec<Vec<String>> {
        (0..side)
            .map(|x| (0..side).map(|y| format!("word{}", x * side + y + 1)).collect())
            .collect()
    }

    /// Board with a single red agent at (0, 0), a single blue agent at (1, 1) and the
    /// assassin at (4, 4).
    fn sparse_board() -> Board {
        let placements = AgentPlacements::new(
            5,
            vec![
                (CellIdentity::Red, vec![Coordinate::new(0, 0)]),
                (CellIdentity::Blue, vec![Coordinate::new(1, 1)]),
                (CellIdentity::Assassin, vec![Coordinate::new(4, 4)]),
                (CellIdentity::Neutral, vec![]),
            ],
            Team::Red,
        )
        .unwrap();
        Board::new(words(5), placements).unwrap()
    }

    #[test]
    fn test_new_valid() {
        let placements = AgentPlacements::random(5, Some(42)).unwrap();
        let board = Board::new(words(5), placements).unwrap();

        assert_eq!(board.side(), 5);
        assert_eq!(board.card(&Coordinate::new(0, 1)).unwrap().word(), "word2");
        assert_eq!(board.card(&Coordinate::new(4, 4)).unwrap().word(), "word25");
        assert!(board.cards().iter().all(|(_, card)| !card.is_revealed()));
        assert!(board.discovered().is_empty());
    }

    #[test]
    fn test_new_not_square() {
        let words = vec![
            vec!["word1".to_string(), "word2".to_string(), "word3".to_string()],
            vec!["word4".to_string(), "word5".to_string()],
        ];
        let placements = AgentPlacements::random(2, Some(42)).unwrap();

        let err = Board::new(words, placements).unwrap_err();
        assert_eq!(err, BoardError::NotSquare);
        assert_eq!(err.to_string(), "the words array must be square");
    }

    #[test]
    fn test_new_empty_and_mismatched() {
        let placements = AgentPlacements::random(5, Some(42)).unwrap();
        assert_eq!(
            Board::new(Vec::new(), placements.clone()),
            Err(BoardError::Empty)
        );
        assert_eq!(
            Board::new(words(3), placements),
            Err(BoardError::DimensionMismatch {
                words: 3,
                placements: 5
            })
        );
    }

    #[test]
    fn test_random_with_words() {
        let flat: Vec<String> = words(5).into_iter().flatten().collect();
        let board = Board::random_with_words(flat.clone(), 5, Some(42)).unwrap();

        assert_eq!(board.side(), 5);
        assert_eq!(board.placements().side(), 5);
        let mut placed: Vec<_> = board.cards().iter().map(|(_, c)| c.word().to_string()).collect();
        placed.sort();
        let mut expected = flat.clone();
        expected.sort();
        assert_eq!(placed, expected);

        assert_eq!(Board::random_with_words(flat, 5, Some(42)).unwrap(), board);
    }

    #[test]
    fn test_random_with_words_size_mismatch() {
        let flat: Vec<String> = words(5).into_iter().flatten().take(24).collect();
        assert_eq!(
            Board::random_with_words(flat, 5, Some(1)),
            Err(BoardError::SizeMismatch {
                expected: 25,
                actual: 24
            })
        );
    }

    #[test]
    fn test_random_with_words_zero_side() {
        assert_eq!(
            Board::random_with_words(Vec::new(), 0, Some(1)),
            Err(BoardError::Empty)
        );
    }

    #[test]
    fn test_reveal_card() {
        let mut board = Board::new(words(5), AgentPlacements::random(5, Some(42)).unwrap()).unwrap();
        let coord = Coordinate::new(0, 0);

        let identity = board.reveal_card(coord).unwrap();

        assert_eq!(board.discovered(), &[coord]);
        assert_eq!(Some(identity), board.placements().identity_at(&coord));
        assert_eq!(board.card(&coord).unwrap().identity(), identity);
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut board = sparse_board();
        let coord = Coordinate::new(1, 1);
        assert_eq!(board.reveal_card(coord), Ok(CellIdentity::Blue));

        let err = board.reveal_card(coord).unwrap_err();
        assert_eq!(err.reason(), CannotRevealReason::AlreadyRevealed);
        assert_eq!(err.coord(), coord);
        assert_eq!(board.discovered(), &[coord]);
        assert_eq!(board.card(&coord).unwrap().identity(), CellIdentity::Blue);
    }

    #[test]
    fn test_reveal_out_of_bounds() {
        let mut board = sparse_board();
        for coord in &[Coordinate::new(5, 0), Coordinate::new(0, 5), Coordinate::new(9, 9)] {
            let err = board.reveal_card(*coord).unwrap_err();
            assert_eq!(err.reason(), CannotRevealReason::OutOfBounds);
        }
        assert!(board.discovered().is_empty());
    }

    #[test]
    fn test_check_game_end_ongoing() {
        let board = Board::new(words(5), AgentPlacements::random(5, Some(42)).unwrap()).unwrap();
        assert_eq!(board.check_game_end(), EndStatus::Ongoing);
    }

    #[test]
    fn test_check_game_end_team_exhausted() {
        let mut board = sparse_board();
        board.reveal_card(Coordinate::new(0, 0)).unwrap();
        assert_eq!(board.remaining(Team::Red), 0);
        assert_eq!(board.check_game_end(), EndStatus::RedVictory);

        let mut board = sparse_board();
        board.reveal_card(Coordinate::new(1, 1)).unwrap();
        assert_eq!(board.check_game_end(), EndStatus::BlueVictory);
    }

    #[test]
    fn test_check_game_end_assassin() {
        let mut board = sparse_board();
        assert_eq!(board.reveal_card(Coordinate::new(4, 4)), Ok(CellIdentity::Assassin));
        assert_eq!(board.check_game_end(), EndStatus::AssassinRevealed);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut board = sparse_board();
        board.reveal_card(Coordinate::new(2, 3)).unwrap();
        board.reveal_card(Coordinate::new(4, 4)).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.discovered(), &[Coordinate::new(2, 3), Coordinate::new(4, 4)]);
    }

    #[test]
    fn test_deserialize_rejects_unrevealed_discovery() {
        let board = sparse_board();
        let mut value = serde_json::to_value(&board).unwrap();
        value["discovered"] = serde_json::json!([{ "x": 0, "y": 0 }]);

        assert!(serde_json::from_value::<Board>(value).is_err());
    }
}
