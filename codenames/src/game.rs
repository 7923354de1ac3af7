//! The turn state machine.
//!
//! A [`Game`] owns a [`Board`] and tracks whose turn it is, the clue for that turn and
//! how many guesses have been made against it. Each turn goes:
//!
//! 1. the spymaster of the active team looks at the full game and gives a [`Clue`] with
//!    [`Game::set_clue`];
//! 2. the operatives, who only get an [`OperativeView`], guess cells with
//!    [`Game::make_move`] until a guess misses, the clue's allowance is used up, or they
//!    give up with [`Game::end_turn`];
//! 3. a fresh [`CurrentTurnState`] is created for the other team.
//!
//! [`runner`] drives this loop with [`player`][crate::player] implementations.

use std::{convert::TryFrom, fmt, str::FromStr};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    board::{seeded_rng, Board, Card, CellIdentity, Coordinate, Grid, Team},
    store::WordProvider,
};

pub use self::errors::{ClueError, GameStateError, MoveError, NewGameError};

mod errors;
pub mod runner;

/// Side of the standard board.
pub const DEFAULT_BOARD_SIDE: usize = 5;

/// Whether the game is still running and if not, how it ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EndStatus {
    /// Nobody has won yet.
    Ongoing,
    /// Every red agent has been discovered.
    RedVictory,
    /// Every blue agent has been discovered.
    BlueVictory,
    /// The assassin has been discovered.
    AssassinRevealed,
}

impl EndStatus {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        self != EndStatus::Ongoing
    }

    /// The winning team, given the team that made the final guess. Revealing the assassin
    /// loses the game for the team that revealed it.
    pub fn winner(self, guessing_team: Team) -> Option<Team> {
        match self {
            EndStatus::Ongoing => None,
            EndStatus::RedVictory => Some(Team::Red),
            EndStatus::BlueVictory => Some(Team::Blue),
            EndStatus::AssassinRevealed => Some(guessing_team.opponent()),
        }
    }
}

/// Identifier of a single game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        GameId(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(GameId)
    }
}

/// A spymaster's hint: one word and the number of cards it relates to.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Clue {
    /// The hint itself.
    pub text: String,
    /// Number of cards on the board the spymaster says the hint relates to.
    pub num_guesses: u32,
}

impl Clue {
    /// Construct a clue.
    pub fn new(text: impl Into<String>, num_guesses: u32) -> Self {
        Self {
            text: text.into(),
            num_guesses,
        }
    }

    /// Maximum number of guesses the team can make with this clue: one more than the
    /// number of related cards.
    pub fn allowance(&self) -> u32 {
        self.num_guesses.saturating_add(1)
    }
}

/// State of the turn in progress. Replaced, never reused, when the turn passes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CurrentTurnState {
    /// Team whose turn it is.
    team: Team,
    /// Clue given by the team's spymaster, once given.
    clue: Option<Clue>,
    /// Number of guesses accepted so far this turn.
    guesses_made: u32,
}

impl CurrentTurnState {
    /// Fresh turn for the given team, before any clue.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            clue: None,
            guesses_made: 0,
        }
    }

    /// Team whose turn it is.
    pub fn team(&self) -> Team {
        self.team
    }

    /// The clue for this turn, if the spymaster has given one.
    pub fn clue(&self) -> Option<&Clue> {
        self.clue.as_ref()
    }

    /// Number of guesses accepted so far this turn.
    pub fn guesses_made(&self) -> u32 {
        self.guesses_made
    }
}

/// Settings for a new game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    /// Side of the square board.
    pub board_side: usize,
    /// Seed for word selection and agent placement. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    /// The standard 5x5 board, randomly seeded.
    fn default() -> Self {
        Self {
            board_side: DEFAULT_BOARD_SIDE,
            seed: None,
        }
    }
}

/// What an operative is allowed to see: the cards as revealed so far and the turn state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OperativeView {
    /// Identifier of the game being viewed.
    pub game_id: GameId,
    /// Word cards. Cards nobody has guessed show `Unrevealed`.
    pub words: Grid<Card>,
    /// The turn in progress.
    pub current_turn: CurrentTurnState,
    /// Whether the game has ended, and how.
    pub end_status: EndStatus,
}

/// A role-filtered description of the game.
#[derive(Debug, Clone)]
pub enum GameView<'a> {
    /// Spymasters see the whole game, including the key via [`Game::key`].
    Spymaster(&'a Game),
    /// Operatives only see the public state.
    Operative(OperativeView),
}

/// Result of a successful guess.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveOutcome {
    /// True identity of the guessed card.
    pub revealed: CellIdentity,
    /// Game status after the guess.
    pub end_status: EndStatus,
    /// Turn state after the guess. Belongs to the other team if the turn ended.
    pub turn: CurrentTurnState,
    /// Whether the guess ended the guessing team's turn.
    pub turn_ended: bool,
}

/// A single match.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameRepr")]
pub struct Game {
    id: GameId,
    board: Board,
    end_status: EndStatus,
    current_turn: CurrentTurnState,
}

impl Game {
    /// Set up a new game: draw words from the provider, shuffle them onto a board and place
    /// the agents at random.
    pub fn new<W: WordProvider + ?Sized>(
        words: &W,
        config: &GameConfig,
    ) -> Result<Self, NewGameError> {
        let pool = words.load_card_words()?;
        let needed = config.board_side.saturating_mul(config.board_side);
        if pool.len() < needed {
            return Err(NewGameError::NotEnoughWords {
                needed,
                available: pool.len(),
            });
        }
        let mut rng = seeded_rng(config.seed);
        let chosen = pool.choose_multiple(&mut rng, needed).cloned().collect();
        let board = Board::random_with_words_rng(chosen, config.board_side, &mut rng)?;
        Ok(Self::with_board(board))
    }

    /// Start a game on the given board. The team chosen by the board's placements moves
    /// first.
    pub fn with_board(board: Board) -> Self {
        let starting_team = board.placements().starting_team();
        let game = Self {
            id: GameId::new(),
            end_status: board.check_game_end(),
            board,
            current_turn: CurrentTurnState::new(starting_team),
        };
        info!(id = %game.id, side = game.board.side(), ?starting_team, "new game");
        game
    }

    /// Identifier of this game.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The board, with the cards revealed so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the game has ended, and how.
    pub fn end_status(&self) -> EndStatus {
        self.end_status
    }

    /// The turn in progress.
    pub fn current_turn(&self) -> &CurrentTurnState {
        &self.current_turn
    }

    /// The true identity of every cell, revealed or not. For spymaster eyes only.
    pub fn key(&self) -> &Grid<CellIdentity> {
        self.board.placements().key()
    }

    /// Describe the game for either a spymaster or an operative.
    pub fn description(&self, for_spymaster: bool) -> GameView<'_> {
        if for_spymaster {
            GameView::Spymaster(self)
        } else {
            GameView::Operative(self.operative_view())
        }
    }

    /// The publicly visible part of the game.
    pub fn operative_view(&self) -> OperativeView {
        OperativeView {
            game_id: self.id,
            words: self.board.cards().clone(),
            current_turn: self.current_turn.clone(),
            end_status: self.end_status,
        }
    }

    /// Give the clue for the current turn. Only one clue may be given per turn.
    pub fn set_clue(&mut self, clue: Clue) -> Result<(), ClueError> {
        if self.end_status.is_over() {
            return Err(ClueError::GameOver(self.end_status));
        }
        if self.current_turn.clue.is_some() {
            return Err(ClueError::AlreadyGiven);
        }
        debug!(team = ?self.current_turn.team, clue = %clue.text, count = clue.num_guesses, "clue given");
        self.current_turn.clue = Some(clue);
        Ok(())
    }

    /// Guess the card at the given coordinate for the current team.
    ///
    /// The turn ends when the card is not one of the team's own agents or when the clue's
    /// allowance has been used up. A clue must have been given first. If the guess is
    /// rejected, the game is left untouched.
    pub fn make_move(&mut self, coord: Coordinate) -> Result<MoveOutcome, MoveError> {
        if self.end_status.is_over() {
            return Err(MoveError::GameOver(self.end_status));
        }
        let allowance = self
            .current_turn
            .clue
            .as_ref()
            .map(Clue::allowance)
            .ok_or(MoveError::MissingClue)?;

        let revealed = self.board.reveal_card(coord)?;
        self.current_turn.guesses_made += 1;
        let turn_ended = revealed != CellIdentity::from(self.current_turn.team)
            || self.current_turn.guesses_made == allowance;
        if turn_ended {
            self.pass_turn();
        }

        self.end_status = self.board.check_game_end();
        if self.end_status.is_over() {
            info!(id = %self.id, status = ?self.end_status, "game over");
        }
        Ok(MoveOutcome {
            revealed,
            end_status: self.end_status,
            turn: self.current_turn.clone(),
            turn_ended,
        })
    }

    /// Give up the rest of the current turn.
    pub fn end_turn(&mut self) -> Result<(), MoveError> {
        if self.end_status.is_over() {
            return Err(MoveError::GameOver(self.end_status));
        }
        self.pass_turn();
        Ok(())
    }

    /// Replace the turn state with a fresh one for the other team.
    fn pass_turn(&mut self) {
        let next = self.current_turn.team.opponent();
        info!(
            id = %self.id,
            from = ?self.current_turn.team,
            to = ?next,
            guesses = self.current_turn.guesses_made,
            "turn passed"
        );
        self.current_turn = CurrentTurnState::new(next);
    }
}

/// Unchecked serialized form of a [`Game`].
#[derive(Deserialize)]
struct GameRepr {
    id: GameId,
    board: Board,
    end_status: EndStatus,
    current_turn: CurrentTurnState,
}

impl TryFrom<GameRepr> for Game {
    type Error = GameStateError;

    fn try_from(repr: GameRepr) -> Result<Self, Self::Error> {
        let actual = repr.board.check_game_end();
        if repr.end_status != actual {
            return Err(GameStateError::StatusMismatch {
                stored: repr.end_status,
                actual,
            });
        }
        let guesses = repr.current_turn.guesses_made;
        match &repr.current_turn.clue {
            None if guesses > 0 => return Err(GameStateError::GuessesWithoutClue(guesses)),
            // The turn is handed over as soon as the allowance is used up.
            Some(clue) if guesses >= clue.allowance() => {
                return Err(GameStateError::GuessesExceeded {
                    guesses,
                    allowance: clue.allowance(),
                })
            }
            _ => {}
        }
        Ok(Self {
            id: repr.id,
            board: repr.board,
            end_status: repr.end_status,
            current_turn: repr.current_turn,
        })
    }
}
