use thiserror::Error;

use crate::{
    board::{BoardError, RevealError},
    game::EndStatus,
    store::StoreError,
};

/// Error returned when a guess cannot be played.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MoveError {
    /// The game is already over.
    #[error("the game is already over: {0:?}")]
    GameOver(EndStatus),

    /// The spymaster has not given a clue for this turn yet.
    #[error("no clue has been given for the current turn")]
    MissingClue,

    /// The guessed card cannot be revealed.
    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] RevealError),
}

/// Error returned when a clue cannot be given.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ClueError {
    /// The game is already over.
    #[error("the game is already over: {0:?}")]
    GameOver(EndStatus),

    /// The current turn already has a clue.
    #[error("a clue was already given this turn")]
    AlreadyGiven,
}

/// Error returned when a new game cannot be set up.
#[derive(Debug, Error)]
pub enum NewGameError {
    /// The word list could not be loaded.
    #[error("could not load card words: {0}")]
    Words(#[from] StoreError),

    /// The word list is too short to fill the board.
    #[error("need {needed} card words but only {available} are available")]
    NotEnoughWords { needed: usize, available: usize },

    /// The board could not be built.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Error returned when a stored game is internally inconsistent.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum GameStateError {
    /// The stored status does not match the revealed cards.
    #[error("stored status {stored:?} does not match the board, which is {actual:?}")]
    StatusMismatch { stored: EndStatus, actual: EndStatus },

    /// Guesses were recorded for a turn without a clue.
    #[error("{0} guesses were made without a clue")]
    GuessesWithoutClue(u32),

    /// The turn has used up its clue's allowance but was not passed on.
    #[error("{guesses} guesses made against an allowance of {allowance}")]
    GuessesExceeded { guesses: u32, allowance: u32 },
}
