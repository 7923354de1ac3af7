//! Errors used by the `Board` and `AgentPlacements`.

use thiserror::Error;

use crate::board::{CellIdentity, Coordinate};

/// Error returned when a board cannot be built from the words provided.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// No words were provided.
    #[error("the words array must not be empty")]
    Empty,
    /// Some row has a different length than the number of rows.
    #[error("the words array must be square")]
    NotSquare,
    /// The flat word list does not fill the board exactly.
    #[error("expected {expected} words for the board, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// The words and the agent placements describe boards of different sizes.
    #[error("words form a {words}x{words} board but placements are for {placements}x{placements}")]
    DimensionMismatch { words: usize, placements: usize },
    /// The guessed coordinates don't agree with the revealed cards.
    #[error("discovered cells do not match the revealed cards")]
    InconsistentDiscoveries,
    /// The random placements for the board could not be generated.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Error returned when agent placements are invalid.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// The board has no cells.
    #[error("the board must have at least one cell")]
    EmptyBoard,
    /// The identity counts don't fit the board.
    #[error("cannot place {agents} agents and the assassin on a board of {cells} cells")]
    InvalidCounts { agents: usize, cells: usize },
    /// A placement lies outside the board.
    #[error("placement {0} is out of bounds")]
    OutOfBounds(Coordinate),
    /// A coordinate was assigned more than one identity.
    #[error("coordinate {0} was placed more than once")]
    DuplicateCoordinate(Coordinate),
    /// Only real identities can be placed.
    #[error("cannot place identity {0:?}")]
    HiddenIdentity(CellIdentity),
}

/// Reason why a particular card could not be revealed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotRevealReason {
    /// The cell selected was out of bounds on the board.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// The card was already revealed by an earlier guess.
    #[error("the target card was already revealed")]
    AlreadyRevealed,
}

/// Error returned when trying to reveal a card.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not reveal card {coord}: {reason}")]
pub struct RevealError {
    /// Reason why the card could not be revealed.
    reason: CannotRevealReason,

    /// The coordinates of the card.
    coord: Coordinate,
}

impl RevealError {
    /// Construct a reveal error with the given reason for the specified cell.
    pub(super) fn new(reason: CannotRevealReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the reveal failed.
    pub fn reason(&self) -> CannotRevealReason {
        self.reason
    }

    /// Get the coordinate of the card.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}
