//! The two player roles and automated implementations of them.
//!
//! A team is a [`Spymaster`] and an [`Operative`]. Spymasters are handed the whole
//! [`Game`], including the key. Operatives only ever get an [`OperativeView`]. Human
//! console players live in the console front-end. The scripted players here replay a
//! fixed sequence of moves.
use std::{collections::VecDeque, io};

use thiserror::Error;

use crate::{
    board::{Coordinate, Team},
    game::{Clue, Game, OperativeView},
};

/// Error returned by a player that cannot produce a move.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Reading the player's input failed.
    #[error("could not read player input: {0}")]
    Io(#[from] io::Error),

    /// A scripted player ran out of moves.
    #[error("{0:?} player has no moves left")]
    OutOfMoves(Team),
}

/// The player who gives clues.
pub trait Spymaster {
    /// Team this spymaster plays for.
    fn team(&self) -> Team;

    /// Called at the start of the team's turn with the full game.
    fn prefix_turn(&mut self, _game: &Game) -> Result<(), PlayerError> {
        Ok(())
    }

    /// Give the clue for this turn.
    fn offer_clue(&mut self) -> Result<Clue, PlayerError>;
}

/// The player who guesses.
pub trait Operative {
    /// Team this operative plays for.
    fn team(&self) -> Team;

    /// Called once the clue for the team's turn is known.
    fn prefix_turn(&mut self, _view: &OperativeView) -> Result<(), PlayerError> {
        Ok(())
    }

    /// Pick the next card to reveal. `None` gives up the rest of the turn.
    fn guess_word(&mut self, view: &OperativeView) -> Result<Option<Coordinate>, PlayerError>;
}

/// Spymaster that gives a predetermined list of clues.
#[derive(Debug, Clone)]
pub struct ScriptedSpymaster {
    team: Team,
    clues: VecDeque<Clue>,
}

impl ScriptedSpymaster {
    /// Create a spymaster that gives the clues in order.
    pub fn new(team: Team, clues: impl IntoIterator<Item = Clue>) -> Self {
        Self {
            team,
            clues: clues.into_iter().collect(),
        }
    }
}

impl Spymaster for ScriptedSpymaster {
    fn team(&self) -> Team {
        self.team
    }

    fn offer_clue(&mut self) -> Result<Clue, PlayerError> {
        self.clues.pop_front().ok_or(PlayerError::OutOfMoves(self.team))
    }
}

/// Operative that makes a predetermined list of guesses. A `None` entry forfeits the
/// rest of that turn.
#[derive(Debug, Clone)]
pub struct ScriptedOperative {
    team: Team,
    guesses: VecDeque<Option<Coordinate>>,
}

impl ScriptedOperative {
    /// Create an operative that makes the guesses in order.
    pub fn new(team: Team, guesses: impl IntoIterator<Item = Option<Coordinate>>) -> Self {
        Self {
            team,
            guesses: guesses.into_iter().collect(),
        }
    }
}

impl Operative for ScriptedOperative {
    fn team(&self) -> Team {
        self.team
    }

    fn guess_word(&mut self, _view: &OperativeView) -> Result<Option<Coordinate>, PlayerError> {
        self.guesses.pop_front().ok_or(PlayerError::OutOfMoves(self.team))
    }
}
